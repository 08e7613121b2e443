//! Database Models
//!
//! Persisted entity structs plus their create/update payloads.
//! Record ids serialize as `table:key` strings in API JSON.

pub mod category;
pub mod field_staff;
pub mod location;
pub mod review;
pub mod serde_helpers;
pub mod settings;

pub use category::{FaqItem, ProductCategory, ProductCategoryCreate, ProductCategoryUpdate};
pub use field_staff::{FieldStaff, FieldStaffCreate, FieldStaffUpdate};
pub use location::{Location, LocationCreate, LocationUpdate};
pub use review::{Review, ReviewCreate, ReviewUpdate};
pub use settings::{SiteSettings, SiteSettingsUpdate};
