//! SEO core: slug generation and template rendering for review pages.

pub mod slug;
pub mod template;

pub use slug::{
    SlugSource, SlugStore, base_slug, ensure_unique, normalize, should_regenerate, slug_year,
};
pub use template::{CustomerRef, ReviewContext, render};
