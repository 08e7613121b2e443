//! Site Settings Model (Singleton)
//!
//! Company-wide values for the public pages; one record per deployment.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Site settings entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Feeds the `{region}` template placeholder ("Oberfranken")
    pub region_label: String,
    pub updated_at: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: None,
            company_name: String::new(),
            phone: None,
            email: None,
            website: None,
            region_label: String::new(),
            updated_at: None,
        }
    }
}

/// Update site settings payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_label: Option<String>,
}
