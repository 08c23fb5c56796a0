//! FAQ Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type FaqId = Thing;

fn default_true() -> bool {
    true
}

/// FAQ entry. Inactive entries are hidden from the public listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<FaqId>,
    pub question: String,
    pub answer: String,
    /// Sort key, ascending
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create FAQ payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqCreate {
    pub question: String,
    pub answer: String,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Update FAQ payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
