//! Contact Message Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type ContactMessageId = Thing;

/// Message submitted through the storefront contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<ContactMessageId>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create contact message payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageCreate {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Body of `PATCH /api/contact/:id/read`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFlagRequest {
    pub is_read: bool,
}
