//! Feedback Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type FeedbackId = Thing;

fn default_true() -> bool {
    true
}

/// Customer feedback entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<FeedbackId>,
    pub name: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub rating: i32,
    pub feedback: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub admin_reply: Option<String>,
    #[serde(default)]
    pub replied_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create feedback payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreate {
    pub name: String,
    pub product_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rating: i32,
    pub feedback: String,
    pub image_url: Option<String>,
}

/// Update feedback payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

/// Body of `POST /api/feedback/:id/reply`
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
}
