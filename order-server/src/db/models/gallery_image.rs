//! Gallery Image Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type GalleryImageId = Thing;

/// Gallery categories; the empty string means "uncategorized" and is the
/// default for legacy entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GalleryCategory {
    #[serde(rename = "")]
    #[default]
    Unset,
    Sofa,
    Bed,
    Chair,
    Table,
    Cabinet,
    Desk,
    Wardrobe,
    Other,
}

/// Gallery image entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<GalleryImageId>,
    #[serde(default)]
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub category: GalleryCategory,
    /// Sort key, ascending
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create gallery image payload. `image` is the legacy alias for
/// `imageUrl`; either key is accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageCreate {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<String>,
    pub category: Option<GalleryCategory>,
    pub order: Option<i32>,
}

/// Update gallery image payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GalleryCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}
