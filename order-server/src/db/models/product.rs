//! Product Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type ProductId = Thing;

/// Catalog categories. The set is fixed; anything else is a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    Chair,
    Table,
    Sofa,
    Bed,
    Cabinet,
    Desk,
    Other,
}

/// Physical dimensions in centimetres. All parts optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price: f64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create product payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price: f64,
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub material: Option<String>,
    pub color: Option<String>,
}

/// Update product payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
