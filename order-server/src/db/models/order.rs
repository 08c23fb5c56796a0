//! Order Model
//!
//! Orders snapshot the product price into each line at creation time;
//! later price changes never touch existing orders. `order_number` is
//! generated once by the repository and is immutable afterwards (the
//! update payload simply has no such field).

use super::customer::Address;
use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type OrderId = Thing;

/// Order fulfilment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Payment status, derived at creation from the advance payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Partial,
    Refunded,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// One resolved line: product reference plus the price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(with = "serde_thing")]
    pub product: Thing,
    pub quantity: i32,
    pub price: f64,
    pub subtotal: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub order_number: String,
    #[serde(with = "serde_thing")]
    pub customer: Thing,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub advance_payment: f64,
    #[serde(default)]
    pub delivery_address: Option<Address>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One requested line in an order creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    /// Product id, `"products:<id>"` or bare
    pub product: String,
    pub quantity: i32,
}

/// Create order payload. Totals and payment status are derived server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    /// Customer id, `"customers:<id>"` or bare
    pub customer: String,
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub advance_payment: f64,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_address: Option<Address>,
    pub notes: Option<String>,
}

/// Update order payload: direct field replacement, nothing recomputed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
