//! Invoice Model
//!
//! An invoice is a point-in-time snapshot of an order: line data is copied,
//! the subtotal is taken verbatim from the order, and the total is computed
//! from the tax/discount supplied with the invoice request (independent of
//! whatever tax/discount the order itself carries).

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type InvoiceId = Thing;

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "UPI")]
    Upi,
    Other,
}

/// One invoice line: a denormalized copy of an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_name: String,
    pub description: String,
    pub quantity: i32,
    pub price: f64,
    pub subtotal: f64,
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<InvoiceId>,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(with = "serde_thing")]
    pub order: Thing,
    #[serde(with = "serde_thing")]
    pub customer: Thing,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create invoice payload: the order to derive from plus invoice-level
/// tax and discount.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreate {
    /// Order id, `"orders:<id>"` or bare
    pub order_id: String,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
}

/// Update invoice payload: direct field replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<InvoiceItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}
