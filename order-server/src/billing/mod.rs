//! Billing: identifier generation and money arithmetic
//!
//! Order and invoice totals are computed through `rust_decimal` and rounded
//! to two places before going back to `f64` on the wire, so repeated binary
//! float sums never leak into stored amounts.
//!
//! Identifiers are human-readable and only probabilistically unique
//! (millisecond timestamp plus a small suffix); the unique index at the
//! store is the hard backstop, and a collision surfaces as a write failure.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::db::models::PaymentStatus;


/// Convert an f64 amount to Decimal, rounded to 2 decimal places.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(2)
}

/// Convert a Decimal back to an f64 amount, rounded to 2 decimal places.
pub fn to_f64(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or(0.0)
}

/// Price snapshot × quantity for one order line.
pub fn line_subtotal(price: f64, quantity: i32) -> f64 {
    to_f64(to_decimal(price) * Decimal::from(quantity))
}

/// subtotal + tax − discount
pub fn total(subtotal: f64, tax: f64, discount: f64) -> f64 {
    to_f64(to_decimal(subtotal) + to_decimal(tax) - to_decimal(discount))
}

/// Payment status at order creation:
/// `Paid` when the advance covers the total, `Partial` when some money is
/// down, otherwise whatever the caller asked for (default `Pending`).
pub fn derive_payment_status(
    advance_payment: f64,
    total: f64,
    requested: Option<PaymentStatus>,
) -> PaymentStatus {
    if advance_payment >= total {
        PaymentStatus::Paid
    } else if advance_payment > 0.0 {
        PaymentStatus::Partial
    } else {
        requested.unwrap_or(PaymentStatus::Pending)
    }
}

/// `ORD-<epoch millis>-<random 0..999>`
pub fn order_number() -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random = rand::thread_rng().gen_range(0..1000);
    format!("ORD-{timestamp}-{random}")
}

/// `INV-<epoch millis>-<count+1>`, or a random suffix when the caller
/// could not count existing invoices.
pub fn invoice_number(count: Option<u64>) -> String {
    let timestamp = Utc::now().timestamp_millis();
    match count {
        Some(count) => format!("INV-{timestamp}-{}", count + 1),
        None => {
            let random = rand::thread_rng().gen_range(0..1000);
            format!("INV-{timestamp}-{random}")
        }
    }
}
