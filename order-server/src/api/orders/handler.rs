//! Order API Handlers
//!
//! Creation is the only derivation in the module: line prices are
//! snapshotted from the catalog, totals computed once, and the payment
//! status derived from the advance. Updates are plain field replacement.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::extract::AppJson;
use crate::billing;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderItem, OrderStatus, OrderUpdate};
use crate::db::repository::order::OrderFilter;
use crate::db::repository::{OrderRepository, ProductRepository, customer, make_thing, product};
use crate::utils::{AppError, AppResult, Message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<String>,
}

/// GET /api/orders — newest first, optional `?status=` / `?customerId=`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_all(OrderFilter {
            status: query.status,
            customer_id: query.customer_id,
        })
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    Ok(Json(order))
}

/// POST /api/orders
///
/// Resolves every requested product before anything is written; a missing
/// product aborts the whole request with 404, so there is never a
/// partially-priced order in the store.
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    if payload.customer.trim().is_empty() {
        return Err(AppError::validation("customer is required"));
    }

    let products = ProductRepository::new(state.db.clone());

    let mut items = Vec::with_capacity(payload.items.len());
    let mut subtotal_dec = Decimal::ZERO;

    for requested in &payload.items {
        if requested.quantity < 1 {
            return Err(AppError::validation("quantity must be at least 1"));
        }

        let product = products
            .find_by_id(&requested.product)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Product {} not found", requested.product))
            })?;

        // Snapshot the current price into the line; later catalog changes
        // never touch existing orders. Stock is neither checked nor
        // decremented — the system is order-only.
        let line_subtotal = billing::line_subtotal(product.price, requested.quantity);
        subtotal_dec += billing::to_decimal(line_subtotal);

        items.push(OrderItem {
            product: make_thing(product::TABLE, &requested.product),
            quantity: requested.quantity,
            price: product.price,
            subtotal: line_subtotal,
        });
    }

    let subtotal = billing::to_f64(subtotal_dec);
    let total = billing::total(subtotal, payload.tax, payload.discount);
    let payment_status =
        billing::derive_payment_status(payload.advance_payment, total, payload.payment_status);

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(Order {
            id: None,
            order_number: String::new(),
            customer: make_thing(customer::TABLE, &payload.customer),
            items,
            subtotal,
            tax: payload.tax,
            discount: payload.discount,
            total,
            status: OrderStatus::Pending,
            payment_status,
            advance_payment: payload.advance_payment,
            delivery_address: payload.delivery_address,
            notes: payload.notes,
            created_at: None,
            updated_at: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/orders/:id — direct field replacement, totals not re-validated
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update(&id, payload).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let repo = OrderRepository::new(state.db.clone());
    repo.delete(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    Ok(Json(Message::deleted("Order")))
}
