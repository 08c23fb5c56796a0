//! Invoice API Handlers
//!
//! An invoice is derived from an existing order. The one-invoice-per-order
//! rule is a lookup-then-insert; the unique index on the order reference is
//! the backstop for the race the lookup leaves open.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::api::extract::AppJson;
use crate::billing;
use crate::core::ServerState;
use crate::db::models::{
    Invoice, InvoiceCreate, InvoiceItem, InvoiceStatus, InvoiceUpdate, PaymentStatus, OrderUpdate,
};
use crate::db::repository::invoice::InvoiceFilter;
use crate::db::repository::{InvoiceRepository, OrderRepository, ProductRepository};
use crate::utils::{AppError, AppResult, Message};

/// Description snapshotted when the product no longer carries one.
const DEFAULT_ITEM_DESCRIPTION: &str = "Custom size / material";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<String>,
}

/// GET /api/invoices — newest first, optional `?status=` / `?customerId=`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Invoice>>> {
    let repo = InvoiceRepository::new(state.db.clone());
    let invoices = repo
        .find_all(InvoiceFilter {
            status: query.status,
            customer_id: query.customer_id,
        })
        .await?;
    Ok(Json(invoices))
}

/// GET /api/invoices/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(state.db.clone());
    let invoice = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice not found"))?;
    Ok(Json(invoice))
}

/// POST /api/invoices — derive an invoice from an order
///
/// Lines are copied from the order's resolved items as they stand right
/// now; the subtotal is taken from the order verbatim, and the total uses
/// the tax/discount supplied with this request, not the order's own.
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<InvoiceCreate>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    if payload.order_id.trim().is_empty() {
        return Err(AppError::validation("orderId is required"));
    }

    let orders = OrderRepository::new(state.db.clone());
    let order = orders
        .find_by_id(&payload.order_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    let invoices = InvoiceRepository::new(state.db.clone());
    if invoices.find_by_order(&payload.order_id).await?.is_some() {
        return Err(AppError::validation("Invoice already exists for this order"));
    }

    // Snapshot the order lines, pulling name/description from the catalog
    let products = ProductRepository::new(state.db.clone());
    let mut items = Vec::with_capacity(order.items.len());
    for line in &order.items {
        let product = products.find_by_id(&line.product.to_string()).await?;
        let product_name = product
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let description = product
            .and_then(|p| p.description)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_ITEM_DESCRIPTION.to_string());

        items.push(InvoiceItem {
            product_name,
            description,
            quantity: line.quantity,
            price: line.price,
            subtotal: line.subtotal,
        });
    }

    let subtotal = order.subtotal;
    let total = billing::total(subtotal, payload.tax, payload.discount);

    let order_ref = order
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Order document has no id"))?;

    let invoice = invoices
        .create(Invoice {
            id: None,
            invoice_number: String::new(),
            order: order_ref,
            customer: order.customer.clone(),
            items,
            subtotal,
            tax: payload.tax,
            discount: payload.discount,
            total,
            status: InvoiceStatus::Draft,
            due_date: payload.due_date,
            paid_date: None,
            payment_method: payload.payment_method,
            created_at: None,
            updated_at: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// PUT /api/invoices/:id
///
/// When the update lands the invoice in `Paid` with a paid date, the
/// referenced order's payment status is set to `Paid` as a second,
/// independent write — best-effort, no atomicity with the invoice write.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<InvoiceUpdate>,
) -> AppResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(state.db.clone());
    let invoice = repo.update(&id, payload).await?;

    if invoice.status == InvoiceStatus::Paid && invoice.paid_date.is_some() {
        let orders = OrderRepository::new(state.db.clone());
        let patch = OrderUpdate {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        if let Err(e) = orders.update(&invoice.order.to_string(), patch).await {
            tracing::warn!(
                invoice = %invoice.invoice_number,
                error = %e,
                "Failed to mark order paid after invoice update"
            );
        }
    }

    Ok(Json(invoice))
}

/// DELETE /api/invoices/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let repo = InvoiceRepository::new(state.db.clone());
    repo.delete(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice not found"))?;
    Ok(Json(Message::deleted("Invoice")))
}
