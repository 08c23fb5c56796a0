//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use crate::db::repository::CustomerRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, Message};

/// GET /api/customers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customers = repo.find_all().await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;
    Ok(Json(customer))
}

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CustomerCreate>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.update(&id, payload).await?;
    Ok(Json(customer))
}

/// DELETE /api/customers/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let repo = CustomerRepository::new(state.db.clone());
    repo.delete(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;
    Ok(Json(Message::deleted("Customer")))
}
