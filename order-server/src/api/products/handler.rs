//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCategory, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_non_negative, validate_required_text};
use crate::utils::{AppError, AppResult, Message};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<ProductCategory>,
}

/// GET /api/products — full catalog, optional `?category=` filter
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all(query.category).await?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_non_negative(payload.price, "price")?;
    if let Some(stock) = payload.stock
        && stock < 0
    {
        return Err(AppError::validation("stock must not be negative"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price {
        validate_non_negative(price, "price")?;
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(Message::deleted("Product")))
}
