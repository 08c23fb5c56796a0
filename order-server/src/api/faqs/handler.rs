//! FAQ API Handlers
//!
//! `{"data": ...}`-wrapped responses, like feedback and contact.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::models::{Faq, FaqCreate, FaqUpdate};
use crate::db::repository::FaqRepository;
use crate::utils::validation::{MAX_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, Data, Message};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `?all=true` includes inactive entries (admin view)
    pub all: Option<String>,
}

/// GET /api/faqs — active entries only, unless `?all=true`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Data<Vec<Faq>>>> {
    let include_inactive = query.all.as_deref() == Some("true");
    let repo = FaqRepository::new(state.db.clone());
    let faqs = repo.find_all(include_inactive).await?;
    Ok(Json(Data::new(faqs)))
}

/// GET /api/faqs/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Data<Faq>>> {
    let repo = FaqRepository::new(state.db.clone());
    let faq = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("FAQ not found"))?;
    Ok(Json(Data::new(faq)))
}

/// POST /api/faqs
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<FaqCreate>,
) -> AppResult<(StatusCode, Json<Data<Faq>>)> {
    validate_required_text(&payload.question, "question", MAX_TEXT_LEN)?;
    validate_required_text(&payload.answer, "answer", MAX_TEXT_LEN)?;

    let repo = FaqRepository::new(state.db.clone());
    let faq = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(Data::new(faq))))
}

/// PUT /api/faqs/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<FaqUpdate>,
) -> AppResult<Json<Data<Faq>>> {
    let repo = FaqRepository::new(state.db.clone());
    let faq = repo.update(&id, payload).await?;
    Ok(Json(Data::new(faq)))
}

/// DELETE /api/faqs/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let repo = FaqRepository::new(state.db.clone());
    repo.delete(&id)
        .await?
        .ok_or_else(|| AppError::not_found("FAQ not found"))?;
    Ok(Json(Message::deleted("FAQ")))
}
