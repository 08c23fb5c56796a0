//! Contact Message API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::models::{ContactMessage, ContactMessageCreate, ReadFlagRequest};
use crate::db::repository::ContactMessageRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppResult, Data};

/// GET /api/contact — latest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Data<Vec<ContactMessage>>>> {
    let repo = ContactMessageRepository::new(state.db.clone());
    let messages = repo.find_all().await?;
    Ok(Json(Data::new(messages)))
}

/// POST /api/contact
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ContactMessageCreate>,
) -> AppResult<(StatusCode, Json<Data<ContactMessage>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.subject, "subject", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.message, "message", MAX_TEXT_LEN)?;

    let repo = ContactMessageRepository::new(state.db.clone());
    let message = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(Data::new(message))))
}

/// PATCH /api/contact/:id/read — set the flag to the supplied value;
/// repeating the same call is a no-op
pub async fn set_read(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ReadFlagRequest>,
) -> AppResult<Json<Data<ContactMessage>>> {
    let repo = ContactMessageRepository::new(state.db.clone());
    let message = repo.set_read(&id, payload.is_read).await?;
    Ok(Json(Data::new(message)))
}
