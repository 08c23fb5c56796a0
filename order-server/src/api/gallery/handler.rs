//! Gallery API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use http::StatusCode;
use serde::Serialize;

use crate::api::extract::AppJson;
use crate::api::upload;
use crate::core::ServerState;
use crate::db::models::{GalleryImage, GalleryImageCreate, GalleryImageUpdate};
use crate::db::repository::GalleryImageRepository;
use crate::utils::validation::{MAX_URL_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, Message};

/// GET /api/gallery — sorted by the manual sort key
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<GalleryImage>>> {
    let repo = GalleryImageRepository::new(state.db.clone());
    let images = repo.find_all().await?;
    Ok(Json(images))
}

/// GET /api/gallery/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<GalleryImage>> {
    let repo = GalleryImageRepository::new(state.db.clone());
    let image = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Gallery image not found"))?;
    Ok(Json(image))
}

/// POST /api/gallery — register an image by URL
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<GalleryImageCreate>,
) -> AppResult<(StatusCode, Json<GalleryImage>)> {
    let url = payload
        .image_url
        .clone()
        .or_else(|| payload.image.clone())
        .unwrap_or_default();
    validate_required_text(&url, "imageUrl", MAX_URL_LEN)?;

    let repo = GalleryImageRepository::new(state.db.clone());
    let image = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// PUT /api/gallery/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<GalleryImageUpdate>,
) -> AppResult<Json<GalleryImage>> {
    let repo = GalleryImageRepository::new(state.db.clone());
    let image = repo.update(&id, payload).await?;
    Ok(Json(image))
}

/// DELETE /api/gallery/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let repo = GalleryImageRepository::new(state.db.clone());
    repo.delete(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Gallery image not found"))?;
    Ok(Json(Message::deleted("Gallery image")))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

/// POST /api/gallery/upload — multipart upload from a local file
pub async fn upload(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let form = upload::read_form(multipart, "image").await?;
    let image = form
        .image
        .ok_or_else(|| AppError::validation("No file uploaded"))?;

    let image_url = upload::store_image(&state, "gallery", &image)?;
    Ok((StatusCode::CREATED, Json(UploadResponse { image_url })))
}
