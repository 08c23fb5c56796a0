//! Feedback API Handlers
//!
//! Responses here are wrapped as `{"data": ...}`, unlike the catalog and
//! billing routes — an upstream inconsistency that is kept as-is.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use chrono::Utc;
use http::StatusCode;

use crate::api::extract::AppJson;
use crate::api::upload;
use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate, FeedbackUpdate, ReplyRequest};
use crate::db::repository::FeedbackRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, validate_rating, validate_required_text,
};
use crate::utils::{AppError, AppResult, Data};

fn validate_create(data: &FeedbackCreate) -> AppResult<()> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.feedback, "feedback", MAX_TEXT_LEN)?;
    validate_rating(data.rating)?;
    Ok(())
}

/// GET /api/feedback — everything, for the admin console
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Data<Vec<Feedback>>>> {
    let repo = FeedbackRepository::new(state.db.clone());
    let feedbacks = repo.find_all().await?;
    Ok(Json(Data::new(feedbacks)))
}

/// GET /api/feedback/photos — visible entries with images, for the
/// storefront customer-photos strip
pub async fn photos(State(state): State<ServerState>) -> AppResult<Json<Data<Vec<Feedback>>>> {
    let repo = FeedbackRepository::new(state.db.clone());
    let feedbacks = repo.find_photos().await?;
    Ok(Json(Data::new(feedbacks)))
}

/// POST /api/feedback — plain JSON submission
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<FeedbackCreate>,
) -> AppResult<(StatusCode, Json<Data<Feedback>>)> {
    validate_create(&payload)?;

    let repo = FeedbackRepository::new(state.db.clone());
    let feedback = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(Data::new(feedback))))
}

/// POST /api/feedback/with-image — multipart submission with a photo
///
/// The image is validated in memory and only stored once it passes; a bad
/// upload rejects the whole submission without writing anything.
pub async fn create_with_image(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Data<Feedback>>)> {
    let form = upload::read_form(multipart, "image").await?;

    let field = |key: &str| form.fields.get(key).cloned().filter(|v| !v.is_empty());

    let payload = FeedbackCreate {
        name: field("name").unwrap_or_default(),
        product_name: field("productName"),
        email: field("email"),
        phone: field("phone"),
        rating: field("rating")
            .and_then(|r| r.parse().ok())
            .unwrap_or(5),
        feedback: field("feedback").unwrap_or_default(),
        image_url: None,
    };
    validate_create(&payload)?;

    let image_url = match form.image {
        Some(image) => Some(upload::store_image(&state, "feedback", &image)?),
        None => None,
    };

    let repo = FeedbackRepository::new(state.db.clone());
    let feedback = repo
        .create(FeedbackCreate {
            image_url,
            ..payload
        })
        .await?;
    Ok((StatusCode::CREATED, Json(Data::new(feedback))))
}

/// PUT /api/feedback/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<FeedbackUpdate>,
) -> AppResult<Json<Data<Feedback>>> {
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
    }

    let repo = FeedbackRepository::new(state.db.clone());
    let feedback = repo.update(&id, payload).await?;
    Ok(Json(Data::new(feedback)))
}

/// POST /api/feedback/:id/reply — set the admin reply and its timestamp
pub async fn reply(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ReplyRequest>,
) -> AppResult<Json<Data<Feedback>>> {
    let repo = FeedbackRepository::new(state.db.clone());
    let feedback = repo
        .update(
            &id,
            FeedbackUpdate {
                admin_reply: Some(payload.reply),
                replied_at: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(Data::new(feedback)))
}

/// PATCH /api/feedback/:id/visibility — flip the flag, any state to any state
pub async fn toggle_visibility(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Data<Feedback>>> {
    let repo = FeedbackRepository::new(state.db.clone());
    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Feedback not found"))?;

    let feedback = repo
        .update(
            &id,
            FeedbackUpdate {
                is_visible: Some(!current.is_visible),
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(Data::new(feedback)))
}
