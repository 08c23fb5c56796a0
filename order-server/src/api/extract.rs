//! Request extractors
//!
//! `AppJson` is `axum::Json` with the rejection folded into the standard
//! `{"error": ...}` body, so a malformed payload answers 400 in the same
//! shape as every other validation failure.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::AppError;

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}
