//! Feedback Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Feedback, FeedbackCreate, FeedbackUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "feedback";

/// Cap for the public "customer photos" strip.
const PHOTOS_LIMIT: usize = 20;

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Feedback>> {
        let feedbacks: Vec<Feedback> = self
            .base
            .db()
            .query("SELECT * FROM feedback ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(feedbacks)
    }

    /// Visible entries that carry an image, newest first, capped.
    pub async fn find_photos(&self) -> RepoResult<Vec<Feedback>> {
        let feedbacks: Vec<Feedback> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM feedback \
                 WHERE isVisible = true AND imageUrl != NONE AND imageUrl != NULL AND imageUrl != '' \
                 ORDER BY createdAt DESC LIMIT {PHOTOS_LIMIT}"
            ))
            .await?
            .take(0)?;
        Ok(feedbacks)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Feedback>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let feedback: Option<Feedback> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(feedback)
    }

    pub async fn create(&self, data: FeedbackCreate) -> RepoResult<Feedback> {
        let now = Utc::now();
        let feedback = Feedback {
            id: None,
            name: data.name,
            product_name: data.product_name,
            email: data.email,
            phone: data.phone,
            rating: data.rating,
            feedback: data.feedback,
            image_url: data.image_url,
            admin_reply: None,
            replied_at: None,
            is_visible: true,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Feedback> = self.base.db().create(TABLE).content(feedback).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create feedback".to_string()))
    }

    pub async fn update(&self, id: &str, data: FeedbackUpdate) -> RepoResult<Feedback> {
        self.base
            .merge(TABLE, id, &data)
            .await?
            .ok_or_else(|| RepoError::NotFound("Feedback not found".to_string()))
    }
}
