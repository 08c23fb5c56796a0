//! Contact Message Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{ContactMessage, ContactMessageCreate};
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "contact_messages";

#[derive(Clone)]
pub struct ContactMessageRepository {
    base: BaseRepository,
}

impl ContactMessageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<ContactMessage>> {
        let messages: Vec<ContactMessage> = self
            .base
            .db()
            .query("SELECT * FROM contact_messages ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(messages)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ContactMessage>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let message: Option<ContactMessage> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(message)
    }

    pub async fn create(&self, data: ContactMessageCreate) -> RepoResult<ContactMessage> {
        let now = Utc::now();
        let message = ContactMessage {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            subject: data.subject,
            message: data.message,
            is_read: false,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<ContactMessage> =
            self.base.db().create(TABLE).content(message).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create contact message".to_string()))
    }

    /// Set the read flag; idempotent under repeated identical calls.
    pub async fn set_read(&self, id: &str, is_read: bool) -> RepoResult<ContactMessage> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ReadPatch {
            is_read: bool,
        }

        self.base
            .merge(TABLE, id, &ReadPatch { is_read })
            .await?
            .ok_or_else(|| RepoError::NotFound("Message not found".to_string()))
    }
}
