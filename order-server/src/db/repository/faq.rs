//! FAQ Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Faq, FaqCreate, FaqUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "faqs";

#[derive(Clone)]
pub struct FaqRepository {
    base: BaseRepository,
}

impl FaqRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Sorted by the manual sort key; `include_inactive` is the admin view.
    pub async fn find_all(&self, include_inactive: bool) -> RepoResult<Vec<Faq>> {
        let sql = if include_inactive {
            "SELECT * FROM faqs ORDER BY `order` ASC, createdAt DESC"
        } else {
            "SELECT * FROM faqs WHERE isActive = true ORDER BY `order` ASC, createdAt DESC"
        };
        let faqs: Vec<Faq> = self.base.db().query(sql).await?.take(0)?;
        Ok(faqs)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Faq>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let faq: Option<Faq> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(faq)
    }

    pub async fn create(&self, data: FaqCreate) -> RepoResult<Faq> {
        let now = Utc::now();
        let faq = Faq {
            id: None,
            question: data.question,
            answer: data.answer,
            order: data.order.unwrap_or(0),
            is_active: data.is_active.unwrap_or(true),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Faq> = self.base.db().create(TABLE).content(faq).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create FAQ".to_string()))
    }

    pub async fn update(&self, id: &str, data: FaqUpdate) -> RepoResult<Faq> {
        self.base
            .merge(TABLE, id, &data)
            .await?
            .ok_or_else(|| RepoError::NotFound("FAQ not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<Faq>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Faq> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted)
    }
}
