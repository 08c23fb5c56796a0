//! Gallery Image Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{GalleryImage, GalleryImageCreate, GalleryImageUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "gallery_images";

#[derive(Clone)]
pub struct GalleryImageRepository {
    base: BaseRepository,
}

impl GalleryImageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Sorted by the manual sort key, newest first within equal keys.
    pub async fn find_all(&self) -> RepoResult<Vec<GalleryImage>> {
        let images: Vec<GalleryImage> = self
            .base
            .db()
            .query("SELECT * FROM gallery_images ORDER BY `order` ASC, createdAt DESC")
            .await?
            .take(0)?;
        Ok(images)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<GalleryImage>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let image: Option<GalleryImage> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(image)
    }

    pub async fn create(&self, data: GalleryImageCreate) -> RepoResult<GalleryImage> {
        // `image` is the legacy payload key for `imageUrl`
        let url = data.image_url.or(data.image).unwrap_or_default();

        let now = Utc::now();
        let image = GalleryImage {
            id: None,
            title: data.title.unwrap_or_default(),
            image_url: url,
            category: data.category.unwrap_or_default(),
            order: data.order.unwrap_or(0),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<GalleryImage> = self.base.db().create(TABLE).content(image).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create gallery image".to_string()))
    }

    pub async fn update(&self, id: &str, data: GalleryImageUpdate) -> RepoResult<GalleryImage> {
        self.base
            .merge(TABLE, id, &data)
            .await?
            .ok_or_else(|| RepoError::NotFound("Gallery image not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<GalleryImage>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<GalleryImage> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted)
    }
}
