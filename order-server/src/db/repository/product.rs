//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Product, ProductCategory, ProductCreate, ProductUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "products";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All products, newest first, optionally filtered by category.
    pub async fn find_all(&self, category: Option<ProductCategory>) -> RepoResult<Vec<Product>> {
        let mut sql = String::from("SELECT * FROM products");
        if category.is_some() {
            sql.push_str(" WHERE category = $category");
        }
        sql.push_str(" ORDER BY createdAt DESC");

        let mut query = self.base.db().query(sql);
        if let Some(cat) = category {
            query = query.bind(("category", cat));
        }

        Ok(query.await?.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            category: data.category,
            price: data.price,
            stock: data.stock.unwrap_or(0),
            image: data.image.unwrap_or_default(),
            dimensions: data.dimensions,
            material: data.material,
            color: data.color,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        self.base
            .merge(TABLE, id, &data)
            .await?
            .ok_or_else(|| RepoError::NotFound("Product not found".to_string()))
    }

    /// Returns the deleted document, `None` if it never existed.
    pub async fn delete(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Product> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted)
    }
}
