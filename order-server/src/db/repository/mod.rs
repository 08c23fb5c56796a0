//! Repository Module
//!
//! Per-collection CRUD over SurrealDB. Cross-collection references are
//! stored as `"table:id"` strings (the same form they take on the wire),
//! so filter queries bind plain strings.

pub mod contact_message;
pub mod customer;
pub mod faq;
pub mod feedback;
pub mod gallery_image;
pub mod invoice;
pub mod order;
pub mod product;

// Re-exports
pub use contact_message::ContactMessageRepository;
pub use customer::CustomerRepository;
pub use faq::FaqRepository;
pub use feedback::FeedbackRepository;
pub use gallery_image::GalleryImageRepository;
pub use invoice::InvoiceRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(format!("Serialization error: {err}"))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Accept both `"table:id"` and bare `"id"` forms from clients.
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Canonical `"table:id"` string for a reference, whatever form the caller
/// supplied.
pub fn ref_string(table: &str, id: &str) -> String {
    format!("{table}:{}", strip_table_prefix(table, id))
}

/// Build a `Thing` reference from either id form.
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), strip_table_prefix(table, id).to_string()))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// `UPDATE <table>:<id> MERGE $data` with `updatedAt` stamped in, then
    /// return the refreshed document. `None` means the record is missing.
    pub async fn merge<T, U>(&self, table: &'static str, id: &str, data: &U) -> RepoResult<Option<T>>
    where
        T: serde::de::DeserializeOwned,
        U: serde::Serialize,
    {
        let pure_id = strip_table_prefix(table, id).to_string();

        let existing: Option<serde_json::Value> =
            self.db.select((table, pure_id.as_str())).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut patch = serde_json::to_value(data)?;
        patch["updatedAt"] = serde_json::json!(chrono::Utc::now());

        self.db
            .query("UPDATE type::thing($tb, $id) MERGE $data")
            .bind(("tb", table))
            .bind(("id", pure_id.clone()))
            .bind(("data", patch))
            .await?
            .check()?;

        let updated: Option<T> = self.db.select((table, pure_id.as_str())).await?;
        Ok(updated)
    }
}
