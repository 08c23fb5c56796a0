//! Database Module
//!
//! Embedded SurrealDB storage. The store is opened lazily against a
//! `Surreal::init()` handle so the HTTP server can come up (and answer 503
//! on `/api/*`) even when the store fails to open.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

pub const NAMESPACE: &str = "oakline";
pub const DATABASE: &str = "orders";

/// Unique indexes are the only storage-level constraints: order and invoice
/// numbers must be unique, and at most one invoice may reference an order.
/// A generation collision therefore surfaces as a write failure, never as a
/// retry.
const SCHEMA: &str = "
    DEFINE INDEX IF NOT EXISTS uniq_order_number ON TABLE orders FIELDS orderNumber UNIQUE;
    DEFINE INDEX IF NOT EXISTS uniq_invoice_number ON TABLE invoices FIELDS invoiceNumber UNIQUE;
    DEFINE INDEX IF NOT EXISTS uniq_invoice_order ON TABLE invoices FIELDS `order` UNIQUE;
";

/// Database service — connection and schema bootstrap.
pub struct DbService;

impl DbService {
    /// Connect the handle to an on-disk RocksDB store and apply the schema.
    pub async fn connect(db: &Surreal<Db>, path: &Path) -> Result<(), AppError> {
        db.connect::<RocksDb>(path.to_path_buf())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::setup(db).await?;
        tracing::info!(path = %path.display(), "Database connection established");
        Ok(())
    }

    /// Connect the handle to an in-memory store (tests).
    pub async fn connect_memory(db: &Surreal<Db>) -> Result<(), AppError> {
        db.connect::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::setup(db).await
    }

    async fn setup(db: &Surreal<Db>) -> Result<(), AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        Ok(())
    }
}
