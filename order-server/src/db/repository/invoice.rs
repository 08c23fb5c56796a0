//! Invoice Repository

use super::{BaseRepository, RepoError, RepoResult, ref_string, strip_table_prefix};
use crate::billing;
use crate::db::models::{Invoice, InvoiceStatus, InvoiceUpdate};
use chrono::Utc;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "invoices";

/// Optional list filters, straight from the query string.
#[derive(Debug, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<String>,
}

#[derive(Clone)]
pub struct InvoiceRepository {
    base: BaseRepository,
}

impl InvoiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All invoices, newest first, with optional status / customer filters.
    pub async fn find_all(&self, filter: InvoiceFilter) -> RepoResult<Vec<Invoice>> {
        let mut sql = String::from("SELECT * FROM invoices");
        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        }
        if filter.customer_id.is_some() {
            clauses.push("customer = $customer");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY createdAt DESC");

        let mut query = self.base.db().query(sql);
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.bind(("customer", ref_string("customers", &customer_id)));
        }

        Ok(query.await?.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let invoice: Option<Invoice> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(invoice)
    }

    /// The invoice (if any) referencing the given order. This is the
    /// application-level half of the "one invoice per order" rule; the
    /// unique index on the `order` field is the storage-level half.
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Option<Invoice>> {
        let invoices: Vec<Invoice> = self
            .base
            .db()
            .query("SELECT * FROM invoices WHERE `order` = $order LIMIT 1")
            .bind(("order", ref_string("orders", order_id)))
            .await?
            .take(0)?;
        Ok(invoices.into_iter().next())
    }

    async fn count(&self) -> RepoResult<u64> {
        #[derive(Deserialize)]
        struct CountRow {
            count: i64,
        }

        let row: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM invoices GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0) as u64)
    }

    /// Persist a new invoice. The number prefers the counted form; if the
    /// count query fails it falls back to a random suffix rather than
    /// failing the write.
    pub async fn create(&self, mut invoice: Invoice) -> RepoResult<Invoice> {
        if invoice.invoice_number.is_empty() {
            invoice.invoice_number = match self.count().await {
                Ok(count) => billing::invoice_number(Some(count)),
                Err(e) => {
                    tracing::warn!(error = %e, "Invoice count failed, using random suffix");
                    billing::invoice_number(None)
                }
            };
        }
        let now = Utc::now();
        invoice.created_at = Some(now);
        invoice.updated_at = Some(now);

        let created: Option<Invoice> = self.base.db().create(TABLE).content(invoice).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create invoice".to_string()))
    }

    pub async fn update(&self, id: &str, data: InvoiceUpdate) -> RepoResult<Invoice> {
        self.base
            .merge(TABLE, id, &data)
            .await?
            .ok_or_else(|| RepoError::NotFound("Invoice not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<Invoice>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Invoice> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted)
    }
}
