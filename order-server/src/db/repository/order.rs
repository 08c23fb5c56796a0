//! Order Repository
//!
//! `create` assigns the order number exactly once, when the incoming
//! document has none; updates go through MERGE and can never touch it.

use super::{BaseRepository, RepoError, RepoResult, ref_string, strip_table_prefix};
use crate::billing;
use crate::db::models::{Order, OrderStatus, OrderUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "orders";

/// Optional list filters, straight from the query string.
#[derive(Debug, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<String>,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, newest first, with optional status / customer filters.
    pub async fn find_all(&self, filter: OrderFilter) -> RepoResult<Vec<Order>> {
        let mut sql = String::from("SELECT * FROM orders");
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

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Persist a new order. The number is generated here, only when the
    /// document carries none; the unique index is the backstop for the
    /// (unlikely) collision, which surfaces as a plain write failure.
    pub async fn create(&self, mut order: Order) -> RepoResult<Order> {
        if order.order_number.is_empty() {
            order.order_number = billing::order_number();
        }
        let now = Utc::now();
        order.created_at = Some(now);
        order.updated_at = Some(now);

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        self.base
            .merge(TABLE, id, &data)
            .await?
            .ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Order> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted)
    }
}
