//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "customers";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customers ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let customer: Option<Customer> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(customer)
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let now = Utc::now();
        let customer = Customer {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            address: data.address,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Customer> = self.base.db().create(TABLE).content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
        self.base
            .merge(TABLE, id, &data)
            .await?
            .ok_or_else(|| RepoError::NotFound("Customer not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<Customer>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Customer> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted)
    }
}
