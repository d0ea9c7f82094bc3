use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    config::DatabaseConfig,
    database::{self, DbPool},
    error::Result,
    models::{
        invoices::{Invoice, InvoiceChanges, NewInvoice},
        users::{NewUser, User},
    },
    queries,
};

use super::Store;

/// [`Store`] over a PostgreSQL pool. Each call acquires one connection and
/// runs the matching statement from [`crate::queries`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connects and migrates.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self::new(database::connect(config).await?))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut conn = self.pool.acquire().await?;
        queries::users::create_user(&mut conn, new_user).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        queries::users::get_user_by_id(&mut conn, id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        queries::users::get_user_by_email(&mut conn, email).await
    }

    async fn create_invoice(&self, new_invoice: NewInvoice) -> Result<Invoice> {
        let mut conn = self.pool.acquire().await?;
        queries::invoices::create_invoice(&mut conn, new_invoice).await
    }

    async fn list_invoices_for_user(&self, user_id: Uuid) -> Result<Vec<Invoice>> {
        let mut conn = self.pool.acquire().await?;
        queries::invoices::list_invoices_by_user(&mut conn, user_id).await
    }

    async fn update_invoice(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>> {
        let mut conn = self.pool.acquire().await?;
        queries::invoices::update_invoice(&mut conn, id, user_id, &changes).await
    }

    async fn delete_invoice(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        let removed = queries::invoices::delete_invoice(&mut conn, id, user_id).await?;
        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
