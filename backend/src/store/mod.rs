//! Persistence seam between the services and a concrete database.
//!
//! Services only see [`Store`]. [`PgStore`] is the production backend;
//! [`MemoryStore`] keeps everything in process and backs local runs and the
//! HTTP test-suite.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::Result,
    models::{
        invoices::{Invoice, InvoiceChanges, NewInvoice},
        users::{NewUser, User},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Shared, type-erased store handle held by [`crate::AppState`].
pub type SharedStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user. A taken email is a `BadRequest`.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn create_invoice(&self, new_invoice: NewInvoice) -> Result<Invoice>;

    /// Invoices owned by `user_id`, newest `date` first.
    async fn list_invoices_for_user(&self, user_id: Uuid) -> Result<Vec<Invoice>>;

    /// Applies `changes` to the invoice if `user_id` owns it.
    async fn update_invoice(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>>;

    /// Removes the invoice if `user_id` owns it. Returns whether it existed.
    async fn delete_invoice(&self, id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Builds the backend selected by `database.backend`.
pub async fn connect(config: &DatabaseConfig) -> Result<SharedStore> {
    let store: SharedStore = match config.backend {
        StoreBackend::Postgres => Arc::new(PgStore::connect(config).await?),
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };
    tracing::info!(backend = %config.backend, "store connected");
    Ok(store)
}
