use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::{
        invoices::{Invoice, InvoiceChanges, NewInvoice},
        users::{NewUser, User},
    },
    queries::users::USER_EXISTS,
};

use super::Store;

/// In-process [`Store`] built on concurrent maps.
///
/// Users are keyed by id with a secondary email index. The index entry is
/// locked for the whole insert, so two concurrent signups with the same email
/// cannot both succeed. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<Uuid, User>>,
    emails: Arc<DashMap<String, Uuid>>,
    invoices: Arc<DashMap<Uuid, Invoice>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn invoice_count(&self) -> usize {
        self.invoices.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        // Held until the user row exists, so readers never see an email
        // that does not resolve.
        let slot = match self.emails.entry(new_user.email.clone()) {
            Entry::Occupied(_) => return Err(Error::BadRequest(USER_EXISTS.to_string())),
            Entry::Vacant(slot) => slot,
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        slot.insert(user.id);

        Ok(user)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.get_user_by_id(id).await
    }

    async fn create_invoice(&self, new_invoice: NewInvoice) -> Result<Invoice> {
        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::now_v7(),
            user_id: new_invoice.user_id,
            amount: new_invoice.amount,
            description: new_invoice.description,
            status: new_invoice.status,
            date: new_invoice.date,
            created_at: now,
            updated_at: now,
        };
        self.invoices.insert(invoice.id, invoice.clone());

        Ok(invoice)
    }

    async fn list_invoices_for_user(&self, user_id: Uuid) -> Result<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();

        // Same order as the SQL backend: date, then id, both descending
        invoices.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

        Ok(invoices)
    }

    async fn update_invoice(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>> {
        match self.invoices.get_mut(&id) {
            Some(mut entry) if entry.user_id == user_id => {
                changes.apply_to(entry.value_mut(), Utc::now());
                Ok(Some(entry.value().clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_invoice(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self
            .invoices
            .remove_if(&id, |_, invoice| invoice.user_id == user_id)
            .is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
