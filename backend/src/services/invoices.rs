//! Invoice business rules.
//!
//! Every operation is scoped to the calling user: invoices belonging to
//! somebody else behave exactly like missing ones.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::invoices::{
        CreateInvoiceRequest, Invoice, InvoiceChanges, InvoiceStatus, NewInvoice,
        UpdateInvoiceRequest,
    },
    store::Store,
    validation::{merge_errors, validate_amount, validate_required_string},
};

const INVOICE_NOT_FOUND: &str = "Invoice not found";

/// Creates a `Pending` invoice owned by `user_id`.
pub async fn create_invoice(
    store: &dyn Store,
    user_id: Uuid,
    request: CreateInvoiceRequest,
) -> Result<Invoice> {
    let (amount, description) = match (
        validate_amount(request.amount),
        validate_required_string(&request.description, "description"),
    ) {
        (Ok(amount), Ok(description)) => (amount, description),
        (amount, description) => {
            let failures = [amount.err(), description.err()];
            return Err(merge_errors(failures.into_iter().flatten()));
        }
    };

    // The token may outlive its user; keep the reference valid.
    if store.get_user_by_id(user_id).await?.is_none() {
        return Err(Error::Authentication("User not found".to_string()));
    }

    let invoice = store
        .create_invoice(NewInvoice {
            user_id,
            amount,
            description,
            status: InvoiceStatus::Pending,
            date: request.date.unwrap_or_else(Utc::now),
        })
        .await?;

    tracing::info!(user_id = %user_id, invoice_id = %invoice.id, "invoice created");
    Ok(invoice)
}

pub async fn list_invoices(store: &dyn Store, user_id: Uuid) -> Result<Vec<Invoice>> {
    store.list_invoices_for_user(user_id).await
}

/// Overwrites the fields present in `request`.
pub async fn update_invoice(
    store: &dyn Store,
    user_id: Uuid,
    invoice_id: Uuid,
    request: UpdateInvoiceRequest,
) -> Result<Invoice> {
    let changes = validate_changes(request)?;

    let invoice = store
        .update_invoice(invoice_id, user_id, changes)
        .await?
        .ok_or_else(|| Error::NotFound(INVOICE_NOT_FOUND.to_string()))?;

    tracing::info!(user_id = %user_id, invoice_id = %invoice.id, "invoice updated");
    Ok(invoice)
}

pub async fn delete_invoice(store: &dyn Store, user_id: Uuid, invoice_id: Uuid) -> Result<()> {
    if !store.delete_invoice(invoice_id, user_id).await? {
        return Err(Error::NotFound(INVOICE_NOT_FOUND.to_string()));
    }

    tracing::info!(user_id = %user_id, invoice_id = %invoice_id, "invoice deleted");
    Ok(())
}

fn validate_changes(request: UpdateInvoiceRequest) -> Result<InvoiceChanges> {
    let amount = request.amount.map(validate_amount).transpose();
    let description = request
        .description
        .as_deref()
        .map(|description| validate_required_string(description, "description"))
        .transpose();

    match (amount, description) {
        (Ok(amount), Ok(description)) => Ok(InvoiceChanges {
            amount,
            description,
            status: request.status,
        }),
        (amount, description) => {
            let failures = [amount.err(), description.err()];
            Err(merge_errors(failures.into_iter().flatten()))
        }
    }
}
