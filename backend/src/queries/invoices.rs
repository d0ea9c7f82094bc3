use crate::{
    error::{Error, Result},
    models::invoices::{Invoice, InvoiceChanges, NewInvoice},
};
use uuid::Uuid;

use crate::DbConn;

/// Inserts an invoice and returns the stored row.
pub async fn create_invoice(conn: &mut DbConn, new_invoice: NewInvoice) -> Result<Invoice> {
    let invoice = sqlx::query_as::<_, Invoice>(
        r#"
        INSERT INTO invoices (id, user_id, amount, description, status, date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, amount, description, status, date, created_at, updated_at
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(new_invoice.user_id)
    .bind(new_invoice.amount)
    .bind(&new_invoice.description)
    .bind(new_invoice.status)
    .bind(new_invoice.date)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(invoice)
}

/// Lists a user's invoices, newest first.
pub async fn list_invoices_by_user(conn: &mut DbConn, user_id: Uuid) -> Result<Vec<Invoice>> {
    let invoices = sqlx::query_as::<_, Invoice>(
        r#"
        SELECT id, user_id, amount, description, status, date, created_at, updated_at
        FROM invoices
        WHERE user_id = $1
        ORDER BY date DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(invoices)
}

/// Overwrites the present fields of an invoice owned by `user_id`.
///
/// Returns `None` when no invoice with that id belongs to the user.
pub async fn update_invoice(
    conn: &mut DbConn,
    id: Uuid,
    user_id: Uuid,
    changes: &InvoiceChanges,
) -> Result<Option<Invoice>> {
    let invoice = sqlx::query_as::<_, Invoice>(
        r#"
        UPDATE invoices
        SET amount = COALESCE($3, amount),
            description = COALESCE($4, description),
            status = COALESCE($5, status),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, amount, description, status, date, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(changes.amount)
    .bind(changes.description.as_deref())
    .bind(changes.status)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(invoice)
}

/// Deletes an invoice owned by `user_id`. Returns the number of rows removed.
pub async fn delete_invoice(conn: &mut DbConn, id: Uuid, user_id: Uuid) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM invoices
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(conn)
    .await
    .map_err(Error::Sqlx)?
    .rows_affected();

    Ok(rows_affected)
}
