//! Invoice CRUD handlers
//!
//! Handlers follow the thin-layer pattern: they extract inputs, delegate to
//! [`crate::services::invoices`], and shape the response. All routes sit
//! behind [`crate::middleware::jwt_auth_middleware`].

use axum::{
    extract::{
        Extension, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use crate::{
    error::Result,
    middleware::auth::AuthenticatedUser,
    models::invoices::{CreateInvoiceRequest, Invoice, UpdateInvoiceRequest},
    services::invoices,
    state::AppState,
};

/// POST /invoices
///
/// # Request Body
/// - `amount`: number, at least 0
/// - `description`: non-empty
/// - `date`: optional RFC 3339 timestamp, defaults to now
///
/// # HTTP Status Codes
/// - `201 CREATED`: the stored invoice, status `Pending`
/// - `400 BAD_REQUEST`: validation error
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    payload: std::result::Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Invoice>)> {
    let Json(request) = payload?;

    let invoice = invoices::create_invoice(state.store.as_ref(), auth_user.id, request).await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /invoices
///
/// Lists the caller's invoices as a JSON array, newest first.
pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Invoice>>> {
    let invoices = invoices::list_invoices(state.store.as_ref(), auth_user.id).await?;
    Ok(Json(invoices))
}

/// PUT /invoices/:id
///
/// Overwrites `amount`, `description` and `status` where present.
///
/// # HTTP Status Codes
/// - `200 OK`: the updated invoice
/// - `400 BAD_REQUEST`: malformed id or validation error
/// - `404 NOT_FOUND`: no such invoice for this user
pub async fn update_invoice(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    invoice_id: std::result::Result<Path<Uuid>, PathRejection>,
    payload: std::result::Result<Json<UpdateInvoiceRequest>, JsonRejection>,
) -> Result<Json<Invoice>> {
    let Path(invoice_id) = invoice_id?;
    let Json(request) = payload?;

    let invoice =
        invoices::update_invoice(state.store.as_ref(), auth_user.id, invoice_id, request).await?;

    Ok(Json(invoice))
}

/// DELETE /invoices/:id
///
/// # HTTP Status Codes
/// - `204 NO_CONTENT`: deleted
/// - `400 BAD_REQUEST`: malformed id
/// - `404 NOT_FOUND`: no such invoice for this user
pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    invoice_id: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode> {
    let Path(invoice_id) = invoice_id?;

    invoices::delete_invoice(state.store.as_ref(), auth_user.id, invoice_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
