//! Finance dashboard routes.

use axum::{Json, extract::State};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use smart_shipping_core::{InvoiceId, ShipmentId, UserId};

use super::extract::{ApiJson, ApiQuery, lenient_id};
use super::{Ack, require_user};
use crate::db::RepositoryError;
use crate::db::invoices::InvoiceRepository;
use crate::error::{AppError, Result};
use crate::models::{Invoice, InvoiceSummary, InvoiceWithRoute, NewInvoice};
use crate::services::parse_number;
use crate::services::references::{insert_with_fresh_number, invoice_number};
use crate::state::AppState;

/// Query naming the dashboard's user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<UserId>,
}

/// Response of `GET /api/finance/all`.
#[derive(Debug, Serialize)]
pub struct InvoicesResponse {
    pub success: bool,
    pub invoices: Vec<InvoiceWithRoute>,
    pub summary: InvoiceSummary,
}

/// A user's invoices with dashboard totals.
///
/// GET /api/finance/all?userId=
///
/// # Errors
///
/// Returns 400 without `userId`.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<InvoicesResponse>> {
    let user_id = require_user(query.user_id)?;
    let invoices = InvoiceRepository::new(state.pool())
        .list_for_user(user_id)
        .await?;
    let summary = InvoiceSummary::from_invoices(invoices.iter().map(|row| &row.invoice));

    Ok(Json(InvoicesResponse {
        success: true,
        invoices,
        summary,
    }))
}

/// Body of `POST /api/finance/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub shipment_id: Option<ShipmentId>,
    pub amount: Option<Value>,
    /// `YYYY-MM-DD`.
    pub due_date: Option<NaiveDate>,
}

/// Response of `POST /api/finance/create`.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub success: bool,
    pub message: &'static str,
    pub invoice: Invoice,
}

/// Raise a pending invoice with a fresh `INV-2026-NNNN` number.
///
/// POST /api/finance/create
///
/// # Errors
///
/// Returns 400 without `userId` or a positive `amount`.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateInvoiceRequest>,
) -> Result<Json<InvoiceResponse>> {
    let user_id = require_user(body.user_id)?;
    let amount = parse_number(body.amount.as_ref())
        .filter(|a| *a > 0.0)
        .and_then(|a| Decimal::try_from(a).ok())
        .map(|d| d.round_dp(2))
        .ok_or_else(|| AppError::BadRequest("amount must be a positive number".to_string()))?;

    let repo = InvoiceRepository::new(state.pool());
    let repo = &repo;
    let invoice = insert_with_fresh_number(
        || invoice_number(&mut rand::rng()),
        move |invoice_number| {
            let new = NewInvoice {
                user_id,
                shipment_id: body.shipment_id,
                invoice_number,
                amount,
                due_date: body.due_date,
            };
            async move { repo.create(&new).await }
        },
    )
    .await?;

    tracing::info!(invoice_id = %invoice.id, number = %invoice.invoice_number, "Invoice created");

    Ok(Json(InvoiceResponse {
        success: true,
        message: "Invoice created",
        invoice,
    }))
}

/// Body of `POST /api/finance/pay`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayInvoiceRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub invoice_id: Option<InvoiceId>,
}

/// Mark an invoice as paid.
///
/// POST /api/finance/pay
///
/// # Errors
///
/// Returns 400 without `invoiceId`, 404 if the invoice does not exist.
#[instrument(skip(state, body))]
pub async fn pay(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PayInvoiceRequest>,
) -> Result<Json<Ack>> {
    let invoice_id = body
        .invoice_id
        .ok_or_else(|| AppError::BadRequest("invoiceId is required".to_string()))?;

    InvoiceRepository::new(state.pool())
        .mark_paid(invoice_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Invoice not found".to_string()),
            other => other.into(),
        })?;

    tracing::info!(invoice_id = %invoice_id, "Invoice paid");

    Ok(Json(Ack::new("Invoice marked as paid")))
}
