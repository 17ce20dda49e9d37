//! Invoices shown on the finance dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use smart_shipping_core::{InvoiceId, InvoiceStatus, ShipmentId, UserId};

/// An `invoices` row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub user_id: Option<UserId>,
    pub shipment_id: Option<ShipmentId>,
    pub invoice_number: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// An invoice joined with its shipment's route.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceWithRoute {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub invoice: Invoice,
    pub from_country: Option<String>,
    pub to_country: Option<String>,
}

/// Input for inserting an invoice.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub user_id: UserId,
    pub shipment_id: Option<ShipmentId>,
    pub invoice_number: String,
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
}

/// Totals for the finance dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total_due: Decimal,
    pub overdue: Decimal,
    pub open_count: u32,
    pub dispute_count: u32,
}

impl InvoiceSummary {
    /// Summarise a list of invoices.
    ///
    /// Pending and overdue invoices are open and count towards the total
    /// due; overdue ones are also totalled separately. Disputes are not
    /// tracked, so `dispute_count` is always zero.
    pub fn from_invoices<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> Self {
        invoices
            .into_iter()
            .filter(|inv| inv.status.is_open())
            .fold(Self::default(), |mut acc, inv| {
                acc.total_due += inv.amount;
                acc.open_count += 1;
                if inv.status == InvoiceStatus::Overdue {
                    acc.overdue += inv.amount;
                }
                acc
            })
    }
}
