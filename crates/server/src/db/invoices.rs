//! Invoice repository.

use sqlx::PgPool;

use smart_shipping_core::{InvoiceId, InvoiceStatus, UserId};

use super::RepositoryError;
use crate::models::{Invoice, InvoiceWithRoute, NewInvoice};

/// Repository for invoice database operations.
pub struct InvoiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepository<'a> {
    /// Create a new invoice repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's invoices newest first, each with its shipment's route.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<InvoiceWithRoute>, RepositoryError> {
        let invoices = sqlx::query_as::<_, InvoiceWithRoute>(
            r"
            SELECT i.*, s.from_country, s.to_country
            FROM invoices i
            LEFT JOIN shipments s ON s.id = i.shipment_id
            WHERE i.user_id = $1
            ORDER BY i.created_at DESC, i.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(invoices)
    }

    /// Insert a pending invoice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the invoice number is taken.
    /// Returns `RepositoryError::NotFound` if the user or shipment does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewInvoice) -> Result<Invoice, RepositoryError> {
        sqlx::query_as::<_, Invoice>(
            r"
            INSERT INTO invoices (user_id, shipment_id, invoice_number, amount, status, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(new.user_id)
        .bind(new.shipment_id)
        .bind(&new.invoice_number)
        .bind(new.amount)
        .bind(InvoiceStatus::Pending)
        .bind(new.due_date)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "invoice number"))
    }

    /// Mark an invoice as paid.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no invoice has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn mark_paid(&self, id: InvoiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE invoices SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(InvoiceStatus::Paid)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
