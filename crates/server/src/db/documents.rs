//! Document repository.

use sqlx::PgPool;

use smart_shipping_core::{DocumentStatus, ShipmentId};

use super::RepositoryError;
use crate::models::{Document, NewDocument};

/// Repository for shipment documents.
pub struct DocumentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DocumentRepository<'a> {
    /// Create a new document repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Documents attached to a shipment, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shipment(
        &self,
        shipment_id: ShipmentId,
    ) -> Result<Vec<Document>, RepositoryError> {
        let documents = sqlx::query_as::<_, Document>(
            r"
            SELECT *
            FROM documents
            WHERE shipment_id = $1
            ORDER BY uploaded_at DESC, id DESC
            ",
        )
        .bind(shipment_id)
        .fetch_all(self.pool)
        .await?;

        Ok(documents)
    }

    /// Record an upload in `Pending` review state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shipment does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewDocument) -> Result<Document, RepositoryError> {
        sqlx::query_as::<_, Document>(
            r"
            INSERT INTO documents (shipment_id, type, filename, url, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(new.shipment_id)
        .bind(&new.doc_type)
        .bind(&new.filename)
        .bind(&new.url)
        .bind(DocumentStatus::Pending)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "document"))
    }
}
