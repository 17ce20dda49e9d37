//! Shipment repository.

use sqlx::PgPool;

use smart_shipping_core::{ShipmentId, UserId};

use super::RepositoryError;
use crate::models::{NewShipment, Shipment};

/// Repository for shipment database operations.
pub struct ShipmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShipmentRepository<'a> {
    /// Create a new shipment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a shipment and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if `user_id` names no user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewShipment) -> Result<Shipment, RepositoryError> {
        sqlx::query_as::<_, Shipment>(
            r"
            INSERT INTO shipments (
                user_id, type, from_country, to_country, product_type, weight,
                recommended_port, estimated_cost, transit_time, status,
                shipper_details, consignee_details, incoterms, mode, hs_code,
                volume_cbm, cargo_value
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            ",
        )
        .bind(new.user_id)
        .bind(new.direction)
        .bind(&new.from_country)
        .bind(&new.to_country)
        .bind(new.product_type.as_deref())
        .bind(new.weight)
        .bind(new.recommended_port.as_deref())
        .bind(new.estimated_cost)
        .bind(new.transit_time)
        .bind(&new.status)
        .bind(new.shipper_details.as_ref())
        .bind(new.consignee_details.as_ref())
        .bind(new.incoterms.as_deref())
        .bind(new.mode.as_deref())
        .bind(new.hs_code.as_deref())
        .bind(new.volume_cbm)
        .bind(new.cargo_value)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "shipment"))
    }

    /// List shipments newest first, optionally only those owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: Option<UserId>) -> Result<Vec<Shipment>, RepositoryError> {
        let shipments = sqlx::query_as::<_, Shipment>(
            r"
            SELECT *
            FROM shipments
            WHERE $1::INTEGER IS NULL OR user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(shipments)
    }

    /// Get a shipment by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShipmentId) -> Result<Option<Shipment>, RepositoryError> {
        let shipment = sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(shipment)
    }

    /// Overwrite a shipment's status label.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shipment has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_status(&self, id: ShipmentId, status: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE shipments SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
