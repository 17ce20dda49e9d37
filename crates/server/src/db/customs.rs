//! Customs declaration repository.

use sqlx::PgPool;

use smart_shipping_core::UserId;

use super::RepositoryError;
use crate::models::{CustomsDeclaration, CustomsDeclarationWithRoute, NewDeclaration};

/// Repository for customs declarations.
pub struct CustomsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomsRepository<'a> {
    /// Create a new customs repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's declarations newest first, with the shipment route when linked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CustomsDeclarationWithRoute>, RepositoryError> {
        let declarations = sqlx::query_as::<_, CustomsDeclarationWithRoute>(
            r"
            SELECT d.*, s.from_country, s.to_country
            FROM customs_declarations d
            LEFT JOIN shipments s ON s.id = d.shipment_id
            WHERE d.user_id = $1
            ORDER BY d.created_at DESC, d.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(declarations)
    }

    /// File a declaration. The entry date is the day of filing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the declaration number is taken.
    /// Returns `RepositoryError::NotFound` if the user or shipment does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        new: &NewDeclaration,
    ) -> Result<CustomsDeclaration, RepositoryError> {
        sqlx::query_as::<_, CustomsDeclaration>(
            r"
            INSERT INTO customs_declarations
                (user_id, shipment_id, declaration_number, type, status, port, entry_date)
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_DATE)
            RETURNING *
            ",
        )
        .bind(new.user_id)
        .bind(new.shipment_id)
        .bind(&new.declaration_number)
        .bind(new.direction)
        .bind(new.status)
        .bind(new.port.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "declaration number"))
    }
}
