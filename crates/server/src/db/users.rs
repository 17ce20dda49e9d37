//! User repository for OTP login.
//!
//! Queries are runtime-checked (`query_as` + `FromRow`) so the crate builds
//! without a live database.

use sqlx::PgPool;

use smart_shipping_core::ContactIdentifier;

use super::RepositoryError;
use crate::models::user::{User, UserRow};

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a fresh OTP for `identifier`, creating the user on first contact.
    ///
    /// A single `INSERT ... ON CONFLICT` keyed on the identifier's column, so
    /// two concurrent first requests cannot create duplicate users. `name` is
    /// only used when the user is created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_otp(
        &self,
        identifier: &ContactIdentifier,
        name: &str,
        code: &str,
    ) -> Result<User, RepositoryError> {
        let sql = match identifier {
            ContactIdentifier::Email(_) => {
                r"
                INSERT INTO users (email, name, otp_code)
                VALUES ($1, $2, $3)
                ON CONFLICT (email) DO UPDATE SET otp_code = EXCLUDED.otp_code
                RETURNING id, email, phone, name, created_at
                "
            }
            ContactIdentifier::Phone(_) => {
                r"
                INSERT INTO users (phone, name, otp_code)
                VALUES ($1, $2, $3)
                ON CONFLICT (phone) DO UPDATE SET otp_code = EXCLUDED.otp_code
                RETURNING id, email, phone, name, created_at
                "
            }
        };

        let row = sqlx::query_as::<_, UserRow>(sql)
            .bind(identifier.as_str())
            .bind(name)
            .bind(code)
            .fetch_one(self.pool)
            .await?;

        User::try_from(row)
    }

    /// Consume the OTP for `identifier` if it matches `code`.
    ///
    /// The check and the invalidation happen in one `UPDATE`, so a code can
    /// be redeemed at most once. Returns `None` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn consume_otp(
        &self,
        identifier: &ContactIdentifier,
        code: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET otp_code = NULL
            WHERE (email = $1 OR phone = $1) AND otp_code = $2
            RETURNING id, email, phone, name, created_at
            ",
        )
        .bind(identifier.as_str())
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}
