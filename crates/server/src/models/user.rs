//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use smart_shipping_core::{Email, Phone, UserId};

use crate::db::RepositoryError;

/// A login identity.
///
/// The OTP code is never part of this type; it only lives in the database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Raw `users` row.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: UserId,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = row
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))?;
        let phone = row
            .phone
            .as_deref()
            .map(Phone::parse)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid phone in database: {e}")))?;

        Ok(Self {
            id: row.id,
            email,
            phone,
            name: row.name,
            created_at: row.created_at,
        })
    }
}
