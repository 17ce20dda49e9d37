//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during OTP login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or phone is malformed.
    #[error("invalid contact: {0}")]
    InvalidContact(#[from] smart_shipping_core::ContactError),

    /// Neither an email nor a phone number was supplied.
    #[error("email or phone is required")]
    MissingIdentifier,

    /// The code does not match (or was already used).
    #[error("invalid OTP")]
    InvalidOtp,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
