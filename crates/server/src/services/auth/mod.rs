//! OTP authentication service.
//!
//! A user asks for a code on one channel (email or phone), then proves
//! ownership by sending it back. There is no delivery integration: the code
//! is returned to the caller, and the route decides whether to expose it.
//!
//! Codes are single use. They do not expire; a new request overwrites the
//! previous code.

mod error;

pub use error::AuthError;

use rand::Rng;
use sqlx::PgPool;

use smart_shipping_core::{ContactIdentifier, Email, Phone};

use crate::db::users::UserRepository;
use crate::models::User;

/// Name given to users who do not supply one.
pub const DEFAULT_USER_NAME: &str = "User";

/// Number of digits in an OTP code.
pub const OTP_LENGTH: usize = 6;

/// Generate a random 6-digit OTP code.
#[must_use]
pub fn generate_otp_code() -> String {
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    code.to_string()
}

/// Pick the login identifier for an OTP request.
///
/// The phone is used when the client asked for the phone channel and sent a
/// number; otherwise the email is used.
///
/// # Errors
///
/// Returns `AuthError::MissingIdentifier` if the chosen channel has no value,
/// or `AuthError::InvalidContact` if it does not parse.
pub fn select_identifier(
    auth_method: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<ContactIdentifier, AuthError> {
    fn present(s: Option<&str>) -> Option<&str> {
        s.filter(|v| !v.trim().is_empty())
    }

    if let Some(phone) = present(phone).filter(|_| auth_method == Some("phone")) {
        return Ok(ContactIdentifier::Phone(Phone::parse(phone)?));
    }

    let email = present(email).ok_or(AuthError::MissingIdentifier)?;
    Ok(ContactIdentifier::Email(Email::parse(email)?))
}

/// Whether `code` has the shape of an OTP. Saves a query for obvious junk.
fn is_well_formed(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// OTP authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Issue a fresh code for `identifier`, creating the user if needed.
    ///
    /// Returns the user and the code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database write fails.
    pub async fn request_otp(
        &self,
        identifier: &ContactIdentifier,
        name: Option<&str>,
    ) -> Result<(User, String), AuthError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_USER_NAME);
        let code = generate_otp_code();

        let user = self.users.upsert_otp(identifier, name, &code).await?;
        tracing::info!(user_id = %user.id, "OTP issued");

        Ok((user, code))
    }

    /// Redeem a code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidOtp` if the identifier is unknown, the code
    /// does not match, or it was already used.
    /// Returns `AuthError::Repository` if the database query fails.
    pub async fn verify_otp(&self, identifier: &str, code: &str) -> Result<User, AuthError> {
        let code = code.trim();
        if !is_well_formed(code) {
            return Err(AuthError::InvalidOtp);
        }
        let Ok(identifier) = ContactIdentifier::parse(identifier) else {
            return Err(AuthError::InvalidOtp);
        };

        let user = self
            .users
            .consume_otp(&identifier, code)
            .await?
            .ok_or(AuthError::InvalidOtp)?;
        tracing::info!(user_id = %user.id, "OTP verified");

        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_code_format() {
        for _ in 0..100 {
            let code = generate_otp_code();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(is_well_formed(&code));
        }
    }

    #[test]
    fn test_phone_channel_uses_phone() {
        let id = select_identifier(Some("phone"), Some("a@b.com"), Some("+91 98765 43210")).unwrap();
        assert_eq!(id, ContactIdentifier::Phone(Phone::parse("+919876543210").unwrap()));
    }

    #[test]
    fn test_phone_channel_without_phone_falls_back_to_email() {
        let id = select_identifier(Some("phone"), Some("Ops@Shipper.in"), None).unwrap();
        assert_eq!(id.as_str(), "ops@shipper.in");

        let id = select_identifier(Some("phone"), Some("ops@shipper.in"), Some("  ")).unwrap();
        assert!(matches!(id, ContactIdentifier::Email(_)));
    }

    #[test]
    fn test_email_channel_ignores_phone() {
        let id = select_identifier(Some("email"), Some("ops@shipper.in"), Some("9876543210")).unwrap();
        assert!(matches!(id, ContactIdentifier::Email(_)));
        let id = select_identifier(None, Some("ops@shipper.in"), Some("9876543210")).unwrap();
        assert!(matches!(id, ContactIdentifier::Email(_)));
    }

    #[test]
    fn test_missing_or_invalid_identifier() {
        assert!(matches!(
            select_identifier(Some("email"), None, None),
            Err(AuthError::MissingIdentifier)
        ));
        assert!(matches!(
            select_identifier(None, Some("not-an-email"), None),
            Err(AuthError::InvalidContact(_))
        ));
        assert!(matches!(
            select_identifier(Some("phone"), None, Some("call me maybe")),
            Err(AuthError::InvalidContact(_))
        ));
    }

    #[test]
    fn test_blank_contacts_count_as_missing() {
        assert!(matches!(
            select_identifier(Some("email"), Some("   "), Some("")),
            Err(AuthError::MissingIdentifier)
        ));
        assert!(matches!(
            select_identifier(Some("phone"), Some(""), Some("  ")),
            Err(AuthError::MissingIdentifier)
        ));
    }

    #[test]
    fn test_malformed_codes_rejected() {
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("1234567"));
        assert!(!is_well_formed("12a456"));
        assert!(!is_well_formed(""));
    }
}
