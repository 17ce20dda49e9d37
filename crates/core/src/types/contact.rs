//! Contact identifiers used to log in: email addresses and phone numbers.
//!
//! A user is identified by either one. OTP requests name the channel
//! explicitly (`authMethod`), while OTP verification receives a bare string
//! that may be either, so [`ContactIdentifier::parse`] sniffs the format.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a contact identifier.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// The input string is empty (after trimming).
    #[error("identifier cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("identifier must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The email does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The phone number contains characters other than digits and separators.
    #[error("phone number may only contain digits, spaces, dashes and a leading +")]
    InvalidPhoneCharacter,
    /// The phone number has too few or too many digits.
    #[error("phone number must have between {min} and {max} digits")]
    PhoneDigitCount {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
}

/// An email address, stored lowercased.
///
/// ```
/// use smart_shipping_core::Email;
///
/// let email = Email::parse("  Trader@Example.com ").unwrap();
/// assert_eq!(email.as_str(), "trader@example.com");
/// assert!(Email::parse("no-at-symbol").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321). Matches `VARCHAR(255)`.
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming whitespace and lowercasing.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 254 characters,
    /// lacks an @ symbol, or has an empty local part or domain.
    pub fn parse(s: &str) -> Result<Self, ContactError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ContactError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(ContactError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(ContactError::MissingAtSymbol)?;
        if local.is_empty() {
            return Err(ContactError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(ContactError::EmptyDomain);
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A phone number as typed by the user, with separators stripped.
///
/// An optional leading `+` is preserved; spaces, dashes, dots and parentheses
/// are removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits (short national numbers).
    pub const MIN_DIGITS: usize = 7;
    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone`, normalising separators away.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains letters or other
    /// symbols, or has a digit count outside 7..=15.
    pub fn parse(s: &str) -> Result<Self, ContactError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ContactError::Empty);
        }

        let (prefix, rest) = s
            .strip_prefix('+')
            .map_or(("", s), |rest| ("+", rest));

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(ContactError::InvalidPhoneCharacter),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(ContactError::PhoneDigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(format!("{prefix}{digits}")))
    }

    /// Returns the normalised phone number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Either login channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContactIdentifier {
    Email(Email),
    Phone(Phone),
}

impl ContactIdentifier {
    /// Parse a bare identifier: anything containing `@` is an email,
    /// everything else must be a phone number.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ContactError`] for the sniffed format.
    pub fn parse(s: &str) -> Result<Self, ContactError> {
        if s.contains('@') {
            Email::parse(s).map(Self::Email)
        } else {
            Phone::parse(s).map(Self::Phone)
        }
    }

    /// The identifier as stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(email) => email.as_str(),
            Self::Phone(phone) => phone.as_str(),
        }
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ContactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactIdentifier {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalises_case_and_whitespace() {
        let email = Email::parse(" Ops@Shipper.IN ").unwrap();
        assert_eq!(email.as_str(), "ops@shipper.in");
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert_eq!(Email::parse(""), Err(ContactError::Empty));
        assert_eq!(Email::parse("   "), Err(ContactError::Empty));
        assert_eq!(Email::parse("nobody"), Err(ContactError::MissingAtSymbol));
        assert_eq!(Email::parse("@x.com"), Err(ContactError::EmptyLocalPart));
        assert_eq!(Email::parse("a@"), Err(ContactError::EmptyDomain));

        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(ContactError::TooLong { .. })
        ));
    }

    #[test]
    fn test_phone_strips_separators() {
        let phone = Phone::parse("+91 98765-43210").unwrap();
        assert_eq!(phone.as_str(), "+919876543210");

        let phone = Phone::parse("(022) 2345.6789").unwrap();
        assert_eq!(phone.as_str(), "02223456789");
    }

    #[test]
    fn test_phone_rejects_letters_and_bad_lengths() {
        assert_eq!(
            Phone::parse("98765abc"),
            Err(ContactError::InvalidPhoneCharacter)
        );
        assert!(matches!(
            Phone::parse("12345"),
            Err(ContactError::PhoneDigitCount { .. })
        ));
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(ContactError::PhoneDigitCount { .. })
        ));
    }

    #[test]
    fn test_identifier_sniffs_format() {
        assert!(matches!(
            ContactIdentifier::parse("a@b.co").unwrap(),
            ContactIdentifier::Email(_)
        ));
        assert!(matches!(
            ContactIdentifier::parse("9876543210").unwrap(),
            ContactIdentifier::Phone(_)
        ));
        assert!(ContactIdentifier::parse("not-a-phone").is_err());
    }

    #[test]
    fn test_email_serializes_transparently() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(
            serde_json::to_string(&email).unwrap(),
            "\"user@example.com\""
        );
    }
}
