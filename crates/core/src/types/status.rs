//! Status and classification enums for shipping entities.
//!
//! These are stored as plain `VARCHAR` columns, so the `postgres` feature
//! maps each enum to and from its text label rather than a Postgres enum type.

use serde::{Deserialize, Serialize};

/// Error returned when a text label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Defines `as_str`, `Display`, `FromStr` and (with `postgres`) text-backed
/// sqlx impls for a fieldless enum.
macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// The label stored in the database and sent over the wire.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(UnknownLabel {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(s.parse()?)
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

/// Whether goods leave or enter the home country.
///
/// Used for both shipments and customs declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TradeDirection {
    Export,
    #[default]
    Import,
}

text_enum!(TradeDirection, "trade direction", {
    Export => "Export",
    Import => "Import",
});

/// Transport mode used by the quote engine's emission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransportMode {
    #[default]
    Ocean,
    Air,
    Road,
    Rail,
}

text_enum!(TransportMode, "transport mode", {
    Ocean => "Ocean",
    Air => "Air",
    Road => "Road",
    Rail => "Rail",
});

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

text_enum!(InvoiceStatus, "invoice status", {
    Pending => "Pending",
    Paid => "Paid",
    Overdue => "Overdue",
    Cancelled => "Cancelled",
});

impl InvoiceStatus {
    /// Pending and overdue invoices still have money owed on them.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }
}

/// Customs declaration processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeclarationStatus {
    #[default]
    Draft,
    Submitted,
    Cleared,
    Held,
}

text_enum!(DeclarationStatus, "declaration status", {
    Draft => "Draft",
    Submitted => "Submitted",
    Cleared => "Cleared",
    Held => "Held",
});

/// Document verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DocumentStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

text_enum!(DocumentStatus, "document status", {
    Pending => "Pending",
    Verified => "Verified",
    Rejected => "Rejected",
});
