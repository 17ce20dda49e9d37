//! Domain models for the shipping server.
//!
//! Row types derive `sqlx::FromRow` and serialize with camelCase keys, which
//! is the shape the dashboards consume.

pub mod customs;
pub mod document;
pub mod invoice;
pub mod shipment;
pub mod user;

pub use customs::{CustomsDeclaration, CustomsDeclarationWithRoute, NewDeclaration};
pub use document::{Document, NewDocument};
pub use invoice::{Invoice, InvoiceSummary, InvoiceWithRoute, NewInvoice};
pub use shipment::{NewShipment, Shipment};
pub use user::User;
