//! Customs declarations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use smart_shipping_core::{DeclarationId, DeclarationStatus, ShipmentId, TradeDirection, UserId};

/// A `customs_declarations` row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomsDeclaration {
    pub id: DeclarationId,
    pub user_id: Option<UserId>,
    pub shipment_id: Option<ShipmentId>,
    pub declaration_number: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub direction: TradeDirection,
    pub status: DeclarationStatus,
    pub port: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// A declaration joined with its shipment's route, when it has one.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomsDeclarationWithRoute {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub declaration: CustomsDeclaration,
    pub from_country: Option<String>,
    pub to_country: Option<String>,
}

/// Input for filing a declaration.
#[derive(Debug, Clone)]
pub struct NewDeclaration {
    pub user_id: UserId,
    pub shipment_id: Option<ShipmentId>,
    pub declaration_number: String,
    pub direction: TradeDirection,
    pub status: DeclarationStatus,
    pub port: Option<String>,
}
