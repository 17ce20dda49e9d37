//! Shipment records created by the booking wizard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use smart_shipping_core::{ShipmentId, TradeDirection, UserId};

/// Status label that triggers a booking reference in the create response.
pub const BOOKED_STATUS: &str = "Booked";

/// Default status for new shipments.
pub const DEFAULT_STATUS: &str = "pending";

/// A `shipments` row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: ShipmentId,
    pub user_id: Option<UserId>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub direction: TradeDirection,
    pub from_country: String,
    pub to_country: String,
    pub product_type: Option<String>,
    pub weight: Option<Decimal>,
    pub recommended_port: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub transit_time: Option<i32>,
    pub status: String,
    pub shipper_details: Option<Value>,
    pub consignee_details: Option<Value>,
    pub incoterms: Option<String>,
    pub mode: Option<String>,
    pub hs_code: Option<String>,
    pub volume_cbm: Option<Decimal>,
    pub cargo_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    /// Booking reference shown to the user once a shipment is booked.
    #[must_use]
    pub fn booking_reference(&self) -> Option<String> {
        (self.status == BOOKED_STATUS).then(|| booking_reference(self.id))
    }
}

/// `SS-BKG-2026-{1000 + id}`.
#[must_use]
pub fn booking_reference(id: ShipmentId) -> String {
    format!("SS-BKG-2026-{}", 1000 + i64::from(id.as_i32()))
}

/// Validated input for inserting a shipment.
#[derive(Debug, Clone, Default)]
pub struct NewShipment {
    pub user_id: Option<UserId>,
    pub direction: TradeDirection,
    pub from_country: String,
    pub to_country: String,
    pub product_type: Option<String>,
    pub weight: Option<Decimal>,
    pub recommended_port: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub transit_time: Option<i32>,
    pub status: String,
    pub shipper_details: Option<Value>,
    pub consignee_details: Option<Value>,
    pub incoterms: Option<String>,
    pub mode: Option<String>,
    pub hs_code: Option<String>,
    pub volume_cbm: Option<Decimal>,
    pub cargo_value: Option<Decimal>,
}
