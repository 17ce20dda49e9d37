//! Shipment routes.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use smart_shipping_core::{ShipmentId, UserId};

use super::extract::{ApiJson, ApiPath, ApiQuery, lenient_id};
use super::{Ack, non_empty, parse_direction, require};
use crate::db::shipments::ShipmentRepository;
use crate::error::{AppError, Result};
use crate::models::shipment::DEFAULT_STATUS;
use crate::models::{NewShipment, Shipment};
use crate::services::parse_number;
use crate::state::AppState;

/// Body of `POST /api/shipment/create`.
///
/// Numeric fields accept numbers or numeric strings, as posted by the
/// booking form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<UserId>,
    #[serde(rename = "type")]
    pub direction: Option<String>,
    pub from_country: Option<String>,
    pub to_country: Option<String>,
    pub product_type: Option<String>,
    pub weight: Option<Value>,
    pub recommended_port: Option<String>,
    pub estimated_cost: Option<Value>,
    pub transit_time: Option<Value>,
    pub status: Option<String>,
    pub shipper_details: Option<Value>,
    pub consignee_details: Option<Value>,
    pub incoterms: Option<String>,
    pub mode: Option<String>,
    pub hs_code: Option<String>,
    pub volume: Option<Value>,
    pub cargo_value: Option<Value>,
}

fn decimal(value: Option<&Value>) -> Option<Decimal> {
    parse_number(value)
        .and_then(|n| Decimal::try_from(n).ok())
        .map(|d| d.round_dp(2))
}

#[allow(clippy::cast_possible_truncation)]
fn whole_days(value: Option<&Value>) -> Option<i32> {
    parse_number(value)
        .map(f64::round)
        .filter(|n| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(n))
        .map(|n| n as i32)
}

impl CreateShipmentRequest {
    /// Validate into an insertable shipment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `type`, `fromCountry` or `toCountry`
    /// is missing, or `type` is not Export/Import.
    pub fn into_new_shipment(self) -> Result<NewShipment> {
        let direction = require(self.direction.as_deref(), "type")?;
        let direction = parse_direction(direction)
            .ok_or_else(|| AppError::BadRequest("type must be Export or Import".to_string()))?;
        let from_country = require(self.from_country.as_deref(), "fromCountry")?.to_string();
        let to_country = require(self.to_country.as_deref(), "toCountry")?.to_string();

        Ok(NewShipment {
            user_id: self.user_id,
            direction,
            from_country,
            to_country,
            weight: decimal(self.weight.as_ref()),
            estimated_cost: decimal(self.estimated_cost.as_ref()),
            transit_time: whole_days(self.transit_time.as_ref()),
            volume_cbm: decimal(self.volume.as_ref()),
            cargo_value: decimal(self.cargo_value.as_ref()),
            status: non_empty(self.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            product_type: non_empty(self.product_type),
            recommended_port: non_empty(self.recommended_port),
            shipper_details: self.shipper_details.filter(|v| !v.is_null()),
            consignee_details: self.consignee_details.filter(|v| !v.is_null()),
            incoterms: non_empty(self.incoterms),
            mode: non_empty(self.mode),
            hs_code: non_empty(self.hs_code),
        })
    }
}

/// Response from `POST /api/shipment/create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentResponse {
    pub success: bool,
    pub shipment_id: ShipmentId,
    pub message: &'static str,
    /// Set when the shipment was created already booked.
    pub booking_reference: Option<String>,
    pub shipment: Shipment,
}

/// Create a shipment.
///
/// POST /api/shipment/create
///
/// # Errors
///
/// Returns 400 for missing required fields, 404 if `userId` names no user.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateShipmentRequest>,
) -> Result<Json<CreateShipmentResponse>> {
    let new = body.into_new_shipment()?;
    let shipment = ShipmentRepository::new(state.pool()).create(&new).await?;

    tracing::info!(shipment_id = %shipment.id, status = %shipment.status, "Shipment created");

    Ok(Json(CreateShipmentResponse {
        success: true,
        shipment_id: shipment.id,
        message: "Shipment created successfully",
        booking_reference: shipment.booking_reference(),
        shipment,
    }))
}

/// Query of `GET /api/shipment/all`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShipmentsQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<UserId>,
}

/// Response listing shipments.
#[derive(Debug, Serialize)]
pub struct ShipmentsResponse {
    pub success: bool,
    pub shipments: Vec<Shipment>,
}

/// List shipments, newest first.
///
/// GET /api/shipment/all?userId=
///
/// # Errors
///
/// Returns 500 on database failure.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListShipmentsQuery>,
) -> Result<Json<ShipmentsResponse>> {
    let shipments = ShipmentRepository::new(state.pool())
        .list(query.user_id)
        .await?;

    Ok(Json(ShipmentsResponse {
        success: true,
        shipments,
    }))
}

/// Response with one shipment.
#[derive(Debug, Serialize)]
pub struct ShipmentResponse {
    pub success: bool,
    pub shipment: Shipment,
}

/// Get a shipment.
///
/// GET /api/shipment/{id}
///
/// # Errors
///
/// Returns 404 if the shipment does not exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ShipmentResponse>> {
    let shipment = ShipmentRepository::new(state.pool())
        .get(ShipmentId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

    Ok(Json(ShipmentResponse {
        success: true,
        shipment,
    }))
}

/// Body of `POST /api/shipment/update-status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub shipment_id: Option<ShipmentId>,
    pub status: Option<String>,
}

/// Change a shipment's status label.
///
/// POST /api/shipment/update-status
///
/// # Errors
///
/// Returns 400 if either field is missing, 404 if the shipment does not exist.
#[instrument(skip(state, body))]
pub async fn update_status(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UpdateStatusRequest>,
) -> Result<Json<Ack>> {
    let shipment_id = body
        .shipment_id
        .ok_or_else(|| AppError::BadRequest("shipmentId is required".to_string()))?;
    let status = require(body.status.as_deref(), "status")?;

    ShipmentRepository::new(state.pool())
        .update_status(shipment_id, status)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound("Shipment not found".to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(shipment_id = %shipment_id, status, "Shipment status updated");

    Ok(Json(Ack::new("Status updated")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use serde_json::json;
    use smart_shipping_core::TradeDirection;

    fn request(value: serde_json::Value) -> CreateShipmentRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_requires_route_and_direction() {
        for body in [
            json!({"fromCountry": "India", "toCountry": "USA"}),
            json!({"type": "Export", "toCountry": "USA"}),
            json!({"type": "Export", "fromCountry": "India", "toCountry": "  "}),
        ] {
            assert!(matches!(
                request(body).into_new_shipment(),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_rejects_unknown_direction() {
        let body = json!({"type": "Sideways", "fromCountry": "India", "toCountry": "USA"});
        assert!(request(body).into_new_shipment().is_err());
    }

    #[test]
    fn test_defaults_and_coercion() {
        let new = request(json!({
            "userId": "3",
            "type": "export",
            "fromCountry": "India",
            "toCountry": "USA",
            "weight": "1200.456",
            "volume": 14,
            "cargoValue": "not a number",
            "transitTime": "21",
            "shipperDetails": {"name": "Acme Exports"},
            "consigneeDetails": null
        }))
        .into_new_shipment()
        .unwrap();

        assert_eq!(new.user_id, Some(UserId::new(3)));
        assert_eq!(new.direction, TradeDirection::Export);
        assert_eq!(new.status, DEFAULT_STATUS);
        assert_eq!(new.weight, Some(Decimal::new(120_046, 2)));
        assert_eq!(new.volume_cbm, Some(Decimal::new(14, 0)));
        assert_eq!(new.cargo_value, None);
        assert_eq!(new.transit_time, Some(21));
        assert!(new.shipper_details.is_some());
        assert!(new.consignee_details.is_none());
    }

    #[test]
    fn test_status_override() {
        let new = request(json!({
            "type": "Import",
            "fromCountry": "China",
            "toCountry": "India",
            "status": "Booked"
        }))
        .into_new_shipment()
        .unwrap();
        assert_eq!(new.status, "Booked");
    }
}
