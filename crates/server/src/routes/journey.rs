//! Journey progress routes for the six-step onboarding wizard.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use smart_shipping_core::{JourneyProgress, JourneyStep, ShipmentId, StepField, UserId};

use super::extract::{ApiJson, ApiPath, lenient_id};
use crate::db::RepositoryError;
use crate::db::journey::JourneyRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// One entry of the step catalogue.
#[derive(Debug, Serialize)]
pub struct StepInfo {
    pub number: i32,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [StepField],
}

/// Response of `GET /api/journey/steps`.
#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub success: bool,
    pub steps: Vec<StepInfo>,
}

/// The wizard's steps and the fields each one collects.
///
/// GET /api/journey/steps
pub async fn steps() -> Json<StepsResponse> {
    let steps = JourneyStep::ALL
        .into_iter()
        .map(|step| StepInfo {
            number: step.number(),
            title: step.title(),
            description: step.description(),
            fields: step.fields(),
        })
        .collect();

    Json(StepsResponse {
        success: true,
        steps,
    })
}

/// Response carrying journey progress.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub progress: JourneyProgress,
}

/// Progress of a shipment's journey. A journey that was never saved is at
/// step 1 with empty slots.
///
/// GET /api/journey/{shipmentId}
///
/// # Errors
///
/// Returns 500 on database failure.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(shipment_id): ApiPath<i32>,
) -> Result<Json<ProgressResponse>> {
    let progress = JourneyRepository::new(state.pool())
        .get(ShipmentId::new(shipment_id))
        .await?;

    Ok(Json(ProgressResponse {
        success: true,
        message: None,
        progress,
    }))
}

/// Body of `POST /api/journey/update`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStepRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub shipment_id: Option<ShipmentId>,
    /// Step number, as a number or numeric string.
    #[serde(default)]
    pub step: Value,
    /// Form data for the step; replaces whatever was saved before.
    #[serde(default)]
    pub data: Value,
}

/// Read a step number sent as `2`, `2.0` or `"2"`.
#[allow(clippy::cast_possible_truncation)]
fn step_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract().abs() < f64::EPSILON).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl SaveStepRequest {
    /// Validate the step and shipment before anything touches the database.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journey` for a step outside 1..=6 and
    /// `AppError::BadRequest` for a missing step or shipment.
    pub fn validate(&self) -> Result<(ShipmentId, JourneyStep)> {
        let number = step_number(&self.step)
            .ok_or_else(|| AppError::BadRequest("step is required".to_string()))?;
        let step = JourneyStep::from_number(number)?;
        let shipment_id = self
            .shipment_id
            .ok_or_else(|| AppError::BadRequest("shipmentId is required".to_string()))?;
        Ok((shipment_id, step))
    }
}

/// Save one step's data and advance the journey.
///
/// POST /api/journey/update (also POST /update-journey)
///
/// # Errors
///
/// Returns 400 for an invalid step or missing shipment (nothing is written),
/// 404 if the shipment does not exist.
#[instrument(skip(state, body))]
pub async fn save_step(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SaveStepRequest>,
) -> Result<Json<ProgressResponse>> {
    let (shipment_id, step) = body.validate()?;
    let data = match body.data {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    let progress = JourneyRepository::new(state.pool())
        .save_step(body.user_id, shipment_id, step, &data)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Shipment not found".to_string()),
            other => other.into(),
        })?;

    tracing::info!(
        shipment_id = %shipment_id,
        step = step.number(),
        current_step = progress.current_step,
        "Journey step saved"
    );

    Ok(Json(ProgressResponse {
        success: true,
        message: Some("Progress Saved"),
        progress,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use serde_json::json;

    fn request(value: Value) -> SaveStepRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_step_number_forms() {
        assert_eq!(step_number(&json!(2)), Some(2));
        assert_eq!(step_number(&json!(2.0)), Some(2));
        assert_eq!(step_number(&json!("3")), Some(3));
        assert_eq!(step_number(&json!(2.5)), None);
        assert_eq!(step_number(&json!("two")), None);
        assert_eq!(step_number(&Value::Null), None);
    }

    #[test]
    fn test_validate_accepts_string_ids() {
        let (shipment_id, step) = request(json!({
            "userId": "4",
            "shipmentId": "12",
            "step": 1,
            "data": {"input_company": "Acme"}
        }))
        .validate()
        .unwrap();

        assert_eq!(shipment_id, ShipmentId::new(12));
        assert_eq!(step, JourneyStep::CompanyRegistration);
    }

    #[test]
    fn test_validate_rejects_out_of_range_steps() {
        for step in [json!(0), json!(7), json!(-1), json!("9")] {
            let err = request(json!({"shipmentId": 1, "step": step}))
                .validate()
                .unwrap_err();
            assert!(matches!(err, AppError::Journey(_)));
        }
    }

    #[test]
    fn test_validate_requires_step_and_shipment() {
        assert!(matches!(
            request(json!({"shipmentId": 1})).validate(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            request(json!({"step": 1})).validate(),
            Err(AppError::BadRequest(_))
        ));
    }
}
