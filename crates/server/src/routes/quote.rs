//! Freight quote and landed-cost routes.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use smart_shipping_core::TransportMode;

use super::extract::ApiJson;
use crate::services::cost::{TripCost, TripCostInput, calculate_trip_cost};
use crate::services::parse_number;
use crate::services::quote::{DEFAULT_WEIGHT_KG, Quote, QuoteRequest, calculate_quote};

/// Body of `POST /api/quote/calculate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBody {
    #[serde(default)]
    pub from_country: String,
    #[serde(default)]
    pub to_country: String,
    pub weight: Option<Value>,
    pub mode: Option<String>,
}

impl QuoteBody {
    /// Missing, zero or unparseable weights fall back to a 1 t shipment;
    /// unknown modes quote as Ocean.
    fn to_request(&self) -> QuoteRequest<'_> {
        let weight_kg = parse_number(self.weight.as_ref())
            .filter(|w| *w != 0.0)
            .unwrap_or(DEFAULT_WEIGHT_KG);
        let mode = self
            .mode
            .as_deref()
            .and_then(|m| m.parse::<TransportMode>().ok())
            .unwrap_or_default();

        QuoteRequest {
            origin: &self.from_country,
            dest: &self.to_country,
            weight_kg,
            mode,
        }
    }
}

/// Response of `POST /api/quote/calculate`.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub success: bool,
    #[serde(flatten)]
    pub quote: Quote,
}

/// Best Value, Fastest and Eco-Saver options for a lane.
///
/// POST /api/quote/calculate
pub async fn calculate(ApiJson(body): ApiJson<QuoteBody>) -> Json<QuoteResponse> {
    let quote = calculate_quote(&body.to_request());

    tracing::debug!(distance = quote.meta.distance, "Quote calculated");

    Json(QuoteResponse {
        success: true,
        quote,
    })
}

/// Body of `POST /api/cost/estimate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBody {
    #[serde(default)]
    pub from_country: String,
    #[serde(default)]
    pub to_country: String,
    #[serde(default)]
    pub mode: String,
    pub weight: Option<Value>,
    pub volume: Option<Value>,
    pub cargo_value: Option<Value>,
    #[serde(default)]
    pub product_type: String,
}

impl CostBody {
    fn to_input(&self) -> TripCostInput<'_> {
        let number = |v: Option<&Value>| parse_number(v).unwrap_or(0.0);

        TripCostInput {
            from_country: &self.from_country,
            to_country: &self.to_country,
            mode: &self.mode,
            weight_kg: number(self.weight.as_ref()),
            volume_cbm: number(self.volume.as_ref()),
            cargo_value_usd: number(self.cargo_value.as_ref()),
            product_type: &self.product_type,
        }
    }
}

/// Response of `POST /api/cost/estimate`.
#[derive(Debug, Serialize)]
pub struct CostResponse {
    pub success: bool,
    pub estimate: TripCost,
}

/// Landed cost in INR for a shipment.
///
/// POST /api/cost/estimate
pub async fn estimate(ApiJson(body): ApiJson<CostBody>) -> Json<CostResponse> {
    Json(CostResponse {
        success: true,
        estimate: calculate_trip_cost(&body.to_input()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_quote_defaults() {
        let body: QuoteBody =
            serde_json::from_value(json!({"fromCountry": "Mumbai", "toCountry": "Paris", "weight": "0"}))
                .unwrap();
        let request = body.to_request();
        assert!((request.weight_kg - DEFAULT_WEIGHT_KG).abs() < f64::EPSILON);
        assert_eq!(request.mode, TransportMode::Ocean);
    }

    #[test]
    fn test_quote_mode_is_parsed() {
        let body: QuoteBody =
            serde_json::from_value(json!({"weight": 250, "mode": "Air"})).unwrap();
        let request = body.to_request();
        assert!((request.weight_kg - 250.0).abs() < f64::EPSILON);
        assert_eq!(request.mode, TransportMode::Air);
    }

    #[test]
    fn test_unknown_mode_quotes_as_ocean() {
        let body: QuoteBody =
            serde_json::from_value(json!({"fromCountry": "India", "toCountry": "USA", "mode": "Sea"}))
                .unwrap();
        let quote = calculate_quote(&body.to_request());
        assert!(quote.quotes.iter().all(|q| q.mode == TransportMode::Ocean));
    }

    #[test]
    fn test_cost_non_numeric_inputs_become_zero() {
        let body: CostBody = serde_json::from_value(json!({
            "fromCountry": "India",
            "toCountry": "USA",
            "mode": "Sea",
            "weight": "heavy",
            "cargoValue": null
        }))
        .unwrap();
        let input = body.to_input();
        assert!(input.weight_kg.abs() < f64::EPSILON);
        assert!(input.volume_cbm.abs() < f64::EPSILON);
        assert!(input.cargo_value_usd.abs() < f64::EPSILON);
    }
}
