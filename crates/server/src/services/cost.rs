//! Rule-based trip cost estimate.
//!
//! Computes an itemised landed-cost estimate in USD from a handful of rules
//! (region multiplier, per-mode freight rate, duty by product keyword) and
//! reports every component in INR.

use serde::Serialize;

use super::round2;

/// USD to INR conversion applied to every component.
pub const EXCHANGE_RATE: f64 = 84.0;

const FUEL_SURCHARGE_RATE: f64 = 0.15;
const PORT_FEE_FIXED: f64 = 150.0;
const PORT_FEE_PER_KG: f64 = 0.05;
const INSURANCE_RATE: f64 = 0.005;

/// Inputs to a cost estimate. Missing numeric values are zero.
#[derive(Debug, Clone, Default)]
pub struct TripCostInput<'a> {
    pub from_country: &'a str,
    pub to_country: &'a str,
    pub mode: &'a str,
    pub weight_kg: f64,
    pub volume_cbm: f64,
    pub cargo_value_usd: f64,
    pub product_type: &'a str,
}

/// Itemised cost components in INR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub base_freight: f64,
    pub fuel_surcharge: f64,
    pub port_fees: f64,
    pub customs_duty: f64,
    pub insurance: f64,
}

/// How the estimate was derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostMeta {
    pub mode: String,
    pub duty_rate_used: String,
    pub applied_region_multiplier: f64,
    pub exchange_rate: f64,
}

/// A complete estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCost {
    pub currency: &'static str,
    pub breakdown: CostBreakdown,
    pub total: f64,
    pub meta: CostMeta,
}

/// Lane pricing: India and the USA in either direction is long-haul, any
/// China lane is high-volume and cheaper, everything else is neutral.
#[must_use]
pub fn region_multiplier(from_country: &str, to_country: &str) -> f64 {
    let india_usa = (from_country.contains("India") && to_country.contains("USA"))
        || (from_country.contains("USA") && to_country.contains("India"));
    if india_usa {
        1.5
    } else if from_country.contains("China") || to_country.contains("China") {
        0.8
    } else {
        1.0
    }
}

/// Import duty rate guessed from keywords in the product description.
#[must_use]
pub fn duty_rate(product_type: &str) -> f64 {
    let product = product_type.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| product.contains(k));

    if has(&["electronic", "phone", "laptop"]) {
        0.18
    } else if has(&["textile", "cloth", "cotton"]) {
        0.12
    } else if has(&["food", "agri"]) {
        0.05
    } else {
        0.10
    }
}

/// Estimate the cost of a trip.
///
/// Air and road are priced per kilogram; anything else is sea freight priced
/// per cubic metre with a one CBM minimum.
#[must_use]
pub fn calculate_trip_cost(input: &TripCostInput<'_>) -> TripCost {
    let weight = input.weight_kg;
    let value = input.cargo_value_usd;
    let mode = input.mode.to_lowercase();
    let multiplier = region_multiplier(input.from_country, input.to_country);

    let base_freight = if mode.contains("air") {
        weight * 3.5 * multiplier
    } else if mode.contains("road") {
        weight * 0.5 * multiplier
    } else {
        input.volume_cbm.max(1.0) * 80.0 * multiplier
    };

    let fuel_surcharge = base_freight * FUEL_SURCHARGE_RATE;
    let port_fees = weight.mul_add(PORT_FEE_PER_KG, PORT_FEE_FIXED);
    let rate = duty_rate(input.product_type);
    let customs_duty = value * rate;
    let insurance = value * INSURANCE_RATE;
    let total_usd = base_freight + fuel_surcharge + port_fees + customs_duty + insurance;

    let inr = |usd: f64| round2(usd * EXCHANGE_RATE);

    TripCost {
        currency: "INR",
        breakdown: CostBreakdown {
            base_freight: inr(base_freight),
            fuel_surcharge: inr(fuel_surcharge),
            port_fees: inr(port_fees),
            customs_duty: inr(customs_duty),
            insurance: inr(insurance),
        },
        total: inr(total_usd),
        meta: CostMeta {
            mode,
            duty_rate_used: format!("{:.0}%", rate * 100.0),
            applied_region_multiplier: multiplier,
            exchange_rate: EXCHANGE_RATE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_region_multiplier() {
        assert!(close(region_multiplier("India", "USA"), 1.5));
        assert!(close(region_multiplier("USA", "India"), 1.5));
        assert!(close(region_multiplier("China", "Germany"), 0.8));
        assert!(close(region_multiplier("UK", "China"), 0.8));
        assert!(close(region_multiplier("UK", "Germany"), 1.0));
    }

    #[test]
    fn test_duty_rate_keywords() {
        assert!(close(duty_rate("Consumer Electronics"), 0.18));
        assert!(close(duty_rate("laptops"), 0.18));
        assert!(close(duty_rate("Cotton yarn"), 0.12));
        assert!(close(duty_rate("Agri produce"), 0.05));
        assert!(close(duty_rate("Machinery"), 0.10));
        assert!(close(duty_rate(""), 0.10));
    }

    #[test]
    fn test_air_india_usa_electronics() {
        let cost = calculate_trip_cost(&TripCostInput {
            from_country: "India",
            to_country: "USA",
            mode: "Air",
            weight_kg: 1000.0,
            volume_cbm: 0.0,
            cargo_value_usd: 10_000.0,
            product_type: "electronics",
        });

        // base 1000 * 3.5 * 1.5 = 5250 USD
        assert!(close(cost.breakdown.base_freight, 441_000.0));
        assert!(close(cost.breakdown.fuel_surcharge, 66_150.0));
        assert!(close(cost.breakdown.port_fees, 16_800.0));
        assert!(close(cost.breakdown.customs_duty, 151_200.0));
        assert!(close(cost.breakdown.insurance, 4_200.0));
        assert!(close(cost.total, 679_350.0));
        assert_eq!(cost.currency, "INR");
        assert_eq!(cost.meta.mode, "air");
        assert_eq!(cost.meta.duty_rate_used, "18%");
        assert!(close(cost.meta.applied_region_multiplier, 1.5));
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let input = TripCostInput {
            from_country: "India",
            to_country: "USA",
            mode: "Air",
            weight_kg: 1000.0,
            cargo_value_usd: 10_000.0,
            product_type: "electronics",
            ..TripCostInput::default()
        };
        assert_eq!(calculate_trip_cost(&input), calculate_trip_cost(&input));
    }

    #[test]
    fn test_sea_freight_has_one_cbm_minimum() {
        let cost = calculate_trip_cost(&TripCostInput {
            from_country: "UK",
            to_country: "Germany",
            mode: "Sea",
            volume_cbm: 0.2,
            ..TripCostInput::default()
        });

        assert!(close(cost.breakdown.base_freight, 80.0 * EXCHANGE_RATE));
        assert!(close(cost.breakdown.port_fees, 150.0 * EXCHANGE_RATE));
        assert!(close(cost.breakdown.customs_duty, 0.0));
        assert_eq!(cost.meta.duty_rate_used, "10%");
    }

    #[test]
    fn test_road_priced_per_kg() {
        let cost = calculate_trip_cost(&TripCostInput {
            from_country: "China",
            to_country: "Vietnam",
            mode: "Road",
            weight_kg: 200.0,
            ..TripCostInput::default()
        });

        // 200 * 0.5 * 0.8 = 80 USD
        assert!(close(cost.breakdown.base_freight, 6_720.0));
    }
}
