//! Freight quote engine.
//!
//! Produces three options (best value, fastest, eco) for a lane from a mock
//! distance and per-mode emission factors.

use serde::Serialize;

use smart_shipping_core::TransportMode;

/// Weight assumed when the request has none (kg).
pub const DEFAULT_WEIGHT_KG: f64 = 1000.0;

/// Carbon offset price in USD per tonne of CO2.
const CARBON_PRICE_PER_TON: f64 = 15.0;

/// Emission factor in kg CO2 per tonne-km.
#[must_use]
pub const fn emission_factor(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Ocean => 0.015,
        TransportMode::Air => 0.55,
        TransportMode::Road => 0.062,
        TransportMode::Rail => 0.022,
    }
}

/// Stable pseudo-distance for a lane, in km, within `3000..18000`.
///
/// Hashes `origin + dest` over UTF-16 code units with the classic
/// `h * 31 + c` string hash in wrapping 32-bit arithmetic.
#[must_use]
pub fn mock_distance(origin: &str, dest: &str) -> u32 {
    let hash = origin
        .encode_utf16()
        .chain(dest.encode_utf16())
        .fold(0_i32, |h, unit| {
            (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit))
        });
    hash.unsigned_abs() % 15_000 + 3_000
}

/// CO2 emitted moving `weight_kg` over `distance_km`, in whole kg.
#[must_use]
pub fn co2_kg(weight_kg: f64, distance_km: f64, mode: TransportMode) -> f64 {
    (weight_kg / 1000.0 * distance_km * emission_factor(mode)).round()
}

/// A request for quotes.
#[derive(Debug, Clone)]
pub struct QuoteRequest<'a> {
    pub origin: &'a str,
    pub dest: &'a str,
    pub weight_kg: f64,
    pub mode: TransportMode,
}

/// One quoted option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOption {
    pub id: &'static str,
    pub name: &'static str,
    pub badge: &'static str,
    pub carrier: &'static str,
    pub mode: TransportMode,
    pub days: u32,
    pub cost: u64,
    pub co2: u64,
    pub reliability: &'static str,
    pub carbon_offset_cost: u64,
}

/// Lane details echoed alongside the quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteMeta {
    pub origin: String,
    pub dest: String,
    pub distance: u32,
}

/// The full quote response body (minus the `success` flag).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub quotes: Vec<QuoteOption>,
    pub meta: QuoteMeta,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> u64 {
    value as u64
}

fn option(
    (id, name, badge, carrier, reliability): (&'static str, &'static str, &'static str, &'static str, &'static str),
    mode: TransportMode,
    days: f64,
    cost: f64,
    co2: f64,
) -> QuoteOption {
    QuoteOption {
        id,
        name,
        badge,
        carrier,
        mode,
        days: u32::try_from(whole(days)).unwrap_or(u32::MAX),
        cost: whole(cost),
        co2: whole(co2.round()),
        reliability,
        carbon_offset_cost: whole((co2 / 1000.0 * CARBON_PRICE_PER_TON).ceil()),
    }
}

/// Build the three quote options for a lane.
#[must_use]
pub fn calculate_quote(request: &QuoteRequest<'_>) -> Quote {
    let mode = request.mode;
    let is_air = mode == TransportMode::Air;
    let distance = mock_distance(request.origin, request.dest);
    let distance_km = f64::from(distance);

    let rate_per_km = if is_air { 0.8 } else { 0.05 };
    let base_cost = (distance_km * rate_per_km * (request.weight_kg / 1000.0)).round();
    let base_days = if is_air { 3.0 } else { (distance_km / 500.0).round() };
    let co2 = co2_kg(request.weight_kg, distance_km, mode);

    let quotes = vec![
        option(
            ("opt_best", "Best Value", "AI Recommended", "Maersk Line", "98%"),
            mode,
            base_days,
            base_cost,
            co2,
        ),
        option(
            (
                "opt_fast",
                "Fastest",
                "Fastest",
                if is_air { "DHL Aviation" } else { "CMA CGM Express" },
                "99%",
            ),
            if is_air { TransportMode::Air } else { TransportMode::Ocean },
            (base_days * 0.7).round().max(1.0),
            (base_cost * 1.4).round(),
            // Offset is priced on the unrounded figure.
            co2 * 1.1,
        ),
        option(
            ("opt_eco", "Eco-Saver", "Carbon Neutral", "Hapag-Lloyd (Green)", "95%"),
            mode,
            (base_days * 1.2).round(),
            (base_cost * 0.85).round(),
            (co2 * 0.8).round(),
        ),
    ];

    Quote {
        quotes,
        meta: QuoteMeta {
            origin: request.origin.to_string(),
            dest: request.dest.to_string(),
            distance,
        },
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    /// Reference implementation over chars for ASCII inputs.
    fn reference_hash(s: &str) -> i32 {
        let mut h: i32 = 0;
        for c in s.chars() {
            h = h.wrapping_mul(31).wrapping_add(c as i32);
        }
        h
    }

    #[test]
    fn test_mock_distance_is_stable_and_in_range() {
        let d = mock_distance("Mumbai", "Paris");
        assert_eq!(d, mock_distance("Mumbai", "Paris"));
        assert!((3_000..18_000).contains(&d));
        assert_eq!(d, 14_686);
        assert_eq!(
            d,
            reference_hash("MumbaiParis").unsigned_abs() % 15_000 + 3_000
        );
    }

    #[test]
    fn test_mock_distance_of_empty_lane_is_minimum() {
        assert_eq!(mock_distance("", ""), 3_000);
    }

    #[test]
    fn test_mock_distance_depends_on_direction() {
        assert_ne!(
            mock_distance("India", "USA"),
            mock_distance("USA", "India")
        );
    }

    #[test]
    fn test_co2_uses_mode_factor() {
        assert!((co2_kg(1000.0, 10_000.0, TransportMode::Ocean) - 150.0).abs() < f64::EPSILON);
        assert!((co2_kg(1000.0, 10_000.0, TransportMode::Air) - 5_500.0).abs() < f64::EPSILON);
        assert!((co2_kg(2000.0, 1_000.0, TransportMode::Rail) - 44.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_three_options_scaled_from_base() {
        let quote = calculate_quote(&QuoteRequest {
            origin: "India",
            dest: "Germany",
            weight_kg: 1000.0,
            mode: TransportMode::Ocean,
        });
        let distance = f64::from(quote.meta.distance);
        let base_cost = (distance * 0.05).round();
        let base_days = (distance / 500.0).round();

        assert_eq!(quote.quotes.len(), 3);
        let [best, fast, eco] = [&quote.quotes[0], &quote.quotes[1], &quote.quotes[2]];

        assert_eq!(best.id, "opt_best");
        assert_eq!(best.cost, whole(base_cost));
        assert_eq!(best.days, u32::try_from(whole(base_days)).unwrap_or_default());
        assert_eq!(best.carrier, "Maersk Line");

        assert_eq!(fast.id, "opt_fast");
        assert_eq!(fast.carrier, "CMA CGM Express");
        assert_eq!(fast.mode, TransportMode::Ocean);
        assert_eq!(fast.cost, whole((base_cost * 1.4).round()));

        assert_eq!(eco.id, "opt_eco");
        assert_eq!(eco.cost, whole((base_cost * 0.85).round()));
        assert!(eco.co2 <= best.co2);
    }

    #[test]
    fn test_air_quote_uses_air_rates() {
        let quote = calculate_quote(&QuoteRequest {
            origin: "India",
            dest: "USA",
            weight_kg: 500.0,
            mode: TransportMode::Air,
        });

        assert_eq!(quote.quotes[0].days, 3);
        assert_eq!(quote.quotes[1].days, 2);
        assert_eq!(quote.quotes[1].carrier, "DHL Aviation");
        assert_eq!(
            quote.quotes[0].cost,
            whole((f64::from(quote.meta.distance) * 0.8 * 0.5).round())
        );
    }

    #[test]
    fn test_fastest_offset_uses_unrounded_co2() {
        let request = QuoteRequest {
            origin: "Mumbai",
            dest: "Paris",
            weight_kg: 1000.0,
            mode: TransportMode::Air,
        };
        let quote = calculate_quote(&request);
        let co2 = co2_kg(request.weight_kg, f64::from(quote.meta.distance), request.mode);
        let fast = &quote.quotes[1];

        assert_eq!(fast.co2, whole((co2 * 1.1).round()));
        assert_eq!(
            fast.carbon_offset_cost,
            whole((co2 * 1.1 / 1000.0 * 15.0).ceil())
        );
    }

    #[test]
    fn test_carbon_offset_rounds_up() {
        let quote = calculate_quote(&QuoteRequest {
            origin: "A",
            dest: "B",
            weight_kg: 1000.0,
            mode: TransportMode::Air,
        });
        for opt in [&quote.quotes[0], &quote.quotes[2]] {
            #[allow(clippy::cast_precision_loss)]
            let expected = (opt.co2 as f64 / 1000.0 * 15.0).ceil();
            assert_eq!(opt.carbon_offset_cost, whole(expected));
        }
    }
}
