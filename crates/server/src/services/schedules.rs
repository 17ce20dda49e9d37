//! Mock sailing schedules.
//!
//! There is no carrier integration; each search returns a fresh random set of
//! plausible sailings.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

const CARRIERS: [&str; 5] = ["Maersk", "CMA CGM", "MSC", "Hapag-Lloyd", "ONE"];
const VESSELS: [&str; 5] = ["MARCO POLO", "GULSUN", "SEOUL", "MADRID", "AL ZUBARA"];

/// Display format for sailing dates, e.g. `05 Mar 2026`.
pub const DATE_FORMAT: &str = "%d %b %Y";

/// One sailing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sailing {
    pub id: String,
    pub carrier: &'static str,
    pub vessel: String,
    pub voyage: String,
    pub departure: String,
    pub arrival: String,
    pub transit_time: u32,
    pub service: &'static str,
}

/// Generate three to five sailings departing 2..=15 days after `today`
/// with an 18..=32 day transit.
pub fn search<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<Sailing> {
    let count = rng.random_range(3..=5);
    (0..count).map(|_| sailing(rng, today)).collect()
}

fn sailing<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Sailing {
    let departure = today + Days::new(rng.random_range(2..16));
    let transit_time: u32 = rng.random_range(18..33);
    let arrival = departure + Days::new(u64::from(transit_time));

    let carrier = CARRIERS.choose(rng).copied().unwrap_or("Maersk");
    let vessel = VESSELS.choose(rng).copied().unwrap_or("MARCO POLO");
    let prefix: String = carrier.chars().take(2).collect();
    let number: u32 = rng.random_range(1000..10_000);

    Sailing {
        id: format!("{prefix}{number}").to_uppercase(),
        carrier,
        vessel: format!("{carrier} {vessel}"),
        voyage: format!("VY{}W", rng.random_range(0..100)),
        departure: departure.format(DATE_FORMAT).to_string(),
        arrival: arrival.format(DATE_FORMAT).to_string(),
        transit_time,
        service: "AE-1",
    }
}
