//! Deterministic mock vessel tracking.
//!
//! Every value is derived from the tracking ID, so the same ID always shows
//! the same vessel. Unknown IDs are not errors; there is nothing to look up.

use chrono::{DateTime, Days, Utc};
use serde::Serialize;

const STATUSES: [&str; 6] = [
    "In Transit",
    "In Transit",
    "In Transit",
    "Pending",
    "Delivered",
    "Customs Hold",
];

const ORIGIN: (&str, f64, f64) = ("Mumbai, IN", 18.9, 72.8);
const DESTINATION: (&str, f64, f64) = ("Le Havre, FR", 49.4, 0.1);

/// Nautical miles on the full route.
const ROUTE_NM: f64 = 6000.0;

/// Origin and destination names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub origin: &'static str,
    pub dest: &'static str,
}

/// Position on the straight line between the route's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// State of a timeline milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Completed,
    Active,
    Pending,
}

/// One entry on the tracking timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub status: MilestoneState,
    pub title: &'static str,
    pub date: String,
    pub loc: &'static str,
}

/// Tracking snapshot for one ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracking {
    pub id: String,
    pub route: Route,
    pub cargo: &'static str,
    pub status: &'static str,
    pub eta: String,
    /// Percent of the route covered, 0..=99.
    pub progress: u8,
    pub speed: String,
    pub next_port: &'static str,
    pub distance_left: String,
    pub coordinates: Coordinates,
    pub timeline: Vec<Milestone>,
    pub last_updated: DateTime<Utc>,
}

/// Seeded pseudo-random source: `frac(sin(seed + offset) * 10000)`.
#[derive(Debug, Clone, Copy)]
struct MockRandom(f64);

impl MockRandom {
    /// Seed from the sum of the ID's UTF-16 code units.
    #[allow(clippy::cast_precision_loss)]
    fn new(id: &str) -> Self {
        let seed: u64 = id.encode_utf16().map(u64::from).sum();
        Self(seed as f64)
    }

    /// A value in `[0, 1)`.
    fn at(self, offset: f64) -> f64 {
        let x = (self.0 + offset).sin() * 10_000.0;
        x - x.floor()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_u32(value: f64) -> u32 {
    value.floor() as u32
}

/// Build the tracking snapshot for `id` as of `now`.
#[must_use]
pub fn track(id: &str, now: DateTime<Utc>) -> Tracking {
    let random = MockRandom::new(id);

    let status_index = floor_u32(random.at(1.0) * 6.0) as usize;
    let status = STATUSES.get(status_index).copied().unwrap_or("In Transit");
    let delivered = status == "Delivered";

    let progress = random.at(2.0);
    let lat = (DESTINATION.1 - ORIGIN.1).mul_add(progress, ORIGIN.1);
    let lng = (DESTINATION.2 - ORIGIN.2).mul_add(progress, ORIGIN.2);

    let speed = 16 + floor_u32(random.at(3.0) * 8.0);
    let remaining_days = floor_u32((1.0 - progress) * 20.0) + 1;

    let state = |done: bool, otherwise: MilestoneState| {
        if done { MilestoneState::Completed } else { otherwise }
    };
    let timeline = vec![
        Milestone {
            status: MilestoneState::Completed,
            title: "Booking Confirmed",
            date: "Jan 28, 2026".to_string(),
            loc: "System",
        },
        Milestone {
            status: MilestoneState::Completed,
            title: "Cargo Picked Up",
            date: "Jan 30, 2026".to_string(),
            loc: "Origin Warehouse",
        },
        Milestone {
            status: state(progress > 0.1, MilestoneState::Active),
            title: "Vessel Departure",
            date: "Feb 02, 2026".to_string(),
            loc: "Mumbai Port, IN",
        },
        Milestone {
            status: state(progress > 0.9 || delivered, MilestoneState::Active),
            title: "In Transit",
            date: "Live".to_string(),
            loc: "Ocean",
        },
        Milestone {
            status: state(delivered, MilestoneState::Pending),
            title: "Arrival",
            date: format!("Est. in {remaining_days} Days"),
            loc: DESTINATION.0,
        },
    ];

    let eta = now
        .date_naive()
        .checked_add_days(Days::new(u64::from(remaining_days)))
        .unwrap_or_else(|| now.date_naive());

    Tracking {
        id: id.to_string(),
        route: Route {
            origin: ORIGIN.0,
            dest: DESTINATION.0,
        },
        cargo: "Electronics & Machinery",
        status,
        eta: eta.format("%d %b %Y").to_string(),
        progress: u8::try_from(floor_u32(progress * 100.0)).unwrap_or(99),
        speed: format!("{speed} knots"),
        next_port: "Suez Canal, EG",
        distance_left: format!("{} nm", floor_u32((1.0 - progress) * ROUTE_NM)),
        coordinates: Coordinates { lat, lng },
        timeline,
        last_updated: now,
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_same_id_same_snapshot() {
        assert_eq!(track("MSKU1234567", now()), track("MSKU1234567", now()));
    }

    #[test]
    fn test_seed_is_order_insensitive_sum() {
        // Same characters, same code-unit sum.
        let a = track("AB12", now());
        let b = track("21BA", now());
        assert_eq!(a.status, b.status);
        assert_eq!(a.progress, b.progress);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_values_within_bounds() {
        for id in ["A", "MSKU1234567", "SS-BKG-2026-1001", "track-me", "ü"] {
            let t = track(id, now());
            assert!(t.progress < 100);
            assert!((16..=23).contains(&t.speed.trim_end_matches(" knots").parse::<u32>().unwrap()));
            assert!(STATUSES.contains(&t.status));
            assert!((18.9..=49.4).contains(&t.coordinates.lat));
            assert!((0.1..=72.8).contains(&t.coordinates.lng));
            assert_eq!(t.timeline.len(), 5);
            assert_eq!(t.route.origin, "Mumbai, IN");
            assert_eq!(t.next_port, "Suez Canal, EG");
            assert!(t.distance_left.ends_with(" nm"));
        }
    }

    #[test]
    fn test_timeline_reflects_delivery() {
        // Search a few IDs for a delivered and an undelivered vessel.
        let snapshots: Vec<_> = (0..200).map(|n| track(&format!("ID{n}"), now())).collect();

        let delivered = snapshots.iter().find(|t| t.status == "Delivered").unwrap();
        assert_eq!(delivered.timeline[3].status, MilestoneState::Completed);
        assert_eq!(delivered.timeline[4].status, MilestoneState::Completed);

        let moving = snapshots.iter().find(|t| t.status == "In Transit").unwrap();
        assert_eq!(moving.timeline[4].status, MilestoneState::Pending);
        assert_eq!(moving.timeline[0].status, MilestoneState::Completed);
    }

    #[test]
    fn test_eta_follows_remaining_days() {
        let t = track("MSKU1234567", now());
        let days: u64 = t.timeline[4]
            .date
            .trim_start_matches("Est. in ")
            .trim_end_matches(" Days")
            .parse()
            .unwrap();
        let expected = now().date_naive() + Days::new(days);
        assert_eq!(t.eta, expected.format("%d %b %Y").to_string());
    }
}
