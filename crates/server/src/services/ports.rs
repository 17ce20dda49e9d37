//! Port recommendations by country.

use serde::Serialize;

/// A port (or air cargo terminal) suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Port {
    pub name: &'static str,
    pub loc: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

const fn sea(name: &'static str, loc: &'static str) -> Port {
    Port { name, loc, kind: "Sea" }
}

const fn air(name: &'static str, loc: &'static str) -> Port {
    Port { name, loc, kind: "Air" }
}

/// Placeholder returned when the country is not in the table.
pub const MANUAL_ENTRY: Port = Port {
    name: "Enter Port Manually",
    loc: "Unknown",
    kind: "Any",
};

/// Ports per country, in display order.
pub static PORTS: &[(&str, &[Port])] = &[
    (
        "India",
        &[
            sea("Nhava Sheva (JNPT)", "Mumbai"),
            sea("Mundra Port", "Gujarat"),
            sea("Chennai Port", "Tamil Nadu"),
            sea("Kolkata Port", "West Bengal"),
            air("IGIA Air Cargo", "Delhi"),
        ],
    ),
    (
        "USA",
        &[
            sea("Port of Los Angeles", "California"),
            sea("Port of Long Beach", "California"),
            sea("Port of New York & NJ", "New York"),
            sea("Savannah Port", "Georgia"),
        ],
    ),
    (
        "China",
        &[
            sea("Port of Shanghai", "Shanghai"),
            sea("Ningbo-Zhoushan", "Zhejiang"),
            sea("Shenzhen Port", "Guangdong"),
        ],
    ),
    (
        "UAE",
        &[sea("Jebel Ali", "Dubai"), sea("Port Rashid", "Dubai")],
    ),
    (
        "UK",
        &[sea("Felixstowe", "Suffolk"), sea("Southampton", "Hampshire")],
    ),
    (
        "Germany",
        &[sea("Port of Hamburg", "Hamburg"), sea("Bremerhaven", "Bremen")],
    ),
];

/// Ports for `country`.
///
/// Tries an exact key first, then the first key contained in the input
/// (case-insensitive, so `"Republic of India"` finds India). Falls back to
/// a single manual-entry placeholder.
#[must_use]
pub fn recommend(country: &str) -> Vec<Port> {
    let country = country.trim();
    let lowered = country.to_lowercase();

    PORTS
        .iter()
        .find(|(key, _)| *key == country)
        .or_else(|| {
            PORTS
                .iter()
                .find(|(key, _)| lowered.contains(&key.to_lowercase()))
        })
        .map_or_else(|| vec![MANUAL_ENTRY], |(_, ports)| ports.to_vec())
}
