//! Harmonized System code lookup.

use serde::Serialize;

/// One tariff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HsCode {
    pub code: &'static str,
    pub name: &'static str,
    pub duty: &'static str,
}

const fn hs(code: &'static str, name: &'static str, duty: &'static str) -> HsCode {
    HsCode { code, name, duty }
}

/// The tariff lines the lookup knows about.
pub static HS_CODES: [HsCode; 22] = [
    hs("1006.30", "Semi-milled or wholly milled rice", "0%"),
    hs("0902.40", "Black tea (fermented)", "0%"),
    hs("0901.11", "Coffee, not roasted, not decaffeinated", "5%"),
    hs("5201.00", "Cotton, not carded or combed", "0%"),
    hs("6109.10", "T-shirts of cotton", "10%"),
    hs("6203.42", "Men's trousers, cotton", "10%"),
    hs("6403.99", "Leather Footwear", "10%"),
    hs("7102.39", "Diamonds, worked but not mounted", "2.5%"),
    hs("7113.19", "Gold Jewellery", "15%"),
    hs("8471.30", "Laptops & Notebooks", "0%"),
    hs("8517.12", "Smartphones (Mobile Phones)", "20%"),
    hs("8703.23", "Passenger Cars (>1500cc but <3000cc)", "60%"),
    hs("3004.90", "Medicaments (Pharmaceuticals)", "0%"),
    hs("8407.34", "Engines for vehicles (>1000cc)", "15%"),
    hs("2710.12", "Petroleum Oils (Light)", "10%"),
    hs("7207.11", "Semi-finished Iron/Steel", "7.5%"),
    hs("0804.50", "Guavas, Mangoes (Fresh/Dried)", "30%"),
    hs("0904.11", "Pepper", "70%"),
    hs("0805.10", "Oranges", "30%"),
    hs("3926.90", "Plastic Articles", "10%"),
    hs("9403.60", "Wooden Furniture", "20%"),
    hs("9503.00", "Toys, Scale Models", "60%"),
];

/// Tariff lines whose name contains `query` (case-insensitive) or whose
/// code contains it. An empty query matches nothing.
#[must_use]
pub fn search(query: &str) -> Vec<HsCode> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    HS_CODES
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query) || item.code.contains(&query))
        .copied()
        .collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(search("").is_empty());
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let results = search("COTTON");
        let codes: Vec<_> = results.iter().map(|r| r.code).collect();
        assert_eq!(codes, ["5201.00", "6109.10", "6203.42"]);
    }

    #[test]
    fn test_code_prefix_match() {
        let results = search("8517");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Smartphones (Mobile Phones)");
        assert_eq!(results[0].duty, "20%");
    }

    #[test]
    fn test_no_match() {
        assert!(search("spaceship").is_empty());
    }
}
