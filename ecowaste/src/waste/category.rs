//! The fixed waste category table.
//!
//! Every category carries a display label, whether quantity-based crediting applies to it
//! (`weighable`), and the credits paid per kilogram. The table is immutable and shared by the
//! classification mapper, the credit calculator, and the reference endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::credits::CreditError;

/// One of the fixed recycling classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WasteCategory {
    Paper,
    Plastic,
    Metal,
    Glass,
    Organic,
    EWaste,
    Textile,
    Hazardous,
}

/// Static description of a category, as exposed through `WASTE_TYPES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WasteTypeInfo {
    pub category: WasteCategory,
    pub label: &'static str,
    pub weighable: bool,
    pub price_per_kg: Decimal,
}

// Prices are fixed-point with two decimal places: 0.10, 0.15, 0.20.
const fn price(hundredths: u32) -> Decimal {
    Decimal::from_parts(hundredths, 0, 0, false, 2)
}

/// The category table, in display order.
pub static WASTE_TYPES: [WasteTypeInfo; 8] = [
    WasteTypeInfo {
        category: WasteCategory::Paper,
        label: "Paper",
        weighable: true,
        price_per_kg: price(10),
    },
    WasteTypeInfo {
        category: WasteCategory::Plastic,
        label: "Plastic",
        weighable: true,
        price_per_kg: price(15),
    },
    WasteTypeInfo {
        category: WasteCategory::Metal,
        label: "Metal",
        weighable: true,
        price_per_kg: price(20),
    },
    WasteTypeInfo {
        category: WasteCategory::Glass,
        label: "Glass",
        weighable: false,
        price_per_kg: Decimal::ZERO,
    },
    WasteTypeInfo {
        category: WasteCategory::Organic,
        label: "Organic",
        weighable: false,
        price_per_kg: Decimal::ZERO,
    },
    WasteTypeInfo {
        category: WasteCategory::EWaste,
        label: "E-Waste",
        weighable: false,
        price_per_kg: Decimal::ZERO,
    },
    WasteTypeInfo {
        category: WasteCategory::Textile,
        label: "Textile",
        weighable: false,
        price_per_kg: Decimal::ZERO,
    },
    WasteTypeInfo {
        category: WasteCategory::Hazardous,
        label: "Hazardous",
        weighable: false,
        price_per_kg: Decimal::ZERO,
    },
];

/// Places a user can pick as the collection point of an entry.
pub const COLLECTION_PLACES: [&str; 9] = [
    "Home",
    "Office",
    "School",
    "Park",
    "Shopping Mall",
    "Restaurant",
    "Factory",
    "Hospital",
    "Other",
];

impl WasteCategory {
    pub const ALL: [WasteCategory; 8] = [
        WasteCategory::Paper,
        WasteCategory::Plastic,
        WasteCategory::Metal,
        WasteCategory::Glass,
        WasteCategory::Organic,
        WasteCategory::EWaste,
        WasteCategory::Textile,
        WasteCategory::Hazardous,
    ];

    pub fn info(self) -> &'static WasteTypeInfo {
        // The table is laid out in declaration order, so the discriminant is the index.
        &WASTE_TYPES[self as usize]
    }

    /// Wire value, e.g. `"e-waste"`.
    pub fn as_str(self) -> &'static str {
        match self {
            WasteCategory::Paper => "paper",
            WasteCategory::Plastic => "plastic",
            WasteCategory::Metal => "metal",
            WasteCategory::Glass => "glass",
            WasteCategory::Organic => "organic",
            WasteCategory::EWaste => "e-waste",
            WasteCategory::Textile => "textile",
            WasteCategory::Hazardous => "hazardous",
        }
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn is_weighable(self) -> bool {
        self.info().weighable
    }

    pub fn price_per_kg(self) -> Decimal {
        self.info().price_per_kg
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = CreditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        WasteCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| CreditError::UnknownWasteType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_discriminant() {
        for category in WasteCategory::ALL {
            assert_eq!(category.info().category, category);
        }
    }

    #[test]
    fn test_weighable_categories_have_positive_price() {
        let weighable: Vec<_> = WasteCategory::ALL.into_iter().filter(|c| c.is_weighable()).collect();
        assert_eq!(
            weighable,
            vec![WasteCategory::Paper, WasteCategory::Plastic, WasteCategory::Metal]
        );

        for info in &WASTE_TYPES {
            assert_eq!(info.weighable, info.price_per_kg > Decimal::ZERO, "{}", info.label);
        }
    }

    #[test]
    fn test_prices() {
        assert_eq!(WasteCategory::Paper.price_per_kg(), Decimal::new(10, 2));
        assert_eq!(WasteCategory::Plastic.price_per_kg(), Decimal::new(15, 2));
        assert_eq!(WasteCategory::Metal.price_per_kg(), Decimal::new(20, 2));
        assert_eq!(WasteCategory::Hazardous.price_per_kg(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_and_display_round_trip_wire_values() {
        for category in WasteCategory::ALL {
            assert_eq!(category.to_string().parse::<WasteCategory>().unwrap(), category);
        }
        assert_eq!(" E-Waste ".parse::<WasteCategory>().unwrap(), WasteCategory::EWaste);
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "cardboard".parse::<WasteCategory>().unwrap_err();
        assert_eq!(err, CreditError::UnknownWasteType("cardboard".to_string()));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&WasteCategory::EWaste).unwrap();
        assert_eq!(json, "\"e-waste\"");
        let parsed: WasteCategory = serde_json::from_str("\"hazardous\"").unwrap();
        assert_eq!(parsed, WasteCategory::Hazardous);
    }
}
