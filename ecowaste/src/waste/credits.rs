//! Credit calculation and the quantity rules shared by every submission path.
//!
//! Credits are `quantity * price_per_kg` for weighable categories and zero for everything else.
//! A weighable category without a positive quantity is rejected with
//! [`CreditError::InvalidQuantity`] rather than silently earning nothing. Quantities above
//! [`MAX_QUANTITY_KG`] are rejected so credit totals stay well inside `Decimal` range.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

use super::category::WasteCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditError {
    /// Weighable category with a missing, zero or negative quantity
    #[error("Quantity must be greater than 0 kg for {category} waste")]
    InvalidQuantity { category: WasteCategory },

    /// Quantity supplied but not a usable number
    #[error("Quantity '{0}' is not a valid number")]
    MalformedQuantity(String),

    #[error("Quantity must be at most {max} kg")]
    QuantityTooLarge { max: Decimal },

    #[error("Unknown waste type: {0}")]
    UnknownWasteType(String),

    #[error("Credit total exceeds the supported maximum")]
    CreditOverflow,
}

/// Largest quantity a single entry may report.
pub const MAX_QUANTITY_KG: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Quantity as it arrives from a form: either a JSON number or the raw text of an input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(f64),
    Text(String),
}

/// Parse a raw quantity. Blank text counts as "not supplied".
pub fn parse_quantity(input: &QuantityInput) -> Result<Option<Decimal>, CreditError> {
    match input {
        QuantityInput::Number(value) => {
            if !value.is_finite() {
                return Err(CreditError::MalformedQuantity(value.to_string()));
            }
            Decimal::from_f64(*value)
                .map(Some)
                .ok_or_else(|| CreditError::MalformedQuantity(value.to_string()))
        }
        QuantityInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .map(Some)
                .map_err(|_| CreditError::MalformedQuantity(text.to_string()))
        }
    }
}

/// Enforce the weighable/quantity invariant.
///
/// Returns the quantity that belongs on the entry: the validated value for weighable categories,
/// `None` for the rest (a supplied quantity is discarded).
pub fn validate_quantity(category: WasteCategory, quantity: Option<Decimal>) -> Result<Option<Decimal>, CreditError> {
    if !category.is_weighable() {
        return Ok(None);
    }
    match quantity {
        Some(q) if q > MAX_QUANTITY_KG => Err(CreditError::QuantityTooLarge { max: MAX_QUANTITY_KG }),
        Some(q) if q > Decimal::ZERO => Ok(Some(q)),
        _ => Err(CreditError::InvalidQuantity { category }),
    }
}

/// Credits earned for `quantity` kilograms of `category`, at full precision.
pub fn compute_credits(category: WasteCategory, quantity: Option<Decimal>) -> Result<Decimal, CreditError> {
    let quantity = validate_quantity(category, quantity)?;
    match quantity {
        Some(q) => q.checked_mul(category.price_per_kg()).ok_or(CreditError::CreditOverflow),
        None => Ok(Decimal::ZERO),
    }
}

/// Two decimal places, for display.
pub fn round_credits(credits: Decimal) -> Decimal {
    credits.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_plastic_two_kg() {
        let credits = compute_credits(WasteCategory::Plastic, Some(dec("2"))).unwrap();
        assert_eq!(credits, dec("0.30"));
    }

    #[test]
    fn test_linear_in_quantity() {
        for category in [WasteCategory::Paper, WasteCategory::Plastic, WasteCategory::Metal] {
            for q in ["0.1", "1", "2.5", "13.37", "1000"] {
                let q = dec(q);
                let single = compute_credits(category, Some(q)).unwrap();
                let double = compute_credits(category, Some(q * Decimal::TWO)).unwrap();
                assert_eq!(double, single * Decimal::TWO, "{category} at {q}");
            }
        }
    }

    #[test]
    fn test_non_weighable_always_zero() {
        for category in WasteCategory::ALL.into_iter().filter(|c| !c.is_weighable()) {
            assert_eq!(compute_credits(category, None).unwrap(), Decimal::ZERO);
            assert_eq!(compute_credits(category, Some(dec("5"))).unwrap(), Decimal::ZERO);
            assert_eq!(compute_credits(category, Some(dec("-1"))).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_weighable_rejects_missing_or_non_positive_quantity() {
        for quantity in [None, Some(Decimal::ZERO), Some(dec("-0.5"))] {
            assert_eq!(
                compute_credits(WasteCategory::Metal, quantity),
                Err(CreditError::InvalidQuantity {
                    category: WasteCategory::Metal
                })
            );
        }
    }

    #[test]
    fn test_quantity_upper_bound() {
        assert_eq!(
            compute_credits(WasteCategory::Metal, Some(MAX_QUANTITY_KG)).unwrap(),
            dec("2000.00")
        );
        for quantity in ["10000.01", "79228162514264337593543950335"] {
            assert_eq!(
                compute_credits(WasteCategory::Metal, Some(dec(quantity))),
                Err(CreditError::QuantityTooLarge { max: MAX_QUANTITY_KG })
            );
        }
        assert_eq!(
            CreditError::QuantityTooLarge { max: MAX_QUANTITY_KG }.to_string(),
            "Quantity must be at most 10000 kg"
        );
        // no cap on quantities that are dropped anyway
        assert_eq!(validate_quantity(WasteCategory::Glass, Some(Decimal::MAX)).unwrap(), None);
    }

    #[test]
    fn test_validate_drops_quantity_for_non_weighable() {
        assert_eq!(validate_quantity(WasteCategory::Glass, Some(dec("3"))).unwrap(), None);
        assert_eq!(validate_quantity(WasteCategory::Paper, Some(dec("3"))).unwrap(), Some(dec("3")));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&QuantityInput::Text("2".into())).unwrap(), Some(dec("2")));
        assert_eq!(parse_quantity(&QuantityInput::Text(" 1.25 ".into())).unwrap(), Some(dec("1.25")));
        assert_eq!(parse_quantity(&QuantityInput::Text("".into())).unwrap(), None);
        assert_eq!(parse_quantity(&QuantityInput::Number(0.5)).unwrap(), Some(dec("0.5")));
        assert!(matches!(
            parse_quantity(&QuantityInput::Text("two".into())),
            Err(CreditError::MalformedQuantity(_))
        ));
        assert!(matches!(
            parse_quantity(&QuantityInput::Text("NaN".into())),
            Err(CreditError::MalformedQuantity(_))
        ));
        assert!(matches!(
            parse_quantity(&QuantityInput::Number(f64::INFINITY)),
            Err(CreditError::MalformedQuantity(_))
        ));
    }

    #[test]
    fn test_quantity_input_accepts_number_or_string() {
        let number: QuantityInput = serde_json::from_str("2").unwrap();
        assert_eq!(number, QuantityInput::Number(2.0));
        let text: QuantityInput = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(text, QuantityInput::Text("2".into()));
    }

    #[test]
    fn test_round_credits() {
        assert_eq!(round_credits(dec("0.1234")), dec("0.12"));
        assert_eq!(round_credits(dec("0.125")), dec("0.12")); // banker's rounding
        assert_eq!(round_credits(dec("0.135")), dec("0.14"));
    }
}
