//! Static reference data: waste types and collection places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::waste::{WasteCategory, WasteTypeInfo};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteTypeResponse {
    pub value: WasteCategory,
    pub label: String,
    /// Whether entries of this type carry a quantity and earn credits
    pub has_quantity: bool,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price_per_kg: Decimal,
}

impl From<&WasteTypeInfo> for WasteTypeResponse {
    fn from(info: &WasteTypeInfo) -> Self {
        Self {
            value: info.category,
            label: info.label.to_string(),
            has_quantity: info.weighable,
            price_per_kg: info.price_per_kg,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteTypesResponse {
    pub success: bool,
    pub waste_types: Vec<WasteTypeResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionPlacesResponse {
    pub success: bool,
    pub places: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}
