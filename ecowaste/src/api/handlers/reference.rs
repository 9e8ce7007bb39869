use axum::Json;

use crate::{
    api::models::reference::{CollectionPlacesResponse, PingResponse, WasteTypeResponse, WasteTypesResponse},
    waste::{COLLECTION_PLACES, WASTE_TYPES},
};

/// Liveness check for API clients
#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "reference",
    responses((status = 200, description = "Server is up", body = PingResponse))
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "Hello from the EcoWaste server".to_string(),
    })
}

/// List the waste categories with their crediting rules
#[utoipa::path(
    get,
    path = "/api/waste/types",
    tag = "reference",
    responses((status = 200, description = "All waste types, in display order", body = WasteTypesResponse))
)]
pub async fn list_waste_types() -> Json<WasteTypesResponse> {
    Json(WasteTypesResponse {
        success: true,
        waste_types: WASTE_TYPES.iter().map(WasteTypeResponse::from).collect(),
    })
}

/// List the collection places an entry can name
#[utoipa::path(
    get,
    path = "/api/waste/places",
    tag = "reference",
    responses((status = 200, description = "Collection places", body = CollectionPlacesResponse))
)]
pub async fn list_collection_places() -> Json<CollectionPlacesResponse> {
    Json(CollectionPlacesResponse {
        success: true,
        places: COLLECTION_PLACES.iter().map(|place| place.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_ping() {
        let server = create_test_app();
        let response = server.get("/api/ping").await;
        response.assert_status_ok();
        response.assert_json(&json!({"message": "Hello from the EcoWaste server"}));
    }

    #[tokio::test]
    async fn test_waste_types_table() {
        let server = create_test_app();

        let body: Value = server.get("/api/waste/types").await.json();

        assert_eq!(body["success"], true);
        let types = body["wasteTypes"].as_array().unwrap();
        assert_eq!(types.len(), 8);
        assert_eq!(
            types[1],
            json!({"value": "plastic", "label": "Plastic", "hasQuantity": true, "pricePerKg": 0.15})
        );
        assert_eq!(
            types[5],
            json!({"value": "e-waste", "label": "E-Waste", "hasQuantity": false, "pricePerKg": 0.0})
        );
        let weighable: Vec<_> = types
            .iter()
            .filter(|t| t["hasQuantity"] == true)
            .map(|t| t["value"].as_str().unwrap())
            .collect();
        assert_eq!(weighable, vec!["paper", "plastic", "metal"]);
    }

    #[tokio::test]
    async fn test_collection_places() {
        let server = create_test_app();

        let body: Value = server.get("/api/waste/places").await.json();

        assert_eq!(
            body,
            json!({
                "success": true,
                "places": ["Home", "Office", "School", "Park", "Shopping Mall", "Restaurant", "Factory", "Hospital", "Other"]
            })
        );
    }
}
