//! OpenAPI documentation for the `/api` surface, served at `/api/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;
use crate::classifier::Prediction;
use crate::errors::ErrorResponse;
use crate::waste::{EntrySource, QuantityInput, WasteCategory};

/// Session token issued by login and signup.
struct SessionSecurityAddon;

impl Modify for SessionSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token returned by `/api/auth/login` and `/api/auth/signup`. \
                            Entries submitted without one are recorded for the default user.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EcoWaste API",
        description = "Log recyclable waste, classify it from a photo, and earn credits."
    ),
    modifiers(&SessionSecurityAddon),
    paths(
        api::handlers::auth::login,
        api::handlers::auth::signup,
        api::handlers::entries::create_entry,
        api::handlers::entries::list_entries,
        api::handlers::entries::list_user_entries,
        api::handlers::users::get_user,
        api::handlers::reference::ping,
        api::handlers::reference::list_waste_types,
        api::handlers::reference::list_collection_places,
        api::handlers::detection::detect,
        api::handlers::detection::ai_test,
        api::handlers::detection::ai_stats,
    ),
    components(
        schemas(
            ErrorResponse,
            WasteCategory,
            EntrySource,
            QuantityInput,
            Prediction,
            api::models::auth::LoginRequest,
            api::models::auth::SignupRequest,
            api::models::auth::AuthResponse,
            api::models::users::UserResponse,
            api::models::users::UserStats,
            api::models::users::UserProfile,
            api::models::users::UserProfileResponse,
            api::models::entries::CreateWasteEntry,
            api::models::entries::WasteEntryResponse,
            api::models::entries::CreateWasteEntryResponse,
            api::models::entries::WasteEntriesResponse,
            api::models::reference::WasteTypeResponse,
            api::models::reference::WasteTypesResponse,
            api::models::reference::CollectionPlacesResponse,
            api::models::reference::PingResponse,
            api::models::detection::DetectRequest,
            api::models::detection::DetectResponse,
            api::models::detection::AiTestRequest,
            api::models::detection::AiTestReceived,
            api::models::detection::AiTestResponse,
            api::models::detection::AiDetectionStats,
            api::models::detection::ModelInfo,
            api::models::detection::AiStatsResponse,
        )
    ),
    tags(
        (name = "authentication", description = "Login and signup"),
        (name = "waste", description = "Waste entries and credits"),
        (name = "users", description = "User profiles"),
        (name = "reference", description = "Waste types, collection places, ping"),
        (name = "ai", description = "Image classification"),
    )
)]
pub struct ApiDoc;
