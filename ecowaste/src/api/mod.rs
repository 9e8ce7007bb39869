//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! Everything is served under `/api` with camelCase JSON bodies:
//!
//! - **Authentication** (`/api/auth/*`): login and signup
//! - **Waste entries** (`/api/waste/entries*`): submit and list entries
//! - **Reference data** (`/api/waste/types`, `/api/waste/places`)
//! - **Users** (`/api/users/{userId}`): profile with credit statistics
//! - **AI detection** (`/api/ai/*`): classify an image, test echo, detection statistics
//!
//! Failures always render as `{"success": false, "error": "..."}`, including malformed JSON bodies
//! rejected by [`ApiJson`].
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`; the docs are served at `/api/docs`.

pub mod handlers;
pub mod models;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::Error;
use crate::types::UserId;

/// `Json` extractor whose rejections use the API error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(Error::BadRequest {
                message: rejection.body_text(),
            }),
        }
    }
}

/// Parse a `{userId}` path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.trim().parse().map_err(|_| Error::BadRequest {
        message: format!("Invalid user id: {raw}"),
    })
}
