//! Request extractors identifying who a request acts for.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, instrument, trace};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    config::Config,
    errors::{Error, Result},
    types::UserId,
};

/// Extract user from a `Authorization: Bearer <jwt>` header if present
/// Returns:
/// - None: No bearer token present
/// - Some(Ok(user)): Valid JWT found and verified
/// - Some(Err(error)): Token present but invalid, expired or malformed
#[instrument(skip(parts, config))]
fn try_bearer_auth(parts: &Parts, config: &Config) -> Option<Result<CurrentUser>> {
    let header = parts.headers.get(AUTHORIZATION)?;

    let value = match header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }));
        }
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        return Some(Err(Error::Unauthenticated {
            message: Some("Authorization header must use the Bearer scheme".to_string()),
        }));
    };

    Some(session::verify_session_token(token.trim(), config))
}

/// The user a submission is recorded for.
///
/// Resolves to the user in the session token when one is supplied, and to the configured
/// `default_user_id` otherwise. A token that is supplied but invalid is rejected rather than
/// silently falling back. The identity grants no rights beyond attributing the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryOwner(pub UserId);

impl FromRequestParts<AppState> for EntryOwner {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_bearer_auth(parts, &state.config) {
            Some(Ok(user)) => {
                debug!("Found session user: {}", user.id);
                Ok(EntryOwner(user.id))
            }
            Some(Err(e)) => {
                trace!("Session authentication failed: {:?}", e);
                Err(e)
            }
            None => Ok(EntryOwner(state.config.default_user_id)),
        }
    }
}
