use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    AppState,
    api::{
        ApiJson,
        models::{
            auth::{AuthResponse, LoginRequest, SignupRequest},
            users::CurrentUser,
        },
    },
    auth::session,
    db::{
        errors::DbError,
        models::users::{UserCreateDBRequest, UserDBResponse},
    },
    errors::{Error, ErrorResponse},
};

/// Usernames are the signup name, lower-cased, with spaces replaced by underscores.
pub fn derive_username(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn auth_response(user: UserDBResponse, state: &AppState) -> Result<AuthResponse, Error> {
    let token = session::create_session_token(&CurrentUser::from(user.clone()), &state.config)?;
    Ok(AuthResponse {
        success: true,
        user: user.into(),
        token,
    })
}

/// Log in with an email address
///
/// The password is accepted but not checked.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, ApiJson(request): ApiJson<LoginRequest>) -> Result<Json<AuthResponse>, Error> {
    let user = state
        .users
        .get_user_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("Invalid credentials".to_string()),
        })?;

    info!("User {} logged in", user.id);
    Ok(Json(auth_response(user, &state)?))
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    tag = "authentication",
    responses(
        (status = 201, description = "User created", body = AuthResponse),
        (status = 400, description = "Invalid input or user already exists", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    let name = request.name.trim();
    let email = request.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(Error::BadRequest {
            message: "Name and email are required".to_string(),
        });
    }
    if !email.contains('@') {
        return Err(Error::BadRequest {
            message: "Invalid email address".to_string(),
        });
    }

    let user = state
        .users
        .create(&UserCreateDBRequest {
            username: derive_username(name),
            email: email.to_string(),
            display_name: Some(name.to_string()),
            initial_credits: state.config.credits.initial_credits_for_new_users,
        })
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation { .. } => Error::Conflict {
                message: "User already exists".to_string(),
            },
            e => e.into(),
        })?;

    info!("Created user {} ({})", user.id, user.username);
    Ok((StatusCode::CREATED, Json(auth_response(user, &state)?)))
}
