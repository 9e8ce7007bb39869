use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::{
        models::users::{UserProfile, UserProfileResponse, UserStats},
        parse_user_id,
    },
    errors::{Error, ErrorResponse},
};

/// Get a user's profile with recycling stats
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserProfileResponse),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<String>) -> Result<Json<UserProfileResponse>, Error> {
    let user_id = parse_user_id(&user_id)?;
    let user = state.users.get_by_id(user_id).await?.ok_or_else(|| Error::NotFound {
        resource: "User".to_string(),
        id: user_id.to_string(),
    })?;
    let entries = state.entries.list_for_user(user_id).await?;
    let stats = UserStats::from_entries(&entries)?;

    Ok(Json(UserProfileResponse {
        success: true,
        user: UserProfile {
            user: user.into(),
            stats,
        },
    }))
}
