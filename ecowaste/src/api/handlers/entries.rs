use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    AppState,
    api::{
        ApiJson,
        models::entries::{CreateWasteEntry, CreateWasteEntryResponse, WasteEntriesResponse, WasteEntryResponse},
        parse_user_id,
    },
    auth::current_user::EntryOwner,
    db::models::entries::EntryCreateDBRequest,
    errors::{Error, ErrorResponse},
    types::UserId,
    waste::{Draft, SubmissionFlow, WasteCategory, parse_quantity},
};

/// Turn the request body into a reviewable draft.
///
/// A quantity is only parsed for weighable types; for the rest it is dropped unread.
fn draft_from_request(request: CreateWasteEntry) -> Result<Draft, Error> {
    let category = match request.waste_type.trim() {
        "" => None,
        value => Some(value.parse::<WasteCategory>()?),
    };

    let quantity = match (category, &request.quantity) {
        (Some(category), Some(raw)) if category.is_weighable() => parse_quantity(raw)?,
        _ => None,
    };

    Ok(Draft {
        name: request.waste_name,
        category,
        quantity,
        place: request.place,
        notes: request.notes,
        source: request.entry_type.unwrap_or_default(),
        ai_confidence: request.ai_confidence,
        ai_raw_predictions: request.ai_raw_predictions,
    })
}

/// Log a waste entry and credit its owner
///
/// The owner is the user in the `Authorization: Bearer` session token, or the default user when no
/// token is sent.
#[utoipa::path(
    post,
    path = "/api/waste/entries",
    request_body = CreateWasteEntry,
    tag = "waste",
    responses(
        (status = 201, description = "Entry recorded", body = CreateWasteEntryResponse),
        (status = 400, description = "Invalid entry", body = ErrorResponse),
        (status = 401, description = "Invalid session token", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
    ),
    security((), ("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_entry(
    State(state): State<AppState>,
    EntryOwner(owner): EntryOwner,
    ApiJson(request): ApiJson<CreateWasteEntry>,
) -> Result<(StatusCode, Json<CreateWasteEntryResponse>), Error> {
    if state.users.get_by_id(owner).await?.is_none() {
        return Err(Error::NotFound {
            resource: "User".to_string(),
            id: owner.to_string(),
        });
    }

    let mut flow = SubmissionFlow::reviewing(draft_from_request(request)?);
    let submission = flow.submit()?;

    let created = state.entries.create(&EntryCreateDBRequest::new(owner, submission)).await?;
    info!(
        "Recorded {} entry {} for user {}: {} credits",
        created.entry.category, created.entry.id, owner, created.entry.credits
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateWasteEntryResponse {
            success: true,
            credits_earned: created.entry.credits,
            new_total_credits: created.new_total_credits,
            entry: created.entry.into(),
        }),
    ))
}

async fn entries_for(state: &AppState, user_id: UserId) -> Result<Json<WasteEntriesResponse>, Error> {
    let entries: Vec<WasteEntryResponse> = state
        .entries
        .list_for_user(user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(WasteEntriesResponse {
        success: true,
        total: entries.len(),
        entries,
    }))
}

/// List the default user's entries
#[utoipa::path(
    get,
    path = "/api/waste/entries",
    tag = "waste",
    responses(
        (status = 200, description = "Entries, oldest first", body = WasteEntriesResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<WasteEntriesResponse>, Error> {
    entries_for(&state, state.config.default_user_id).await
}

/// List a user's entries
///
/// Unknown users have no entries.
#[utoipa::path(
    get,
    path = "/api/waste/entries/{user_id}",
    tag = "waste",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Entries, oldest first", body = WasteEntriesResponse),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_user_entries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<WasteEntriesResponse>, Error> {
    entries_for(&state, parse_user_id(&user_id)?).await
}
