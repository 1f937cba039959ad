use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use axum_valid::Valid;
use serde_json::Value;
use tracing::error;

use crate::{
    dto::settings::{
        PresetsResponse, PresetSummary, SaveAck, SavePresetRequest, TeamDefaultsDocument,
        UpdateTeamDefaultsRequest,
    },
    error::AppError,
    services::settings_service,
    state::SharedState,
};

/// File-backed operator settings: shortcuts, team defaults, presets.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/api/shortcuts", get(get_shortcuts).post(save_shortcuts))
        .route(
            "/api/team-defaults",
            get(get_team_defaults).post(save_team_defaults),
        )
        .route("/api/team-presets", get(list_presets).post(save_preset))
        .route("/api/team-presets/{name}", delete(delete_preset))
}

#[utoipa::path(
    get,
    path = "/api/shortcuts",
    tag = "settings",
    responses((status = 200, description = "Stored keyboard shortcuts, or `null` when none are saved", body = Value))
)]
/// Load the keyboard-shortcut bindings as an opaque document.
pub async fn get_shortcuts(State(state): State<SharedState>) -> Json<Value> {
    Json(settings_service::load_shortcuts(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/shortcuts",
    tag = "settings",
    request_body = Value,
    responses(
        (status = 200, description = "Shortcuts saved", body = SaveAck),
        (status = 500, description = "Shortcuts could not be persisted", body = SaveAck)
    )
)]
/// Replace the keyboard-shortcut bindings wholesale.
pub async fn save_shortcuts(
    State(state): State<SharedState>,
    Json(document): Json<Value>,
) -> (StatusCode, Json<SaveAck>) {
    match settings_service::save_shortcuts(&state, &document).await {
        Ok(()) => (StatusCode::OK, Json(SaveAck::ok())),
        Err(err) => {
            error!(error = %err, "error saving shortcuts");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveAck::failure("Failed to save shortcuts")),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/team-defaults",
    tag = "settings",
    responses((status = 200, description = "Stored team defaults, or `null` when none are saved", body = TeamDefaultsDocument))
)]
/// Load the stored default team identities.
pub async fn get_team_defaults(
    State(state): State<SharedState>,
) -> Json<Option<TeamDefaultsDocument>> {
    Json(settings_service::load_team_defaults(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/team-defaults",
    tag = "settings",
    request_body = UpdateTeamDefaultsRequest,
    responses(
        (status = 200, description = "Defaults saved", body = SaveAck),
        (status = 500, description = "Defaults could not be persisted", body = SaveAck)
    )
)]
/// Merge the supplied identities into the stored team defaults.
pub async fn save_team_defaults(
    State(state): State<SharedState>,
    Json(request): Json<UpdateTeamDefaultsRequest>,
) -> (StatusCode, Json<SaveAck>) {
    match settings_service::update_team_defaults(&state, request).await {
        Ok(()) => (StatusCode::OK, Json(SaveAck::ok())),
        Err(err) => {
            error!(error = %err, "error saving team defaults");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveAck::failure("Failed to save team defaults")),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/team-presets",
    tag = "settings",
    responses((status = 200, description = "Every saved preset", body = [PresetSummary]))
)]
/// List every saved team preset.
pub async fn list_presets(State(state): State<SharedState>) -> Json<Vec<PresetSummary>> {
    Json(settings_service::list_presets(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/team-presets",
    tag = "settings",
    request_body = SavePresetRequest,
    responses((status = 200, description = "Preset saved; full updated list returned", body = PresetsResponse))
)]
/// Save a preset, upserting by case-insensitive name.
pub async fn save_preset(
    State(state): State<SharedState>,
    Valid(Json(request)): Valid<Json<SavePresetRequest>>,
) -> Result<Json<PresetsResponse>, AppError> {
    let presets = settings_service::save_preset(&state, request).await?;
    Ok(Json(PresetsResponse { presets }))
}

#[utoipa::path(
    delete,
    path = "/api/team-presets/{name}",
    tag = "settings",
    params(("name" = String, Path, description = "Preset name, matched case-insensitively")),
    responses((status = 200, description = "Preset removed if present; full updated list returned", body = PresetsResponse))
)]
/// Delete a preset by name.
pub async fn delete_preset(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<PresetsResponse>, AppError> {
    let presets = settings_service::delete_preset(&state, &name).await?;
    Ok(Json(PresetsResponse { presets }))
}
