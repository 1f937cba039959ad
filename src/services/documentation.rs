use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Rinkside Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::scoreboard_stream,
        crate::routes::websocket::ws_handler,
        crate::routes::settings::get_shortcuts,
        crate::routes::settings::save_shortcuts,
        crate::routes::settings::get_team_defaults,
        crate::routes::settings::save_team_defaults,
        crate::routes::settings::list_presets,
        crate::routes::settings::save_preset,
        crate::routes::settings::delete_preset,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::GameStateSnapshot,
            crate::dto::game::TeamSnapshot,
            crate::dto::game::ClockSnapshot,
            crate::dto::game::PenaltySnapshot,
            crate::dto::game::GameStatePatch,
            crate::dto::game::TeamPatch,
            crate::dto::game::ClockPatch,
            crate::dto::game::PenaltyPatch,
            crate::dto::ws::OperatorInboundMessage,
            crate::dto::ws::OperatorOutboundMessage,
            crate::dto::settings::TeamIdentityDto,
            crate::dto::settings::TeamDefaultsDocument,
            crate::dto::settings::UpdateTeamDefaultsRequest,
            crate::dto::settings::SavePresetRequest,
            crate::dto::settings::PresetSummary,
            crate::dto::settings::PresetsResponse,
            crate::dto::settings::SaveAck,
            crate::state::game::Period,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "operator", description = "WebSocket operations for the operator panel"),
        (name = "settings", description = "Persisted operator settings"),
    )
)]
pub struct ApiDoc;
