/// Clock commands and the authoritative tick loop.
pub mod clock_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Match-state snapshotting and partial updates.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Settings persistence logic.
pub mod settings_service;
/// Snapshot broadcasting to every observer.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// WebSocket connection and message handling service.
pub mod websocket_service;
