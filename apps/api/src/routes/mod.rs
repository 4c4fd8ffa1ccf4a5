pub mod health;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::export::handlers as export_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClientConfigResponse {
    pub sheets_export_enabled: bool,
    pub google_client_id: Option<String>,
}

/// GET /api/v1/config
///
/// Capability flags the frontend reads at boot: whether Sheets export is
/// available, and the OAuth client id it needs to run the sign-in flow.
async fn client_config(State(state): State<AppState>) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse {
        sheets_export_enabled: state.config.sheets_export_enabled(),
        google_client_id: state.config.google_client_id.clone(),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/config", get(client_config))
        .route(
            "/api/v1/templates",
            get(generation_handlers::handle_list_templates),
        )
        .route(
            "/api/v1/questions/generate",
            post(generation_handlers::handle_generate),
        )
        .route(
            "/api/v1/questions/export",
            post(export_handlers::handle_export),
        )
        .with_state(state)
}
