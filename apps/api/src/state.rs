use crate::config::Config;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The Sheets client is not held here: it is built per export request around
/// the caller's OAuth access token.
#[derive(Clone)]
pub struct AppState {
    pub gemini: GeminiClient,
    pub config: Config,
}
