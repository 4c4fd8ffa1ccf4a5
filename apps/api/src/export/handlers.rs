//! Axum route handlers for the export API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::sheets::SheetsClient;
use crate::export::{export_grid, DEFAULT_SPREADSHEET_TITLE};
use crate::grid::Grid;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// The CSV text previously returned by the generate endpoint.
    pub csv: String,
    pub title: Option<String>,
    /// OAuth access token acquired by the frontend's Google sign-in flow.
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub spreadsheet_url: String,
}

/// POST /api/v1/questions/export
///
/// Re-parses the CSV and materializes it as a scored, formatted spreadsheet.
/// Refused with 503 when export is not configured; Sheets failures surface
/// as a dedicated error distinct from generation errors. A failure partway
/// through may leave a partial spreadsheet behind — no cleanup is attempted.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    if !state.config.sheets_export_enabled() {
        return Err(AppError::SheetsNotConfigured);
    }
    if request.access_token.trim().is_empty() {
        return Err(AppError::Validation(
            "Veuillez vous connecter pour créer une feuille Google Sheet.".to_string(),
        ));
    }

    let grid = Grid::parse(&request.csv);
    if grid.is_empty() {
        return Err(AppError::Validation(
            "Aucune donnée CSV à exporter.".to_string(),
        ));
    }

    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_SPREADSHEET_TITLE);

    let backend = SheetsClient::new(request.access_token.clone());
    let spreadsheet_url = export_grid(&backend, title, &grid)
        .await
        .map_err(|e| AppError::Sheets(e.to_string()))?;

    Ok(Json(ExportResponse { spreadsheet_url }))
}
