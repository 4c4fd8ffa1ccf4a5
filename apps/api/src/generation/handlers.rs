//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::grid::extract::extract_csv;
use crate::grid::Grid;
use crate::llm_client::prompts::PromptTemplate;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Clean CSV text, suitable for copy and download.
    pub csv: String,
    /// The same data parsed for display.
    pub grid: Grid,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<&'static str>,
}

/// GET /api/v1/templates
///
/// Ordered labels for the frontend's template picker.
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: PromptTemplate::ALL.iter().map(|t| t.label()).collect(),
    })
}

/// POST /api/v1/questions/generate
///
/// Multipart form: `file` (the PDF) and an optional `template` label.
/// Pipeline: validate → base64 → model call → CSV extraction → parse.
pub async fn handle_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut pdf: Option<Bytes> = None;
    let mut template = PromptTemplate::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Requête multipart invalide : {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                pdf = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Lecture du fichier impossible : {e}"))
                })?);
            }
            "template" => {
                let label = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Lecture du champ template impossible : {e}"))
                })?;
                template = PromptTemplate::from_label(label.trim()).ok_or_else(|| {
                    AppError::Validation(format!("Modèle de prompt inconnu : '{label}'"))
                })?;
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| {
        AppError::Validation("Veuillez d'abord sélectionner un fichier PDF.".to_string())
    })?;
    if !pdf.starts_with(b"%PDF-") {
        return Err(AppError::Validation(
            "Le fichier sélectionné n'est pas un PDF valide.".to_string(),
        ));
    }

    info!(
        "Generating questions: template='{}', pdf_bytes={}",
        template.label(),
        pdf.len()
    );

    let raw = state
        .gemini
        .generate(template.instruction(), &BASE64.encode(&pdf))
        .await
        .map_err(|e| AppError::Gemini(format!("Erreur de l'API Gemini : {e}")))?;

    let csv = extract_csv(&raw);
    let grid = Grid::parse(&csv);

    Ok(Json(GenerateResponse { csv, grid }))
}
