//! Spreadsheet export — turns a parsed grid into a live, formatted Google
//! Sheet through the `SpreadsheetBackend` capability.

pub mod compile;
pub mod handlers;
pub mod sheets;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::grid::Grid;

/// Title used when the caller does not provide one.
pub const DEFAULT_SPREADSHEET_TITLE: &str = "Questions d'entretien générées";

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erreur Google Sheets ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("La création de la feuille de calcul a échoué, aucun ID n'a été retourné.")]
    MissingSpreadsheetId,
}

/// The remote spreadsheet capability.
///
/// Implemented by the Google Sheets REST client; tests swap in an in-memory
/// fake. Each call is applied transactionally by the backend, but the batch
/// as a whole is not: a failure mid-sequence leaves a partial spreadsheet
/// behind, which is accepted.
#[async_trait]
pub trait SpreadsheetBackend: Send + Sync {
    async fn create(&self, title: &str) -> Result<String, SheetsError>;

    /// Writes a 2-D value block starting at `range`, with formula strings
    /// interpreted as live formulas.
    async fn write_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<(), SheetsError>;

    async fn batch_format(
        &self,
        spreadsheet_id: &str,
        requests: Vec<Value>,
    ) -> Result<(), SheetsError>;

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<(), SheetsError>;
}

/// Runs the full export pipeline. The call order is an invariant: formatting
/// assumes the values are present, and everything references the spreadsheet
/// created first.
pub async fn export_grid(
    backend: &dyn SpreadsheetBackend,
    title: &str,
    grid: &Grid,
) -> Result<String, SheetsError> {
    let scored = compile::compile(grid);

    let spreadsheet_id = backend.create(title).await?;
    backend
        .write_values(&spreadsheet_id, "A1", scored.values())
        .await?;
    backend
        .batch_format(&spreadsheet_id, compile::format_requests())
        .await?;
    backend
        .append_values(&spreadsheet_id, compile::SUMMARY_RANGE, &[compile::summary_row()])
        .await?;

    info!("Spreadsheet '{title}' created: {spreadsheet_id}");
    Ok(format!(
        "https://docs.google.com/spreadsheets/d/{spreadsheet_id}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the operations it receives; `fail_on` makes one step error.
    #[derive(Default)]
    struct RecordingBackend {
        ops: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingBackend {
        fn record(&self, op: &str) -> Result<(), SheetsError> {
            self.ops.lock().unwrap().push(op.to_string());
            if self.fail_on == Some(op) {
                return Err(SheetsError::Api {
                    code: 500,
                    message: format!("{op} failed"),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SpreadsheetBackend for RecordingBackend {
        async fn create(&self, _title: &str) -> Result<String, SheetsError> {
            self.record("create")?;
            Ok("sheet-123".to_string())
        }

        async fn write_values(
            &self,
            _id: &str,
            range: &str,
            values: &[Vec<String>],
        ) -> Result<(), SheetsError> {
            assert_eq!(range, "A1");
            assert!(!values.is_empty());
            self.record("write_values")
        }

        async fn batch_format(&self, _id: &str, requests: Vec<Value>) -> Result<(), SheetsError> {
            assert_eq!(requests.len(), 10);
            self.record("batch_format")
        }

        async fn append_values(
            &self,
            _id: &str,
            range: &str,
            values: &[Vec<String>],
        ) -> Result<(), SheetsError> {
            assert_eq!(range, compile::SUMMARY_RANGE);
            assert_eq!(values.len(), 1);
            self.record("append_values")
        }
    }

    fn sample_grid() -> Grid {
        Grid::parse("\"Question\",\"Bonne Réponse\",\"Mauvaise Réponse\",\"Niveau\",\"Point\",\"Réponse Donnée\",\"Note\"\n\"Q1\",\"b\",\"m\",\"Facile\",\"1\",\"---\",\"\"")
    }

    #[tokio::test]
    async fn test_operations_run_in_fixed_order() {
        let backend = RecordingBackend::default();
        let url = export_grid(&backend, "Test", &sample_grid()).await.unwrap();

        assert_eq!(url, "https://docs.google.com/spreadsheets/d/sheet-123");
        assert_eq!(
            *backend.ops.lock().unwrap(),
            vec!["create", "write_values", "batch_format", "append_values"]
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_operations() {
        let backend = RecordingBackend {
            fail_on: Some("write_values"),
            ..Default::default()
        };
        let err = export_grid(&backend, "Test", &sample_grid())
            .await
            .unwrap_err();

        assert!(matches!(err, SheetsError::Api { code: 500, .. }));
        // No formatting or summary after the failed write; the partial
        // spreadsheet is left behind.
        assert_eq!(
            *backend.ops.lock().unwrap(),
            vec!["create", "write_values"]
        );
    }

    #[tokio::test]
    async fn test_create_failure_touches_nothing_else() {
        let backend = RecordingBackend {
            fail_on: Some("create"),
            ..Default::default()
        };
        assert!(export_grid(&backend, "Test", &sample_grid()).await.is_err());
        assert_eq!(*backend.ops.lock().unwrap(), vec!["create"]);
    }
}
