//! Google Sheets REST backend. One client per export request, wrapping the
//! caller's OAuth access token — the service never holds Google credentials
//! of its own.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{SheetsError, SpreadsheetBackend};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Formulas must be interpreted as live formulas, not literal text.
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(rename = "spreadsheetId")]
    spreadsheet_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleApiError {
    error: GoogleApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleApiErrorBody {
    message: String,
    #[serde(default)]
    status: String,
}

pub struct SheetsClient {
    client: Client,
    access_token: String,
}

impl SheetsClient {
    pub fn new(access_token: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            access_token,
        }
    }

    /// Maps a non-success response to `SheetsError::Api`, preferring the
    /// structured Google error message over the raw body. Expired
    /// credentials get a reconnect hint appended for the user.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<GoogleApiError>(&body) {
            Ok(parsed) => {
                let mut message = parsed.error.message;
                if parsed.error.status == "UNAUTHENTICATED" {
                    message.push_str(
                        " Votre session a peut-être expiré. \
                         Veuillez vous déconnecter et vous reconnecter.",
                    );
                }
                message
            }
            Err(_) => body,
        };

        Err(SheetsError::Api {
            code: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SpreadsheetBackend for SheetsClient {
    async fn create(&self, title: &str) -> Result<String, SheetsError> {
        let response = self
            .client
            .post(SHEETS_API_BASE)
            .bearer_auth(&self.access_token)
            .json(&json!({ "properties": { "title": title } }))
            .send()
            .await?;
        let response = self.check(response).await?;

        let created: CreateResponse = response.json().await?;
        created
            .spreadsheet_id
            .filter(|id| !id.is_empty())
            .ok_or(SheetsError::MissingSpreadsheetId)
    }

    async fn write_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<(), SheetsError> {
        let response = self
            .client
            .put(format!("{SHEETS_API_BASE}/{spreadsheet_id}/values/{range}"))
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": values }))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    async fn batch_format(
        &self,
        spreadsheet_id: &str,
        requests: Vec<Value>,
    ) -> Result<(), SheetsError> {
        let response = self
            .client
            .post(format!("{SHEETS_API_BASE}/{spreadsheet_id}:batchUpdate"))
            .bearer_auth(&self.access_token)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<(), SheetsError> {
        let response = self
            .client
            .post(format!(
                "{SHEETS_API_BASE}/{spreadsheet_id}/values/{range}:append"
            ))
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": values }))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }
}
