// =============================================================================
// GOOGLE SHEETS CLIENT
// =============================================================================
//
// reqwest implementation of `SheetsClient` against the Sheets v4 REST API.
// See: https://developers.google.com/sheets/api/reference/rest
//
// Ranges are A1 notation ("Sheet1!A1:C3"). They go into the URL path, so
// they are percent-encoded as a single path segment.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::google_http::{authorized_client, endpoint, read_json, transport};
use crate::core::auth::Credential;
use crate::core::document::DocumentError;
use crate::core::sheets::{
    AppendValuesResponse, SheetsApi, SheetsClient, UpdateValuesResponse, ValueInputOption,
    ValueRange,
};

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSpreadsheet {
    spreadsheet_id: String,
}

/// Authenticated transport for the Sheets API.
pub struct GoogleSheetsClient {
    client: Client,
    base_url: String,
}

impl GoogleSheetsClient {
    pub fn new(credential: &Credential) -> Result<Self, DocumentError> {
        Self::with_base_url(credential, DEFAULT_SHEETS_BASE_URL)
    }

    /// Points the client somewhere other than Google (proxies, tests).
    pub fn with_base_url(
        credential: &Credential,
        base_url: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        Ok(Self {
            client: authorized_client(credential)?,
            base_url: base_url.into(),
        })
    }

    /// Uses `GSUITE_SHEETS_BASE_URL` when set.
    pub fn from_env(credential: &Credential) -> Result<Self, DocumentError> {
        match std::env::var("GSUITE_SHEETS_BASE_URL") {
            Ok(base_url) => Self::with_base_url(credential, base_url),
            Err(_) => Self::new(credential),
        }
    }

    fn values_url(
        &self,
        spreadsheet_id: &str,
        range: &str,
        method: Option<&str>,
    ) -> Result<url::Url, DocumentError> {
        let segment = match method {
            Some(method) => format!("{}:{}", range, method),
            None => range.to_string(),
        };
        endpoint(
            &self.base_url,
            &["v4", "spreadsheets", spreadsheet_id, "values", &segment],
        )
    }
}

#[async_trait]
impl SheetsClient for GoogleSheetsClient {
    async fn create_spreadsheet(&self, title: &str) -> Result<String, DocumentError> {
        let url = endpoint(&self.base_url, &["v4", "spreadsheets"])?;
        let body = json!({ "properties": { "title": title } });

        tracing::debug!("Creating spreadsheet '{}'", title);

        let response = self
            .client
            .post(url)
            .query(&[("fields", "spreadsheetId")])
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let created: CreatedSpreadsheet = read_json(response).await?;
        Ok(created.spreadsheet_id)
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        input: ValueInputOption,
        values: &[Vec<String>],
    ) -> Result<AppendValuesResponse, DocumentError> {
        let url = self.values_url(spreadsheet_id, range, Some("append"))?;

        let response = self
            .client
            .post(url)
            .query(&[("valueInputOption", input.as_str())])
            .json(&json!({ "values": values }))
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        input: ValueInputOption,
        values: &[Vec<String>],
    ) -> Result<UpdateValuesResponse, DocumentError> {
        let url = self.values_url(spreadsheet_id, range, None)?;

        let response = self
            .client
            .put(url)
            .query(&[("valueInputOption", input.as_str())])
            .json(&json!({ "values": values }))
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }

    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ValueRange, DocumentError> {
        let url = self.values_url(spreadsheet_id, range, None)?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        read_json(response).await
    }

    async fn close(&self) {
        tracing::debug!("Closing Sheets transport ({})", self.base_url);
    }
}

impl SheetsApi<GoogleSheetsClient> {
    /// Binds a handle to an existing spreadsheet using `credential`.
    pub fn open(
        credential: &Credential,
        spreadsheet_id: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        Ok(Self::new(GoogleSheetsClient::from_env(credential)?, spreadsheet_id))
    }

    /// Creates a new spreadsheet. `None` if the transport can't be built or
    /// the remote call fails (both are logged).
    pub async fn create(credential: &Credential, title: &str) -> Option<Self> {
        match GoogleSheetsClient::from_env(credential) {
            Ok(client) => Self::with_new(client, title).await,
            Err(e) => {
                tracing::error!("Failed to build Sheets transport: {}", e);
                None
            }
        }
    }
}
