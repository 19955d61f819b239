// =============================================================================
// GOOGLE SLIDES CLIENT
// =============================================================================
//
// reqwest implementation of `SlidesClient` against the Slides v1 REST API.
// See: https://developers.google.com/slides/api/reference/rest

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::google_http::{authorized_client, endpoint, read_json, transport};
use crate::core::auth::Credential;
use crate::core::document::DocumentError;
use crate::core::slides::{BatchUpdateResponse, Page, SlidesApi, SlidesClient, SlidesRequest};

pub const DEFAULT_SLIDES_BASE_URL: &str = "https://slides.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedPresentation {
    presentation_id: String,
}

pub struct GoogleSlidesClient {
    client: Client,
    base_url: String,
}

impl GoogleSlidesClient {
    pub fn new(credential: &Credential) -> Result<Self, DocumentError> {
        Self::with_base_url(credential, DEFAULT_SLIDES_BASE_URL)
    }

    pub fn with_base_url(
        credential: &Credential,
        base_url: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        Ok(Self {
            client: authorized_client(credential)?,
            base_url: base_url.into(),
        })
    }

    /// Uses `GSUITE_SLIDES_BASE_URL` when set.
    pub fn from_env(credential: &Credential) -> Result<Self, DocumentError> {
        match std::env::var("GSUITE_SLIDES_BASE_URL") {
            Ok(base_url) => Self::with_base_url(credential, base_url),
            Err(_) => Self::new(credential),
        }
    }
}

#[async_trait]
impl SlidesClient for GoogleSlidesClient {
    async fn create_presentation(&self, title: &str) -> Result<String, DocumentError> {
        let url = endpoint(&self.base_url, &["v1", "presentations"])?;

        tracing::debug!("Creating presentation '{}'", title);

        let response = self
            .client
            .post(url)
            .json(&json!({ "title": title }))
            .send()
            .await
            .map_err(transport)?;

        let created: CreatedPresentation = read_json(response).await?;
        Ok(created.presentation_id)
    }

    async fn batch_update(
        &self,
        presentation_id: &str,
        requests: &[SlidesRequest],
    ) -> Result<BatchUpdateResponse, DocumentError> {
        let method = format!("{}:batchUpdate", presentation_id);
        let url = endpoint(&self.base_url, &["v1", "presentations", &method])?;

        let response = self
            .client
            .post(url)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }

    async fn get_page(&self, presentation_id: &str, page_id: &str) -> Result<Page, DocumentError> {
        let url = endpoint(
            &self.base_url,
            &["v1", "presentations", presentation_id, "pages", page_id],
        )?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        read_json(response).await
    }

    async fn close(&self) {
        tracing::debug!("Closing Slides transport ({})", self.base_url);
    }
}

impl SlidesApi<GoogleSlidesClient> {
    /// Binds a handle to an existing presentation using `credential`.
    pub fn open(
        credential: &Credential,
        presentation_id: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        Ok(Self::new(GoogleSlidesClient::from_env(credential)?, presentation_id))
    }

    /// Creates a new presentation, `None` on failure.
    pub async fn create(credential: &Credential, title: &str) -> Option<Self> {
        match GoogleSlidesClient::from_env(credential) {
            Ok(client) => Self::with_new(client, title).await,
            Err(e) => {
                tracing::error!("Failed to build Slides transport: {}", e);
                None
            }
        }
    }
}
