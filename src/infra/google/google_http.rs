// Plumbing shared by the Sheets and Slides transports.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::core::auth::Credential;
use crate::core::document::DocumentError;

/// Builds a reqwest client that sends the credential's bearer token on every request.
pub(crate) fn authorized_client(credential: &Credential) -> Result<Client, DocumentError> {
    let mut auth = HeaderValue::from_str(&credential.bearer())
        .map_err(|e| DocumentError::Transport(e.to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(USER_AGENT, HeaderValue::from_static("gsuite_bridge/0.2"));

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(transport)
}

/// `base_url` with `segments` appended, each one percent-encoded as a path segment.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, DocumentError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| DocumentError::Transport(format!("Invalid base URL {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| DocumentError::Transport(format!("Invalid base URL {}", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn transport(e: reqwest::Error) -> DocumentError {
    DocumentError::Transport(e.to_string())
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Decodes a successful JSON response, or turns an error status into `DocumentError::Api`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, DocumentError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.map_err(transport)?;
        // Google wraps errors as {"error": {"code", "message", "status"}}.
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or(text);
        return Err(DocumentError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| DocumentError::Decode(e.to_string()))
}
