//! OAuth2 installed-app flow for Google APIs.
//!
//! 1. Reads the client secrets downloaded from the Cloud console
//! 2. Binds a localhost listener for the redirect
//! 3. Logs the consent URL and tries to open it in a browser
//! 4. Waits for the callback and checks `state`
//! 5. Exchanges the authorization code for a `Credential`
//!
//! The listener has no timeout: the flow waits until the user answers.

use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use super::token_cache::save_cached_credential;
use crate::core::auth::Credential;
use crate::core::types::{CredentialKind, ScopeType};

pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const STATE_LENGTH: usize = 30;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential file not found: {0}")]
    NotFound(PathBuf),

    #[error("Credential kind '{0}' is not implemented")]
    NotImplemented(CredentialKind),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid client secrets: {0}")]
    InvalidClientSecrets(String),

    #[error("Authorization callback did not contain a code")]
    MissingCode,

    #[error("Authorization denied: {0}")]
    Denied(String),

    #[error("Authorization callback state does not match the request")]
    StateMismatch,

    #[error("Token request failed: {0}")]
    Exchange(String),

    #[error("Credential has no refresh token")]
    NoRefreshToken,

    #[error("Cached credential does not cover scope {0:?}")]
    ScopeMismatch(ScopeType),
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Knobs for `acquire_credential`.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialOptions {
    /// Host the callback listener binds to. Also used in the redirect URI.
    pub host: String,
    /// Callback port. `0` lets the OS pick one.
    pub port: u16,
    /// Write the credential to `token_cache_path` after a successful flow.
    pub cache_token: bool,
    pub token_cache_path: PathBuf,
    /// Try to launch a browser. The consent URL is logged either way.
    pub open_browser: bool,
}

impl Default for CredentialOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            cache_token: false,
            token_cache_path: PathBuf::from("token.json"),
            open_browser: true,
        }
    }
}

impl CredentialOptions {
    /// Defaults, overridden by `GSUITE_OAUTH_HOST`, `GSUITE_OAUTH_PORT`,
    /// `GSUITE_CACHE_TOKEN`, `GSUITE_TOKEN_CACHE` and `GSUITE_OPEN_BROWSER`.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(host) = std::env::var("GSUITE_OAUTH_HOST") {
            options.host = host;
        }
        if let Ok(port) = std::env::var("GSUITE_OAUTH_PORT") {
            match port.parse() {
                Ok(port) => options.port = port,
                Err(_) => tracing::warn!("Ignoring invalid GSUITE_OAUTH_PORT '{}'", port),
            }
        }
        if let Some(cache) = env_flag("GSUITE_CACHE_TOKEN") {
            options.cache_token = cache;
        }
        if let Ok(path) = std::env::var("GSUITE_TOKEN_CACHE") {
            options.token_cache_path = PathBuf::from(path);
        }
        if let Some(open) = env_flag("GSUITE_OPEN_BROWSER") {
            options.open_browser = open;
        }

        options
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// =============================================================================
// CLIENT SECRETS
// =============================================================================

/// The OAuth client an application registered in the Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Desktop clients download as `{"installed": {...}}`, web clients as `{"web": {...}}`.
#[derive(Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientConfig>,
    web: Option<ClientConfig>,
}

pub async fn load_client_secrets(path: &Path) -> Result<ClientConfig, CredentialError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let file: ClientSecretsFile = serde_json::from_str(&raw)?;
    file.installed.or(file.web).ok_or_else(|| {
        CredentialError::InvalidClientSecrets(format!(
            "{} has neither an 'installed' nor a 'web' section",
            path.display()
        ))
    })
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

pub fn authorization_url(
    config: &ClientConfig,
    redirect_uri: &str,
    scope: ScopeType,
    state: &str,
) -> Result<Url, CredentialError> {
    let scopes = scope.urls().join(" ");
    Url::parse_with_params(
        &config.auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("scope", scopes.as_str()),
            ("state", state),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| CredentialError::InvalidClientSecrets(format!("auth_uri: {}", e)))
}

fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// What a request to the callback listener carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code { code: String, state: Option<String> },
    /// The user declined, `error=access_denied` or similar.
    Denied(String),
    /// Not a redirect, e.g. the browser asking for `/favicon.ico`.
    Ignored,
}

/// Parses the raw HTTP request the browser sent to the listener.
pub fn parse_callback(request: &str) -> CallbackOutcome {
    let path = match request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
    {
        Some(path) => path,
        None => return CallbackOutcome::Ignored,
    };

    let url = match Url::parse(&format!("http://localhost{}", path)) {
        Ok(url) => url,
        Err(_) => return CallbackOutcome::Ignored,
    };

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return CallbackOutcome::Denied(value.into_owned()),
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }

    match code {
        Some(code) => CallbackOutcome::Code { code, state },
        None => CallbackOutcome::Ignored,
    }
}

async fn respond(stream: &mut TcpStream, status: &str, message: &str) {
    let body = format!(
        "<html><body><h2>{}</h2><p>You can close this tab.</p></body></html>",
        message
    );
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    if let Err(e) = stream.write_all(response.as_bytes()).await {
        tracing::warn!("Failed to answer OAuth callback: {}", e);
    }
    let _ = stream.shutdown().await;
}

/// Accepts connections until one carries the redirect, then returns its code.
pub async fn wait_for_callback(
    listener: &TcpListener,
    expected_state: &str,
) -> Result<String, CredentialError> {
    loop {
        let (mut stream, peer) = listener.accept().await?;
        let mut buf = [0u8; 4096];
        let n = stream.read(&mut buf).await?;
        let request = String::from_utf8_lossy(&buf[..n]);

        match parse_callback(&request) {
            CallbackOutcome::Ignored => {
                tracing::debug!("Ignoring non-callback request from {}", peer);
                respond(&mut stream, "404 Not Found", "Nothing here.").await;
            }
            CallbackOutcome::Denied(reason) => {
                respond(&mut stream, "200 OK", "Authorization was denied.").await;
                return Err(CredentialError::Denied(reason));
            }
            CallbackOutcome::Code { code, state } => {
                if state.as_deref() != Some(expected_state) {
                    respond(&mut stream, "400 Bad Request", "Authorization state mismatch.").await;
                    return Err(CredentialError::StateMismatch);
                }
                if code.is_empty() {
                    respond(&mut stream, "400 Bad Request", "Authorization code missing.").await;
                    return Err(CredentialError::MissingCode);
                }
                respond(
                    &mut stream,
                    "200 OK",
                    "The authentication flow has completed.",
                )
                .await;
                return Ok(code);
            }
        }
    }
}

// =============================================================================
// TOKEN ENDPOINT
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Space separated. Absent on some refresh responses.
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

async fn post_token_request(
    token_uri: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse, CredentialError> {
    let response = Client::new()
        .post(token_uri)
        .form(params)
        .send()
        .await
        .map_err(|e| CredentialError::Exchange(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| CredentialError::Exchange(e.to_string()))?;

    if !status.is_success() {
        let message = match serde_json::from_str::<TokenErrorBody>(&text) {
            Ok(body) => match body.error_description {
                Some(description) => format!("{}: {}", body.error, description),
                None => body.error,
            },
            Err(_) => format!("{} {}", status, text),
        };
        return Err(CredentialError::Exchange(message));
    }

    Ok(serde_json::from_str(&text)?)
}

fn expiry_from(expires_in: Option<i64>) -> Option<chrono::DateTime<chrono::Utc>> {
    expires_in.map(|secs| chrono::Utc::now() + chrono::Duration::seconds(secs))
}

fn split_scopes(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(String::from).collect()
}

/// Trades an authorization code for a credential.
pub async fn exchange_code(
    config: &ClientConfig,
    code: &str,
    redirect_uri: &str,
    scope: ScopeType,
) -> Result<Credential, CredentialError> {
    let tokens = post_token_request(
        &config.token_uri,
        &[
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ],
    )
    .await?;

    let scopes = match tokens.scope {
        Some(granted) => split_scopes(&granted),
        None => scope.urls().iter().map(|s| s.to_string()).collect(),
    };

    Ok(Credential {
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_uri: config.token_uri.clone(),
        client_id: config.client_id.clone(),
        client_secret: config.client_secret.clone(),
        scopes,
        expiry: expiry_from(tokens.expires_in),
    })
}

/// Gets a fresh access token for `credential`.
///
/// Google usually omits the refresh token from the response, in which case
/// the old one is carried over. Same for scopes.
pub async fn refresh_credential(credential: &Credential) -> Result<Credential, CredentialError> {
    let refresh_token = credential
        .refresh_token
        .as_deref()
        .ok_or(CredentialError::NoRefreshToken)?;

    let tokens = post_token_request(
        &credential.token_uri,
        &[
            ("refresh_token", refresh_token),
            ("client_id", credential.client_id.as_str()),
            ("client_secret", credential.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ],
    )
    .await?;

    tracing::info!("Refreshed access token for client {}", credential.client_id);

    Ok(Credential {
        token: tokens.access_token,
        refresh_token: tokens
            .refresh_token
            .or_else(|| credential.refresh_token.clone()),
        scopes: tokens
            .scope
            .map(|s| split_scopes(&s))
            .unwrap_or_else(|| credential.scopes.clone()),
        expiry: expiry_from(tokens.expires_in),
        ..credential.clone()
    })
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Obtains a credential for `scope` from the client-secret file at `file_path`.
///
/// The file is checked before anything touches the network. Only
/// `CredentialKind::OAuth` is supported.
pub async fn acquire_credential(
    file_path: impl AsRef<Path>,
    kind: CredentialKind,
    scope: ScopeType,
    options: &CredentialOptions,
) -> Result<Credential, CredentialError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(CredentialError::NotFound(file_path.to_path_buf()));
    }

    if kind != CredentialKind::OAuth {
        return Err(CredentialError::NotImplemented(kind));
    }

    let config = load_client_secrets(file_path).await?;

    let listener = TcpListener::bind((options.host.as_str(), options.port)).await?;
    let state = random_state();

    authorize(&config, listener, &state, scope, options).await
}

/// Runs the consent round trip on an already bound `listener`.
async fn authorize(
    config: &ClientConfig,
    listener: TcpListener,
    state: &str,
    scope: ScopeType,
    options: &CredentialOptions,
) -> Result<Credential, CredentialError> {
    let port = listener.local_addr()?.port();
    let redirect_uri = format!("http://{}:{}/", options.host, port);
    let auth_url = authorization_url(config, &redirect_uri, scope, state)?;

    tracing::info!(
        "Please visit this URL to authorize this application: {}",
        auth_url
    );
    if options.open_browser {
        if let Err(e) = open::that(auth_url.as_str()) {
            tracing::warn!("Could not open a browser: {}", e);
        }
    }

    let code = wait_for_callback(&listener, state).await?;
    drop(listener);

    let credential = exchange_code(config, &code, &redirect_uri, scope).await?;
    tracing::info!("Authorization complete for scope {:?}", scope);

    if options.cache_token {
        save_cached_credential(&options.token_cache_path, &credential).await?;
    }

    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::io::Write;

    fn client_config(token_uri: String) -> ClientConfig {
        ClientConfig {
            client_id: "my-client".to_string(),
            client_secret: "shh".to_string(),
            auth_uri: DEFAULT_AUTH_URI.to_string(),
            token_uri,
        }
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_anything_else() {
        let options = CredentialOptions {
            open_browser: false,
            ..Default::default()
        };
        let result = acquire_credential(
            "/definitely/not/here/credentials.json",
            CredentialKind::OAuth,
            ScopeType::SheetsEditable,
            &options,
        )
        .await;
        assert!(matches!(result, Err(CredentialError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unimplemented_kinds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        for kind in [CredentialKind::ApiKey, CredentialKind::ServiceAccount] {
            let result = acquire_credential(
                file.path(),
                kind,
                ScopeType::SheetsReadonly,
                &CredentialOptions::default(),
            )
            .await;
            assert!(matches!(result, Err(CredentialError::NotImplemented(k)) if k == kind));
        }
    }

    #[tokio::test]
    async fn test_load_client_secrets_sections() {
        let mut installed = tempfile::NamedTempFile::new().unwrap();
        write!(
            installed,
            r#"{{"installed": {{"client_id": "a", "client_secret": "b", "redirect_uris": ["http://localhost"]}}}}"#
        )
        .unwrap();
        let config = load_client_secrets(installed.path()).await.unwrap();
        assert_eq!(config.client_id, "a");
        assert_eq!(config.token_uri, DEFAULT_TOKEN_URI);

        let mut neither = tempfile::NamedTempFile::new().unwrap();
        write!(neither, r#"{{"other": {{}}}}"#).unwrap();
        assert!(matches!(
            load_client_secrets(neither.path()).await,
            Err(CredentialError::InvalidClientSecrets(_))
        ));
    }

    #[test]
    fn test_authorization_url_carries_scopes_and_state() {
        let config = client_config(DEFAULT_TOKEN_URI.to_string());
        let url = authorization_url(
            &config,
            "http://localhost:8080/",
            ScopeType::SheetsEditable,
            "xyz",
        )
        .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("client_id").as_deref(), Some("my-client"));
        assert_eq!(get("state").as_deref(), Some("xyz"));
        assert_eq!(get("access_type").as_deref(), Some("offline"));
        assert_eq!(
            get("scope"),
            Some(ScopeType::SheetsEditable.urls().join(" "))
        );
    }

    #[test]
    fn test_parse_callback() {
        assert_eq!(
            parse_callback("GET /?state=s1&code=4%2Fabc&scope=x HTTP/1.1\r\nHost: localhost\r\n\r\n"),
            CallbackOutcome::Code {
                code: "4/abc".to_string(),
                state: Some("s1".to_string())
            }
        );
        assert_eq!(
            parse_callback("GET /?error=access_denied&state=s1 HTTP/1.1\r\n"),
            CallbackOutcome::Denied("access_denied".to_string())
        );
        assert_eq!(
            parse_callback("GET /favicon.ico HTTP/1.1\r\n"),
            CallbackOutcome::Ignored
        );
        assert_eq!(parse_callback(""), CallbackOutcome::Ignored);
    }

    async fn send_request(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_wait_for_callback_skips_noise() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let browser = tokio::spawn(async move {
            let favicon = send_request(addr, "GET /favicon.ico HTTP/1.1\r\n\r\n").await;
            let callback =
                send_request(addr, "GET /?state=good&code=the-code HTTP/1.1\r\n\r\n").await;
            (favicon, callback)
        });

        let code = wait_for_callback(&listener, "good").await.unwrap();
        assert_eq!(code, "the-code");

        let (favicon, callback) = browser.await.unwrap();
        assert!(favicon.starts_with("HTTP/1.1 404"));
        assert!(callback.contains("The authentication flow has completed."));
    }

    #[tokio::test]
    async fn test_wait_for_callback_rejects_wrong_state() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let browser = tokio::spawn(async move {
            send_request(addr, "GET /?state=forged&code=c HTTP/1.1\r\n\r\n").await
        });

        let result = wait_for_callback(&listener, "good").await;
        assert!(matches!(result, Err(CredentialError::StateMismatch)));
        assert!(browser.await.unwrap().starts_with("HTTP/1.1 400"));
    }

    #[tokio::test]
    async fn test_exchange_code() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".to_string(), "the-code".to_string()),
                Matcher::UrlEncoded("grant_type".to_string(), "authorization_code".to_string()),
                Matcher::UrlEncoded(
                    "redirect_uri".to_string(),
                    "http://localhost:8080/".to_string(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.x","refresh_token":"1//r","expires_in":3599,"token_type":"Bearer"}"#)
            .create_async()
            .await;

        let config = client_config(format!("{}/token", server.url()));
        let credential = exchange_code(
            &config,
            "the-code",
            "http://localhost:8080/",
            ScopeType::PresentationEditable,
        )
        .await
        .unwrap();

        assert_eq!(credential.token, "ya29.x");
        assert_eq!(credential.refresh_token.as_deref(), Some("1//r"));
        assert!(credential.covers(ScopeType::PresentationEditable));
        assert!(!credential.is_expired());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_authorize_writes_token_cache() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded("code".to_string(), "cb-code".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.cached","refresh_token":"1//keep","expires_in":3600}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let options = CredentialOptions {
            host: "127.0.0.1".to_string(),
            port: 0,
            cache_token: true,
            token_cache_path: dir.path().join("token.json"),
            open_browser: false,
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let browser = tokio::spawn(async move {
            send_request(addr, "GET /?state=known-state&code=cb-code HTTP/1.1\r\n\r\n").await
        });

        let config = client_config(format!("{}/token", server.url()));
        let credential = authorize(
            &config,
            listener,
            "known-state",
            ScopeType::SheetsEditable,
            &options,
        )
        .await
        .unwrap();
        assert!(browser.await.unwrap().starts_with("HTTP/1.1 200"));
        token_mock.assert_async().await;

        let cached = crate::infra::google::load_cached_credential(
            &options.token_cache_path,
            ScopeType::SheetsEditable,
        )
        .await
        .unwrap();
        assert_eq!(cached, credential);
        assert_eq!(cached.token, "ya29.cached");
    }

    #[tokio::test]
    async fn test_exchange_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_grant","error_description":"Bad Request"}"#)
            .create_async()
            .await;

        let config = client_config(format!("{}/token", server.url()));
        match exchange_code(&config, "stale", "http://localhost/", ScopeType::SheetsReadonly).await {
            Err(CredentialError::Exchange(message)) => {
                assert_eq!(message, "invalid_grant: Bad Request")
            }
            other => panic!("expected exchange error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_and_scopes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded(
                "grant_type".to_string(),
                "refresh_token".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"new-token","expires_in":3600}"#)
            .create_async()
            .await;

        let old = Credential {
            token: "old-token".to_string(),
            refresh_token: Some("1//r".to_string()),
            token_uri: format!("{}/token", server.url()),
            client_id: "my-client".to_string(),
            client_secret: "shh".to_string(),
            scopes: vec!["https://www.googleapis.com/auth/spreadsheets".to_string()],
            expiry: Some(chrono::Utc::now() - chrono::Duration::hours(1)),
        };

        let fresh = refresh_credential(&old).await.unwrap();
        assert_eq!(fresh.token, "new-token");
        assert_eq!(fresh.refresh_token, old.refresh_token);
        assert_eq!(fresh.scopes, old.scopes);
        assert!(!fresh.is_expired());

        let no_refresh = Credential {
            refresh_token: None,
            ..old
        };
        assert!(matches!(
            refresh_credential(&no_refresh).await,
            Err(CredentialError::NoRefreshToken)
        ));
    }

    #[test]
    fn test_flags() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
