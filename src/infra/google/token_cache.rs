// Token cache: the credential serialized as pretty JSON on disk.
//
// The file holds a live access token and a refresh token. Anyone who can read
// it can act as the user until the grant is revoked.

use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::oauth_flow::{refresh_credential, CredentialError};
use crate::core::auth::Credential;
use crate::core::types::ScopeType;

pub async fn save_cached_credential(
    path: impl AsRef<Path>,
    credential: &Credential,
) -> Result<(), CredentialError> {
    let path = path.as_ref();
    tracing::warn!(
        "Caching credential at {}. This file contains sensitive data, keep it private.",
        path.display()
    );

    let json = serde_json::to_string_pretty(credential)?;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(json.as_bytes()).await?;
    file.flush().await?;

    // `mode` only applies on creation; tighten a file left by an older run.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    }

    Ok(())
}

/// Loads a cached credential for `scope`, refreshing it if it expired.
///
/// A refreshed credential is written back to `path`.
pub async fn load_cached_credential(
    path: impl AsRef<Path>,
    scope: ScopeType,
) -> Result<Credential, CredentialError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CredentialError::NotFound(path.to_path_buf()));
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let credential: Credential = serde_json::from_str(&raw)?;

    if !credential.covers(scope) {
        return Err(CredentialError::ScopeMismatch(scope));
    }

    if !credential.is_expired() {
        tracing::info!("Using cached credential from {}", path.display());
        return Ok(credential);
    }

    tracing::info!("Cached credential expired, refreshing");
    let refreshed = refresh_credential(&credential).await?;
    save_cached_credential(path, &refreshed).await?;
    Ok(refreshed)
}
