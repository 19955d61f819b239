use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::ScopeType;

/// An authorized user credential.
///
/// The JSON layout matches the "authorized user" token files Google's own
/// client libraries write, so a cached `token.json` can be shared with them.
///
/// **Lifecycle:** created by the credential flow, handed to a transport and
/// never mutated afterwards. Refreshing produces a new `Credential`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer access token.
    pub token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Where refresh requests are sent.
    pub token_uri: String,

    pub client_id: String,

    pub client_secret: String,

    /// Scope URLs this token was granted.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// When the access token stops being valid, if known.
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// True when the token is expired or will expire within a minute.
    pub fn is_expired(&self) -> bool {
        match self.expiry {
            Some(expiry) => Utc::now() + Duration::seconds(60) >= expiry,
            None => false,
        }
    }

    /// Whether every URL of `scope` was granted to this credential.
    pub fn covers(&self, scope: ScopeType) -> bool {
        scope
            .urls()
            .iter()
            .all(|url| self.scopes.iter().any(|granted| granted == url))
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Tokens must never end up in log output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("token_uri", &self.token_uri)
            .field("client_id", &self.client_id)
            .field("scopes", &self.scopes)
            .field("expiry", &self.expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(expiry: Option<DateTime<Utc>>) -> Credential {
        Credential {
            token: "ya29.secret".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            client_id: "client".to_string(),
            client_secret: "shh".to_string(),
            scopes: vec!["https://www.googleapis.com/auth/spreadsheets".to_string()],
            expiry,
        }
    }

    #[test]
    fn test_expiry_margin() {
        assert!(!sample(None).is_expired());
        assert!(sample(Some(Utc::now() + Duration::seconds(30))).is_expired());
        assert!(!sample(Some(Utc::now() + Duration::hours(1))).is_expired());
    }

    #[test]
    fn test_covers_scope() {
        let cred = sample(None);
        assert!(cred.covers(ScopeType::SheetsEditable));
        assert!(!cred.covers(ScopeType::PresentationEditable));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let printed = format!("{:?}", sample(None));
        assert!(!printed.contains("ya29.secret"));
        assert!(!printed.contains("1//refresh"));
        assert!(!printed.contains("shh"));
    }
}
