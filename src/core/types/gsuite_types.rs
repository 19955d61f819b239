// Closed enumerations shared by the credential flow and both document clients.
// Each one maps onto a fixed string (or list of strings) understood by Google.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SCOPES
// ============================================================================

/// Permission scope requested when acquiring a credential.
///
/// **Note:** `Drive` is the full, permissive scope over every file the user
/// owns. Only request it when nothing narrower works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeType {
    /// Read/write access to presentations and their properties.
    PresentationEditable,
    /// Read-only access to presentations and their properties.
    PresentationReadonly,
    /// Read/write access to spreadsheets and their properties.
    SheetsEditable,
    /// Read-only access to spreadsheets and their properties.
    SheetsReadonly,
    /// Per-file access to files created or opened by the app.
    DriveFiles,
    /// Read-only access to file metadata and content.
    DriveReadonly,
    /// Full access to all of the user's files.
    Drive,
}

impl ScopeType {
    /// The scope URLs sent to the consent screen.
    pub fn urls(&self) -> &'static [&'static str] {
        match self {
            ScopeType::PresentationEditable => &["https://www.googleapis.com/auth/presentations"],
            ScopeType::PresentationReadonly => {
                &["https://www.googleapis.com/auth/presentations.readonly"]
            }
            ScopeType::SheetsEditable => &["https://www.googleapis.com/auth/spreadsheets"],
            ScopeType::SheetsReadonly => &["https://www.googleapis.com/auth/spreadsheets.readonly"],
            ScopeType::DriveFiles => &["https://www.googleapis.com/auth/drive.file"],
            ScopeType::DriveReadonly => &["https://www.googleapis.com/auth/drive.readonly"],
            ScopeType::Drive => &["https://www.googleapis.com/auth/drive"],
        }
    }

    /// Scope for the spreadsheet client in the given access mode.
    pub fn for_sheets(mode: AccessMode) -> Self {
        match mode {
            AccessMode::Read => ScopeType::SheetsReadonly,
            AccessMode::Edit => ScopeType::SheetsEditable,
        }
    }

    /// Scope for the presentation client in the given access mode.
    pub fn for_presentation(mode: AccessMode) -> Self {
        match mode {
            AccessMode::Read => ScopeType::PresentationReadonly,
            AccessMode::Edit => ScopeType::PresentationEditable,
        }
    }
}

/// `read` / `edit` selector used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Edit,
}

impl FromStr for AccessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(AccessMode::Read),
            "edit" => Ok(AccessMode::Edit),
            other => Err(format!("Unexpected scope: {}", other)),
        }
    }
}

// ============================================================================
// CREDENTIAL KINDS
// ============================================================================

/// How a credential is obtained. Only `OAuth` is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    #[serde(rename = "api_keys")]
    ApiKey,
    #[serde(rename = "oauth")]
    OAuth,
    ServiceAccount,
}

impl CredentialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::ApiKey => "api_keys",
            CredentialKind::OAuth => "oauth",
            CredentialKind::ServiceAccount => "service_account",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api_keys" | "api_key" => Ok(CredentialKind::ApiKey),
            "oauth" => Ok(CredentialKind::OAuth),
            "service_account" => Ok(CredentialKind::ServiceAccount),
            other => Err(format!("Unknown credential kind: {}", other)),
        }
    }
}

// ============================================================================
// SLIDES
// ============================================================================

/// Predefined layouts accepted by `createSlide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideLayout {
    #[default]
    Blank,
    CaptionOnly,
    Title,
    TitleAndBody,
    TitleAndTwoColumns,
    TitleOnly,
    SectionHeader,
    SectionTitleAndDescription,
    OneColumnText,
    MainPoint,
    BigNumber,
}

/// What kind of content a slide request puts on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertKind {
    Text,
    Table,
    Graph,
    Image,
}

impl fmt::Display for InsertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InsertKind::Text => "text",
            InsertKind::Table => "table",
            InsertKind::Graph => "graph",
            InsertKind::Image => "image",
        };
        f.write_str(label)
    }
}
