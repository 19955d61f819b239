// Library root for the Google Sheets / Google Slides wrapper.
//
// **Architecture Overview:**
// - `core/` = Request assembly, domain types and formatting (no HTTP)
// - `infra/` = Implementations of core traits (reqwest transports, OAuth flow, logging)
//
// The binary in `main.rs` is a thin CLI on top of this crate.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;

pub use crate::core::auth::Credential;
pub use crate::core::document::{with_document, DocumentApi, DocumentError};
pub use crate::core::format::{object_to_string, object_to_value, value_to_list, value_to_string};
pub use crate::core::sheets::{SheetsApi, SheetsClient, ValueInputOption};
pub use crate::core::slides::{ElementOptions, SlidesApi, SlidesClient};
pub use crate::core::types::{AccessMode, CredentialKind, InsertKind, ScopeType, SlideLayout};
pub use crate::infra::google::{
    acquire_credential, load_cached_credential, refresh_credential, CredentialError,
    CredentialOptions, GoogleSheetsClient, GoogleSlidesClient,
};
