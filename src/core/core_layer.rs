// The core module contains the request assembly and formatting logic.
// Nothing in here talks to the network; remote calls go through the
// `SheetsClient` / `SlidesClient` traits that the infra layer implements.

#[path = "types/gsuite_types.rs"]
pub mod types;

#[path = "auth/credential.rs"]
pub mod auth;

#[path = "format/mod.rs"]
pub mod format;

#[path = "document/document_api.rs"]
pub mod document;

#[path = "sheets/mod.rs"]
pub mod sheets;

#[path = "slides/mod.rs"]
pub mod slides;
