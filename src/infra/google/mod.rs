// =============================================================================
// GOOGLE MODULE
// =============================================================================
//
// Everything that talks to Google lives here:
// - `oauth_flow` turns a client-secret file into a `Credential` (installed-app
//   flow with a localhost callback listener),
// - `token_cache` persists that credential between runs,
// - `sheets_client` / `slides_client` implement the core transport traits
//   over the REST endpoints with reqwest.
//
// **Environment Variables:**
// - `GSUITE_OAUTH_HOST` / `GSUITE_OAUTH_PORT` - callback listener address
// - `GSUITE_CACHE_TOKEN` - write the credential to the token cache
// - `GSUITE_TOKEN_CACHE` - token cache path (default `token.json`)
// - `GSUITE_OPEN_BROWSER` - set to `false` to only log the consent URL
// - `GSUITE_SHEETS_BASE_URL` / `GSUITE_SLIDES_BASE_URL` - API base URLs

mod google_http;
pub mod oauth_flow;
pub mod sheets_client;
pub mod slides_client;
pub mod token_cache;

pub use oauth_flow::{acquire_credential, refresh_credential, CredentialError, CredentialOptions};
pub use sheets_client::GoogleSheetsClient;
pub use slides_client::GoogleSlidesClient;
pub use token_cache::{load_cached_credential, save_cached_credential};
