// Shared pieces of the two document clients: the error type every remote call
// returns, the capability trait both clients implement, and the scoped
// acquire/use/release helper.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors raised by the remote transports and by local precondition checks.
///
/// Public client operations swallow the remote variants (logging them and
/// returning `false`/`None`); only the table precondition variants ever reach
/// a caller as an `Err`.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Google API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Table values must have at least one row and one column")]
    EmptyTable,
    #[error("Table row {row} has {found} columns, expected {expected}")]
    RaggedTable {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Capability shared by the spreadsheet and presentation clients.
#[async_trait]
pub trait DocumentApi: Sized + Send + Sync {
    /// The transport the handle is bound to.
    type Client: Send + Sync;

    /// Creates a brand new remote document and binds a handle to it.
    /// Returns `None` (after logging) if the remote call fails.
    async fn create_from_new(client: Self::Client, title: &str) -> Option<Self>;

    /// ID of the bound document.
    fn document_id(&self) -> &str;

    /// Releases the underlying transport.
    async fn close(self);
}

/// Future returned by the body of [`with_document`].
pub type ScopedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Runs `body` against `document`, then closes it.
///
/// ```ignore
/// let ok = with_document(api, |api| Box::pin(async move {
///     api.add_text("Hello world!", ElementOptions::default()).await
/// }))
/// .await;
/// ```
pub async fn with_document<D, T, F>(document: D, body: F) -> T
where
    D: DocumentApi,
    F: for<'a> FnOnce(&'a D) -> ScopedFuture<'a, T>,
{
    let output = body(&document).await;
    tracing::debug!("Releasing document {}", document.document_id());
    document.close().await;
    output
}
