// =============================================================================
// SHEETS API
// =============================================================================
//
// High-level spreadsheet operations. Each one is a single remote call through
// the `SheetsClient` trait, so this file has no idea about HTTP.
//
// **Failure policy:** a remote error is logged and turned into `false` (or
// `None` for construction). Nothing is retried and nothing is re-raised, so
// callers have to look at the return value.

use async_trait::async_trait;

use super::sheets_models::{AppendValuesResponse, UpdateValuesResponse, ValueInputOption, ValueRange};
use crate::core::document::{DocumentApi, DocumentError};

/// Remote side of the spreadsheet client.
#[async_trait]
pub trait SheetsClient: Send + Sync {
    /// Creates a spreadsheet and returns its ID.
    async fn create_spreadsheet(&self, title: &str) -> Result<String, DocumentError>;

    /// `values.append`: writes after the last row of the table found in `range`.
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        input: ValueInputOption,
        values: &[Vec<String>],
    ) -> Result<AppendValuesResponse, DocumentError>;

    /// `values.update`: writes over whatever is in `range`.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        input: ValueInputOption,
        values: &[Vec<String>],
    ) -> Result<UpdateValuesResponse, DocumentError>;

    /// `values.get`.
    async fn get_values(&self, spreadsheet_id: &str, range: &str)
        -> Result<ValueRange, DocumentError>;

    /// Releases the transport. Called once when the owning handle is closed.
    async fn close(&self) {}
}

/// A handle bound to one spreadsheet.
pub struct SheetsApi<C: SheetsClient> {
    client: C,
    spreadsheet_id: String,
}

impl<C: SheetsClient> SheetsApi<C> {
    /// Binds a handle to an existing spreadsheet.
    pub fn new(client: C, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    /// Creates a new spreadsheet titled `title` and binds a handle to it.
    pub async fn with_new(client: C, title: &str) -> Option<Self> {
        match client.create_spreadsheet(title).await {
            Ok(id) => {
                tracing::info!("Spreadsheet ID: {}", id);
                Some(Self::new(client, id))
            }
            Err(e) => {
                tracing::error!("Failed to create spreadsheet '{}': {}", title, e);
                None
            }
        }
    }

    pub fn id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Appends `values` (rows x cols) below the existing content of `range`.
    /// Cells that already hold data are left alone.
    ///
    /// `input` defaults to `USER_ENTERED`; `spreadsheet_id` defaults to the
    /// bound spreadsheet.
    pub async fn append_values(
        &self,
        values: &[Vec<String>],
        range: &str,
        input: Option<ValueInputOption>,
        spreadsheet_id: Option<&str>,
    ) -> bool {
        let target = spreadsheet_id.unwrap_or(&self.spreadsheet_id);
        let input = input.unwrap_or_default();

        match self.client.append_values(target, range, input, values).await {
            Ok(result) => {
                tracing::info!("{} cells appended.", result.updated_cells());
                true
            }
            Err(e) => {
                tracing::error!("Failed to append values to {} ({}): {}", target, range, e);
                false
            }
        }
    }

    /// Writes `values` over the cells of `range`, replacing existing content.
    pub async fn overwrite_values(
        &self,
        values: &[Vec<String>],
        range: &str,
        input: Option<ValueInputOption>,
        spreadsheet_id: Option<&str>,
    ) -> bool {
        let target = spreadsheet_id.unwrap_or(&self.spreadsheet_id);
        let input = input.unwrap_or_default();

        match self.client.update_values(target, range, input, values).await {
            Ok(result) => {
                tracing::info!("{} cells updated.", result.updated_cells.unwrap_or(0));
                true
            }
            Err(e) => {
                tracing::error!("Failed to update values in {} ({}): {}", target, range, e);
                false
            }
        }
    }

    /// True if no cell of `range` holds a value.
    ///
    /// A failed lookup is logged and reported as `false`, since emptiness
    /// could not be confirmed.
    pub async fn is_range_empty(&self, range: &str) -> bool {
        match self.client.get_values(&self.spreadsheet_id, range).await {
            Ok(value_range) => value_range.is_empty(),
            Err(e) => {
                tracing::error!("Failed to read range {}: {}", range, e);
                false
            }
        }
    }
}

#[async_trait]
impl<C: SheetsClient> DocumentApi for SheetsApi<C> {
    type Client = C;

    async fn create_from_new(client: C, title: &str) -> Option<Self> {
        Self::with_new(client, title).await
    }

    fn document_id(&self) -> &str {
        self.id()
    }

    async fn close(self) {
        self.client.close().await;
    }
}
