// =============================================================================
// SLIDES API
// =============================================================================
//
// High-level presentation operations. Every operation becomes one
// `batchUpdate` through the `SlidesClient` trait; the server applies the
// requests of a batch in order.
//
// **Failure policy:** same as the spreadsheet client. Remote errors are
// logged and turned into `false`. The only errors a caller ever sees are the
// table shape checks in `add_table`, which run before anything is sent.

use async_trait::async_trait;
use std::fmt::Display;

use super::slides_models::{BatchUpdateResponse, Page, SlidesRequest};
use super::slides_requests::{
    create_slide_request, empty_table_request, image_request, random_object_id,
    table_fill_requests, table_shape, text_box_requests, ElementOptions,
};
use crate::core::document::{DocumentApi, DocumentError};
use crate::core::format::object_to_string;
use crate::core::types::SlideLayout;

/// Batches longer than this are summarized in debug output.
const LOG_ABBREVIATION: usize = 8;

/// Remote side of the presentation client.
#[async_trait]
pub trait SlidesClient: Send + Sync {
    /// Creates a presentation and returns its ID.
    async fn create_presentation(&self, title: &str) -> Result<String, DocumentError>;

    /// Sends `requests` as one `batchUpdate`.
    async fn batch_update(
        &self,
        presentation_id: &str,
        requests: &[SlidesRequest],
    ) -> Result<BatchUpdateResponse, DocumentError>;

    /// `presentations.pages.get`.
    async fn get_page(&self, presentation_id: &str, page_id: &str) -> Result<Page, DocumentError>;

    /// Releases the transport. Called once when the owning handle is closed.
    async fn close(&self) {}
}

/// A handle bound to one presentation.
pub struct SlidesApi<C: SlidesClient> {
    client: C,
    presentation_id: String,
}

impl<C: SlidesClient> SlidesApi<C> {
    /// Binds a handle to an existing presentation.
    pub fn new(client: C, presentation_id: impl Into<String>) -> Self {
        Self {
            client,
            presentation_id: presentation_id.into(),
        }
    }

    /// Creates a new presentation titled `title` and binds a handle to it.
    pub async fn with_new(client: C, title: &str) -> Option<Self> {
        match client.create_presentation(title).await {
            Ok(id) => {
                tracing::info!("Created presentation with ID: {}", id);
                Some(Self::new(client, id))
            }
            Err(e) => {
                tracing::error!("Failed to create presentation '{}': {}", title, e);
                None
            }
        }
    }

    pub fn id(&self) -> &str {
        &self.presentation_id
    }

    async fn post_update(&self, requests: &[SlidesRequest]) -> Option<BatchUpdateResponse> {
        tracing::debug!(
            "batchUpdate on {}: {}",
            self.presentation_id,
            object_to_string(requests, Some(LOG_ABBREVIATION), true)
        );

        match self.client.batch_update(&self.presentation_id, requests).await {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::error!("batchUpdate on {} failed: {}", self.presentation_id, e);
                None
            }
        }
    }

    fn log_created(what: &str, requests: &[SlidesRequest], response: &BatchUpdateResponse) {
        let kind = requests.first().and_then(SlidesRequest::insert_kind);
        match (response.first_object_id(), kind) {
            (Some(id), Some(kind)) => tracing::info!(%kind, "Created {} with ID: {}", what, id),
            (Some(id), None) => tracing::info!("Created {} with ID: {}", what, id),
            (None, _) => tracing::info!("Created {}", what),
        }
    }

    /// Whether the presentation has a page with this object ID.
    pub async fn page_exists(&self, page_id: &str) -> bool {
        match self.client.get_page(&self.presentation_id, page_id).await {
            Ok(page) => page.object_id == page_id,
            Err(e) => {
                tracing::error!("Failed to look up page {}: {}", page_id, e);
                false
            }
        }
    }

    /// Inserts a new slide with ID `page_id` at index 1.
    pub async fn create_slide(&self, page_id: &str, layout: SlideLayout) -> bool {
        let requests = vec![create_slide_request(page_id, layout)];
        match self.post_update(&requests).await {
            Some(response) => {
                Self::log_created("slide", &requests, &response);
                true
            }
            None => false,
        }
    }

    /// Adds a text box holding `text`.
    ///
    /// Defaults: first slide, random element ID, 100 PT square.
    pub async fn add_text(&self, text: &str, options: ElementOptions) -> bool {
        let requests = text_box_requests(text, &options);
        match self.post_update(&requests).await {
            Some(response) => {
                Self::log_created("textbox", &requests, &response);
                true
            }
            None => false,
        }
    }

    /// Adds the image at `url`.
    ///
    /// Defaults: first slide, random image ID, 4000 EMU square.
    pub async fn add_image(&self, url: &str, options: ElementOptions) -> bool {
        let requests = vec![image_request(url, &options)];
        match self.post_update(&requests).await {
            Some(response) => {
                Self::log_created("image", &requests, &response);
                true
            }
            None => false,
        }
    }

    /// Creates an empty `rows` x `columns` table. `page_id` defaults to the first slide.
    pub async fn create_empty_table(
        &self,
        table_id: &str,
        rows: usize,
        columns: usize,
        page_id: Option<&str>,
    ) -> bool {
        let requests = vec![empty_table_request(table_id, rows, columns, page_id)];
        match self.post_update(&requests).await {
            Some(response) => {
                Self::log_created("table", &requests, &response);
                true
            }
            None => false,
        }
    }

    /// Writes `values` (rows x columns) into a table.
    ///
    /// Without `table_id` a table sized to `values` is created first. Every
    /// row must have the same length; empty or ragged input is rejected with
    /// an `Err` before any request is sent. Remote failures return `Ok(false)`.
    pub async fn add_table<T: Display + Sync>(
        &self,
        values: &[Vec<T>],
        table_id: Option<&str>,
        page_id: Option<&str>,
    ) -> Result<bool, DocumentError> {
        let (rows, columns) = table_shape(values)?;

        let table_id = match table_id {
            Some(id) => id.to_string(),
            None => {
                let id = random_object_id();
                if !self.create_empty_table(&id, rows, columns, page_id).await {
                    return Ok(false);
                }
                id
            }
        };

        let requests = table_fill_requests(&table_id, values)?;
        match self.post_update(&requests).await {
            Some(_) => {
                tracing::info!("Filled {} cells of table {}", requests.len(), table_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl<C: SlidesClient> DocumentApi for SlidesApi<C> {
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
