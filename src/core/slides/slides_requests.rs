//! Builders for the batches the presentation client sends.
//!
//! These are pure functions so the exact payloads can be tested without a
//! transport.

use rand::RngCore;
use std::fmt::Display;

use super::slides_models::{
    AffineTransform, CreateImageRequest, CreateShapeRequest, CreateSlideRequest,
    CreateTableRequest, InsertTextRequest, LayoutReference, PageElementProperties, ShapeType,
    Size, SlidesRequest, TableCellLocation, Unit,
};
use crate::core::document::DocumentError;
use crate::core::types::SlideLayout;

/// Object ID Google gives the first slide of a new presentation.
pub const FIRST_SLIDE_ID: &str = "p";

/// New slides are inserted right after the first one.
pub const NEW_SLIDE_INDEX: u32 = 1;

pub const DEFAULT_TEXT_BOX_PT: f64 = 100.0;
pub const TEXT_BOX_OFFSET_PT: (f64, f64) = (350.0, 100.0);

pub const DEFAULT_IMAGE_EMU: f64 = 4000.0;
pub const IMAGE_OFFSET_EMU: (f64, f64) = (100_000.0, 100_000.0);

/// Random 16-byte object ID, hex encoded (32 characters).
pub fn random_object_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Optional placement settings for text boxes and images.
#[derive(Debug, Clone, Default)]
pub struct ElementOptions {
    /// Target slide. Defaults to the first slide.
    pub page_id: Option<String>,
    /// ID of the new element. Defaults to a random hex token.
    pub element_id: Option<String>,
    /// Side length of the element. Defaults depend on the element kind.
    pub size: Option<f64>,
}

impl ElementOptions {
    pub fn on_page(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }

    pub fn with_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    fn page(&self) -> String {
        self.page_id
            .clone()
            .unwrap_or_else(|| FIRST_SLIDE_ID.to_string())
    }

    fn element(&self) -> String {
        self.element_id.clone().unwrap_or_else(random_object_id)
    }
}

pub fn create_slide_request(page_id: &str, layout: SlideLayout) -> SlidesRequest {
    SlidesRequest::CreateSlide(CreateSlideRequest {
        object_id: page_id.to_string(),
        insertion_index: NEW_SLIDE_INDEX,
        slide_layout_reference: LayoutReference {
            predefined_layout: layout,
        },
    })
}

/// A text box followed by the text that fills it. Both go in one batch so
/// the shape exists by the time the insert is applied.
pub fn text_box_requests(text: &str, options: &ElementOptions) -> Vec<SlidesRequest> {
    let element_id = options.element();
    let size = options.size.unwrap_or(DEFAULT_TEXT_BOX_PT);
    let (x, y) = TEXT_BOX_OFFSET_PT;

    vec![
        SlidesRequest::CreateShape(CreateShapeRequest {
            object_id: element_id.clone(),
            shape_type: ShapeType::TextBox,
            element_properties: PageElementProperties {
                page_object_id: options.page(),
                size: Some(Size::square(size, Unit::Pt)),
                transform: Some(AffineTransform::translate(x, y, Unit::Pt)),
            },
        }),
        SlidesRequest::InsertText(InsertTextRequest {
            object_id: element_id,
            cell_location: None,
            text: text.to_string(),
            insertion_index: 0,
        }),
    ]
}

pub fn image_request(url: &str, options: &ElementOptions) -> SlidesRequest {
    let size = options.size.unwrap_or(DEFAULT_IMAGE_EMU);
    let (x, y) = IMAGE_OFFSET_EMU;

    SlidesRequest::CreateImage(CreateImageRequest {
        object_id: options.element(),
        url: url.to_string(),
        element_properties: PageElementProperties {
            page_object_id: options.page(),
            size: Some(Size::square(size, Unit::Emu)),
            transform: Some(AffineTransform::translate(x, y, Unit::Emu)),
        },
    })
}

pub fn empty_table_request(
    table_id: &str,
    rows: usize,
    columns: usize,
    page_id: Option<&str>,
) -> SlidesRequest {
    SlidesRequest::CreateTable(CreateTableRequest {
        object_id: table_id.to_string(),
        element_properties: PageElementProperties {
            page_object_id: page_id.unwrap_or(FIRST_SLIDE_ID).to_string(),
            size: None,
            transform: None,
        },
        rows,
        columns,
    })
}

/// Checks that `values` is a non-empty rectangle and returns `(rows, columns)`.
pub fn table_shape<T>(values: &[Vec<T>]) -> Result<(usize, usize), DocumentError> {
    let columns = values.first().map(Vec::len).unwrap_or(0);
    if columns == 0 {
        return Err(DocumentError::EmptyTable);
    }

    if let Some((row, found)) = values
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|(_, len)| *len != columns)
    {
        return Err(DocumentError::RaggedTable {
            row,
            expected: columns,
            found,
        });
    }

    Ok((values.len(), columns))
}

/// One insert-text request per cell, row-major.
///
/// Every cell starts empty, and insertion indices are relative to the cell's
/// own text, so each insert goes at index 0.
pub fn table_fill_requests<T: Display>(
    table_id: &str,
    values: &[Vec<T>],
) -> Result<Vec<SlidesRequest>, DocumentError> {
    table_shape(values)?;

    let requests = values
        .iter()
        .enumerate()
        .flat_map(|(row_index, row)| {
            row.iter().enumerate().map(move |(column_index, value)| {
                SlidesRequest::InsertText(InsertTextRequest {
                    object_id: table_id.to_string(),
                    cell_location: Some(TableCellLocation {
                        row_index,
                        column_index,
                    }),
                    text: value.to_string(),
                    insertion_index: 0,
                })
            })
        })
        .collect();

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_random_object_id_is_32_hex_chars() {
        let id = random_object_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, random_object_id());
    }

    #[test]
    fn test_text_box_defaults() {
        let requests = text_box_requests("Hello world!", &ElementOptions::default().with_id("box"));
        let json = serde_json::to_value(&requests).unwrap();
        assert_eq!(
            json,
            json!([
                {"createShape": {
                    "objectId": "box",
                    "shapeType": "TEXT_BOX",
                    "elementProperties": {
                        "pageObjectId": "p",
                        "size": {
                            "height": {"magnitude": 100.0, "unit": "PT"},
                            "width": {"magnitude": 100.0, "unit": "PT"}
                        },
                        "transform": {
                            "scaleX": 1.0, "scaleY": 1.0,
                            "translateX": 350.0, "translateY": 100.0,
                            "unit": "PT"
                        }
                    }
                }},
                {"insertText": {"objectId": "box", "text": "Hello world!", "insertionIndex": 0}}
            ])
        );
    }

    #[test]
    fn test_text_box_shares_generated_id() {
        let requests = text_box_requests("hi", &ElementOptions::default());
        let (shape_id, text_id) = match (&requests[0], &requests[1]) {
            (SlidesRequest::CreateShape(s), SlidesRequest::InsertText(t)) => {
                (s.object_id.clone(), t.object_id.clone())
            }
            other => panic!("unexpected batch: {:?}", other),
        };
        assert_eq!(shape_id, text_id);
        assert_eq!(shape_id.len(), 32);
    }

    #[test]
    fn test_image_placement() {
        let request = image_request(
            "https://example.com/logo.png",
            &ElementOptions::default().on_page("slide2").with_size(8000.0),
        );
        let json = serde_json::to_value(&request).unwrap();
        let props = &json["createImage"]["elementProperties"];
        assert_eq!(props["pageObjectId"], json!("slide2"));
        assert_eq!(props["size"]["width"], json!({"magnitude": 8000.0, "unit": "EMU"}));
        assert_eq!(props["transform"]["translateX"], json!(100000.0));
        assert_eq!(props["transform"]["unit"], json!("EMU"));
    }

    #[test]
    fn test_create_slide_request() {
        let json = serde_json::to_value(create_slide_request("s2", SlideLayout::TitleOnly)).unwrap();
        assert_eq!(
            json,
            json!({"createSlide": {
                "objectId": "s2",
                "insertionIndex": 1,
                "slideLayoutReference": {"predefinedLayout": "TITLE_ONLY"}
            }})
        );
    }

    #[test]
    fn test_empty_table_request_uses_first_slide() {
        let json = serde_json::to_value(empty_table_request("t", 2, 3, None)).unwrap();
        assert_eq!(
            json,
            json!({"createTable": {
                "objectId": "t",
                "elementProperties": {"pageObjectId": "p"},
                "rows": 2,
                "columns": 3
            }})
        );
    }

    #[test]
    fn test_table_shape_rejects_ragged_rows() {
        let ragged = vec![vec![1, 2], vec![3]];
        assert!(matches!(
            table_shape(&ragged),
            Err(DocumentError::RaggedTable {
                row: 1,
                expected: 2,
                found: 1
            })
        ));

        let empty: Vec<Vec<i32>> = Vec::new();
        assert!(matches!(table_shape(&empty), Err(DocumentError::EmptyTable)));
        assert!(matches!(
            table_shape(&[Vec::<i32>::new()]),
            Err(DocumentError::EmptyTable)
        ));
    }

    #[test]
    fn test_table_fill_is_row_major() {
        let values = vec![vec!["a", "b"], vec!["c", "d"]];
        let requests = table_fill_requests("t", &values).unwrap();
        let cells: Vec<(usize, usize, String, u32)> = requests
            .iter()
            .map(|r| match r {
                SlidesRequest::InsertText(t) => {
                    let loc = t.cell_location.unwrap();
                    (loc.row_index, loc.column_index, t.text.clone(), t.insertion_index)
                }
                other => panic!("unexpected request: {:?}", other),
            })
            .collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, "a".to_string(), 0),
                (0, 1, "b".to_string(), 0),
                (1, 0, "c".to_string(), 0),
                (1, 1, "d".to_string(), 0),
            ]
        );
    }
}
