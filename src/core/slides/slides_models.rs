// =============================================================================
// SLIDES API DATA STRUCTURES
// =============================================================================
//
// These structs model the parts of the Slides v1 `batchUpdate` request and
// response format this crate sends or reads.
// See: https://developers.google.com/slides/api/reference/rest/v1/presentations/request

use serde::{Deserialize, Serialize};

use crate::core::types::{InsertKind, SlideLayout};

/// One operation inside a `batchUpdate`. Serializes externally tagged, e.g.
/// `{"createSlide": {...}}`, which is exactly the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlidesRequest {
    CreateSlide(CreateSlideRequest),
    CreateShape(CreateShapeRequest),
    InsertText(InsertTextRequest),
    CreateImage(CreateImageRequest),
    CreateTable(CreateTableRequest),
}

impl SlidesRequest {
    /// What the request puts on the page, if anything.
    pub fn insert_kind(&self) -> Option<InsertKind> {
        match self {
            SlidesRequest::CreateSlide(_) => None,
            SlidesRequest::CreateShape(_) | SlidesRequest::InsertText(_) => Some(InsertKind::Text),
            SlidesRequest::CreateImage(_) => Some(InsertKind::Image),
            SlidesRequest::CreateTable(_) => Some(InsertKind::Table),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    pub object_id: String,
    pub insertion_index: u32,
    pub slide_layout_reference: LayoutReference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub predefined_layout: SlideLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    TextBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    pub object_id: String,
    pub shape_type: ShapeType,
    pub element_properties: PageElementProperties,
}

/// Inserts text into a shape, or into one cell when `cell_location` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text: String,
    pub insertion_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub row_index: usize,
    pub column_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub object_id: String,
    pub url: String,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub object_id: String,
    pub element_properties: PageElementProperties,
    pub rows: usize,
    pub columns: usize,
}

/// Where a new element goes: which page, how big, and the placement transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElementProperties {
    pub page_object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub height: Dimension,
    pub width: Dimension,
}

impl Size {
    /// A square of side `magnitude`.
    pub fn square(magnitude: f64, unit: Unit) -> Self {
        let side = Dimension { magnitude, unit };
        Self {
            height: side,
            width: side,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: Unit,
}

/// Length units understood by the Slides API.
///
/// **EMU** (English Metric Unit): 914400 per inch, 12700 per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    Pt,
    Emu,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub unit: Unit,
}

impl AffineTransform {
    /// Unscaled placement at (`x`, `y`).
    pub fn translate(x: f64, y: f64, unit: Unit) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: x,
            translate_y: y,
            unit,
        }
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Response of `presentations.batchUpdate`. One reply per request, same order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchUpdateResponse {
    pub presentation_id: Option<String>,
    pub replies: Vec<Reply>,
}

impl BatchUpdateResponse {
    /// Object ID created by the first request of the batch, if it created one.
    pub fn first_object_id(&self) -> Option<&str> {
        self.replies.first().and_then(Reply::object_id)
    }
}

/// A single reply. Requests that create nothing reply with an empty object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reply {
    pub create_slide: Option<ObjectReply>,
    pub create_shape: Option<ObjectReply>,
    pub create_image: Option<ObjectReply>,
    pub create_table: Option<ObjectReply>,
}

impl Reply {
    pub fn object_id(&self) -> Option<&str> {
        self.create_slide
            .as_ref()
            .or(self.create_shape.as_ref())
            .or(self.create_image.as_ref())
            .or(self.create_table.as_ref())
            .map(|r| r.object_id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReply {
    pub object_id: String,
}

/// A page (slide, layout or master) as returned by `presentations.pages.get`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub object_id: String,
    #[serde(default)]
    pub page_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_to_wire_format() {
        let request = SlidesRequest::InsertText(InsertTextRequest {
            object_id: "table1".to_string(),
            cell_location: Some(TableCellLocation {
                row_index: 1,
                column_index: 2,
            }),
            text: "42".to_string(),
            insertion_index: 0,
        });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "insertText": {
                    "objectId": "table1",
                    "cellLocation": {"rowIndex": 1, "columnIndex": 2},
                    "text": "42",
                    "insertionIndex": 0
                }
            })
        );
    }

    #[test]
    fn test_reply_object_ids() {
        let response: BatchUpdateResponse = serde_json::from_value(json!({
            "presentationId": "deck",
            "replies": [{"createShape": {"objectId": "box1"}}, {}]
        }))
        .unwrap();
        assert_eq!(response.first_object_id(), Some("box1"));
        assert_eq!(response.replies[1].object_id(), None);
    }
}
