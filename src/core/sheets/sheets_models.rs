// Request/response shapes of the Sheets v4 `spreadsheets.values` resource.
// Only the fields this crate reads are modelled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the Sheets API interprets the values we send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored exactly as given.
    Raw,
    /// Parsed as if typed into the UI (numbers, dates, formulas).
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

impl fmt::Display for ValueInputOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block of cell values. Absent `values` means the range is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<serde_json::Value>>>,
}

impl ValueRange {
    /// True when no cell in the range holds a value.
    pub fn is_empty(&self) -> bool {
        match &self.values {
            None => true,
            Some(rows) => rows.iter().all(|row| {
                row.iter()
                    .all(|cell| cell.is_null() || cell.as_str() == Some(""))
            }),
        }
    }
}

/// Response of `values.update`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: Option<String>,
    pub updated_range: Option<String>,
    pub updated_rows: Option<u64>,
    pub updated_columns: Option<u64>,
    pub updated_cells: Option<u64>,
}

/// Response of `values.append`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppendValuesResponse {
    pub spreadsheet_id: Option<String>,
    pub table_range: Option<String>,
    pub updates: Option<UpdateValuesResponse>,
}

impl AppendValuesResponse {
    pub fn updated_cells(&self) -> u64 {
        self.updates
            .as_ref()
            .and_then(|u| u.updated_cells)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_range_emptiness() {
        let empty: ValueRange = serde_json::from_value(json!({
            "range": "Sheet1!A1:B2",
            "majorDimension": "ROWS"
        }))
        .unwrap();
        assert!(empty.is_empty());

        let filled: ValueRange = serde_json::from_value(json!({
            "range": "Sheet1!A1:B2",
            "values": [["", "x"]]
        }))
        .unwrap();
        assert!(!filled.is_empty());
    }

    #[test]
    fn test_append_response_counts_cells() {
        let response: AppendValuesResponse = serde_json::from_value(json!({
            "spreadsheetId": "abc",
            "updates": {"updatedCells": 6, "updatedRange": "Sheet1!A1:B3"}
        }))
        .unwrap();
        assert_eq!(response.updated_cells(), 6);
        assert_eq!(AppendValuesResponse::default().updated_cells(), 0);
    }
}
