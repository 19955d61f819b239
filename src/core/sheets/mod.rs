pub mod sheets_models;
pub mod sheets_service;

pub use sheets_models::{AppendValuesResponse, UpdateValuesResponse, ValueInputOption, ValueRange};
pub use sheets_service::{SheetsApi, SheetsClient};
