pub mod slides_models;
pub mod slides_requests;
pub mod slides_service;

pub use slides_models::{BatchUpdateResponse, Page, SlidesRequest};
pub use slides_requests::ElementOptions;
pub use slides_service::{SlidesApi, SlidesClient};
