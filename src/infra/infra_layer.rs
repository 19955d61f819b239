// The infra module contains implementations of core traits and everything
// that does real I/O: HTTP transports, the OAuth flow, log output.

#[path = "google/mod.rs"]
pub mod google;

#[path = "logging/logger.rs"]
pub mod logging;
