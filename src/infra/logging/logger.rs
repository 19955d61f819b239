// Log output setup. Library code only emits `tracing` events; installing a
// subscriber is up to the binary.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_directive` when set. Returns `false` if a
/// subscriber was already installed (tests install several).
pub fn init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_logging("debug");
        assert!(!init_logging("info"));
        tracing::info!("still logging after a second init");
    }
}
