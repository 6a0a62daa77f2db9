//! Log output for hosts embedding the nonce trackers.
//!
//! Library crates only emit `tracing` events. [`init_tracing`] installs a
//! formatting subscriber filtered by `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

pub const DEFAULT_FILTER: &str = "info";

/// Filter from `RUST_LOG`, or [`DEFAULT_FILTER`] when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    tracing::debug!("Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // Another test may have installed the subscriber first.
        let _ = init_tracing();
        assert!(init_tracing().is_err());
    }
}
