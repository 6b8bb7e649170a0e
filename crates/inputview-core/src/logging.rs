#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! Call sites across the workspace guard their events with
//! `#[cfg(feature = "tracing")]`, so builds without the feature carry no
//! logging code at all. With `tracing-json`, [`init_json_logging`] installs a
//! JSON subscriber filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info";

/// Failure to install the global subscriber (usually: one is already set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingInitError(pub String);

impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.0)
    }
}

impl std::error::Error for LoggingInitError {}

/// Install a JSON `tracing` subscriber for the process.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingInitError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_display() {
        let err = LoggingInitError("already set".into());
        assert_eq!(
            err.to_string(),
            "failed to install log subscriber: already set"
        );
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn second_init_fails() {
        let _ = init_json_logging();
        assert!(init_json_logging().is_err());
    }
}
