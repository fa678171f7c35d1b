//! Structured tracing helpers.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter applied when neither an explicit directive nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds the filter: an explicit directive wins, then `RUST_LOG`, then
/// [`DEFAULT_DIRECTIVE`].
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the explicit directive is malformed.
pub fn build_filter(directive: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    match directive {
        Some(directive) => {
            EnvFilter::try_new(directive).map_err(|err| TelemetryError::InvalidFilter {
                directive: directive.to_owned(),
                reason: err.to_string(),
            })
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))),
    }
}

/// Installs a global fmt subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(directive: Option<&str>) -> Result<(), TelemetryError> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInstalled(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directive_is_parsed() {
        let filter = build_filter(Some("carrier_policy=debug,warn")).unwrap();
        assert!(filter.to_string().contains("carrier_policy=debug"));
    }

    #[test]
    fn malformed_directive_is_rejected() {
        let err = build_filter(Some("carrier_policy=loud")).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }

    #[test]
    fn second_install_reports_error() {
        let _ = init(Some("warn"));
        assert!(matches!(
            init(Some("warn")),
            Err(TelemetryError::AlreadyInstalled(_))
        ));
    }
}
