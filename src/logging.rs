//! Structured logging setup.

use std::io::{self, IsTerminal};

use chromely_conf::ChromelyConfig;
use tracing_subscriber::{EnvFilter, fmt};

/// Errors raised while installing the log subscriber.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("Invalid log filter: {0}")]
	Filter(String),
}

/// Map a `logSeverity` setting to a filter directive.
///
/// Accepts tracing level names as well as `verbose`, `warning`, `fatal` and
/// `disable`. Anything else is passed through as a filter expression.
///
/// # Examples
///
/// ```
/// use chromely::logging::severity_directive;
///
/// assert_eq!(severity_directive("Warning"), "warn");
/// assert_eq!(severity_directive("disable"), "off");
/// assert_eq!(severity_directive("chromely=trace"), "chromely=trace");
/// ```
pub fn severity_directive(severity: &str) -> String {
	match severity.trim().to_ascii_lowercase().as_str() {
		"" | "default" | "info" => "info".to_string(),
		"verbose" | "debug" => "debug".to_string(),
		"trace" => "trace".to_string(),
		"warning" | "warn" => "warn".to_string(),
		"error" | "fatal" => "error".to_string(),
		"disable" | "off" => "off".to_string(),
		_ => severity.trim().to_string(),
	}
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured `logSeverity`. When a global
/// subscriber is already installed, by an earlier call or by the host
/// application, it is kept and `Ok(())` is returned.
pub fn init(config: &ChromelyConfig) -> Result<(), LoggingError> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(severity_directive(config.log_severity()))
			.map_err(|e| LoggingError::Filter(e.to_string()))?,
	};

	let subscriber = fmt::Subscriber::builder()
		.with_env_filter(filter)
		.with_target(true)
		.with_writer(io::stderr)
		.with_ansi(io::stderr().is_terminal())
		.finish();

	if tracing::subscriber::set_global_default(subscriber).is_err() {
		tracing::debug!("global subscriber already installed, keeping it");
	}
	Ok(())
}
