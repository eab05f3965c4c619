//! Configuration errors.

/// Errors raised while loading configuration or settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("Invalid source: {0}")]
	InvalidSource(String),

	#[error("Invalid URL {url:?}: {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("No per-user configuration directory on this platform")]
	NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
