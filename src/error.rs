//! Top-level error type.

use chromely_bridge::BridgeError;
use chromely_conf::ConfigError;
use chromely_dispatch::DispatchError;

use crate::logging::LoggingError;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ChromelyError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("Request error: {0}")]
	Request(#[from] chromely_core::Error),

	#[error("Dispatch error: {0}")]
	Dispatch(#[from] DispatchError),

	#[error("Transport error: {0}")]
	Bridge(#[from] BridgeError),

	#[error("Logging error: {0}")]
	Logging(#[from] LoggingError),

	#[error("No tokio runtime available to run requests")]
	NoRuntime,
}

pub type Result<T> = std::result::Result<T, ChromelyError>;
