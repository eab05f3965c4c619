//! Transport adapter errors.

use chromely_dispatch::DispatchError;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
	#[error("Url {0} is not of a registered custom scheme")]
	SchemeNotRegistered(String),

	#[error("Url {0} is not of a registered command scheme")]
	CommandSchemeNotRegistered(String),

	#[error("Request is not valid: {0}")]
	InvalidQuery(#[source] chromely_core::Error),

	#[error("Invalid request: {0}")]
	Request(#[from] chromely_core::Error),

	#[error(transparent)]
	Dispatch(#[from] DispatchError),

	#[error("Handler panicked: {0}")]
	Panicked(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
