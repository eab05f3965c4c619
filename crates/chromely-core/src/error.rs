//! Errors raised while building requests and responses.

use http::Method;

/// Errors produced by the request model.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid HTTP method: {0:?}")]
	InvalidMethod(String),

	#[error("Method {0} is not accepted for query messages")]
	MethodNotAccepted(Method),

	#[error("Invalid URL {url:?}: {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Parameters must be a JSON object, got {0}")]
	InvalidParameters(String),

	#[error("Missing parameter: {0}")]
	MissingParameter(String),

	#[error("Invalid value {value:?} for parameter {name}")]
	InvalidParameter { name: String, value: String },
}

/// Result alias for the request model.
pub type Result<T> = std::result::Result<T, Error>;
