//! # Chromely Bridge
//!
//! Adapters between the browser engine and the request dispatcher:
//!
//! - [`SchemeHandler`]: navigations to registered custom schemes, answered
//!   with a JSON [`SchemeResponse`].
//! - [`QueryHandler`]: JSON query messages posted by page JavaScript,
//!   answered through a [`QueryCallback`].
//! - [`CommandRunner`]: fire-and-forget navigations to command schemes.
//!
//! Each adapter returns to the engine immediately and finishes the work on
//! a [`TaskRunner`](chromely_dispatch::TaskRunner).

pub mod command;
pub mod error;
mod guard;
pub mod query;
pub mod scheme;

pub use command::CommandRunner;
pub use error::{BridgeError, Result};
pub use query::{
	DISPATCH_FAILURE_CODE, INVALID_REQUEST_CODE, INVALID_REQUEST_MESSAGE, QueryCallback, QueryHandler,
	QueryOutcome, parse_query,
};
pub use scheme::{
	JSON_MIME_TYPE, PostDataElement, SCHEME_ERROR_MESSAGE, SchemeCallback, SchemeHandler, SchemeRequest,
	SchemeResponse,
};
