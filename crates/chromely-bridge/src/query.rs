//! JS-to-native query messages.
//!
//! Page JavaScript posts a JSON message such as
//! `{"method":"GET","url":"/democontroller/movies","parameters":{},"postData":null}`.
//! [`QueryHandler::on_query`] validates it, dispatches it in the background
//! and answers through the engine's [`QueryCallback`].
//!
//! `url` may be a bare path or an absolute URL. An absolute URL must belong
//! to a registered custom scheme, like a navigation would.

use chromely_conf::UrlSchemeRegistry;
use chromely_core::{ChromelyRequest, QueryMessage};
use chromely_dispatch::{DispatchHandle, RequestDispatcher, TaskRunner};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::error::{BridgeError, Result};
use crate::guard::catch_panic;

/// Failure code sent for messages that are not valid requests.
pub const INVALID_REQUEST_CODE: i32 = 100;

/// Failure message sent for messages that are not valid requests.
pub const INVALID_REQUEST_MESSAGE: &str = "Request is not valid.";

/// Failure code sent when an accepted request fails.
pub const DISPATCH_FAILURE_CODE: i32 = 500;

/// Engine-side completion for a query.
pub trait QueryCallback: Send + 'static {
	fn success(self: Box<Self>, response: String);
	fn failure(self: Box<Self>, code: i32, message: String);
}

/// What a query callback received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
	Success(String),
	Failure { code: i32, message: String },
}

impl QueryCallback for oneshot::Sender<QueryOutcome> {
	fn success(self: Box<Self>, response: String) {
		if (*self).send(QueryOutcome::Success(response)).is_err() {
			tracing::debug!("query outcome receiver dropped");
		}
	}

	fn failure(self: Box<Self>, code: i32, message: String) {
		if (*self).send(QueryOutcome::Failure { code, message }).is_err() {
			tracing::debug!("query outcome receiver dropped");
		}
	}
}

/// Parse and validate a raw query message.
pub fn parse_query(raw: &str, schemes: &UrlSchemeRegistry) -> Result<ChromelyRequest> {
	let message = QueryMessage::parse(raw).map_err(BridgeError::InvalidQuery)?;
	let foreign = message.url.as_deref().filter(|url| {
		url::Url::parse(url).is_ok_and(|parsed| parsed.has_host())
			&& !schemes.is_url_registered_custom_scheme(url)
	});
	if let Some(url) = foreign {
		return Err(BridgeError::SchemeNotRegistered(url.to_string()));
	}
	message.into_request().map_err(BridgeError::InvalidQuery)
}

/// Answers query messages posted by page JavaScript.
#[derive(Debug, Clone)]
pub struct QueryHandler {
	dispatcher: RequestDispatcher,
	schemes: Arc<UrlSchemeRegistry>,
	runner: TaskRunner,
}

impl QueryHandler {
	pub fn new(dispatcher: RequestDispatcher, schemes: Arc<UrlSchemeRegistry>, runner: TaskRunner) -> Self {
		Self {
			dispatcher,
			schemes,
			runner,
		}
	}

	/// Handle a query. Returns whether it was accepted.
	///
	/// A message that does not parse, whose method is not `GET` or `POST`,
	/// or whose absolute URL is outside the registered custom schemes fails
	/// right away with [`INVALID_REQUEST_CODE`]. Accepted messages are
	/// dispatched in the background: success delivers the JSON envelope, a
	/// dispatch error or a panicking handler delivers
	/// [`DISPATCH_FAILURE_CODE`] with the error text.
	pub fn on_query(
		&self,
		query_id: i64,
		request: &str,
		persistent: bool,
		callback: Box<dyn QueryCallback>,
	) -> bool {
		self.spawn_query(query_id, request, persistent, callback).is_some()
	}

	/// Like [`on_query`](Self::on_query), returning the handle of the
	/// background work when accepted.
	pub fn spawn_query(
		&self,
		query_id: i64,
		request: &str,
		persistent: bool,
		callback: Box<dyn QueryCallback>,
	) -> Option<DispatchHandle<()>> {
		let chromely_request = match parse_query(request, &self.schemes) {
			Ok(chromely_request) => chromely_request,
			Err(e) => {
				tracing::warn!(query_id, error = %e, "rejecting query");
				callback.failure(INVALID_REQUEST_CODE, INVALID_REQUEST_MESSAGE.to_string());
				return None;
			}
		};

		tracing::debug!(
			query_id,
			persistent,
			route = %chromely_request.route_path,
			"query accepted"
		);

		let dispatcher = self.dispatcher.clone();
		Some(self.runner.spawn(async move {
			let outcome = catch_panic(async {
				dispatcher.dispatch(chromely_request).await.map_err(BridgeError::from)
			})
			.await;
			match outcome {
				Ok(response) => callback.success(response.to_json()),
				Err(e) => {
					tracing::error!(query_id, error = %e, "query failed");
					callback.failure(DISPATCH_FAILURE_CODE, e.to_string());
				}
			}
		}))
	}

	/// The engine cancelled a query. In-flight work is not interrupted.
	pub fn on_query_canceled(&self, query_id: i64) {
		tracing::debug!(query_id, "query canceled by the engine, letting it complete");
	}
}
