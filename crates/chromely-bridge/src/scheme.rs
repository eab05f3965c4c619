//! Custom-scheme navigations.
//!
//! The engine intercepts a navigation to a registered custom scheme (for
//! example `http://chromely.com/democontroller/movies`) and hands it to
//! [`SchemeHandler::process_request`]. The request is dispatched in the
//! background and the finished [`SchemeResponse`] is delivered through the
//! engine's [`SchemeCallback`].

use bytes::Bytes;
use chromely_conf::UrlSchemeRegistry;
use chromely_core::{ChromelyRequest, ChromelyResponse, ResponseData, StatusCode};
use chromely_dispatch::{DispatchHandle, RequestDispatcher, TaskRunner};
use http::HeaderMap;
use http::header::{self, HeaderValue};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::error::{BridgeError, Result};
use crate::guard::catch_panic;

/// MIME type of every scheme response.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Data sent when a navigation cannot be dispatched.
pub const SCHEME_ERROR_MESSAGE: &str = "An error occured.";

/// One element of a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum PostDataElement {
	Empty,
	File(PathBuf),
	Bytes(Bytes),
}

/// A navigation request as delivered by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeRequest {
	pub url: String,
	pub method: String,
	pub post_data: Vec<PostDataElement>,
}

impl SchemeRequest {
	pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			method: method.into(),
			post_data: Vec::new(),
		}
	}

	pub fn get(url: impl Into<String>) -> Self {
		Self::new("GET", url)
	}

	pub fn with_post_element(mut self, element: PostDataElement) -> Self {
		self.post_data.push(element);
		self
	}

	/// The body text: the first element's bytes as UTF-8, empty otherwise.
	pub fn post_data_text(&self) -> String {
		match self.post_data.first() {
			Some(PostDataElement::Bytes(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
			_ => String::new(),
		}
	}

	/// Normalize into a [`ChromelyRequest`].
	pub fn to_chromely_request(&self) -> chromely_core::Result<ChromelyRequest> {
		let request = ChromelyRequest::from_url(&self.method, &self.url)?;
		let body = self.post_data_text();
		Ok(if body.is_empty() {
			request
		} else {
			request.with_post_data(body)
		})
	}
}

/// The response handed back to the engine.
#[derive(Debug, Clone)]
pub struct SchemeResponse {
	pub status: StatusCode,
	pub status_text: String,
	pub mime_type: String,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl SchemeResponse {
	/// Finalize a dispatched response through the JSON funnel.
	///
	/// The status text is `OK` for `200`; otherwise it is the response's
	/// text payload, falling back to its own status text.
	pub fn from_response(response: ChromelyResponse) -> Self {
		let status = response.status;
		let status_text = if status == StatusCode::OK {
			"OK".to_string()
		} else {
			match &response.data {
				ResponseData::Text(text) if !text.is_empty() => text.clone(),
				_ => response.status_text.clone(),
			}
		};
		let body = Bytes::from(response.data_json());

		Self {
			status,
			status_text,
			mime_type: JSON_MIME_TYPE.to_string(),
			headers: default_headers(),
			body,
		}
	}

	/// The response sent when a navigation fails before producing a response.
	pub fn error() -> Self {
		Self::from_response(ChromelyResponse::error(
			None,
			StatusCode::BAD_REQUEST,
			SCHEME_ERROR_MESSAGE,
		))
	}

	/// Body as a readable stream.
	pub fn reader(&self) -> Cursor<Bytes> {
		Cursor::new(self.body.clone())
	}

	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

fn default_headers() -> HeaderMap {
	let mut headers = HeaderMap::new();
	headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("private"));
	headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
	headers.insert(
		header::ACCESS_CONTROL_ALLOW_METHODS,
		HeaderValue::from_static("GET,POST"),
	);
	headers.insert(
		header::ACCESS_CONTROL_ALLOW_HEADERS,
		HeaderValue::from_static("Content-Type"),
	);
	headers.insert(
		header::CONTENT_TYPE,
		HeaderValue::from_static("application/json; charset=utf-8"),
	);
	headers
}

/// Engine-side completion for a scheme request.
pub trait SchemeCallback: Send + 'static {
	fn complete(self: Box<Self>, response: SchemeResponse);
}

impl SchemeCallback for oneshot::Sender<SchemeResponse> {
	fn complete(self: Box<Self>, response: SchemeResponse) {
		if (*self).send(response).is_err() {
			tracing::debug!("scheme response receiver dropped");
		}
	}
}

/// Serves navigations to registered custom schemes.
#[derive(Debug, Clone)]
pub struct SchemeHandler {
	dispatcher: RequestDispatcher,
	schemes: Arc<UrlSchemeRegistry>,
	runner: TaskRunner,
}

impl SchemeHandler {
	pub fn new(dispatcher: RequestDispatcher, schemes: Arc<UrlSchemeRegistry>, runner: TaskRunner) -> Self {
		Self {
			dispatcher,
			schemes,
			runner,
		}
	}

	pub fn can_handle(&self, url: &str) -> bool {
		self.schemes.is_url_registered_custom_scheme(url)
	}

	/// Accept a navigation and answer it in the background.
	///
	/// Returns immediately. A URL outside the registered custom schemes is
	/// refused and the callback is dropped without being completed. Any
	/// failure after acceptance, a panicking handler included, completes the
	/// callback with a `400` response carrying [`SCHEME_ERROR_MESSAGE`].
	pub fn process_request(
		&self,
		request: SchemeRequest,
		callback: Box<dyn SchemeCallback>,
	) -> Result<DispatchHandle<()>> {
		if !self.can_handle(&request.url) {
			tracing::error!(url = %request.url, "url is not of a registered custom scheme");
			return Err(BridgeError::SchemeNotRegistered(request.url));
		}

		let dispatcher = self.dispatcher.clone();
		Ok(self.runner.spawn(async move {
			let response = match catch_panic(respond(&dispatcher, &request)).await {
				Ok(response) => response,
				Err(e) => {
					tracing::error!(url = %request.url, error = %e, "scheme request failed");
					SchemeResponse::error()
				}
			};
			callback.complete(response);
		}))
	}
}

async fn respond(dispatcher: &RequestDispatcher, request: &SchemeRequest) -> Result<SchemeResponse> {
	let chromely_request = request.to_chromely_request()?;
	let response = dispatcher.dispatch(chromely_request).await?;
	Ok(SchemeResponse::from_response(response))
}
