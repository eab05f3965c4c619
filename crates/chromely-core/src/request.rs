//! Inbound request model.
//!
//! A request reaches the router either as a custom-scheme navigation
//! (`http://chromely.com/democontroller/movies?id=7`) or as a query message
//! posted by page JavaScript:
//!
//! ```json
//! {"id": "1", "method": "post", "url": "/democontroller/save", "parameters": {"id": 7}, "postData": {"title": "Up"}}
//! ```
//!
//! Both forms end up as a [`ChromelyRequest`].

use bytes::Bytes;
use http::Method;
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::params::Parameters;
use crate::route_path::{RoutePath, parse_method};

/// Opaque request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PostData {
	#[default]
	None,
	Text(String),
	Bytes(Bytes),
	Json(Value),
}

impl PostData {
	/// Map a JSON `postData` field: `null` is no body, a string stays text.
	pub fn from_json_value(value: Value) -> Self {
		match value {
			Value::Null => Self::None,
			Value::String(text) => Self::Text(text),
			other => Self::Json(other),
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Self::None => true,
			Self::Text(text) => text.is_empty(),
			Self::Bytes(bytes) => bytes.is_empty(),
			Self::Json(_) => false,
		}
	}

	/// The body as text. Bytes are decoded as UTF-8, lossily.
	pub fn as_text(&self) -> Option<Cow<'_, str>> {
		match self {
			Self::None => None,
			Self::Text(text) => Some(Cow::Borrowed(text)),
			Self::Bytes(bytes) => Some(String::from_utf8_lossy(bytes)),
			Self::Json(value) => Some(Cow::Owned(value.to_string())),
		}
	}

	/// Deserialize the body into `T`.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_core::PostData;
	/// use serde::Deserialize;
	///
	/// #[derive(Deserialize)]
	/// struct Movie { title: String }
	///
	/// let body = PostData::from(r#"{"title":"Up"}"#);
	/// let movie: Movie = body.deserialize().unwrap();
	/// assert_eq!(movie.title, "Up");
	/// ```
	pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
		let value = match self {
			Self::None => Value::Null,
			Self::Text(text) => serde_json::from_str(text)?,
			Self::Bytes(bytes) => serde_json::from_slice(bytes)?,
			Self::Json(value) => value.clone(),
		};
		Ok(serde_json::from_value(value)?)
	}
}

impl From<String> for PostData {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&str> for PostData {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<Bytes> for PostData {
	fn from(bytes: Bytes) -> Self {
		Self::Bytes(bytes)
	}
}

impl From<Value> for PostData {
	fn from(value: Value) -> Self {
		Self::from_json_value(value)
	}
}

/// A normalized inbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromelyRequest {
	/// Correlation id echoed back on the response.
	pub id: Option<String>,
	pub route_path: RoutePath,
	pub parameters: Parameters,
	pub post_data: PostData,
}

impl ChromelyRequest {
	pub fn new(route_path: RoutePath) -> Self {
		Self {
			id: None,
			route_path,
			parameters: Parameters::new(),
			post_data: PostData::None,
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_parameters(mut self, parameters: Parameters) -> Self {
		self.parameters = parameters;
		self
	}

	pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.parameters.insert(key, value);
		self
	}

	pub fn with_post_data(mut self, post_data: impl Into<PostData>) -> Self {
		self.post_data = post_data.into();
		self
	}

	pub fn method(&self) -> &Method {
		self.route_path.method()
	}

	pub fn path(&self) -> &str {
		self.route_path.path()
	}

	/// Build a request from a navigation URL and its verb.
	///
	/// The URL path (percent-decoded) becomes the route path and the query
	/// string becomes the parameters.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_core::{ChromelyRequest, Method};
	///
	/// let request = ChromelyRequest::from_url("GET", "http://chromely.com/demo/movies?year=1994").unwrap();
	/// assert_eq!(request.method(), &Method::GET);
	/// assert_eq!(request.path(), "/demo/movies");
	/// assert_eq!(request.parameters.get("year"), Some("1994"));
	/// ```
	pub fn from_url(method: &str, url: &str) -> Result<Self> {
		let parsed = url::Url::parse(url).map_err(|source| Error::InvalidUrl {
			url: url.to_string(),
			source,
		})?;
		let path = decode_path(parsed.path());
		let parameters = parsed.query().map(Parameters::from_query).unwrap_or_default();

		Ok(Self::new(RoutePath::parse(method, path)?).with_parameters(parameters))
	}
}

fn decode_path(path: &str) -> String {
	percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// A JS-to-native query message as posted by page JavaScript.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMessage {
	#[serde(default)]
	pub id: Option<Value>,
	#[serde(default)]
	pub method: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub parameters: Option<Value>,
	#[serde(default)]
	pub post_data: Option<Value>,
}

impl QueryMessage {
	/// Parse the raw JSON text delivered by the engine.
	pub fn parse(raw: &str) -> Result<Self> {
		Ok(serde_json::from_str(raw)?)
	}

	/// The verb, accepting only `GET` and `POST` in any case.
	///
	/// A missing or blank method is rejected like any other verb.
	pub fn accepted_method(&self) -> Result<Method> {
		let method = parse_method(self.method.as_deref().unwrap_or_default())?;
		if method == Method::GET || method == Method::POST {
			Ok(method)
		} else {
			Err(Error::MethodNotAccepted(method))
		}
	}

	/// Normalize into a [`ChromelyRequest`].
	///
	/// `url` may be a bare path or an absolute URL. Its query string is parsed
	/// first and then overridden by the explicit `parameters` object.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_core::QueryMessage;
	///
	/// let message = QueryMessage::parse(
	///     r#"{"id":7,"method":"get","url":"/demo/movies?year=1994","parameters":{"limit":2}}"#,
	/// ).unwrap();
	/// let request = message.into_request().unwrap();
	/// assert_eq!(request.id.as_deref(), Some("7"));
	/// assert_eq!(request.path(), "/demo/movies");
	/// assert_eq!(request.parameters.get("year"), Some("1994"));
	/// assert_eq!(request.parameters.get("limit"), Some("2"));
	/// ```
	pub fn into_request(self) -> Result<ChromelyRequest> {
		let method = self.accepted_method()?;
		let url = self.url.unwrap_or_default();

		let (path, mut parameters) = match url::Url::parse(&url) {
			Ok(parsed) if parsed.has_host() => (
				decode_path(parsed.path()),
				parsed.query().map(Parameters::from_query).unwrap_or_default(),
			),
			_ => match url.split_once('?') {
				Some((path, query)) => (decode_path(path), Parameters::from_query(query)),
				None => (decode_path(&url), Parameters::new()),
			},
		};

		if let Some(explicit) = self.parameters {
			parameters.merge(Parameters::from_json(&explicit)?);
		}

		let mut request = ChromelyRequest::new(RoutePath::new(method, path))
			.with_parameters(parameters)
			.with_post_data(self.post_data.unwrap_or(Value::Null));
		request.id = self.id.and_then(|id| match id {
			Value::Null => None,
			Value::String(s) => Some(s),
			other => Some(other.to_string()),
		});

		Ok(request)
	}
}
