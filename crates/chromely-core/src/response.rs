//! Response envelope.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::Read;

use crate::error::Result;
use crate::json::ensure_json;

/// XHR-style ready state carried by every envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ReadyState {
	#[default]
	NotReady,
	ServerConnectionEstablished,
	RequestReceived,
	ProcessingRequest,
	ResponseIsReady,
}

impl From<ReadyState> for i32 {
	fn from(state: ReadyState) -> Self {
		match state {
			ReadyState::NotReady => 0,
			ReadyState::ServerConnectionEstablished => 1,
			ReadyState::RequestReceived => 2,
			ReadyState::ProcessingRequest => 3,
			ReadyState::ResponseIsReady => 4,
		}
	}
}

impl TryFrom<i32> for ReadyState {
	type Error = String;

	fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::NotReady),
			1 => Ok(Self::ServerConnectionEstablished),
			2 => Ok(Self::RequestReceived),
			3 => Ok(Self::ProcessingRequest),
			4 => Ok(Self::ResponseIsReady),
			other => Err(format!("unknown ready state: {other}")),
		}
	}
}

/// Response payload, converted to JSON by [`ensure_json`].
#[derive(Default)]
pub enum ResponseData {
	#[default]
	Empty,
	Text(String),
	Stream(Box<dyn Read + Send>),
	Value(Value),
}

impl ResponseData {
	/// Serialize any value into a payload.
	pub fn json<T: Serialize>(value: &T) -> Result<Self> {
		Ok(Self::Value(serde_json::to_value(value)?))
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// The payload as text, for status messages. Streams are not drained.
	pub fn describe(&self) -> String {
		match self {
			Self::Empty => String::new(),
			Self::Text(text) => text.clone(),
			Self::Stream(_) => "<stream>".to_string(),
			Self::Value(Value::String(text)) => text.clone(),
			Self::Value(value) => value.to_string(),
		}
	}
}

impl fmt::Debug for ResponseData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Empty => f.write_str("Empty"),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::Stream(_) => f.write_str("Stream(..)"),
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
		}
	}
}

impl From<String> for ResponseData {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&str> for ResponseData {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<Value> for ResponseData {
	fn from(value: Value) -> Self {
		Self::Value(value)
	}
}

/// The envelope returned for every dispatched request.
#[derive(Debug, Default)]
pub struct ChromelyResponse {
	pub request_id: Option<String>,
	pub ready_state: ReadyState,
	pub status: StatusCode,
	pub status_text: String,
	pub data: ResponseData,
}

impl ChromelyResponse {
	pub fn new() -> Self {
		Self::default()
	}

	/// An unfinished response correlated with a request id.
	pub fn for_request(request_id: Option<String>) -> Self {
		Self {
			request_id,
			..Self::default()
		}
	}

	/// A finished `400 Bad Request` response.
	pub fn bad_request(request_id: Option<String>) -> Self {
		Self {
			request_id,
			ready_state: ReadyState::ResponseIsReady,
			status: StatusCode::BAD_REQUEST,
			status_text: "Bad Request".to_string(),
			data: ResponseData::Empty,
		}
	}

	/// A finished error response carrying `message` as both text and data.
	pub fn error(request_id: Option<String>, status: StatusCode, message: impl Into<String>) -> Self {
		let message = message.into();
		Self {
			request_id,
			ready_state: ReadyState::ResponseIsReady,
			status,
			status_text: message.clone(),
			data: ResponseData::Text(message),
		}
	}

	pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
		self.request_id = Some(request_id.into());
		self
	}

	pub fn with_data(mut self, data: impl Into<ResponseData>) -> Self {
		self.data = data.into();
		self
	}

	/// Serialize `value` as the payload.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_core::ChromelyResponse;
	///
	/// let response = ChromelyResponse::new().with_json(&vec!["a", "b"]).unwrap();
	/// assert_eq!(response.data_json(), r#"["a","b"]"#);
	/// ```
	pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self> {
		self.data = ResponseData::json(value)?;
		Ok(self)
	}

	pub fn with_status(mut self, status: StatusCode) -> Self {
		self.status = status;
		self
	}

	/// Mark the response as successfully completed: ready, `200 OK`.
	pub fn mark_ready(mut self) -> Self {
		self.ready_state = ReadyState::ResponseIsReady;
		self.status = StatusCode::OK;
		self.status_text = "OK".to_string();
		self
	}

	pub fn is_ready(&self) -> bool {
		self.ready_state == ReadyState::ResponseIsReady
	}

	/// Finalize the payload only, through the JSON funnel.
	pub fn data_json(self) -> String {
		ensure_json(self.data)
	}

	/// Finalize the whole response, through the JSON funnel.
	pub fn into_envelope(self) -> JsonEnvelope {
		JsonEnvelope {
			request_id: self.request_id,
			ready_state: self.ready_state,
			status: self.status,
			status_text: self.status_text,
			data_json: ensure_json(self.data),
		}
	}

	/// Finalize into the JSON envelope text delivered to page JavaScript.
	pub fn to_json(self) -> String {
		self.into_envelope().to_json()
	}
}

/// A response whose payload has already passed through the JSON funnel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEnvelope {
	pub request_id: Option<String>,
	pub ready_state: ReadyState,
	pub status: StatusCode,
	pub status_text: String,
	/// The funnelled payload.
	pub data_json: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeWire<'a> {
	request_id: Option<&'a str>,
	ready_state: ReadyState,
	status: u16,
	status_text: &'a str,
	data: Value,
}

impl JsonEnvelope {
	/// Serialize as `{"requestId", "readyState", "status", "statusText", "data"}`.
	pub fn to_json(&self) -> String {
		// Streams may drain to non-JSON text; those travel as a JSON string.
		let data = serde_json::from_str(&self.data_json)
			.unwrap_or_else(|_| Value::String(self.data_json.clone()));
		let wire = EnvelopeWire {
			request_id: self.request_id.as_deref(),
			ready_state: self.ready_state,
			status: self.status.as_u16(),
			status_text: &self.status_text,
			data,
		};
		serde_json::to_string(&wire).unwrap_or_else(|error| {
			tracing::error!("Failed to serialize response envelope: {}", error);
			r#"{"readyState":4,"status":500,"statusText":"Failed to serialize response","data":null}"#
				.to_string()
		})
	}
}
