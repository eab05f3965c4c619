//! The JSON funnel.
//!
//! Every response payload leaves the process through [`ensure_json`]; no
//! transport serializes response data any other way.

use serde::de::IgnoredAny;
use std::io::Read;

use crate::response::ResponseData;

const UTF8_BOM: &str = "\u{feff}";

/// Whether `text` parses as a JSON document.
pub fn is_valid_json(text: &str) -> bool {
	!text.trim().is_empty() && serde_json::from_str::<IgnoredAny>(text).is_ok()
}

/// Convert a response payload into JSON text.
///
/// - text that already is JSON passes through unchanged,
/// - other text is encoded as a JSON string,
/// - a stream is drained and decoded as UTF-8,
/// - values are serialized,
/// - an empty payload becomes `null`.
///
/// # Examples
///
/// ```
/// use chromely_core::{ResponseData, ensure_json};
/// use serde_json::json;
///
/// assert_eq!(ensure_json(ResponseData::from(r#"{"a":1}"#)), r#"{"a":1}"#);
/// assert_eq!(ensure_json(ResponseData::from("Test Get 2")), r#""Test Get 2""#);
/// assert_eq!(ensure_json(ResponseData::from(json!([1, 2]))), "[1,2]");
/// assert_eq!(ensure_json(ResponseData::Empty), "null");
/// ```
pub fn ensure_json(data: ResponseData) -> String {
	match data {
		ResponseData::Empty => "null".to_string(),
		ResponseData::Text(text) if is_valid_json(&text) => text,
		ResponseData::Text(text) => serde_json::Value::String(text).to_string(),
		ResponseData::Stream(reader) => drain_utf8(reader),
		ResponseData::Value(value) => value.to_string(),
	}
}

fn drain_utf8(mut reader: Box<dyn Read + Send>) -> String {
	let mut buffer = Vec::new();
	if let Err(error) = reader.read_to_end(&mut buffer) {
		tracing::warn!(
			bytes_read = buffer.len(),
			"Response stream failed before completion: {}",
			error
		);
	}
	let text = String::from_utf8_lossy(&buffer);
	text.strip_prefix(UTF8_BOM)
		.unwrap_or(text.as_ref())
		.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::{self, Cursor};

	struct FailingReader {
		sent: bool,
	}

	impl Read for FailingReader {
		fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
			if self.sent {
				return Err(io::Error::other("pipe closed"));
			}
			self.sent = true;
			buf[..4].copy_from_slice(b"[1,2");
			Ok(4)
		}
	}

	#[rstest]
	#[case("1000", true)]
	#[case("\"text\"", true)]
	#[case("{\"a\":[1,2]}", true)]
	#[case("null", true)]
	#[case("", false)]
	#[case("   ", false)]
	#[case("Test Get 2", false)]
	#[case("{\"a\":", false)]
	fn test_is_valid_json(#[case] text: &str, #[case] expected: bool) {
		assert_eq!(is_valid_json(text), expected);
	}

	#[rstest]
	fn test_ensure_json_passes_valid_json_text_unchanged() {
		// Arrange
		let text = "{ \"b\" : \"x\",  \"a\": 1 }";

		// Act
		let json = ensure_json(ResponseData::from(text));

		// Assert
		assert_eq!(json, text);
	}

	#[rstest]
	fn test_ensure_json_drains_streams_and_strips_bom() {
		// Arrange
		let reader = Cursor::new("\u{feff}{\"ok\":true}".as_bytes().to_vec());

		// Act
		let json = ensure_json(ResponseData::Stream(Box::new(reader)));

		// Assert
		assert_eq!(json, "{\"ok\":true}");
	}

	#[rstest]
	fn test_ensure_json_keeps_partial_stream_on_error() {
		// Act
		let json = ensure_json(ResponseData::Stream(Box::new(FailingReader { sent: false })));

		// Assert
		assert_eq!(json, "[1,2");
	}
}
