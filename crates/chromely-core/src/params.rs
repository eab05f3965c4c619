//! Request parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Ordered, string-keyed request parameters.
///
/// Parameters come from the query string of a scheme navigation or from the
/// `parameters` object of a query message. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(IndexMap<String, String>);

impl Parameters {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a raw (undecoded) query string such as `id=7&title=My%20Fair%20Lady`.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_core::Parameters;
	///
	/// let params = Parameters::from_query("id=7&title=My%20Fair+Lady");
	/// assert_eq!(params.get("id"), Some("7"));
	/// assert_eq!(params.get("title"), Some("My Fair Lady"));
	/// ```
	pub fn from_query(query: &str) -> Self {
		url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
			.into_owned()
			.collect()
	}

	/// Convert a JSON object into parameters.
	///
	/// Non-string values keep their JSON text (`7`, `true`, `[1,2]`) and
	/// `null` becomes an empty string. A `null` root yields no parameters.
	pub fn from_json(value: &Value) -> Result<Self> {
		match value {
			Value::Null => Ok(Self::new()),
			Value::Object(map) => Ok(map
				.iter()
				.map(|(k, v)| (k.clone(), json_value_to_string(v)))
				.collect()),
			other => Err(Error::InvalidParameters(other.to_string())),
		}
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.0.insert(key.into(), value.into())
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Merge `other` into `self`; values from `other` replace existing keys.
	pub fn merge(&mut self, other: Parameters) {
		self.0.extend(other.0);
	}

	/// Parse a required parameter into `T`.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_core::Parameters;
	///
	/// let params = Parameters::from_query("year=1994");
	/// let year: u32 = params.get_parsed("year").unwrap();
	/// assert_eq!(year, 1994);
	/// assert!(params.get_parsed::<u32>("votes").is_err());
	/// ```
	pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<T> {
		let raw = self
			.get(key)
			.ok_or_else(|| Error::MissingParameter(key.to_string()))?;
		raw.trim().parse().map_err(|_| Error::InvalidParameter {
			name: key.to_string(),
			value: raw.to_string(),
		})
	}

	/// Lenient boolean lookup: accepts `true`/`false` in any case.
	pub fn get_bool(&self, key: &str) -> Option<bool> {
		let raw = self.get(key)?.trim();
		if raw.eq_ignore_ascii_case("true") {
			Some(true)
		} else if raw.eq_ignore_ascii_case("false") {
			Some(false)
		} else {
			None
		}
	}

	/// Lenient integer lookup.
	pub fn get_i64(&self, key: &str) -> Option<i64> {
		self.get(key)?.trim().parse().ok()
	}

	pub fn into_inner(self) -> IndexMap<String, String> {
		self.0
	}
}

fn json_value_to_string(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

impl IntoIterator for Parameters {
	type Item = (String, String);
	type IntoIter = indexmap::map::IntoIter<String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
