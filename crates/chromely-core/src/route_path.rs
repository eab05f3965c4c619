//! Route keys.

use http::Method;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Parse an HTTP verb case-insensitively.
///
/// # Examples
///
/// ```
/// use chromely_core::{Method, parse_method};
///
/// assert_eq!(parse_method("post").unwrap(), Method::POST);
/// assert!(parse_method("  ").is_err());
/// ```
pub fn parse_method(value: &str) -> Result<Method> {
	let upper = value.trim().to_ascii_uppercase();
	if upper.is_empty() {
		return Err(Error::InvalidMethod(value.to_string()));
	}
	Method::from_bytes(upper.as_bytes()).map_err(|_| Error::InvalidMethod(value.to_string()))
}

/// The `(method, path)` key identifying a registered handler.
///
/// Two keys are equal when their methods match and their paths match after
/// lowercasing, so `GET /Demo/Movies` and `GET /demo/movies` address the
/// same route.
#[derive(Debug, Clone)]
pub struct RoutePath {
	method: Method,
	path: String,
	normalized: String,
}

impl RoutePath {
	/// Create a route key from a method and a path.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_core::{Method, RoutePath};
	///
	/// let key = RoutePath::new(Method::GET, "/Demo/Movies");
	/// assert_eq!(key, RoutePath::get("/demo/movies"));
	/// assert_eq!(key.path(), "/Demo/Movies");
	/// ```
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		let path = path.into();
		let normalized = path.to_lowercase();
		Self {
			method,
			path,
			normalized,
		}
	}

	/// Shorthand for a `GET` key.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Shorthand for a `POST` key.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Build a key from a textual verb such as `"get"` or `"Post"`.
	pub fn parse(method: &str, path: impl Into<String>) -> Result<Self> {
		Ok(Self::new(parse_method(method)?, path))
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	/// The path as registered or received, case preserved.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// The lowercased path used for comparisons.
	pub fn normalized_path(&self) -> &str {
		&self.normalized
	}

	/// Whether the path is empty or whitespace only. Such paths are never routed.
	pub fn is_empty(&self) -> bool {
		self.path.trim().is_empty()
	}

	/// Whether this key addresses the given path, ignoring case and method.
	pub fn is_path(&self, path: &str) -> bool {
		self.normalized == path.to_lowercase()
	}

	/// A flat string form of the key, e.g. `get_/demo/movies`.
	pub fn key(&self) -> String {
		format!(
			"{}_{}",
			self.method.as_str().to_ascii_lowercase(),
			self.normalized
		)
	}
}

impl PartialEq for RoutePath {
	fn eq(&self, other: &Self) -> bool {
		self.method == other.method && self.normalized == other.normalized
	}
}

impl Eq for RoutePath {}

impl Hash for RoutePath {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.method.hash(state);
		self.normalized.hash(state);
	}
}

impl fmt::Display for RoutePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.method, self.path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashSet;

	#[rstest]
	#[case("get", Method::GET)]
	#[case("GET", Method::GET)]
	#[case("Post", Method::POST)]
	#[case(" delete ", Method::DELETE)]
	fn test_parse_method_is_case_insensitive(#[case] input: &str, #[case] expected: Method) {
		// Act
		let method = parse_method(input).unwrap();

		// Assert
		assert_eq!(method, expected);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("GE T")]
	fn test_parse_method_rejects_invalid_tokens(#[case] input: &str) {
		// Act
		let result = parse_method(input);

		// Assert
		assert!(matches!(result, Err(Error::InvalidMethod(_))));
	}

	#[rstest]
	fn test_route_path_equality_ignores_path_case() {
		// Arrange
		let upper = RoutePath::get("/Demo/Movies");
		let lower = RoutePath::get("/demo/movies");

		// Act
		let mut set = HashSet::new();
		set.insert(upper.clone());

		// Assert
		assert_eq!(upper, lower);
		assert!(set.contains(&lower));
	}

	#[rstest]
	fn test_route_path_equality_respects_method() {
		// Arrange
		let get = RoutePath::get("/demo/movies");
		let post = RoutePath::post("/demo/movies");

		// Assert
		assert_ne!(get, post);
	}

	#[rstest]
	#[case("", true)]
	#[case("  \t", true)]
	#[case("/", false)]
	#[case("/info", false)]
	fn test_route_path_is_empty(#[case] path: &str, #[case] expected: bool) {
		// Assert
		assert_eq!(RoutePath::get(path).is_empty(), expected);
	}

	#[rstest]
	fn test_route_path_key_and_display() {
		// Arrange
		let key = RoutePath::post("/Scanner/Save");

		// Assert
		assert_eq!(key.key(), "post_/scanner/save");
		assert_eq!(key.to_string(), "POST /Scanner/Save");
		assert!(key.is_path("/scanner/SAVE"));
	}
}
