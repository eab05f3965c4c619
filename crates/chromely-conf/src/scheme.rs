//! URL schemes intercepted by the browser engine.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// What a registered scheme is used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlSchemeType {
	#[default]
	None,
	/// Local files served from disk.
	Resource,
	/// Files embedded in the application binary.
	AssemblyResource,
	/// Virtual HTTP requests routed to controllers.
	Custom,
	/// Fire-and-forget commands routed to controllers.
	Command,
	/// Links opened as regular network navigations.
	External,
	/// Links handed to the system browser.
	ExternalBrowser,
	Other,
}

/// A scheme/host pair the application registers with the browser engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlScheme {
	pub name: String,
	#[serde(default)]
	pub scheme: String,
	#[serde(default)]
	pub host: String,
	#[serde(default)]
	pub base_url: String,
	#[serde(rename = "type", default)]
	pub scheme_type: UrlSchemeType,
	#[serde(default)]
	pub is_external: bool,
}

impl UrlScheme {
	pub fn new(
		name: impl Into<String>,
		scheme: impl Into<String>,
		host: impl Into<String>,
		scheme_type: UrlSchemeType,
		is_external: bool,
	) -> Self {
		Self {
			name: name.into(),
			scheme: scheme.into(),
			host: host.into(),
			base_url: String::new(),
			scheme_type,
			is_external,
		}
	}

	/// Build a scheme from a sample URL, taking its scheme and host.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_conf::{UrlScheme, UrlSchemeType};
	///
	/// let scheme = UrlScheme::from_url("github", "https://github.com/chromelyapps", UrlSchemeType::External, true).unwrap();
	/// assert_eq!(scheme.scheme, "https");
	/// assert_eq!(scheme.host, "github.com");
	/// assert_eq!(scheme.base_url, "https://github.com/chromelyapps");
	/// ```
	pub fn from_url(
		name: impl Into<String>,
		url: &str,
		scheme_type: UrlSchemeType,
		is_external: bool,
	) -> Result<Self> {
		let parsed = url::Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
			url: url.to_string(),
			source,
		})?;
		Ok(Self {
			name: name.into(),
			scheme: parsed.scheme().to_string(),
			host: parsed.host_str().unwrap_or_default().to_string(),
			base_url: url.to_string(),
			scheme_type,
			is_external,
		})
	}

	/// Schemes the engine handles natively and that cannot be re-registered.
	pub fn is_standard_scheme(scheme: &str) -> bool {
		matches!(
			scheme.to_ascii_lowercase().as_str(),
			"http" | "https" | "file" | "ftp" | "about" | "data"
		)
	}

	/// Whether `url` has this scheme and host, compared case-insensitively.
	pub fn is_url_of_same_scheme(&self, url: &str) -> bool {
		if self.scheme.is_empty() || self.host.is_empty() || url.is_empty() {
			return false;
		}
		let Ok(parsed) = url::Url::parse(url) else {
			return false;
		};
		let Some(host) = parsed.host_str() else {
			return false;
		};
		self.scheme.eq_ignore_ascii_case(parsed.scheme()) && self.host.eq_ignore_ascii_case(host)
	}

	fn is_url_under_base(&self, url: &str) -> bool {
		!self.base_url.is_empty()
			&& url
				.get(..self.base_url.len())
				.is_some_and(|prefix| prefix.eq_ignore_ascii_case(&self.base_url))
	}
}

/// The set of schemes configured for an application.
#[derive(Debug, Clone, Default)]
pub struct UrlSchemeRegistry {
	schemes: Vec<UrlScheme>,
}

impl UrlSchemeRegistry {
	pub fn new(schemes: Vec<UrlScheme>) -> Self {
		Self { schemes }
	}

	pub fn add(&mut self, scheme: UrlScheme) {
		self.schemes.push(scheme);
	}

	pub fn iter(&self) -> impl Iterator<Item = &UrlScheme> {
		self.schemes.iter()
	}

	pub fn len(&self) -> usize {
		self.schemes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.schemes.is_empty()
	}

	/// The first internal scheme of `scheme_type` matching `url`.
	pub fn find(&self, url: &str, scheme_type: UrlSchemeType) -> Option<&UrlScheme> {
		self.schemes
			.iter()
			.filter(|s| s.scheme_type == scheme_type && !s.is_external)
			.find(|s| s.is_url_of_same_scheme(url))
	}

	/// Whether `url` belongs to a scheme the router serves.
	pub fn is_url_registered_custom_scheme(&self, url: &str) -> bool {
		self.find(url, UrlSchemeType::Custom).is_some()
	}

	/// Whether `url` belongs to a command scheme.
	pub fn is_url_registered_command_scheme(&self, url: &str) -> bool {
		self.find(url, UrlSchemeType::Command).is_some()
	}

	/// Whether `url` should leave the application (external link).
	pub fn is_url_registered_external_scheme(&self, url: &str) -> bool {
		self.schemes
			.iter()
			.filter(|s| s.is_external)
			.any(|s| s.is_url_under_base(url) || s.is_url_of_same_scheme(url))
	}
}

impl FromIterator<UrlScheme> for UrlSchemeRegistry {
	fn from_iter<I: IntoIterator<Item = UrlScheme>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn registry() -> UrlSchemeRegistry {
		UrlSchemeRegistry::new(vec![
			UrlScheme::new("resource", "local", "app", UrlSchemeType::Resource, false),
			UrlScheme::new("custom", "http", "chromely.com", UrlSchemeType::Custom, false),
			UrlScheme::new("command", "http", "command.com", UrlSchemeType::Command, false),
			UrlScheme::new("leaked", "http", "external.com", UrlSchemeType::Custom, true),
			UrlScheme::from_url(
				"github",
				"https://github.com/chromelyapps/Chromely",
				UrlSchemeType::External,
				true,
			)
			.unwrap(),
		])
	}

	#[rstest]
	#[case("http://chromely.com/democontroller/movies", true)]
	#[case("HTTP://Chromely.com/democontroller/movies?id=1", true)]
	#[case("http://command.com/democontroller/showdevtools", false)]
	#[case("local://app/index.html", false)]
	#[case("http://external.com/api", false)]
	#[case("not a url", false)]
	#[case("", false)]
	fn test_is_url_registered_custom_scheme(
		registry: UrlSchemeRegistry,
		#[case] url: &str,
		#[case] expected: bool,
	) {
		assert_eq!(registry.is_url_registered_custom_scheme(url), expected);
	}

	#[rstest]
	fn test_is_url_registered_command_scheme(registry: UrlSchemeRegistry) {
		assert!(registry.is_url_registered_command_scheme("http://command.com/x/y"));
		assert!(!registry.is_url_registered_command_scheme("http://chromely.com/x/y"));
	}

	#[rstest]
	#[case("https://github.com/chromelyapps/Chromely/issues", true)]
	#[case("https://github.com/other", true)]
	#[case("http://external.com/api", true)]
	#[case("http://chromely.com/democontroller/movies", false)]
	fn test_is_url_registered_external_scheme(
		registry: UrlSchemeRegistry,
		#[case] url: &str,
		#[case] expected: bool,
	) {
		assert_eq!(registry.is_url_registered_external_scheme(url), expected);
	}

	#[rstest]
	#[case("http", true)]
	#[case("HTTPS", true)]
	#[case("data", true)]
	#[case("local", false)]
	#[case("", false)]
	fn test_is_standard_scheme(#[case] scheme: &str, #[case] expected: bool) {
		assert_eq!(UrlScheme::is_standard_scheme(scheme), expected);
	}

	#[rstest]
	fn test_scheme_without_host_never_matches() {
		// Arrange
		let scheme = UrlScheme::new("broken", "app", "", UrlSchemeType::Custom, false);

		// Assert
		assert!(!scheme.is_url_of_same_scheme("app://anything/path"));
	}
}
