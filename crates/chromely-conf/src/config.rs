//! Application configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::scheme::{UrlScheme, UrlSchemeRegistry, UrlSchemeType};

/// Custom setting naming the default log level.
pub const LOG_SEVERITY: &str = "logSeverity";

/// Configuration for a Chromely application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromelyConfig {
	/// Application name, also used to locate persisted settings.
	pub app_name: String,

	/// URL loaded when the window opens.
	pub start_url: String,

	/// Whether developer tooling is enabled.
	pub debugging_mode: bool,

	/// Schemes registered with the browser engine.
	pub url_schemes: Vec<UrlScheme>,

	/// Free-form settings (log level, locale, ...).
	pub custom_settings: IndexMap<String, String>,
}

impl Default for ChromelyConfig {
	fn default() -> Self {
		let mut custom_settings = IndexMap::new();
		custom_settings.insert("cefLogFile".to_string(), "logs/chromely.cef.log".to_string());
		custom_settings.insert(LOG_SEVERITY.to_string(), "info".to_string());
		custom_settings.insert("locale".to_string(), "en-US".to_string());

		Self {
			app_name: "chromely".to_string(),
			start_url: "local://app/chromely.html".to_string(),
			debugging_mode: true,
			url_schemes: default_url_schemes(),
			custom_settings,
		}
	}
}

fn default_url_schemes() -> Vec<UrlScheme> {
	vec![
		UrlScheme::new("default-resource", "local", "app", UrlSchemeType::Resource, false),
		UrlScheme::new("default-custom", "http", "chromely.com", UrlSchemeType::Custom, false),
		UrlScheme::new("default-command", "http", "command.com", UrlSchemeType::Command, false),
		UrlScheme {
			name: "chromely-site".to_string(),
			scheme: String::new(),
			host: String::new(),
			base_url: "https://github.com/chromelyapps/Chromely".to_string(),
			scheme_type: UrlSchemeType::External,
			is_external: true,
		},
	]
}

impl ChromelyConfig {
	/// Creates a configuration with the default schemes and settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the application name.
	pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
		self.app_name = app_name.into();
		self
	}

	/// Sets the start URL.
	pub fn start_url(mut self, start_url: impl Into<String>) -> Self {
		self.start_url = start_url.into();
		self
	}

	/// Sets whether developer tooling is enabled.
	pub fn debugging_mode(mut self, debugging_mode: bool) -> Self {
		self.debugging_mode = debugging_mode;
		self
	}

	/// Registers an additional URL scheme.
	pub fn url_scheme(mut self, scheme: UrlScheme) -> Self {
		self.url_schemes.push(scheme);
		self
	}

	/// Replaces all URL schemes.
	pub fn url_schemes(mut self, schemes: Vec<UrlScheme>) -> Self {
		self.url_schemes = schemes;
		self
	}

	/// Sets a custom setting.
	pub fn custom_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.custom_settings.insert(key.into(), value.into());
		self
	}

	pub fn scheme_registry(&self) -> UrlSchemeRegistry {
		self.url_schemes.iter().cloned().collect()
	}

	/// The configured log level, `info` when unset.
	pub fn log_severity(&self) -> &str {
		self.custom_settings
			.get(LOG_SEVERITY)
			.map(String::as_str)
			.unwrap_or("info")
	}
}
