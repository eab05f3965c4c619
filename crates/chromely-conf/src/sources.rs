//! Configuration sources for the layered configuration system
//!
//! Sources are merged in priority order (environment variables > config
//! files > defaults) by [`ConfigBuilder`](crate::ConfigBuilder).

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ChromelyConfig;
use crate::error::{ConfigError, Result};

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load top-level configuration keys from this source
	fn load(&self) -> Result<IndexMap<String, Value>>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

fn object_to_map(value: Value) -> Result<IndexMap<String, Value>> {
	match value {
		Value::Object(map) => Ok(map.into_iter().collect()),
		_ => Err(ConfigError::Parse("Expected object at root".to_string())),
	}
}

/// Built-in defaults from [`ChromelyConfig::default`].
pub struct DefaultSource {
	defaults: ChromelyConfig,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self {
			defaults: ChromelyConfig::default(),
		}
	}

	/// Use `config` as the lowest layer instead of the stock defaults.
	pub fn with_config(config: ChromelyConfig) -> Self {
		Self { defaults: config }
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>> {
		object_to_map(serde_json::to_value(&self.defaults)?)
	}

	fn priority(&self) -> u8 {
		0 // Lowest priority
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;

		// TOML and JSON share the data model for everything ChromelyConfig uses
		let json_value = serde_json::to_value(toml_value)?;
		object_to_map(json_value)
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// JSON file configuration source. A missing file contributes nothing.
pub struct JsonFileSource {
	path: PathBuf,
}

impl JsonFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for JsonFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		if content.trim().is_empty() {
			return Ok(IndexMap::new());
		}
		object_to_map(serde_json::from_str(&content)?)
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("JSON file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// `CHROMELY_APP_NAME=movies` sets `app_name`. Values are strings, except
/// for the keys in [`EnvSource::TYPED_KEYS`], which are read as JSON when
/// they parse (`CHROMELY_DEBUGGING_MODE=false`).
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Keys whose values are not strings.
	pub const TYPED_KEYS: &'static [&'static str] = &["debugging_mode", "url_schemes", "custom_settings"];

	/// Source reading variables prefixed with `CHROMELY_`.
	pub fn new() -> Self {
		Self::with_prefix("CHROMELY_")
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars() {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			if clean_key.is_empty() {
				continue;
			}

			let key = clean_key.to_lowercase();
			let parsed_value = env_value(&key, value);
			config.insert(key, parsed_value);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

fn env_value(key: &str, raw: String) -> Value {
	match serde_json::from_str::<Value>(&raw) {
		Ok(parsed) if EnvSource::TYPED_KEYS.contains(&key) => parsed,
		_ => Value::String(raw),
	}
}

/// Pick a file source from the file extension.
pub fn auto_source(path: impl AsRef<Path>) -> Result<Box<dyn ConfigSource>> {
	let path = path.as_ref();
	let ext = path
		.extension()
		.and_then(|e| e.to_str())
		.ok_or_else(|| ConfigError::InvalidSource("No file extension".to_string()))?;

	match ext {
		"toml" => Ok(Box::new(TomlFileSource::new(path))),
		"json" => Ok(Box::new(JsonFileSource::new(path))),
		_ => Err(ConfigError::InvalidSource(format!(
			"Unsupported file extension: {}",
			ext
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	fn test_toml_file_source_loads_tables() {
		// Arrange
		let mut file = NamedTempFile::with_suffix(".toml").unwrap();
		writeln!(
			file,
			r#"
app_name = "movies"
debugging_mode = false

[custom_settings]
logSeverity = "debug"
"#
		)
		.unwrap();
		let source = TomlFileSource::new(file.path());

		// Act
		let map = source.load().unwrap();

		// Assert
		assert_eq!(map["app_name"], Value::String("movies".to_string()));
		assert_eq!(map["debugging_mode"], Value::Bool(false));
		assert_eq!(map["custom_settings"]["logSeverity"], "debug");
	}

	#[rstest]
	fn test_json_file_source_missing_file_is_empty() {
		// Arrange
		let source = JsonFileSource::new("/definitely/not/here/chromely.json");

		// Act
		let map = source.load().unwrap();

		// Assert
		assert!(map.is_empty());
	}

	#[rstest]
	fn test_json_file_source_rejects_non_object_root() {
		// Arrange
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		write!(file, "[1, 2, 3]").unwrap();

		// Act
		let result = JsonFileSource::new(file.path()).load();

		// Assert
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[rstest]
	#[serial(env)]
	fn test_env_source_parses_typed_values() {
		// Arrange
		// SAFETY: serialized with other env-mutating tests
		unsafe {
			std::env::set_var("CHROMELY_TEST_APP_NAME", "from-env");
			std::env::set_var("CHROMELY_TEST_DEBUGGING_MODE", "false");
		}
		let source = EnvSource::with_prefix("CHROMELY_TEST_");

		// Act
		let map = source.load().unwrap();

		// Assert
		assert_eq!(map["app_name"], Value::String("from-env".to_string()));
		assert_eq!(map["debugging_mode"], Value::Bool(false));

		unsafe {
			std::env::remove_var("CHROMELY_TEST_APP_NAME");
			std::env::remove_var("CHROMELY_TEST_DEBUGGING_MODE");
		}
	}

	#[rstest]
	#[case("app_name", "2048", Value::String("2048".to_string()))]
	#[case("start_url", "1", Value::String("1".to_string()))]
	#[case("app_name", "true", Value::String("true".to_string()))]
	#[case("debugging_mode", "true", Value::Bool(true))]
	#[case("debugging_mode", "yes", Value::String("yes".to_string()))]
	#[case("url_schemes", "[]", Value::Array(Vec::new()))]
	fn test_env_value_types_only_known_keys(#[case] key: &str, #[case] raw: &str, #[case] expected: Value) {
		assert_eq!(env_value(key, raw.to_string()), expected);
	}

	#[rstest]
	#[serial(env)]
	fn test_env_numeric_looking_string_field_builds() {
		// Arrange
		// SAFETY: serialized with other env-mutating tests
		unsafe {
			std::env::set_var("CHROMELY_NUMERIC_APP_NAME", "2048");
			std::env::set_var("CHROMELY_NUMERIC_START_URL", "1");
		}
		let builder = crate::ConfigBuilder::new()
			.add_source(DefaultSource::new())
			.add_source(EnvSource::with_prefix("CHROMELY_NUMERIC_"));

		// Act
		let config = builder.build();

		unsafe {
			std::env::remove_var("CHROMELY_NUMERIC_APP_NAME");
			std::env::remove_var("CHROMELY_NUMERIC_START_URL");
		}

		// Assert
		let config = config.unwrap();
		assert_eq!(config.app_name, "2048");
		assert_eq!(config.start_url, "1");
	}

	#[rstest]
	#[case("settings.toml", true)]
	#[case("settings.json", true)]
	#[case("settings.yaml", false)]
	#[case("settings", false)]
	fn test_auto_source(#[case] path: &str, #[case] supported: bool) {
		assert_eq!(auto_source(path).is_ok(), supported);
	}

	#[rstest]
	fn test_default_source_serializes_defaults() {
		// Act
		let map = DefaultSource::new().load().unwrap();

		// Assert
		assert_eq!(map["app_name"], "chromely");
		assert!(map["url_schemes"].is_array());
	}
}
