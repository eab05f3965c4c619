//! User settings persisted between application runs.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

const SETTINGS_FILE: &str = "app_settings.config";

/// A thread-safe key/value store backed by a JSON file.
///
/// [`read`](Self::read) and [`save`](Self::save) never fail the caller:
/// problems are logged and the in-memory state stays usable.
///
/// # Examples
///
/// ```
/// use chromely_conf::AppSettings;
///
/// let settings = AppSettings::new(std::env::temp_dir().join("chromely-doc-settings.json"));
/// settings.set("theme", "dark");
/// assert_eq!(settings.get_as::<String>("theme").as_deref(), Some("dark"));
/// ```
#[derive(Debug)]
pub struct AppSettings {
	path: PathBuf,
	values: RwLock<IndexMap<String, Value>>,
}

impl AppSettings {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			values: RwLock::new(IndexMap::new()),
		}
	}

	/// Settings stored under the per-user configuration directory.
	pub fn for_app(app_name: &str) -> Result<Self> {
		let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
		Ok(Self::new(dir.join(app_name).join(SETTINGS_FILE)))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Load the settings file, replacing in-memory values.
	///
	/// Returns `false` when the file is missing or unreadable.
	pub fn read(&self) -> bool {
		match self.try_read() {
			Ok(values) => {
				*self.values.write() = values;
				true
			}
			Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %self.path.display(), "no saved settings");
				false
			}
			Err(e) => {
				tracing::error!(path = %self.path.display(), error = %e, "failed to read settings");
				false
			}
		}
	}

	fn try_read(&self) -> Result<IndexMap<String, Value>> {
		let content = fs::read_to_string(&self.path)?;
		if content.trim().is_empty() {
			return Ok(IndexMap::new());
		}
		Ok(serde_json::from_str(&content)?)
	}

	/// Write the settings file, creating parent directories as needed.
	pub fn save(&self) -> bool {
		match self.try_save() {
			Ok(()) => true,
			Err(e) => {
				tracing::error!(path = %self.path.display(), error = %e, "failed to save settings");
				false
			}
		}
	}

	fn try_save(&self) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let content = serde_json::to_string_pretty(&*self.values.read())?;
		fs::write(&self.path, content)?;
		Ok(())
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.values.read().get(key).cloned()
	}

	/// Get a value converted to `T`; `None` if missing or of another shape.
	pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
		let value = self.get(key)?;
		serde_json::from_value(value).ok()
	}

	/// Set a value. Values that cannot be represented as JSON are ignored.
	pub fn set(&self, key: impl Into<String>, value: impl Serialize) {
		let key = key.into();
		match serde_json::to_value(value) {
			Ok(value) => {
				self.values.write().insert(key, value);
			}
			Err(e) => tracing::warn!(key = %key, error = %e, "setting is not serializable"),
		}
	}

	pub fn remove(&self, key: &str) -> Option<Value> {
		self.values.write().shift_remove(key)
	}

	pub fn clear(&self) {
		self.values.write().clear();
	}

	pub fn len(&self) -> usize {
		self.values.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.read().is_empty()
	}
}
