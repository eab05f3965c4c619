//! Layered configuration builder.

use indexmap::IndexMap;
use serde_json::Value;

use crate::config::ChromelyConfig;
use crate::error::{ConfigError, Result};
use crate::sources::{ConfigSource, DefaultSource};

/// Merges [`ConfigSource`]s into a [`ChromelyConfig`].
///
/// Sources are applied from lowest to highest priority; a later source
/// replaces whole top-level keys, except `custom_settings` which is merged
/// key by key.
///
/// # Examples
///
/// ```
/// use chromely_conf::{ConfigBuilder, DefaultSource};
///
/// let config = ConfigBuilder::new()
///     .add_source(DefaultSource::new())
///     .build()
///     .unwrap();
/// assert_eq!(config.start_url, "local://app/chromely.html");
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn add_boxed_source(mut self, source: Box<dyn ConfigSource>) -> Self {
		self.sources.push(source);
		self
	}

	/// Merge the raw key/value maps without deserializing.
	pub fn build_map(mut self) -> Result<IndexMap<String, Value>> {
		// Stable sort keeps insertion order among equal priorities
		self.sources.sort_by_key(|s| s.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in &self.sources {
			let layer = source.load()?;
			tracing::debug!(
				source = %source.description(),
				keys = layer.len(),
				"applying configuration source"
			);
			for (key, value) in layer {
				match (merged.get_mut(&key), value) {
					(Some(Value::Object(existing)), Value::Object(incoming))
						if key == "custom_settings" =>
					{
						existing.extend(incoming);
					}
					(_, value) => {
						merged.insert(key, value);
					}
				}
			}
		}
		Ok(merged)
	}

	/// Merge all sources and deserialize the result.
	///
	/// Without any source, the stock defaults are used.
	pub fn build(self) -> Result<ChromelyConfig> {
		let builder = if self.sources.is_empty() {
			self.add_source(DefaultSource::new())
		} else {
			self
		};
		let merged = builder.build_map()?;
		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		serde_json::from_value(Value::Object(object))
			.map_err(|e| ConfigError::Parse(format!("Invalid configuration: {}", e)))
	}
}
