//! # Chromely Conf
//!
//! Configuration for the Chromely routing core.
//!
//! - [`UrlScheme`] / [`UrlSchemeRegistry`]: which scheme/host pairs the router
//!   may serve, and which are commands or external links.
//! - [`ChromelyConfig`]: application configuration, loaded from layered
//!   [`sources`] through [`ConfigBuilder`].
//! - [`AppSettings`]: user settings persisted as JSON between runs.
//!
//! ## Example
//!
//! ```
//! use chromely_conf::{ChromelyConfig, UrlScheme, UrlSchemeType};
//!
//! let config = ChromelyConfig::new()
//!     .app_name("movies")
//!     .url_scheme(UrlScheme::new("api", "app", "movies", UrlSchemeType::Custom, false));
//!
//! let schemes = config.scheme_registry();
//! assert!(schemes.is_url_registered_custom_scheme("app://movies/demo/movies"));
//! assert!(!schemes.is_url_registered_custom_scheme("https://example.com/"));
//! ```

pub mod app_settings;
pub mod builder;
pub mod config;
pub mod error;
pub mod scheme;
pub mod sources;

pub use app_settings::AppSettings;
pub use builder::ConfigBuilder;
pub use config::ChromelyConfig;
pub use error::{ConfigError, Result};
pub use scheme::{UrlScheme, UrlSchemeRegistry, UrlSchemeType};
pub use sources::{ConfigSource, DefaultSource, EnvSource, JsonFileSource, TomlFileSource, auto_source};
