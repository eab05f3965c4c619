//! Application composition root.
//!
//! [`ChromelyApp`] owns everything built once at start: the configuration,
//! the scheme registry, the route table (behind the dispatcher) and the
//! transport adapters the browser engine calls into.

use std::path::Path;
use std::sync::Arc;

use chromely_bridge::{CommandRunner, QueryHandler, SchemeHandler};
use chromely_conf::{
	AppSettings, ChromelyConfig, ConfigBuilder, DefaultSource, EnvSource, UrlSchemeRegistry, auto_source,
};
use chromely_dispatch::{EngineInfo, RequestDispatcher, TaskRunner};
use chromely_routing::{Controller, ControllerRegistration, ControllerScanner, RouteTable};
use tokio::runtime::Handle;

use crate::error::{ChromelyError, Result};

/// Load configuration from defaults, an optional TOML/JSON file and
/// `CHROMELY_*` environment variables, in increasing priority.
pub fn load_config(path: Option<&Path>) -> Result<ChromelyConfig> {
	let mut builder = ConfigBuilder::new()
		.add_source(DefaultSource::new())
		.add_source(EnvSource::new());
	if let Some(path) = path {
		builder = builder.add_boxed_source(auto_source(path)?);
	}
	Ok(builder.build()?)
}

/// Where a navigation should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
	/// Served by [`SchemeHandler`].
	Custom,
	/// Run by [`CommandRunner`].
	Command,
	/// Leaves the application.
	External,
	/// Not intercepted; the engine loads it normally.
	Passthrough,
}

/// Builder for [`ChromelyApp`].
pub struct ChromelyAppBuilder {
	config: ChromelyConfig,
	scanner: ControllerScanner,
	engine_info: EngineInfo,
	runtime: Option<Handle>,
}

impl Default for ChromelyAppBuilder {
	fn default() -> Self {
		Self {
			config: ChromelyConfig::default(),
			scanner: ControllerScanner::new(),
			engine_info: EngineInfo::default(),
			runtime: None,
		}
	}
}

impl ChromelyAppBuilder {
	pub fn config(mut self, config: ChromelyConfig) -> Self {
		self.config = config;
		self
	}

	pub fn controller(mut self, name: impl Into<String>, controller: Arc<dyn Controller>) -> Self {
		self.scanner = self.scanner.with_controller(name, controller);
		self
	}

	pub fn registration(mut self, registration: ControllerRegistration) -> Self {
		self.scanner = self.scanner.with_registration(registration);
		self
	}

	/// Whether controllers submitted with `register_controller!` are scanned.
	pub fn include_registered(mut self, include: bool) -> Self {
		self.scanner = self.scanner.include_registered(include);
		self
	}

	pub fn engine_info(mut self, engine_info: EngineInfo) -> Self {
		self.engine_info = engine_info;
		self
	}

	/// Runtime used for request work. Defaults to the current one.
	pub fn runtime(mut self, handle: Handle) -> Self {
		self.runtime = Some(handle);
		self
	}

	/// Scan controllers and wire the adapters.
	pub fn build(self) -> Result<ChromelyApp> {
		let runner = match self.runtime {
			Some(handle) => TaskRunner::new(handle),
			None => TaskRunner::try_current().ok_or(ChromelyError::NoRuntime)?,
		};

		let table = Arc::new(self.scanner.scan());
		let dispatcher = RequestDispatcher::new(Arc::clone(&table)).with_engine_info(self.engine_info);
		let schemes = Arc::new(self.config.scheme_registry());

		tracing::info!(
			app = %self.config.app_name,
			routes = table.len(),
			schemes = schemes.len(),
			"application ready"
		);

		Ok(ChromelyApp {
			scheme_handler: SchemeHandler::new(dispatcher.clone(), Arc::clone(&schemes), runner.clone()),
			query_handler: QueryHandler::new(dispatcher.clone(), Arc::clone(&schemes), runner.clone()),
			command_runner: CommandRunner::new(dispatcher.clone(), Arc::clone(&schemes), runner.clone()),
			config: self.config,
			schemes,
			dispatcher,
			runner,
		})
	}
}

/// A running application's request plumbing.
///
/// # Examples
///
/// ```
/// use chromely::prelude::*;
/// use std::sync::Arc;
///
/// struct Ping;
///
/// impl Controller for Ping {
///     fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
///         routes.register_get("/ping", |_| Ok(ChromelyResponse::new().with_data("pong")));
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let app = ChromelyApp::builder()
///     .include_registered(false)
///     .controller("ping", Arc::new(Ping))
///     .build()?;
///
/// let response = app
///     .dispatcher()
///     .dispatch(ChromelyRequest::new(RoutePath::get("/ping")))
///     .await?;
/// assert_eq!(response.data_json(), r#""pong""#);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChromelyApp {
	config: ChromelyConfig,
	schemes: Arc<UrlSchemeRegistry>,
	dispatcher: RequestDispatcher,
	scheme_handler: SchemeHandler,
	query_handler: QueryHandler,
	command_runner: CommandRunner,
	runner: TaskRunner,
}

impl ChromelyApp {
	pub fn builder() -> ChromelyAppBuilder {
		ChromelyAppBuilder::default()
	}

	pub fn config(&self) -> &ChromelyConfig {
		&self.config
	}

	pub fn schemes(&self) -> &UrlSchemeRegistry {
		&self.schemes
	}

	pub fn route_table(&self) -> &RouteTable {
		self.dispatcher.route_table()
	}

	pub fn dispatcher(&self) -> &RequestDispatcher {
		&self.dispatcher
	}

	pub fn scheme_handler(&self) -> &SchemeHandler {
		&self.scheme_handler
	}

	pub fn query_handler(&self) -> &QueryHandler {
		&self.query_handler
	}

	pub fn command_runner(&self) -> &CommandRunner {
		&self.command_runner
	}

	pub fn task_runner(&self) -> &TaskRunner {
		&self.runner
	}

	/// Persisted settings for this application, loaded from disk.
	pub fn settings(&self) -> Result<AppSettings> {
		let settings = AppSettings::for_app(&self.config.app_name)?;
		settings.read();
		Ok(settings)
	}

	/// Decide which component handles a navigation to `url`.
	pub fn navigation_target(&self, url: &str) -> NavigationTarget {
		if self.schemes.is_url_registered_custom_scheme(url) {
			NavigationTarget::Custom
		} else if self.schemes.is_url_registered_command_scheme(url) {
			NavigationTarget::Command
		} else if self.schemes.is_url_registered_external_scheme(url) {
			NavigationTarget::External
		} else {
			NavigationTarget::Passthrough
		}
	}
}
