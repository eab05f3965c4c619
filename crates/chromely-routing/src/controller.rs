//! Controllers and their self-registered routes.

use chromely_core::{ChromelyRequest, ChromelyResponse, RoutePath};
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::future::Future;
use std::sync::Arc;

use crate::route::{Route, RouteAction};

/// A group of related routes.
///
/// Implementors register their handlers in [`register_routes`]. Handlers
/// that need controller state capture the `Arc<Self>`.
///
/// # Examples
///
/// ```
/// use chromely_core::ChromelyResponse;
/// use chromely_routing::{Controller, ControllerRoutes};
/// use std::sync::Arc;
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// impl Controller for Greeter {
///     fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
///         routes.register_get("/greeter/hello", move |req| {
///             Ok(ChromelyResponse::for_request(req.id.clone()).with_data(self.greeting.clone()))
///         });
///     }
/// }
///
/// let mut routes = ControllerRoutes::new("greeter");
/// Arc::new(Greeter { greeting: "hi".into() }).register_routes(&mut routes);
/// assert_eq!(routes.len(), 1);
/// ```
///
/// [`register_routes`]: Controller::register_routes
pub trait Controller: Send + Sync + 'static {
	fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes);
}

/// Routes registered by a single controller, keyed by [`RoutePath`].
#[derive(Debug)]
pub struct ControllerRoutes {
	controller: String,
	routes: IndexMap<RoutePath, Route>,
}

impl ControllerRoutes {
	pub fn new(controller: impl Into<String>) -> Self {
		Self {
			controller: controller.into(),
			routes: IndexMap::new(),
		}
	}

	pub fn controller(&self) -> &str {
		&self.controller
	}

	/// Register a route. A key registered twice keeps its first handler.
	pub fn register(&mut self, route_path: RoutePath, action: RouteAction) -> &mut Self {
		match self.routes.entry(route_path) {
			Entry::Occupied(entry) => {
				tracing::debug!(
					controller = %self.controller,
					route = %entry.key(),
					"route already registered by this controller, ignoring"
				);
			}
			Entry::Vacant(entry) => {
				let route = Route::new(self.controller.clone(), entry.key().clone(), action);
				entry.insert(route);
			}
		}
		self
	}

	pub fn register_get<F>(&mut self, path: &str, handler: F) -> &mut Self
	where
		F: Fn(&ChromelyRequest) -> anyhow::Result<ChromelyResponse> + Send + Sync + 'static,
	{
		self.register(RoutePath::get(path), RouteAction::sync(handler))
	}

	pub fn register_post<F>(&mut self, path: &str, handler: F) -> &mut Self
	where
		F: Fn(&ChromelyRequest) -> anyhow::Result<ChromelyResponse> + Send + Sync + 'static,
	{
		self.register(RoutePath::post(path), RouteAction::sync(handler))
	}

	pub fn register_async_get<F, Fut>(&mut self, path: &str, handler: F) -> &mut Self
	where
		F: Fn(ChromelyRequest) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = anyhow::Result<ChromelyResponse>> + Send + 'static,
	{
		self.register(RoutePath::get(path), RouteAction::from_async(handler))
	}

	pub fn register_async_post<F, Fut>(&mut self, path: &str, handler: F) -> &mut Self
	where
		F: Fn(ChromelyRequest) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = anyhow::Result<ChromelyResponse>> + Send + 'static,
	{
		self.register(RoutePath::post(path), RouteAction::from_async(handler))
	}

	/// Register a fire-and-forget command, reachable with `GET`.
	pub fn register_command<F>(&mut self, path: &str, handler: F) -> &mut Self
	where
		F: Fn(&ChromelyRequest) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		self.register(RoutePath::get(path), RouteAction::command(handler))
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Route> {
		self.routes.values()
	}

	pub fn into_routes(self) -> impl Iterator<Item = Route> {
		self.routes.into_values()
	}
}
