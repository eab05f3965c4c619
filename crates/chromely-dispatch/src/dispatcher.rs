//! The request dispatcher.

use chromely_core::{ChromelyRequest, ChromelyResponse};
use chromely_routing::RouteTable;
use std::sync::Arc;

use crate::error::{DispatchError, Result};
use crate::info::{EngineInfo, INFO_PATH};

/// Routes requests to handlers and finalizes their responses.
///
/// Each request goes through validation, lookup, execution and enveloping:
///
/// 1. An empty or whitespace path yields a `400 Bad Request` response
///    without consulting the route table.
/// 2. `/info` is answered with engine diagnostics, whatever controllers
///    registered.
/// 3. The route is looked up; a miss is [`DispatchError::RouteNotFound`].
/// 4. The handler runs. A failure is [`DispatchError::Handler`]; a success is
///    marked ready with `200 OK` and correlated with the request id.
///
/// Cloning is cheap; clones share the same route table.
///
/// # Examples
///
/// ```
/// use chromely_core::{ChromelyRequest, ChromelyResponse, RoutePath, StatusCode};
/// use chromely_dispatch::RequestDispatcher;
/// use chromely_routing::{Controller, ControllerRoutes, ControllerScanner};
/// use std::sync::Arc;
///
/// struct Hello;
///
/// impl Controller for Hello {
///     fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
///         routes.register_get("/hello", |_| Ok(ChromelyResponse::new().with_data("world")));
///     }
/// }
///
/// let table = ControllerScanner::new()
///     .include_registered(false)
///     .with_controller("hello", Arc::new(Hello))
///     .scan();
/// let dispatcher = RequestDispatcher::new(Arc::new(table));
///
/// let response = dispatcher
///     .dispatch_blocking(ChromelyRequest::new(RoutePath::get("/hello")).with_id("1"))
///     .unwrap();
/// assert_eq!(response.status, StatusCode::OK);
/// assert_eq!(response.request_id.as_deref(), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
	table: Arc<RouteTable>,
	engine_info: Arc<EngineInfo>,
}

impl RequestDispatcher {
	pub fn new(table: Arc<RouteTable>) -> Self {
		Self {
			table,
			engine_info: Arc::new(EngineInfo::default()),
		}
	}

	pub fn with_engine_info(mut self, engine_info: EngineInfo) -> Self {
		self.engine_info = Arc::new(engine_info);
		self
	}

	pub fn route_table(&self) -> &Arc<RouteTable> {
		&self.table
	}

	pub fn engine_info(&self) -> &EngineInfo {
		&self.engine_info
	}

	pub async fn dispatch(&self, request: ChromelyRequest) -> Result<ChromelyResponse> {
		let request_id = request.id.clone();

		if request.route_path.is_empty() {
			tracing::debug!(request_id = ?request_id, "empty route path");
			return Ok(ChromelyResponse::bad_request(request_id));
		}

		if request.route_path.is_path(INFO_PATH) {
			return Ok(self.info_response(request_id));
		}

		let Some(route) = self.table.get(&request.route_path) else {
			return Err(DispatchError::RouteNotFound(request.route_path));
		};

		tracing::debug!(
			route = %request.route_path,
			controller = route.controller(),
			request_id = ?request_id,
			"dispatching request"
		);

		let route_path = request.route_path.clone();
		let mut response = route
			.invoke(request)
			.await
			.map_err(|source| DispatchError::Handler {
				route: route_path,
				source,
			})?;

		response.request_id = request_id;
		Ok(response.mark_ready())
	}

	/// Dispatch on the calling thread.
	///
	/// Handlers that rely on tokio resources (timers, I/O) need a runtime
	/// context and should go through [`dispatch`](Self::dispatch) instead.
	pub fn dispatch_blocking(&self, request: ChromelyRequest) -> Result<ChromelyResponse> {
		futures::executor::block_on(self.dispatch(request))
	}

	fn info_response(&self, request_id: Option<String>) -> ChromelyResponse {
		let response = ChromelyResponse::for_request(request_id);
		let response = match response.with_json(&self.engine_info.payload()) {
			Ok(response) => response,
			Err(e) => {
				tracing::error!(error = %e, "failed to serialize engine info");
				ChromelyResponse::new()
			}
		};
		response.mark_ready()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chromely_core::{RoutePath, StatusCode};
	use chromely_routing::{Controller, ControllerRoutes, ControllerScanner};
	use rstest::{fixture, rstest};

	struct Sample;

	impl Controller for Sample {
		fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
			routes
				.register_get("/sample/value", |_| Ok(ChromelyResponse::new().with_data("value")))
				.register_get("", |_| Ok(ChromelyResponse::new().with_data("empty")))
				.register_get("   ", |_| Ok(ChromelyResponse::new().with_data("blank")))
				.register_post("", |_| Ok(ChromelyResponse::new().with_data("empty")))
				.register_get("/info", |_| Ok(ChromelyResponse::new().with_data("shadow")))
				.register_post("/sample/fail", |_| anyhow::bail!("handler failed"));
		}
	}

	#[fixture]
	fn dispatcher() -> RequestDispatcher {
		let table = ControllerScanner::new()
			.include_registered(false)
			.with_controller("sample", Arc::new(Sample))
			.scan();
		RequestDispatcher::new(Arc::new(table)).with_engine_info(EngineInfo::new("1.0", "2.0"))
	}

	#[rstest]
	#[case(RoutePath::get(""))]
	#[case(RoutePath::get("   "))]
	#[case(RoutePath::post(""))]
	fn test_empty_path_short_circuits(dispatcher: RequestDispatcher, #[case] path: RoutePath) {
		// Arrange
		assert!(dispatcher.route_table().contains(&path));

		// Act
		let response = dispatcher
			.dispatch_blocking(ChromelyRequest::new(path).with_id("e"))
			.unwrap();

		// Assert
		assert_eq!(response.status, StatusCode::BAD_REQUEST);
		assert_eq!(response.status_text, "Bad Request");
		assert!(response.is_ready());
		assert!(response.data.is_empty());
	}

	#[rstest]
	#[case(RoutePath::get("/info"))]
	#[case(RoutePath::get("/INFO"))]
	#[case(RoutePath::post("/info"))]
	fn test_info_cannot_be_shadowed(dispatcher: RequestDispatcher, #[case] path: RoutePath) {
		// Act
		let response = dispatcher.dispatch_blocking(ChromelyRequest::new(path)).unwrap();

		// Assert
		assert_eq!(response.status, StatusCode::OK);
		let data: serde_json::Value = serde_json::from_str(&response.data_json()).unwrap();
		assert!(data["divVersion"].as_str().unwrap().starts_with("Chromium: 1.0, CEF: 2.0"));
		assert!(data.get("divObjective").is_some());
		assert!(data.get("divPlatform").is_some());
	}

	#[rstest]
	fn test_unregistered_route_is_not_found(dispatcher: RequestDispatcher) {
		// Act
		let result = dispatcher.dispatch_blocking(ChromelyRequest::new(RoutePath::post("/sample/value")));

		// Assert
		match result {
			Err(DispatchError::RouteNotFound(path)) => assert_eq!(path, RoutePath::post("/sample/value")),
			other => panic!("expected RouteNotFound, got {:?}", other),
		}
	}

	#[rstest]
	fn test_handler_error_is_propagated(dispatcher: RequestDispatcher) {
		// Act
		let error = dispatcher
			.dispatch_blocking(ChromelyRequest::new(RoutePath::post("/sample/fail")))
			.unwrap_err();

		// Assert
		assert!(matches!(error, DispatchError::Handler { .. }));
		assert_eq!(
			error.to_string(),
			"Handler for POST /sample/fail failed: handler failed"
		);
	}

	#[rstest]
	fn test_success_is_marked_ready(dispatcher: RequestDispatcher) {
		// Act
		let response = dispatcher
			.dispatch_blocking(ChromelyRequest::new(RoutePath::get("/Sample/Value")).with_id("42"))
			.unwrap();

		// Assert
		assert!(response.is_ready());
		assert_eq!(response.status, StatusCode::OK);
		assert_eq!(response.status_text, "OK");
		assert_eq!(response.request_id.as_deref(), Some("42"));
		assert_eq!(response.data_json(), r#""value""#);
	}
}
