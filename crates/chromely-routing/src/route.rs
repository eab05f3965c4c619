//! Route descriptors.

use chromely_core::{ChromelyRequest, ChromelyResponse, RoutePath};
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// A synchronous handler returning a response.
pub type SyncHandler =
	Arc<dyn Fn(&ChromelyRequest) -> anyhow::Result<ChromelyResponse> + Send + Sync>;

/// An asynchronous handler returning a response.
pub type AsyncHandler = Arc<
	dyn Fn(ChromelyRequest) -> BoxFuture<'static, anyhow::Result<ChromelyResponse>> + Send + Sync,
>;

/// A handler with no return value.
pub type CommandHandler = Arc<dyn Fn(&ChromelyRequest) -> anyhow::Result<()> + Send + Sync>;

/// How a route is invoked.
#[derive(Clone)]
pub enum RouteAction {
	Sync(SyncHandler),
	Async(AsyncHandler),
	Command(CommandHandler),
}

impl RouteAction {
	pub fn sync<F>(handler: F) -> Self
	where
		F: Fn(&ChromelyRequest) -> anyhow::Result<ChromelyResponse> + Send + Sync + 'static,
	{
		Self::Sync(Arc::new(handler))
	}

	pub fn from_async<F, Fut>(handler: F) -> Self
	where
		F: Fn(ChromelyRequest) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = anyhow::Result<ChromelyResponse>> + Send + 'static,
	{
		Self::Async(Arc::new(move |request| Box::pin(handler(request))))
	}

	pub fn command<F>(handler: F) -> Self
	where
		F: Fn(&ChromelyRequest) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		Self::Command(Arc::new(handler))
	}
}

impl fmt::Debug for RouteAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let kind = match self {
			Self::Sync(_) => "Sync",
			Self::Async(_) => "Async",
			Self::Command(_) => "Command",
		};
		f.write_str(kind)
	}
}

/// A handler bound to a [`RoutePath`] and its owning controller.
///
/// Routes are created while controllers register themselves and are never
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct Route {
	controller: String,
	route_path: RoutePath,
	action: RouteAction,
}

impl Route {
	pub fn new(controller: impl Into<String>, route_path: RoutePath, action: RouteAction) -> Self {
		Self {
			controller: controller.into(),
			route_path,
			action,
		}
	}

	/// Name of the controller that registered this route.
	pub fn controller(&self) -> &str {
		&self.controller
	}

	pub fn route_path(&self) -> &RoutePath {
		&self.route_path
	}

	pub fn action(&self) -> &RouteAction {
		&self.action
	}

	pub fn is_async(&self) -> bool {
		matches!(self.action, RouteAction::Async(_))
	}

	/// `false` for fire-and-forget command routes.
	pub fn has_return_value(&self) -> bool {
		!matches!(self.action, RouteAction::Command(_))
	}

	/// Run the handler.
	///
	/// Synchronous handlers run inline on the calling task. Commands yield an
	/// empty response correlated with the request.
	pub async fn invoke(&self, request: ChromelyRequest) -> anyhow::Result<ChromelyResponse> {
		match &self.action {
			RouteAction::Sync(handler) => handler(&request),
			RouteAction::Async(handler) => handler(request).await,
			RouteAction::Command(handler) => {
				handler(&request)?;
				Ok(ChromelyResponse::for_request(request.id))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chromely_core::ResponseData;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_sync_route_invoke() {
		// Arrange
		let route = Route::new(
			"demo",
			RoutePath::get("/demo/echo"),
			RouteAction::sync(|req| {
				Ok(ChromelyResponse::for_request(req.id.clone())
					.with_data(req.parameters.get("q").unwrap_or_default().to_string()))
			}),
		);
		let request = ChromelyRequest::new(RoutePath::get("/demo/echo")).with_parameter("q", "hi");

		// Act
		let response = route.invoke(request).await.unwrap();

		// Assert
		assert!(!route.is_async());
		assert!(route.has_return_value());
		assert!(matches!(response.data, ResponseData::Text(ref s) if s == "hi"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_async_route_invoke() {
		// Arrange
		let route = Route::new(
			"demo",
			RoutePath::get("/demo/later"),
			RouteAction::from_async(|req: ChromelyRequest| async move {
				tokio::task::yield_now().await;
				Ok(ChromelyResponse::for_request(req.id).with_data("done"))
			}),
		);
		let request = ChromelyRequest::new(RoutePath::get("/demo/later")).with_id("7");

		// Act
		let response = route.invoke(request).await.unwrap();

		// Assert
		assert!(route.is_async());
		assert_eq!(response.request_id.as_deref(), Some("7"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_command_route_returns_empty_response() {
		// Arrange
		let route = Route::new(
			"demo",
			RoutePath::get("/demo/showdevtools"),
			RouteAction::command(|_| Ok(())),
		);
		let request = ChromelyRequest::new(RoutePath::get("/demo/showdevtools")).with_id("c1");

		// Act
		let response = route.invoke(request).await.unwrap();

		// Assert
		assert!(!route.has_return_value());
		assert_eq!(response.request_id.as_deref(), Some("c1"));
		assert!(response.data.is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_handler_error_is_returned() {
		// Arrange
		let route = Route::new(
			"demo",
			RoutePath::post("/demo/fail"),
			RouteAction::sync(|_| anyhow::bail!("boom")),
		);

		// Act
		let result = route.invoke(ChromelyRequest::new(RoutePath::post("/demo/fail"))).await;

		// Assert
		assert_eq!(result.unwrap_err().to_string(), "boom");
	}
}
