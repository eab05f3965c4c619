//! Dispatch errors.

use chromely_core::RoutePath;

/// Errors returned by [`RequestDispatcher`](crate::RequestDispatcher).
///
/// The dispatcher never turns these into responses itself; transport
/// adapters decide how a failure reaches the page.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	#[error("Route not found: {0}")]
	RouteNotFound(RoutePath),

	#[error("Handler for {route} failed: {source}")]
	Handler {
		route: RoutePath,
		#[source]
		source: anyhow::Error,
	},

	#[error("Dispatch task failed: {0}")]
	Task(#[from] tokio::task::JoinError),
}

impl DispatchError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::RouteNotFound(_))
	}
}

pub type Result<T> = std::result::Result<T, DispatchError>;
