//! Command-scheme navigations.
//!
//! Navigating to a registered command scheme (by default
//! `http://command.com/...`) runs the matching route and discards its
//! response. Nothing is sent back to the page.

use chromely_conf::UrlSchemeRegistry;
use chromely_core::ChromelyRequest;
use chromely_dispatch::{DispatchHandle, RequestDispatcher, TaskRunner};
use std::sync::Arc;

use crate::error::{BridgeError, Result};
use crate::guard::catch_panic;

#[derive(Debug, Clone)]
pub struct CommandRunner {
	dispatcher: RequestDispatcher,
	schemes: Arc<UrlSchemeRegistry>,
	runner: TaskRunner,
}

impl CommandRunner {
	pub fn new(dispatcher: RequestDispatcher, schemes: Arc<UrlSchemeRegistry>, runner: TaskRunner) -> Self {
		Self {
			dispatcher,
			schemes,
			runner,
		}
	}

	pub fn can_handle(&self, url: &str) -> bool {
		self.schemes.is_url_registered_command_scheme(url)
	}

	/// Run the command addressed by `url` and wait for it.
	///
	/// A panicking command is reported as [`BridgeError::Panicked`].
	pub async fn run(&self, url: &str) -> Result<()> {
		let request = self.command_request(url)?;
		let response = catch_panic(async {
			self.dispatcher.dispatch(request).await.map_err(BridgeError::from)
		})
		.await?;
		tracing::debug!(url, status = %response.status, "command completed");
		Ok(())
	}

	/// Run the command in the background. Failures are logged.
	pub fn run_detached(&self, url: &str) -> Result<DispatchHandle<()>> {
		let request = self.command_request(url)?;
		let dispatcher = self.dispatcher.clone();
		let url = url.to_string();
		Ok(self.runner.spawn(async move {
			let outcome = catch_panic(async {
				dispatcher.dispatch(request).await.map_err(BridgeError::from)
			})
			.await;
			if let Err(e) = outcome {
				tracing::error!(url = %url, error = %e, "command failed");
			}
		}))
	}

	fn command_request(&self, url: &str) -> Result<ChromelyRequest> {
		if !self.can_handle(url) {
			return Err(BridgeError::CommandSchemeNotRegistered(url.to_string()));
		}
		Ok(ChromelyRequest::from_url("GET", url)?)
	}
}
