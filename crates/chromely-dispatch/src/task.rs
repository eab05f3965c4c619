//! Background execution of dispatched requests.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{DispatchError, Result};

/// Spawns request work onto a tokio runtime so the caller never waits for
/// a handler.
#[derive(Debug, Clone)]
pub struct TaskRunner {
	handle: Handle,
}

impl TaskRunner {
	pub fn new(handle: Handle) -> Self {
		Self { handle }
	}

	/// A runner on the runtime of the calling context, if any.
	pub fn try_current() -> Option<Self> {
		Handle::try_current().ok().map(Self::new)
	}

	pub fn handle(&self) -> &Handle {
		&self.handle
	}

	/// Run `work` in the background and return immediately.
	pub fn spawn<F>(&self, work: F) -> DispatchHandle<F::Output>
	where
		F: Future + Send + 'static,
		F::Output: Send + 'static,
	{
		DispatchHandle {
			inner: self.handle.spawn(work),
		}
	}
}

/// Handle to work started by [`TaskRunner::spawn`].
///
/// Dropping the handle detaches the work; awaiting it yields the output.
/// Nothing is interrupted unless [`abort`](Self::abort) is called.
#[derive(Debug)]
pub struct DispatchHandle<T> {
	inner: JoinHandle<T>,
}

impl<T> DispatchHandle<T> {
	/// Cancel the work at its next suspension point.
	pub fn abort(&self) {
		self.inner.abort();
	}

	pub fn is_finished(&self) -> bool {
		self.inner.is_finished()
	}
}

impl<T> Future for DispatchHandle<T> {
	type Output = Result<T>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		Pin::new(&mut self.inner).poll(cx).map_err(DispatchError::from)
	}
}
