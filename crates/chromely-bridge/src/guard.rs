//! Panic containment for background request work.

use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::error::{BridgeError, Result};

/// Drive `work`, reporting a panic inside it as [`BridgeError::Panicked`].
///
/// The engine callback is owned outside `work`, so it is still answered
/// when a handler panics.
pub(crate) async fn catch_panic<F, T>(work: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	match AssertUnwindSafe(work).catch_unwind().await {
		Ok(result) => result,
		Err(payload) => Err(BridgeError::Panicked(panic_message(payload.as_ref()))),
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"unknown panic".to_string()
	}
}
