//! # Chromely Dispatch
//!
//! [`RequestDispatcher`] turns a [`ChromelyRequest`](chromely_core::ChromelyRequest)
//! into a finished [`ChromelyResponse`](chromely_core::ChromelyResponse) or a
//! [`DispatchError`]; [`TaskRunner`] moves that work off the caller's thread.

pub mod dispatcher;
pub mod error;
pub mod info;
pub mod task;

pub use dispatcher::RequestDispatcher;
pub use error::{DispatchError, Result};
pub use info::{EngineInfo, INFO_PATH, InfoPayload};
pub use task::{DispatchHandle, TaskRunner};
