//! # Chromely
//!
//! Request routing and dispatch for desktop shells that embed Chromium.
//!
//! Page JavaScript talks to native code through "virtual HTTP": navigations
//! to registered custom schemes and JSON query messages. Both are normalized
//! into a [`ChromelyRequest`], routed to a controller handler through a
//! read-only [`RouteTable`], and answered with a JSON envelope.
//!
//! ## Crates
//!
//! - [`core`]: request, response, route key and the JSON funnel
//! - [`conf`]: configuration, URL schemes, persisted settings
//! - [`routing`]: controllers, route table, controller scanning
//! - [`dispatch`]: request dispatcher and background task runner
//! - [`bridge`]: scheme, query and command transport adapters
//!
//! ## Feature Flags
//!
//! - `inventory` (default): discover controllers submitted with
//!   [`register_controller!`](chromely_routing::register_controller).
//!
//! ## Quick Example
//!
//! ```
//! use chromely::prelude::*;
//! use std::sync::Arc;
//!
//! struct Movies;
//!
//! impl Controller for Movies {
//!     fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
//!         routes.register_get("/democontroller/movies", |req| {
//!             Ok(ChromelyResponse::for_request(req.id.clone()).with_json(&["Up", "Heat"])?)
//!         });
//!     }
//! }
//!
//! let table = ControllerScanner::new()
//!     .include_registered(false)
//!     .with_controller("democontroller", Arc::new(Movies))
//!     .scan();
//! let dispatcher = RequestDispatcher::new(Arc::new(table));
//!
//! let response = dispatcher
//!     .dispatch_blocking(ChromelyRequest::new(RoutePath::get("/democontroller/movies")))
//!     .unwrap();
//! assert_eq!(response.status, StatusCode::OK);
//! ```

pub mod app;
pub mod error;
pub mod logging;

pub use chromely_bridge as bridge;
pub use chromely_conf as conf;
pub use chromely_core as core;
pub use chromely_dispatch as dispatch;
pub use chromely_routing as routing;

pub use app::{ChromelyApp, ChromelyAppBuilder, NavigationTarget, load_config};
pub use chromely_core::{ChromelyRequest, ChromelyResponse, RoutePath};
pub use chromely_routing::RouteTable;
#[cfg(feature = "inventory")]
pub use chromely_routing::register_controller;
pub use error::{ChromelyError, Result};

/// Commonly used types
pub mod prelude {
	pub use crate::app::{ChromelyApp, NavigationTarget};
	pub use crate::error::ChromelyError;
	pub use chromely_bridge::{
		QueryCallback, QueryHandler, SchemeCallback, SchemeHandler, SchemeRequest, SchemeResponse,
	};
	pub use chromely_conf::{AppSettings, ChromelyConfig, UrlScheme, UrlSchemeType};
	pub use chromely_core::{
		ChromelyRequest, ChromelyResponse, Method, Parameters, PostData, ResponseData, RoutePath,
		StatusCode,
	};
	pub use chromely_dispatch::{DispatchError, RequestDispatcher};
	pub use chromely_routing::{Controller, ControllerRoutes, ControllerScanner, RouteTable};
}
