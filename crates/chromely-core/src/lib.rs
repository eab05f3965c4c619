//! # Chromely Core
//!
//! Shared request and response types for the Chromely routing core.
//!
//! Requests reach the router from the embedded browser engine either as
//! custom-scheme navigations or as JS-to-native query messages. Both are
//! normalized into a [`ChromelyRequest`], and every dispatched request ends
//! up as a [`ChromelyResponse`] that leaves the process through a single JSON
//! funnel ([`json::ensure_json`]).
//!
//! ## Example
//!
//! ```
//! use chromely_core::{ChromelyRequest, ChromelyResponse, RoutePath};
//! use serde_json::json;
//!
//! let request = ChromelyRequest::new(RoutePath::get("/democontroller/movies"))
//!     .with_id("42");
//! assert_eq!(request.route_path.path(), "/democontroller/movies");
//!
//! let response = ChromelyResponse::for_request(request.id.clone())
//!     .with_data(json!({"count": 6}))
//!     .mark_ready();
//! let envelope: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();
//! assert_eq!(envelope["requestId"], "42");
//! assert_eq!(envelope["status"], 200);
//! ```

pub mod error;
pub mod json;
pub mod params;
pub mod request;
pub mod response;
pub mod route_path;

pub use error::{Error, Result};
pub use json::{ensure_json, is_valid_json};
pub use params::Parameters;
pub use request::{ChromelyRequest, PostData, QueryMessage};
pub use response::{ChromelyResponse, JsonEnvelope, ReadyState, ResponseData};
pub use route_path::{RoutePath, parse_method};

// Re-exported so downstream crates agree on the HTTP vocabulary.
pub use http::{Method, StatusCode};
