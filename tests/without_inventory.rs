//! Builds without link-time controller discovery.

#![cfg(not(feature = "inventory"))]

use chromely::prelude::*;
use rstest::rstest;
use std::sync::Arc;

struct Ping;

impl Controller for Ping {
	fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
		routes.register_get("/ping", |_| Ok(ChromelyResponse::new().with_data("pong")));
	}
}

#[rstest]
#[tokio::test]
async fn test_only_explicit_controllers_are_scanned() {
	// Act
	let app = ChromelyApp::builder()
		.controller("ping", Arc::new(Ping))
		.build()
		.unwrap();

	// Assert
	assert_eq!(app.route_table().len(), 1);
	assert!(app.route_table().contains(&RoutePath::get("/ping")));
}
