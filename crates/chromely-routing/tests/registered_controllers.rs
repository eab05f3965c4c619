//! Link-time controller registration.

#![cfg(feature = "inventory")]

use chromely_core::{ChromelyRequest, ChromelyResponse, RoutePath};
use chromely_routing::{
	Controller, ControllerRoutes, ControllerScanner, register_controller, registered_controllers,
};
use rstest::rstest;
use std::sync::Arc;

struct CatalogController {
	titles: Vec<&'static str>,
}

impl Controller for CatalogController {
	fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
		let this = Arc::clone(&self);
		routes.register_get("/catalog/titles", move |req| {
			Ok(ChromelyResponse::for_request(req.id.clone()).with_json(&this.titles)?)
		});
		routes.register_async_post("/catalog/count", move |req: ChromelyRequest| {
			let count = self.titles.len();
			async move { Ok(ChromelyResponse::for_request(req.id).with_data(count.to_string())) }
		});
	}
}

register_controller!("catalogcontroller", "/catalog", || {
	Ok(Arc::new(CatalogController {
		titles: vec!["Alpha", "Beta"],
	}))
});

struct ShadowController;

impl Controller for ShadowController {
	fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
		routes.register_get("/catalog/titles", |_| Ok(ChromelyResponse::new().with_data("shadow")));
	}
}

#[rstest]
fn test_registered_controller_is_listed() {
	// Act
	let registrations = registered_controllers();

	// Assert
	let catalog = registrations
		.iter()
		.find(|r| r.name == "catalogcontroller")
		.unwrap();
	assert_eq!(catalog.route, "/catalog");
}

#[rstest]
#[tokio::test]
async fn test_scanner_includes_registered_controllers() {
	// Arrange
	let table = ControllerScanner::new().scan();
	let route = table.get(&RoutePath::get("/catalog/titles")).unwrap();

	// Act
	let response = route
		.invoke(ChromelyRequest::new(RoutePath::get("/catalog/titles")).with_id("1"))
		.await
		.unwrap();

	// Assert
	assert_eq!(route.controller(), "catalogcontroller");
	assert!(table.get(&RoutePath::post("/catalog/count")).unwrap().is_async());
	let data: serde_json::Value = serde_json::from_str(&response.data_json()).unwrap();
	assert_eq!(data, serde_json::json!(["Alpha", "Beta"]));
}

#[rstest]
fn test_explicit_controller_precedes_registered_one() {
	// Act
	let table = ControllerScanner::new()
		.with_controller("shadow", Arc::new(ShadowController))
		.scan();

	// Assert
	assert_eq!(
		table.get(&RoutePath::get("/catalog/titles")).unwrap().controller(),
		"shadow"
	);
}

#[rstest]
fn test_registered_controllers_can_be_excluded() {
	// Act
	let table = ControllerScanner::new().include_registered(false).scan();

	// Assert
	assert!(table.is_empty());
}
