//! Composition root wiring: configuration, discovery and the transports.

#![cfg(feature = "inventory")]

use chromely::bridge::{QueryOutcome, SchemeRequest, SchemeResponse};
use chromely::dispatch::EngineInfo;
use chromely::prelude::*;
use chromely::{ChromelyError, load_config, register_controller};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::oneshot;

#[derive(Debug, Serialize, Deserialize)]
struct Movie {
	id: u32,
	title: String,
	year: u16,
}

struct DemoController;

impl Controller for DemoController {
	fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
		routes.register_get("/democontroller/movies", |req| {
			let movies = vec![
				Movie {
					id: 7,
					title: "The Shawshank Redemption".to_string(),
					year: 1994,
				},
				Movie {
					id: 12,
					title: "12 Angry Men".to_string(),
					year: 1957,
				},
			];
			Ok(ChromelyResponse::for_request(req.id.clone()).with_json(&movies)?)
		});
		routes.register_post("/democontroller/movies", |req| {
			let movies: Vec<Movie> = req.post_data.deserialize()?;
			Ok(ChromelyResponse::new().with_data(format!("{} movies saved", movies.len())))
		});
	}
}

register_controller!("democontroller", "/democontroller", || Ok(Arc::new(DemoController)));

fn app() -> ChromelyApp {
	ChromelyApp::builder()
		.engine_info(EngineInfo::new("120.0.6099.109", "120.1.10"))
		.build()
		.unwrap()
}

#[rstest]
fn test_build_without_runtime_fails() {
	// Act
	let result = ChromelyApp::builder().include_registered(false).build();

	// Assert
	assert!(matches!(result, Err(ChromelyError::NoRuntime)));
}

#[rstest]
fn test_build_with_explicit_runtime() {
	// Arrange
	let runtime = tokio::runtime::Builder::new_multi_thread()
		.worker_threads(2)
		.enable_all()
		.build()
		.unwrap();

	// Act
	let app = ChromelyApp::builder()
		.runtime(runtime.handle().clone())
		.build()
		.unwrap();

	// Assert
	assert!(app.route_table().contains(&RoutePath::get("/democontroller/movies")));
}

#[rstest]
#[tokio::test]
async fn test_registered_controller_is_discovered() {
	// Act
	let app = app();

	// Assert
	let route = app.route_table().get(&RoutePath::get("/democontroller/movies")).unwrap();
	assert_eq!(route.controller(), "democontroller");
	assert!(app.route_table().contains(&RoutePath::post("/democontroller/movies")));
}

#[rstest]
#[case("http://chromely.com/democontroller/movies", NavigationTarget::Custom)]
#[case("HTTP://Command.com/democontroller/movies", NavigationTarget::Command)]
#[case("https://github.com/chromelyapps/Chromely/issues", NavigationTarget::External)]
#[case("local://app/chromely.html", NavigationTarget::Passthrough)]
#[case("https://example.com/", NavigationTarget::Passthrough)]
#[tokio::test]
async fn test_navigation_target(#[case] url: &str, #[case] expected: NavigationTarget) {
	// Arrange
	let app = app();

	// Act & Assert
	assert_eq!(app.navigation_target(url), expected);
}

#[rstest]
#[tokio::test]
async fn test_scheme_navigation_returns_movies() {
	// Arrange
	let app = app();
	let (tx, rx) = oneshot::channel::<SchemeResponse>();

	// Act
	app.scheme_handler()
		.process_request(
			SchemeRequest::get("http://chromely.com/democontroller/movies"),
			Box::new(tx),
		)
		.unwrap();
	let response = rx.await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::OK);
	let movies: Vec<Movie> = serde_json::from_slice(&response.body).unwrap();
	assert_eq!(movies.len(), 2);
	assert_eq!(movies[1].title, "12 Angry Men");
}

#[rstest]
#[tokio::test]
async fn test_info_query_reports_engine_versions() {
	// Arrange
	let app = app();
	let (tx, rx) = oneshot::channel::<QueryOutcome>();

	// Act
	let accepted = app
		.query_handler()
		.on_query(3, r#"{"id":"info-1","method":"GET","url":"/INFO"}"#, false, Box::new(tx));
	let outcome = rx.await.unwrap();

	// Assert
	assert!(accepted);
	let QueryOutcome::Success(json) = outcome else {
		panic!("expected success, got {:?}", outcome);
	};
	let envelope: Value = serde_json::from_str(&json).unwrap();
	assert_eq!(envelope["requestId"], "info-1");
	assert_eq!(envelope["status"], 200);
	assert!(envelope["data"]["divObjective"].is_string());
	assert!(envelope["data"]["divPlatform"].is_string());
	let version = envelope["data"]["divVersion"].as_str().unwrap();
	assert!(version.starts_with("Chromium: 120.0.6099.109, CEF: 120.1.10"));
}

#[rstest]
#[tokio::test]
async fn test_query_post_binds_body() {
	// Arrange
	let app = app();
	let (tx, rx) = oneshot::channel::<QueryOutcome>();
	let raw = r#"{"method":"post","url":"/democontroller/movies","postData":[{"id":1,"title":"Up","year":2009}]}"#;

	// Act
	app.query_handler().on_query(4, raw, false, Box::new(tx));
	let outcome = rx.await.unwrap();

	// Assert
	let QueryOutcome::Success(json) = outcome else {
		panic!("expected success, got {:?}", outcome);
	};
	let envelope: Value = serde_json::from_str(&json).unwrap();
	assert_eq!(envelope["data"], "1 movies saved");
}

#[rstest]
fn test_load_config_merges_file_over_defaults() {
	// Arrange
	let mut file = NamedTempFile::with_suffix(".toml").unwrap();
	write!(
		file,
		r#"
app_name = "movies"
start_url = "local://app/index.html"

[custom_settings]
logSeverity = "debug"

[[url_schemes]]
name = "movies-api"
scheme = "http"
host = "movies.local"
type = "custom"
"#
	)
	.unwrap();

	// Act
	let config = load_config(Some(file.path())).unwrap();

	// Assert
	assert_eq!(config.app_name, "movies");
	assert_eq!(config.start_url, "local://app/index.html");
	assert_eq!(config.log_severity(), "debug");
	assert_eq!(config.custom_settings["locale"], "en-US");
	let registry = config.scheme_registry();
	assert!(registry.is_url_registered_custom_scheme("http://movies.local/movies"));
	assert!(!registry.is_url_registered_custom_scheme("http://chromely.com/movies"));
}

#[rstest]
fn test_load_config_without_file_uses_defaults() {
	// Act
	let config = load_config(None).unwrap();

	// Assert
	assert_eq!(config.start_url, "local://app/chromely.html");
	assert_eq!(config.url_schemes.len(), 4);
}

#[rstest]
fn test_load_config_rejects_unknown_extension() {
	// Act
	let result = load_config(Some(std::path::Path::new("settings.ini")));

	// Assert
	assert!(matches!(result, Err(ChromelyError::Config(_))));
}
