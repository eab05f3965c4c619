//! Controller discovery and route table construction.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::controller::{Controller, ControllerRoutes};
use crate::registration::ControllerRegistration;
use crate::table::RouteTable;

enum ControllerSource {
	Instance {
		name: String,
		controller: Arc<dyn Controller>,
	},
	Registration(ControllerRegistration),
}

/// Collects routes from controllers into a [`RouteTable`].
///
/// Controllers are visited in this order: instances added with
/// [`with_controller`](Self::with_controller), then
/// [`with_registration`](Self::with_registration) entries, then (with the
/// `inventory` feature) link-time registrations, whose relative order is
/// unspecified. When two controllers register the same key, the first one
/// visited keeps it.
///
/// Scanning never fails. A controller whose factory errors is skipped, and a
/// panic stops the scan with the routes collected so far.
///
/// # Examples
///
/// ```
/// use chromely_core::{ChromelyResponse, RoutePath};
/// use chromely_routing::{Controller, ControllerRoutes, ControllerScanner};
/// use std::sync::Arc;
///
/// struct Movies;
///
/// impl Controller for Movies {
///     fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
///         routes.register_get("/demo/movies", |_| Ok(ChromelyResponse::new()));
///     }
/// }
///
/// let table = ControllerScanner::new()
///     .include_registered(false)
///     .with_controller("movies", Arc::new(Movies))
///     .scan();
/// assert!(table.contains(&RoutePath::get("/demo/movies")));
/// ```
pub struct ControllerScanner {
	sources: Vec<ControllerSource>,
	include_registered: bool,
}

impl Default for ControllerScanner {
	fn default() -> Self {
		Self::new()
	}
}

impl ControllerScanner {
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
			include_registered: cfg!(feature = "inventory"),
		}
	}

	/// Add an already constructed controller.
	pub fn with_controller(mut self, name: impl Into<String>, controller: Arc<dyn Controller>) -> Self {
		self.sources.push(ControllerSource::Instance {
			name: name.into(),
			controller,
		});
		self
	}

	pub fn with_registration(mut self, registration: ControllerRegistration) -> Self {
		self.sources.push(ControllerSource::Registration(registration));
		self
	}

	/// Whether to include controllers submitted with `register_controller!`.
	pub fn include_registered(mut self, include: bool) -> Self {
		self.include_registered = include;
		self
	}

	pub fn scan(self) -> RouteTable {
		let mut table = RouteTable::new();
		let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.scan_into(&mut table)));
		if let Err(payload) = outcome {
			tracing::error!(
				panic = %panic_message(payload.as_ref()),
				routes = table.len(),
				"controller scan aborted, continuing with the routes found so far"
			);
		}
		tracing::info!(routes = table.len(), "route table built");
		table
	}

	fn scan_into(self, table: &mut RouteTable) {
		let mut sources = self.sources;
		if self.include_registered {
			sources.extend(linked_registrations().map(ControllerSource::Registration));
		}

		for source in sources {
			let (name, controller) = match source {
				ControllerSource::Instance { name, controller } => (name, controller),
				ControllerSource::Registration(registration) => match (registration.factory)() {
					Ok(controller) => {
						tracing::debug!(
							controller = registration.name,
							base_route = registration.route,
							"controller created"
						);
						(registration.name.to_string(), controller)
					}
					Err(e) => {
						tracing::warn!(
							controller = registration.name,
							error = %e,
							"failed to create controller, skipping"
						);
						continue;
					}
				},
			};
			merge_controller(table, name, controller);
		}
	}
}

fn merge_controller(table: &mut RouteTable, name: String, controller: Arc<dyn Controller>) {
	let mut routes = ControllerRoutes::new(name);
	controller.register_routes(&mut routes);

	let controller_name = routes.controller().to_string();
	let total = routes.len();
	let added = routes
		.into_routes()
		.map(|route| table.insert_first(route))
		.filter(|added| *added)
		.count();
	tracing::debug!(
		controller = %controller_name,
		added,
		dropped = total - added,
		"controller routes merged"
	);
}

#[cfg(feature = "inventory")]
fn linked_registrations() -> impl Iterator<Item = ControllerRegistration> {
	inventory::iter::<ControllerRegistration>
		.into_iter()
		.copied()
}

#[cfg(not(feature = "inventory"))]
fn linked_registrations() -> impl Iterator<Item = ControllerRegistration> {
	std::iter::empty()
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
