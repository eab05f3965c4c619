//! Controller registrations.
//!
//! A registration carries what a controller marker would: the controller
//! name, its base route, and how to build it. Registrations are passed to
//! [`ControllerScanner`](crate::ControllerScanner) explicitly or, with the
//! `inventory` feature, submitted at link time with [`register_controller!`].
//!
//! [`register_controller!`]: crate::register_controller

use std::fmt;
use std::sync::Arc;

use crate::controller::Controller;

/// Builds a controller instance.
pub type ControllerFactory = fn() -> anyhow::Result<Arc<dyn Controller>>;

/// A controller known to the scanner.
#[derive(Clone, Copy)]
pub struct ControllerRegistration {
	/// Controller name, e.g. `"democontroller"`.
	pub name: &'static str,
	/// Base route the controller's paths live under, e.g. `"/democontroller"`.
	pub route: &'static str,
	pub factory: ControllerFactory,
}

impl ControllerRegistration {
	pub const fn new(name: &'static str, route: &'static str, factory: ControllerFactory) -> Self {
		Self {
			name,
			route,
			factory,
		}
	}
}

impl fmt::Debug for ControllerRegistration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ControllerRegistration")
			.field("name", &self.name)
			.field("route", &self.route)
			.finish_non_exhaustive()
	}
}

#[cfg(feature = "inventory")]
inventory::collect!(ControllerRegistration);

/// Register a controller for link-time discovery.
///
/// # Examples
///
/// ```
/// use chromely_core::ChromelyResponse;
/// use chromely_routing::{Controller, ControllerRoutes, register_controller, registered_controllers};
/// use std::sync::Arc;
///
/// struct Ping;
///
/// impl Controller for Ping {
///     fn register_routes(self: Arc<Self>, routes: &mut ControllerRoutes) {
///         routes.register_get("/ping", |_| Ok(ChromelyResponse::new().with_data("pong")));
///     }
/// }
///
/// register_controller!("ping", "/ping", || Ok(Arc::new(Ping)));
///
/// assert!(registered_controllers().iter().any(|r| r.name == "ping"));
/// ```
#[cfg(feature = "inventory")]
#[macro_export]
macro_rules! register_controller {
	($name:expr, $route:expr, $factory:expr) => {
		$crate::inventory::submit! {
			$crate::ControllerRegistration::new($name, $route, $factory)
		}
	};
}

/// All controllers submitted with [`register_controller!`].
///
/// [`register_controller!`]: crate::register_controller
#[cfg(feature = "inventory")]
pub fn registered_controllers() -> Vec<&'static ControllerRegistration> {
	inventory::iter::<ControllerRegistration>
		.into_iter()
		.collect()
}
