//! The route table.

use chromely_core::RoutePath;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::route::Route;

/// Maps a [`RoutePath`] to its [`Route`].
///
/// A table is filled once, typically by [`ControllerScanner`], and only read
/// afterwards: lookups take `&self` and the table is shared through `Arc`
/// across concurrently dispatched requests.
///
/// [`ControllerScanner`]: crate::ControllerScanner
#[derive(Debug, Default)]
pub struct RouteTable {
	routes: HashMap<RoutePath, Route>,
}

impl RouteTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert `route` unless its key is taken. Returns whether it was added.
	pub(crate) fn insert_first(&mut self, route: Route) -> bool {
		match self.routes.entry(route.route_path().clone()) {
			Entry::Occupied(existing) => {
				tracing::debug!(
					route = %route.route_path(),
					kept = existing.get().controller(),
					dropped = route.controller(),
					"duplicate route key, keeping first registration"
				);
				false
			}
			Entry::Vacant(slot) => {
				slot.insert(route);
				true
			}
		}
	}

	pub fn get(&self, route_path: &RoutePath) -> Option<&Route> {
		self.routes.get(route_path)
	}

	pub fn contains(&self, route_path: &RoutePath) -> bool {
		self.routes.contains_key(route_path)
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Route> {
		self.routes.values()
	}
}

impl FromIterator<Route> for RouteTable {
	/// Build a table keeping the first route of each key.
	fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
		let mut table = Self::new();
		for route in iter {
			table.insert_first(route);
		}
		table
	}
}
