//! # Chromely Routing
//!
//! Controllers register handlers under a [`RoutePath`](chromely_core::RoutePath);
//! [`ControllerScanner`] collects them into a read-only [`RouteTable`].
//!
//! ## Features
//!
//! - `inventory` (default): link-time controller discovery through
//!   [`register_controller!`].

pub mod controller;
pub mod registration;
pub mod route;
pub mod scanner;
pub mod table;

pub use controller::{Controller, ControllerRoutes};
pub use registration::{ControllerFactory, ControllerRegistration};
#[cfg(feature = "inventory")]
pub use registration::registered_controllers;
pub use route::{AsyncHandler, CommandHandler, Route, RouteAction, SyncHandler};
pub use scanner::ControllerScanner;
pub use table::RouteTable;

// Re-export inventory for macro usage
#[cfg(feature = "inventory")]
#[doc(hidden)]
pub use inventory;
