//! The reserved `/info` route.

use serde::{Deserialize, Serialize};

/// Path answered by the dispatcher itself, ahead of any controller route.
pub const INFO_PATH: &str = "/info";

const OBJECTIVE: &str = "To build HTML5 desktop apps using embedded Chromium. \
	Main form of communication with the Chromium rendering process is via \
	Ajax HTTP/XHR requests using custom schemes and domains, and JavaScript \
	query messages routed to native controllers.";

const PLATFORM: &str = "Cross-platform - Windows, Linux, MacOS. Built on Rust and the Chromium Embedded Framework.";

/// Versions of the embedded browser engine, reported by `/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
	pub chromium_version: String,
	pub cef_version: String,
}

impl Default for EngineInfo {
	fn default() -> Self {
		Self {
			chromium_version: "unknown".to_string(),
			cef_version: "unknown".to_string(),
		}
	}
}

impl EngineInfo {
	pub fn new(chromium_version: impl Into<String>, cef_version: impl Into<String>) -> Self {
		Self {
			chromium_version: chromium_version.into(),
			cef_version: cef_version.into(),
		}
	}

	/// `x64` or `x86`, after the pointer width of this build.
	pub fn bitness() -> &'static str {
		if cfg!(target_pointer_width = "64") {
			"x64"
		} else {
			"x86"
		}
	}

	/// One-line version summary.
	///
	/// # Examples
	///
	/// ```
	/// use chromely_dispatch::EngineInfo;
	///
	/// let info = EngineInfo::new("120.0.6099.130", "120.1.10");
	/// assert!(info.version_line().starts_with("Chromium: 120.0.6099.130, CEF: 120.1.10, Environment: "));
	/// ```
	pub fn version_line(&self) -> String {
		format!(
			"Chromium: {}, CEF: {}, Environment: {}",
			self.chromium_version,
			self.cef_version,
			Self::bitness()
		)
	}

	pub fn payload(&self) -> InfoPayload {
		InfoPayload {
			objective: OBJECTIVE.to_string(),
			platform: PLATFORM.to_string(),
			version: self.version_line(),
		}
	}
}

/// Body of the `/info` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoPayload {
	#[serde(rename = "divObjective")]
	pub objective: String,
	#[serde(rename = "divPlatform")]
	pub platform: String,
	#[serde(rename = "divVersion")]
	pub version: String,
}
