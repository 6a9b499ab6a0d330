//! Page-level configuration.
//!
//! The host page may embed a JSON object in `<script id="pipeline-config">`
//! overriding any subset of the tuned constants, e.g.
//!
//! ```json
//! { "theme": "night", "layout": { "min_width": 1800 }, "zoom": { "max_scale": 4.0 } }
//! ```

use serde::Deserialize;

use crate::components::pipeline_scheme::{LayoutConfig, SchemeTheme, ZoomConfig};
use crate::components::tube_strip::StripConfig;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub layout: LayoutConfig,
	pub zoom: ZoomConfig,
	pub strip: StripConfig,
	/// Theme preset name; unknown names fall back to the default theme.
	pub theme: Option<String>,
}

impl AppConfig {
	pub fn theme(&self) -> SchemeTheme {
		match self.theme.as_deref() {
			None => SchemeTheme::default(),
			Some(name) => SchemeTheme::by_name(name).unwrap_or_else(|| {
				log::warn!("pipeline-scheme: unknown theme '{}', using default", name);
				SchemeTheme::default()
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_overrides_keep_defaults() {
		let config: AppConfig = serde_json::from_str(
			r#"{"theme": "night", "layout": {"min_width": 1800}, "zoom": {"max_scale": 4.0}}"#,
		)
		.unwrap();

		assert_eq!(config.layout.min_width, 1800.0);
		assert_eq!(config.layout.bridge_offset, 0.75);
		assert_eq!(config.zoom.max_scale, 4.0);
		assert_eq!(config.zoom.min_scale, 0.5);
		assert_eq!(config.strip, StripConfig::default());
		assert_eq!(config.theme().name, "night");
	}

	#[test]
	fn empty_object_is_default() {
		let config: AppConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, AppConfig::default());
		assert_eq!(config.theme().name, "classic");
	}
}
