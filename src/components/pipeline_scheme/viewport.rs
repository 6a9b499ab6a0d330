//! Pan and zoom transform for the scheme.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: SVG user units produced by the layout.
//! - **Screen-space**: pixels relative to the scheme container's content box.
//!
//! A world point `w` appears at `offset + scale * w` on screen. The transform is
//! applied to the SVG element with `transform-origin: 0 0`.

use serde::Deserialize;

/// Zoom limits and wheel step.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	/// Scale change per wheel notch.
	pub step: f64,
	/// Pointer travel (px) after which a press counts as a drag, not a click.
	pub click_tolerance: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 3.0,
			step: 0.1,
			click_tolerance: 3.0,
		}
	}
}

/// Current view transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(self.x + wx * self.k, self.y + wy * self.k)
	}

	/// Changes the scale to `new_k` keeping the world point under `(sx, sy)` fixed.
	pub fn zoom_to(&mut self, new_k: f64, sx: f64, sy: f64) {
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	/// Applies one wheel notch at the cursor. Negative `delta_y` zooms in.
	///
	/// Returns `false` when the scale is already at the limit in that direction.
	pub fn wheel(&mut self, delta_y: f64, sx: f64, sy: f64, config: &ZoomConfig) -> bool {
		let delta = if delta_y > 0.0 { -config.step } else { config.step };
		let new_k = (self.k + delta).clamp(config.min_scale, config.max_scale);
		if (new_k - self.k).abs() < f64::EPSILON {
			return false;
		}
		self.zoom_to(new_k, sx, sy);
		true
	}

	/// Shifts the view by a screen-space delta. Panning is unbounded.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// CSS `transform` value for the SVG element.
	pub fn to_css(&self) -> String {
		format!("translate({}px, {}px) scale({})", self.x, self.y, self.k)
	}
}
