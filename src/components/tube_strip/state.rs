//! Layout and view state for the tube strip.
//!
//! Tubes are placed left to right in reverse input order (tube number one on
//! the left), each as wide as its length times `scale_factor`, separated by a
//! small gap. The strip zooms horizontally only: the view transform is
//! `translate(x, y) scale(k, 1)`.

use serde::Deserialize;

use super::types::Tube;

/// Tuned strip constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StripConfig {
	pub tube_height: f64,
	/// Blank space between neighbouring tubes.
	pub tube_gap: f64,
	/// Pixels per metre at zoom 1.
	pub scale_factor: f64,
	/// Horizontal margin kept free when fitting the strip.
	pub padding: f64,
	pub max_zoom: f64,
	pub zoom_in_factor: f64,
	pub zoom_out_factor: f64,
}

impl Default for StripConfig {
	fn default() -> Self {
		Self {
			tube_height: 20.0,
			tube_gap: 2.0,
			scale_factor: 5.0,
			padding: 40.0,
			max_zoom: 5.0,
			zoom_in_factor: 1.1,
			zoom_out_factor: 0.9,
		}
	}
}

#[derive(Clone, Debug)]
pub struct TubeShape {
	pub tube: Tube,
	pub x: f64,
	pub width: f64,
}

#[derive(Clone, Debug, Default)]
pub struct StripLayout {
	pub tubes: Vec<TubeShape>,
	/// Width including the trailing gap.
	pub total_width: f64,
}

pub fn strip_layout(tubes: &[Tube], config: &StripConfig) -> StripLayout {
	let mut x = 0.0;
	let shapes = tubes
		.iter()
		.rev()
		.map(|tube| {
			let width = tube.tube_length * config.scale_factor;
			let shape = TubeShape {
				tube: tube.clone(),
				x,
				width,
			};
			x += width + config.tube_gap;
			shape
		})
		.collect();

	StripLayout {
		tubes: shapes,
		total_width: x,
	}
}

/// Horizontal-only zoom with free panning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for StripTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl StripTransform {
	pub fn screen_to_world_x(&self, sx: f64) -> f64 {
		(sx - self.x) / self.k
	}

	pub fn to_svg(&self) -> String {
		format!("translate({}, {}) scale({}, 1)", self.x, self.y, self.k)
	}
}

#[derive(Clone, Debug, Default)]
struct DragState {
	active: bool,
	last_x: f64,
	last_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct StripState {
	pub transform: StripTransform,
	pub config: StripConfig,
	/// Zoom level that fits the whole strip; also the minimum zoom.
	fit_k: f64,
	drag: DragState,
	hovered: Option<u64>,
}

impl StripState {
	pub fn new(config: StripConfig) -> Self {
		Self {
			config,
			fit_k: 1.0,
			..Default::default()
		}
	}

	pub fn fit_scale(&self) -> f64 {
		self.fit_k
	}

	/// Scales the strip to the container (never above 1) and centres it.
	///
	/// A container without room inside the padding (e.g. hidden) keeps the
	/// current view.
	pub fn fit(&mut self, container_width: f64, container_height: f64, total_width: f64) {
		let available = container_width - 2.0 * self.config.padding;
		if available <= 0.0 {
			log::debug!("tube-strip: container too narrow to fit ({}px)", container_width);
			return;
		}
		let k = if total_width > 0.0 {
			(available / total_width).min(1.0)
		} else {
			1.0
		};
		self.fit_k = k;
		self.transform = StripTransform {
			x: (container_width - total_width * k) / 2.0,
			y: (container_height - self.config.tube_height) / 2.0,
			k,
		};
	}

	/// Zooms horizontally around container x `sx`. Negative `delta_y` zooms in.
	pub fn wheel(&mut self, delta_y: f64, sx: f64) {
		let factor = if delta_y < 0.0 {
			self.config.zoom_in_factor
		} else {
			self.config.zoom_out_factor
		};
		let prev = self.transform.k;
		if prev <= 0.0 {
			return;
		}
		let max = self.config.max_zoom.max(self.fit_k);
		let next = (prev * factor).clamp(self.fit_k, max);
		let ratio = next / prev;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.k = next;
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			last_x: x,
			last_y: y,
		};
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		self.transform.x += x - self.drag.last_x;
		self.transform.y += y - self.drag.last_y;
		self.drag.last_x = x;
		self.drag.last_y = y;
	}

	pub fn pointer_up(&mut self) {
		self.drag.active = false;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.active
	}

	pub fn set_hovered(&mut self, id: Option<u64>) {
		self.hovered = id;
	}

	pub fn hovered(&self) -> Option<u64> {
		self.hovered
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tube(id: u64, length: f64) -> Tube {
		Tube {
			id,
			tube_num: id as u32,
			tube_length: length,
			..Default::default()
		}
	}

	#[test]
	fn tubes_run_left_to_right_in_reverse_order() {
		let config = StripConfig::default();
		let layout = strip_layout(&[tube(3, 10.0), tube(2, 12.0), tube(1, 8.0)], &config);

		let ids: Vec<u64> = layout.tubes.iter().map(|t| t.tube.id).collect();
		assert_eq!(ids, vec![1, 2, 3]);
		assert_eq!(layout.tubes[0].x, 0.0);
		assert_eq!(layout.tubes[1].x, 42.0);
		assert_eq!(layout.tubes[2].x, 104.0);
		assert_eq!(layout.total_width, 156.0);
	}

	#[test]
	fn fit_never_enlarges() {
		let mut state = StripState::new(StripConfig::default());
		state.fit(1000.0, 200.0, 300.0);
		assert_eq!(state.fit_scale(), 1.0);
		assert_eq!(state.transform.x, 350.0);
		assert_eq!(state.transform.y, 90.0);

		state.fit(1000.0, 200.0, 4600.0);
		assert_eq!(state.fit_scale(), 0.2);
		assert!((state.transform.x - 40.0).abs() < 1e-9);
	}

	#[test]
	fn narrow_container_keeps_view() {
		let mut state = StripState::new(StripConfig::default());
		state.fit(1000.0, 200.0, 4600.0);
		let fitted = state.transform;

		state.fit(80.0, 200.0, 4600.0);
		state.fit(0.0, 0.0, 4600.0);
		assert_eq!(state.transform, fitted);
		assert_eq!(state.fit_scale(), 0.2);

		state.wheel(-1.0, 0.0);
		assert!(state.transform.x.is_finite());
		assert!(state.transform.k > 0.2);
	}

	#[test]
	fn zoom_is_anchored_and_bounded() {
		let mut state = StripState::new(StripConfig::default());
		state.fit(1000.0, 200.0, 4600.0);

		let before = state.transform.screen_to_world_x(620.0);
		state.wheel(-1.0, 620.0);
		let after = state.transform.screen_to_world_x(620.0);
		assert!((before - after).abs() < 1e-9);
		assert!(state.transform.k > state.fit_scale());

		for _ in 0..20 {
			state.wheel(1.0, 620.0);
		}
		assert_eq!(state.transform.k, state.fit_scale());
		for _ in 0..100 {
			state.wheel(-1.0, 620.0);
		}
		assert_eq!(state.transform.k, 5.0);
	}

	#[test]
	fn drag_pans_both_axes() {
		let mut state = StripState::new(StripConfig::default());
		state.pointer_down(10.0, 10.0);
		state.pointer_move(25.0, 4.0);
		state.pointer_up();
		state.pointer_move(100.0, 100.0);
		assert_eq!((state.transform.x, state.transform.y), (15.0, -6.0));
	}
}
