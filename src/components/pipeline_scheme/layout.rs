//! Mapping from kilometre offsets to scheme coordinates.
//!
//! # Layout
//!
//! Each pipeline occupies one horizontal band. Bands are stacked bottom to top
//! by pipeline index. Within a band the pipes are drawn right to left (the start
//! city is on the right), one fixed-width slot per pipe, with an empty slot at
//! each end that carries the city label:
//!
//! ```text
//!  padding                                              padding
//!  |<->|[ empty ][ pipe n-1 ] ... [ pipe 1 ][ pipe 0 ][ empty ]|<->|
//!       end city                                       start city
//! ```
//!
//! Everything here is a pure function of the data, the container width and
//! [`LayoutConfig`], so re-running the layout with the same inputs yields the
//! same scene.

use serde::Deserialize;

use super::types::{Node, NodeType, Pipe, Pipeline};

/// Tuned layout constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Horizontal padding on both sides of every band, in pixels.
	pub padding: f64,
	/// Height of a pipe rect.
	pub band_height: f64,
	/// Vertical gap between bands, also used above the first band.
	pub band_margin: f64,
	/// Below this window width the scheme keeps this width and scrolls.
	pub min_width: f64,
	/// Tolerance (km) for matching a valve or host to a pipe boundary.
	pub boundary_epsilon: f64,
	/// Pulls bridge glyphs away from the slot edges.
	pub bridge_offset: f64,
	/// Node glyph size relative to `band_height`.
	pub node_size_factor: f64,
	/// Vertical distance between a band and its labels.
	pub label_offset: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			padding: 40.0,
			band_height: 8.0,
			band_margin: 60.0,
			min_width: 1500.0,
			boundary_epsilon: 0.001,
			bridge_offset: 0.75,
			node_size_factor: 4.0,
			label_offset: 5.0,
		}
	}
}

impl LayoutConfig {
	/// Total SVG height for `count` pipelines.
	pub fn total_height(&self, count: usize) -> f64 {
		count as f64 * (self.band_height + self.band_margin) + self.band_margin
	}

	/// Top edge of the band for pipeline `index` out of `count`.
	pub fn band_y(&self, index: usize, count: usize) -> f64 {
		(count - 1 - index) as f64 * (self.band_height + self.band_margin) + self.band_margin
	}

	pub fn node_size(&self) -> f64 {
		self.band_height * self.node_size_factor
	}
}

/// Width the scheme is laid out at.
///
/// Narrow windows get the fixed minimum width and scroll horizontally; wider
/// ones use whatever the container currently measures.
pub fn scheme_width(window_width: f64, container_width: f64, config: &LayoutConfig) -> f64 {
	if window_width < config.min_width {
		config.min_width
	} else {
		container_width
	}
}

/// Axis-aligned rectangle in scheme coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn center_x(&self) -> f64 {
		self.x + self.width / 2.0
	}

	pub fn contains_x(&self, x: f64) -> bool {
		x >= self.x && x <= self.x + self.width
	}
}

/// Text anchored at its horizontal centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
	pub text: String,
	pub x: f64,
	pub y: f64,
}

/// Placed pipe rect.
#[derive(Clone, Debug)]
pub struct PipeShape {
	pub pipe: Pipe,
	pub rect: Rect,
	/// Pressure limit text above the rect, present only for limited pipes.
	pub limit_label: Option<Label>,
}

/// Placed node glyph.
#[derive(Clone, Debug)]
pub struct NodeShape {
	pub node: Node,
	/// Glyph centre.
	pub x: f64,
	pub y: f64,
	/// Side of the square the glyph is designed for.
	pub size: f64,
}

impl NodeShape {
	/// Scale applied to glyph artwork drawn on a 20x20 grid.
	pub fn glyph_scale(&self) -> f64 {
		self.size / 20.0
	}

	/// SVG transform placing the 20x20 glyph grid around the centre.
	pub fn transform(&self) -> String {
		let s = self.glyph_scale();
		format!(
			"translate({}, {}) scale({})",
			self.x - 10.0 * s,
			self.y - 10.0 * s,
			s
		)
	}
}

/// One pipeline's row.
#[derive(Clone, Debug)]
pub struct BandLayout {
	pub title: String,
	pub y: f64,
	pub slot_width: f64,
	/// Placeholders at the end (left) and start (right) of the band.
	pub empty_slots: [Rect; 2],
	pub start_label: Label,
	pub end_label: Label,
	pub pipes: Vec<PipeShape>,
	pub nodes: Vec<NodeShape>,
}

/// The complete scene for a set of pipelines.
#[derive(Clone, Debug, Default)]
pub struct SchemeLayout {
	pub width: f64,
	pub height: f64,
	pub bands: Vec<BandLayout>,
}

impl SchemeLayout {
	pub fn pipe_count(&self) -> usize {
		self.bands.iter().map(|b| b.pipes.len()).sum()
	}

	pub fn node_count(&self) -> usize {
		self.bands.iter().map(|b| b.nodes.len()).sum()
	}

	pub fn find_node(&self, id: u64) -> Option<&NodeShape> {
		self.bands
			.iter()
			.flat_map(|b| b.nodes.iter())
			.find(|n| n.node.id == id)
	}

	pub fn find_pipe(&self, id: u64) -> Option<&PipeShape> {
		self.bands
			.iter()
			.flat_map(|b| b.pipes.iter())
			.find(|p| p.pipe.id == id)
	}
}

/// Horizontal geometry shared by everything in one band.
struct BandGeometry {
	/// Right edge of the drawable area (`width - padding`).
	right: f64,
	slot_width: f64,
}

impl BandGeometry {
	fn new(width: f64, pipe_count: usize, config: &LayoutConfig) -> Self {
		let available = width - 2.0 * config.padding;
		Self {
			right: width - config.padding,
			slot_width: available / (pipe_count + 2) as f64,
		}
	}

	/// Left edge of the slot for pipe `index`. Index `-1` is the start placeholder.
	fn slot_x(&self, index: isize) -> f64 {
		self.right - (index + 2) as f64 * self.slot_width
	}
}

/// Lays out every pipeline at the given width.
pub fn layout(pipelines: &[Pipeline], width: f64, config: &LayoutConfig) -> SchemeLayout {
	let count = pipelines.len();
	let bands = pipelines
		.iter()
		.enumerate()
		.map(|(index, pipeline)| {
			layout_band(pipeline, config.band_y(index, count), width, config)
		})
		.collect();

	SchemeLayout {
		width,
		height: config.total_height(count),
		bands,
	}
}

fn layout_band(pipeline: &Pipeline, y: f64, width: f64, config: &LayoutConfig) -> BandLayout {
	let pipe_count = pipeline.pipes.len();
	let geo = BandGeometry::new(width, pipe_count, config);
	let slot = |x: f64| Rect {
		x,
		y,
		width: geo.slot_width,
		height: config.band_height,
	};

	let end_slot = slot(geo.slot_x(pipe_count as isize));
	let start_slot = slot(geo.slot_x(-1));
	let (start_city, end_city) = pipeline.cities();
	let label_y = y - config.label_offset;

	let pipes = pipeline
		.pipes
		.iter()
		.enumerate()
		.map(|(i, pipe)| {
			let rect = slot(geo.slot_x(i as isize));
			let limit_label = pipe.limit.as_ref().map(|limit| Label {
				text: format!("≤ {} MPa", limit.pressure_limit),
				x: rect.center_x(),
				y: label_y,
			});
			PipeShape {
				pipe: pipe.clone(),
				rect,
				limit_label,
			}
		})
		.collect();

	let node_y = y + config.band_height / 2.0;
	let nodes = pipeline
		.nodes
		.iter()
		.filter_map(|node| {
			let Some(x) = node_x(node, &pipeline.pipes, &geo, config) else {
				log::debug!(
					"pipeline-scheme: node {} at {} km on '{}' has no hosting pipe, skipped",
					node.id,
					node.location_point,
					pipeline.title
				);
				return None;
			};
			Some(NodeShape {
				node: node.clone(),
				x,
				y: node_y,
				size: config.node_size(),
			})
		})
		.collect();

	BandLayout {
		title: pipeline.title.clone(),
		y,
		slot_width: geo.slot_width,
		empty_slots: [end_slot, start_slot],
		start_label: Label {
			text: start_city.to_string(),
			x: start_slot.center_x(),
			y: label_y,
		},
		end_label: Label {
			text: end_city.to_string(),
			x: end_slot.center_x(),
			y: label_y,
		},
		pipes,
		nodes,
	}
}

/// Horizontal position of a node, or `None` when no pipe hosts it.
fn node_x(node: &Node, pipes: &[Pipe], geo: &BandGeometry, config: &LayoutConfig) -> Option<f64> {
	let point = node.location_point;
	match node.node_type {
		NodeType::Bridge => {
			let (index, pipe) = pipes.iter().enumerate().find(|(_, p)| p.contains(point))?;
			let t = pipe.fraction_of(point);
			let inner = config.bridge_offset + t * (1.0 - 2.0 * config.bridge_offset);
			Some(geo.slot_x(index as isize) + inner * geo.slot_width)
		}
		NodeType::Valve | NodeType::Host => {
			let eps = config.boundary_epsilon;
			let (index, pipe) = pipes.iter().enumerate().find(|(_, p)| {
				(point - p.start_point).abs() < eps || (point - p.end_point).abs() < eps
			})?;
			let at_end = (point - pipe.end_point).abs() < eps;
			let edge = if at_end { 1 } else { 0 };
			Some(geo.right - (index + edge + 1) as f64 * geo.slot_width)
		}
		NodeType::Unknown => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::pipeline_scheme::types::PipeLimit;

	fn pipe(id: u64, start: f64, end: f64) -> Pipe {
		Pipe {
			id,
			start_point: start,
			end_point: end,
			..Default::default()
		}
	}

	fn node(id: u64, node_type: NodeType, at: f64) -> Node {
		Node {
			id,
			node_type,
			location_point: at,
			..Default::default()
		}
	}

	fn moscow_kazan() -> Pipeline {
		Pipeline {
			title: "Moscow - Kazan".into(),
			pipes: vec![pipe(1, 0.0, 100.0), pipe(2, 100.0, 250.0)],
			nodes: vec![node(10, NodeType::Bridge, 150.0)],
			..Default::default()
		}
	}

	#[test]
	fn moscow_kazan_scene() {
		let config = LayoutConfig::default();
		let scene = layout(&[moscow_kazan()], 1600.0, &config);

		assert_eq!(scene.pipe_count(), 2);
		assert_eq!(scene.node_count(), 1);

		let band = &scene.bands[0];
		assert_eq!(band.start_label.text, "Moscow");
		assert_eq!(band.end_label.text, "Kazan");
		// Start city sits on the right.
		assert!(band.start_label.x > band.end_label.x);

		let bridge = scene.find_node(10).unwrap();
		let second = scene.find_pipe(2).unwrap();
		assert!(second.rect.contains_x(bridge.x));
		assert!(!scene.find_pipe(1).unwrap().rect.contains_x(bridge.x));
	}

	#[test]
	fn slots_fill_the_padded_width() {
		let config = LayoutConfig::default();
		let scene = layout(&[moscow_kazan()], 1600.0, &config);
		let band = &scene.bands[0];

		assert_eq!(band.slot_width, (1600.0 - 80.0) / 4.0);
		assert_eq!(band.empty_slots[0].x, config.padding);
		let right = band.empty_slots[1];
		assert!((right.x + right.width - (1600.0 - config.padding)).abs() < 1e-9);
		// Pipe 0 is adjacent to the start placeholder.
		let first = scene.find_pipe(1).unwrap().rect;
		assert!((first.x + first.width - right.x).abs() < 1e-9);
	}

	#[test]
	fn bands_stack_bottom_to_top() {
		let config = LayoutConfig::default();
		let lines = vec![moscow_kazan(), moscow_kazan(), moscow_kazan()];
		let scene = layout(&lines, 1600.0, &config);

		assert_eq!(scene.height, 3.0 * 68.0 + 60.0);
		assert_eq!(scene.bands[2].y, 60.0);
		assert_eq!(scene.bands[1].y, 128.0);
		assert_eq!(scene.bands[0].y, 196.0);
	}

	#[test]
	fn layout_is_deterministic() {
		let config = LayoutConfig::default();
		let lines = vec![moscow_kazan()];
		let a = layout(&lines, 1500.0, &config);
		let b = layout(&lines, 1500.0, &config);

		assert_eq!(a.pipe_count(), b.pipe_count());
		assert_eq!(a.node_count(), b.node_count());
		for (x, y) in a.bands.iter().zip(&b.bands) {
			assert_eq!(x.y, y.y);
			assert_eq!(x.nodes[0].x, y.nodes[0].x);
		}
	}

	#[test]
	fn valves_snap_to_pipe_edges() {
		let config = LayoutConfig::default();
		let mut line = moscow_kazan();
		line.nodes = vec![
			node(20, NodeType::Valve, 0.0),
			node(21, NodeType::Host, 100.0),
			node(22, NodeType::Valve, 250.0005),
		];
		let scene = layout(&[line], 1600.0, &config);
		let first = scene.find_pipe(1).unwrap().rect;
		let second = scene.find_pipe(2).unwrap().rect;

		assert_eq!(scene.node_count(), 3);
		// Start boundary: right edge of the first pipe.
		assert!((scene.find_node(20).unwrap().x - (first.x + first.width)).abs() < 1e-9);
		// Shared boundary: between the two pipes.
		assert!((scene.find_node(21).unwrap().x - first.x).abs() < 1e-9);
		// End boundary within epsilon: left edge of the last pipe.
		assert!((scene.find_node(22).unwrap().x - second.x).abs() < 1e-9);
	}

	#[test]
	fn bridge_is_biased_into_the_slot() {
		let config = LayoutConfig::default();
		let mut line = moscow_kazan();
		line.nodes = vec![
			node(30, NodeType::Bridge, 100.0),
			node(31, NodeType::Bridge, 250.0),
		];
		let scene = layout(&[line], 1600.0, &config);
		let band = &scene.bands[0];
		let first = scene.find_pipe(1).unwrap().rect;

		// 100 km is the end of the first pipe, the first containing match.
		let at_end = scene.find_node(30).unwrap().x;
		assert!((at_end - (first.x + 0.25 * band.slot_width)).abs() < 1e-9);
		let second = scene.find_pipe(2).unwrap().rect;
		let last = scene.find_node(31).unwrap().x;
		assert!((last - (second.x + 0.25 * band.slot_width)).abs() < 1e-9);
	}

	#[test]
	fn unresolvable_nodes_are_omitted() {
		let config = LayoutConfig::default();
		let line = Pipeline {
			title: "A - B".into(),
			pipes: vec![pipe(1, 0.0, 100.0), pipe(2, 120.0, 200.0)],
			nodes: vec![
				node(40, NodeType::Bridge, 110.0),
				node(41, NodeType::Valve, 110.0),
				node(42, NodeType::Unknown, 50.0),
				node(43, NodeType::Valve, 120.0),
			],
			..Default::default()
		};
		let scene = layout(&[line], 1600.0, &config);

		assert_eq!(scene.node_count(), 1);
		assert!(scene.find_node(40).is_none());
		assert!(scene.find_node(41).is_none());
		assert!(scene.find_node(42).is_none());
		assert!(scene.find_node(43).is_some());
	}

	#[test]
	fn limit_label_only_for_limited_pipes() {
		let config = LayoutConfig::default();
		let mut line = moscow_kazan();
		line.pipes[0].limit = Some(PipeLimit {
			pressure_limit: 4.5,
			..Default::default()
		});
		let scene = layout(&[line], 1600.0, &config);

		let limited = scene.find_pipe(1).unwrap();
		let label = limited.limit_label.as_ref().unwrap();
		assert!(label.text.contains("4.5"));
		assert!(label.y < limited.rect.y);
		assert_eq!(label.x, limited.rect.center_x());
		assert!(scene.find_pipe(2).unwrap().limit_label.is_none());
	}

	#[test]
	fn narrow_windows_use_minimum_width() {
		let config = LayoutConfig::default();
		assert_eq!(scheme_width(1200.0, 1180.0, &config), 1500.0);
		assert_eq!(scheme_width(1920.0, 1880.0, &config), 1880.0);
	}

	#[test]
	fn glyph_transform_centres_on_node() {
		let shape = NodeShape {
			node: Node::default(),
			x: 100.0,
			y: 50.0,
			size: 32.0,
		};
		assert_eq!(shape.glyph_scale(), 1.6);
		assert_eq!(shape.transform(), "translate(84, 34) scale(1.6)");
	}
}
