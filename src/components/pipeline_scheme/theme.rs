//! Visual theming for the pipeline scheme.
//!
//! Provides the color set for pipes, node glyphs and labels.

use super::types::{NodeStateKind, PipeStateKind};

/// Stroke width of the outline marking pressure-limited pipes.
const LIMIT_STROKE_WIDTH: f64 = 1.5;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors per pipe state.
#[derive(Clone, Debug)]
pub struct PipeStatePalette {
	pub repair: Color,
	pub operation: Color,
	pub disabled: Color,
	pub limited: Color,
	pub depletion: Color,
	pub diagnostics: Color,
}

impl PipeStatePalette {
	pub fn get(&self, kind: PipeStateKind) -> Option<Color> {
		match kind {
			PipeStateKind::Repair => Some(self.repair),
			PipeStateKind::Operation => Some(self.operation),
			PipeStateKind::Disabled => Some(self.disabled),
			PipeStateKind::Limited => Some(self.limited),
			PipeStateKind::Depletion => Some(self.depletion),
			PipeStateKind::Diagnostics => Some(self.diagnostics),
			PipeStateKind::Unknown => None,
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct SchemeTheme {
	pub name: &'static str,
	pub background: Color,
	/// Pipes without a known state, and the stub pipes inside glyphs.
	pub pipe: Color,
	pub pipe_states: PipeStatePalette,
	pub empty_pipe: Color,
	pub empty_pipe_stroke: Color,
	pub limit_stroke: Color,
	pub limit_text: Color,
	pub valve_open: Color,
	pub valve_closed: Color,
	pub valve_default: Color,
	pub bridge_open: Color,
	pub bridge_closed: Color,
	pub host_outline: Color,
	pub label: Color,
	pub selection: Color,
}

impl SchemeTheme {
	/// Light theme matching the operator console (default)
	pub fn classic() -> Self {
		Self {
			name: "classic",
			background: Color::rgb(255, 255, 255),
			pipe: Color::rgb(74, 137, 220),
			pipe_states: PipeStatePalette {
				repair: Color::rgb(233, 87, 63),
				operation: Color::rgb(74, 137, 220),
				disabled: Color::rgb(170, 178, 189),
				limited: Color::rgb(246, 187, 66),
				depletion: Color::rgb(150, 122, 220),
				diagnostics: Color::rgb(55, 188, 155),
			},
			empty_pipe: Color::rgb(255, 255, 255),
			empty_pipe_stroke: Color::rgb(192, 192, 192),
			limit_stroke: Color::rgb(218, 68, 83),
			limit_text: Color::rgb(218, 68, 83),
			valve_open: Color::rgb(0, 255, 0),
			valve_closed: Color::rgb(255, 0, 0),
			valve_default: Color::rgb(128, 128, 128),
			bridge_open: Color::rgb(0, 255, 0),
			bridge_closed: Color::rgb(128, 128, 128),
			host_outline: Color::rgb(128, 128, 128),
			label: Color::rgb(51, 51, 51),
			selection: Color::rgba(255, 170, 0, 0.9),
		}
	}

	/// Dark control-room theme
	pub fn night() -> Self {
		Self {
			name: "night",
			background: Color::rgb(22, 27, 34),
			pipe: Color::rgb(94, 129, 172),
			pipe_states: PipeStatePalette {
				repair: Color::rgb(191, 97, 106),
				operation: Color::rgb(94, 129, 172),
				disabled: Color::rgb(76, 86, 106),
				limited: Color::rgb(235, 203, 139),
				depletion: Color::rgb(180, 142, 173),
				diagnostics: Color::rgb(143, 188, 187),
			},
			empty_pipe: Color::rgb(30, 35, 42),
			empty_pipe_stroke: Color::rgb(90, 100, 115),
			limit_stroke: Color::rgb(235, 203, 139),
			limit_text: Color::rgb(235, 203, 139),
			valve_open: Color::rgb(163, 190, 140),
			valve_closed: Color::rgb(191, 97, 106),
			valve_default: Color::rgb(120, 130, 145),
			bridge_open: Color::rgb(163, 190, 140),
			bridge_closed: Color::rgb(120, 130, 145),
			host_outline: Color::rgb(120, 130, 145),
			label: Color::rgb(216, 222, 233),
			selection: Color::rgba(235, 203, 139, 0.9),
		}
	}

	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"classic" => Some(Self::classic()),
			"night" => Some(Self::night()),
			_ => None,
		}
	}

	/// Valve icon fill for a node state; nodes without state are grey.
	pub fn valve_color(&self, state: Option<NodeStateKind>) -> Color {
		match state {
			Some(NodeStateKind::Open) => self.valve_open,
			Some(NodeStateKind::Closed) => self.valve_closed,
			_ => self.valve_default,
		}
	}

	pub fn bridge_color(&self, open: bool) -> Color {
		if open {
			self.bridge_open
		} else {
			self.bridge_closed
		}
	}

	/// Pipe fill: backend color, then palette color for the state, then default.
	pub fn pipe_fill(&self, server_color: Option<&str>, state: Option<PipeStateKind>) -> String {
		if let Some(color) = server_color.filter(|c| !c.is_empty()) {
			return color.to_string();
		}
		state
			.and_then(|kind| self.pipe_states.get(kind))
			.unwrap_or(self.pipe)
			.to_css()
	}

	/// Outline color and width of a pipe rect; only limited pipes get one.
	pub fn pipe_stroke(&self, limited: bool) -> (String, f64) {
		if limited {
			(self.limit_stroke.to_css(), LIMIT_STROKE_WIDTH)
		} else {
			("none".to_string(), 0.0)
		}
	}
}

impl Default for SchemeTheme {
	fn default() -> Self {
		Self::classic()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_formatting() {
		assert_eq!(Color::rgb(74, 137, 220).to_css(), "#4a89dc");
		assert_eq!(
			Color::rgba(255, 170, 0, 0.5).to_css(),
			"rgba(255, 170, 0, 0.5)"
		);
		assert_eq!(Color::rgb(0, 0, 0).lighten(1.0).to_css(), "#ffffff");
	}

	#[test]
	fn pipe_fill_precedence() {
		let theme = SchemeTheme::classic();
		assert_eq!(
			theme.pipe_fill(Some("#123456"), Some(PipeStateKind::Repair)),
			"#123456"
		);
		assert_eq!(
			theme.pipe_fill(None, Some(PipeStateKind::Repair)),
			theme.pipe_states.repair.to_css()
		);
		assert_eq!(
			theme.pipe_fill(Some(""), Some(PipeStateKind::Unknown)),
			"#4a89dc"
		);
		assert_eq!(theme.pipe_fill(None, None), "#4a89dc");
	}

	#[test]
	fn only_limited_pipes_are_outlined() {
		let theme = SchemeTheme::classic();
		assert_eq!(theme.pipe_stroke(true), ("#da4453".to_string(), 1.5));
		assert_eq!(theme.pipe_stroke(false), ("none".to_string(), 0.0));

		let night = SchemeTheme::night();
		assert_eq!(night.pipe_stroke(true).0, night.limit_stroke.to_css());
	}

	#[test]
	fn valve_colors_follow_state() {
		let theme = SchemeTheme::classic();
		assert_eq!(theme.valve_color(Some(NodeStateKind::Open)), theme.valve_open);
		assert_eq!(theme.valve_color(Some(NodeStateKind::Closed)), theme.valve_closed);
		assert_eq!(theme.valve_color(None), theme.valve_default);
		assert!(SchemeTheme::by_name("night").is_some());
		assert!(SchemeTheme::by_name("neon").is_none());
	}
}
