//! SVG views for a laid-out scheme.
//!
//! Pipes and nodes carry `data-pipe-id` / `data-node-id` and an optional
//! `data-tooltip`; the component hit-tests clicks and hovers through those
//! attributes instead of attaching handlers to every element.
//!
//! Node glyph artwork is drawn on a 20x20 grid and placed by
//! [`NodeShape::transform`].

use leptos::prelude::*;

use super::interaction::Selection;
use super::layout::{BandLayout, Label, NodeShape, PipeShape, Rect, SchemeLayout};
use super::theme::SchemeTheme;
use super::tooltip::{node_tooltip, pipe_tooltip};
use super::types::NodeType;

pub const PIPE_CLASS: &str = "pipe-element";
pub const NODE_CLASS: &str = "node-element";
pub const PIPE_ID_ATTR: &str = "data-pipe-id";
pub const NODE_ID_ATTR: &str = "data-node-id";
pub const TOOLTIP_ATTR: &str = "data-tooltip";

/// All bands of the scheme.
pub fn scheme_view(
	layout: &SchemeLayout,
	theme: &SchemeTheme,
	selected: Signal<Option<Selection>>,
) -> impl IntoView + use<> {
	layout
		.bands
		.iter()
		.map(|band| band_view(band, theme, selected))
		.collect_view()
}

fn band_view(
	band: &BandLayout,
	theme: &SchemeTheme,
	selected: Signal<Option<Selection>>,
) -> impl IntoView + use<> {
	let empties = band
		.empty_slots
		.iter()
		.map(|rect| empty_slot_view(rect, theme))
		.collect_view();
	let pipes = band
		.pipes
		.iter()
		.map(|shape| pipe_view(shape, theme, selected))
		.collect_view();
	let nodes = band
		.nodes
		.iter()
		.filter_map(|shape| node_view(shape, theme, selected))
		.collect_view();

	view! {
		<g class="pipeline-band" data-title=band.title.clone()>
			{empties}
			{city_label(&band.start_label, theme)}
			{city_label(&band.end_label, theme)}
			{pipes}
			{nodes}
		</g>
	}
}

fn empty_slot_view(rect: &Rect, theme: &SchemeTheme) -> impl IntoView + use<> {
	view! {
		<rect
			class="empty-pipe-element"
			x=rect.x.to_string()
			y=rect.y.to_string()
			width=rect.width.to_string()
			height=rect.height.to_string()
			fill=theme.empty_pipe.to_css()
			stroke=theme.empty_pipe_stroke.to_css()
			stroke-width="0.5"
		/>
	}
}

fn city_label(label: &Label, theme: &SchemeTheme) -> impl IntoView + use<> {
	view! {
		<text
			class="city-label"
			x=label.x.to_string()
			y=label.y.to_string()
			text-anchor="middle"
			font-size="10px"
			fill=theme.label.to_css()
		>
			{label.text.clone()}
		</text>
	}
}

fn pipe_view(
	shape: &PipeShape,
	theme: &SchemeTheme,
	selected: Signal<Option<Selection>>,
) -> impl IntoView + use<> {
	let pipe = &shape.pipe;
	let rect = shape.rect;
	let state = pipe.state.as_ref();
	let fill = theme.pipe_fill(
		state.and_then(|s| s.color.as_deref()),
		state.map(|s| s.state_type),
	);
	let (stroke, stroke_width) = theme.pipe_stroke(shape.pipe.limit.is_some());
	let stroke_width = stroke_width.to_string();
	let selection = Selection::pipe(pipe.id);
	let highlight = theme.selection.to_css();
	let is_selected = move || selected.get() == Some(selection);

	let limit_label = shape.limit_label.as_ref().map(|label| {
		view! {
			<text
				class="pipe-limit-label"
				x=label.x.to_string()
				y=label.y.to_string()
				text-anchor="middle"
				font-size="9px"
				fill=theme.limit_text.to_css()
			>
				{label.text.clone()}
			</text>
		}
	});

	view! {
		<rect
			class=PIPE_CLASS
			class:limited=shape.limit_label.is_some()
			class:selected=is_selected
			x=rect.x.to_string()
			y=rect.y.to_string()
			width=rect.width.to_string()
			height=rect.height.to_string()
			fill=fill
			stroke=move || if is_selected() { highlight.clone() } else { stroke.clone() }
			stroke-width=move || if is_selected() { "2".to_string() } else { stroke_width.clone() }
			data-pipe-id=pipe.id.to_string()
			data-tooltip=pipe_tooltip(pipe)
		/>
		{limit_label}
	}
}

fn node_view(
	shape: &NodeShape,
	theme: &SchemeTheme,
	selected: Signal<Option<Selection>>,
) -> Option<impl IntoView + use<>> {
	let node = &shape.node;
	let state = node.state.as_ref().map(|s| s.state_type);
	let valve_color = theme.valve_color(state).to_css();

	let glyph = match node.node_type {
		NodeType::Valve => valve_glyph(theme, valve_color).into_any(),
		NodeType::Host => host_glyph(theme, valve_color).into_any(),
		NodeType::Bridge => bridge_glyph(theme, valve_color, node.is_open()).into_any(),
		NodeType::Unknown => return None,
	};
	let selection = Selection::node(node.id);
	let highlight = theme.selection.to_css();
	let is_selected = move || selected.get() == Some(selection);
	let kind = match node.node_type {
		NodeType::Valve => "valve",
		NodeType::Host => "host",
		_ => "bridge",
	};

	Some(view! {
		<g
			class=format!("{NODE_CLASS} node-{kind}")
			class:selected=is_selected
			transform=shape.transform()
			data-node-id=node.id.to_string()
			data-tooltip=node_tooltip(node)
		>
			{glyph}
			{move || {
				is_selected().then(|| {
					view! {
						<circle cx="10" cy="10" r="14" fill="none" stroke=highlight.clone() stroke-width="1" />
					}
				})
			}}
		</g>
	})
}

#[derive(Clone, Copy)]
enum IconSize {
	Large,
	Small,
}

impl IconSize {
	fn factor(self) -> f64 {
		match self {
			IconSize::Large => 1.0,
			IconSize::Small => 0.4,
		}
	}
}

/// Bow-tie valve symbol. Its artwork spans 6x6 units starting at (138, 192)
/// and is scaled to `20 * size` grid units before `placement` is applied.
fn valve_icon(fill: String, size: IconSize, placement: &'static str) -> impl IntoView + use<> {
	let scale = 20.0 * size.factor() / 6.0;
	let body_style = format!("fill:{fill};stroke:#000000;stroke-width:0.1;stroke-linecap:round;");
	let mask_style = "fill:#F8F8F8;stroke:none;";

	view! {
		<g class="valve-icon" transform=placement>
			<g transform=format!("scale({scale}) translate(-138, -192)")>
				<path
					class="valve-fill"
					d="m 141.11221,194.74054 -1.26917,0.73276 -1.26917,0.73276 v -1.46552 -1.46551 l 1.26917,0.73276 z"
					style=body_style.clone()
				/>
				<path
					class="valve-fill"
					d="m 141.11221,194.74054 1.26917,0.73276 1.26917,0.73276 v -1.46552 -1.46551 l -1.26917,0.73276 z"
					style=body_style
				/>
				<path
					class="valve-mask"
					d="m 141.11221,194.70326 -1.27263,-0.74424 -1.27263,-0.74423 h 2.54526 2.54525 l -1.27263,0.74423 z"
					style=mask_style
				/>
				<path
					class="valve-mask"
					d="m 141.11221,194.77303 -1.27263,0.74171 -1.27263,0.74171 h 2.54526 2.54525 l -1.27263,-0.74171 z"
					style=mask_style
				/>
			</g>
		</g>
	}
}

/// Line valve: main valve with a three-valve bypass loop.
fn valve_glyph(theme: &SchemeTheme, valve_color: String) -> impl IntoView + use<> {
	let pipe = theme.pipe.to_css();
	let idle = theme.valve_default.to_css();

	view! {
		<rect x="-3" y="-2" width="0.75" height="10" fill=pipe.clone() />
		<rect x="23" y="-12" width="0.75" height="20" fill=pipe.clone() />
		<rect x="-2" y="-24" width="0.75" height="27" transform="rotate(90)" fill=pipe />
		{valve_icon(valve_color, IconSize::Large, "translate(0, 1)")}
		{valve_icon(idle.clone(), IconSize::Small, "scale(0.8) rotate(90) translate(0, -0.5)")}
		{valve_icon(idle.clone(), IconSize::Small, "scale(0.8) rotate(90) translate(0, -33)")}
		{valve_icon(idle, IconSize::Small, "scale(0.8) rotate(90) translate(-12, -33)")}
	}
}

/// Compressor station boundary: valve inside a dashed perimeter with a flow arrow.
fn host_glyph(theme: &SchemeTheme, valve_color: String) -> impl IntoView + use<> {
	let outline = theme.host_outline.to_css();

	view! {
		{valve_icon(valve_color, IconSize::Large, "scale(1) translate(0, 1)")}
		<rect
			x="-20"
			y="-5"
			width="60"
			height="30"
			fill="none"
			stroke=outline.clone()
			stroke-dasharray="1,2"
		/>
		<polygon points="0 0, -7 2.5, 0 5" transform="translate(0, -3)" fill=outline.clone() />
		<rect x="0" y="-0.8" width="15" height="0.5" fill=outline />
	}
}

/// Bypass bridge: a vertical bypass pipe colored by the node state.
fn bridge_glyph(theme: &SchemeTheme, valve_color: String, open: bool) -> impl IntoView + use<> {
	let pipe = theme.pipe.to_css();
	let bypass = theme.bridge_color(open).to_css();
	let idle = theme.valve_default.to_css();

	view! {
		<rect class="main-bridge-pipe" x="9" y="-30" width="2.5" height="38" fill=bypass />
		<rect x="10" y="-3" width="7" height="0.75" fill=pipe.clone() />
		<rect x="10" y="-18" width="7" height="0.75" fill=pipe.clone() />
		<rect x="17" y="-18" width="0.75" height="15.7" fill=pipe />
		{valve_icon(valve_color, IconSize::Large, "scale(0.6) rotate(90) translate(-27, -26)")}
		{valve_icon(idle, IconSize::Small, "scale(0.8) rotate(90) translate(-17, -25.2)")}
	}
}
