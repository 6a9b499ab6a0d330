//! Leptos component rendering the tubes of one pipe segment.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDivElement, MouseEvent, WheelEvent};

use super::state::{StripConfig, StripState, strip_layout};
use super::types::Tube;
use crate::components::pipeline_scheme::theme::Color;

const TUBE_FILL: Color = Color::rgb(165, 200, 245);
const TUBE_ID_ATTR: &str = "data-id";

fn hovered_tube(ev: &MouseEvent) -> Option<u64> {
	let target: Element = ev.target()?.dyn_into().ok()?;
	target.get_attribute(TUBE_ID_ATTR)?.parse().ok()
}

/// Renders tubes as a horizontally zoomable strip fitted to its container.
///
/// The reset button refits the strip; wheel zoom never goes below the fitted
/// level.
#[component]
pub fn TubeStrip(
	#[prop(into)] data: Signal<Vec<Tube>>,
	#[prop(optional)] config: StripConfig,
	#[prop(default = 160.0)] height: f64,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let layout_config = config.clone();
	let strip = Signal::derive(move || data.with(|tubes| strip_layout(tubes, &layout_config)));
	let state = RwSignal::new(StripState::new(config));

	let refit = move || {
		let Some(container) = container_ref.get_untracked() else {
			return;
		};
		let container: HtmlDivElement = container.into();
		let rect = container.get_bounding_client_rect();
		let total = strip.with_untracked(|s| s.total_width);
		state.update(|s| s.fit(rect.width(), rect.height(), total));
	};

	Effect::new(move |_| {
		let (count, total) = strip.with(|s| (s.tubes.len(), s.total_width));
		if container_ref.get().is_none() {
			return;
		}
		log::info!("tube-strip: {} tubes, {:.1}px wide", count, total);
		refit();
	});

	let local_x = move |ev: &MouseEvent| -> Option<f64> {
		let container: HtmlDivElement = container_ref.get()?.into();
		Some(ev.client_x() as f64 - container.get_bounding_client_rect().left())
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(x) = local_x(&*ev) {
			state.update(|s| s.wheel(ev.delta_y(), x));
		}
	};
	let on_mousedown = move |ev: MouseEvent| {
		state.update(|s| s.pointer_down(ev.client_x() as f64, ev.client_y() as f64));
	};
	let on_mousemove = move |ev: MouseEvent| {
		let hovered = hovered_tube(&ev);
		if state.with_untracked(|s| !s.is_dragging() && s.hovered() == hovered) {
			return;
		}
		state.update(|s| {
			s.set_hovered(hovered);
			s.pointer_move(ev.client_x() as f64, ev.client_y() as f64);
		});
	};
	let on_mouseup = move |_: MouseEvent| state.update(|s| s.pointer_up());
	let on_mouseleave = move |_: MouseEvent| {
		state.update(|s| {
			s.pointer_up();
			s.set_hovered(None);
		})
	};

	let tubes = move || {
		strip.with(|s| {
			let height = state.with_untracked(|st| st.config.tube_height);
			s.tubes
				.iter()
				.map(|shape| {
					let id = shape.tube.id;
					let fill = move || {
						if state.with(|st| st.hovered()) == Some(id) {
							TUBE_FILL.lighten(0.25).to_css()
						} else {
							TUBE_FILL.to_css()
						}
					};
					view! {
						<rect
							class="tube-element"
							x=shape.x.to_string()
							y="0"
							width=shape.width.to_string()
							height=height.to_string()
							fill=fill
							stroke="black"
							stroke-width="0.5"
							vector-effect="non-scaling-stroke"
							style="cursor: pointer;"
							data-id=id.to_string()
							data-tooltip=shape.tube.tooltip()
						/>
					}
				})
				.collect_view()
		})
	};

	view! {
		<div
			node_ref=container_ref
			class="tube-strip"
			style=format!("position: relative; overflow: hidden; background-color: #fff; height: {height}px;")
			on:wheel=on_wheel
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
		>
			<svg
				width="100%"
				height="100%"
				style:display="block"
				style:cursor=move || if state.with(|s| s.is_dragging()) { "grabbing" } else { "grab" }
			>
				<g transform=move || state.with(|s| s.transform.to_svg())>{tubes}</g>
			</svg>
			<button
				class="scheme-reset"
				type="button"
				title="Fit to width"
				style="position: absolute; top: 10px; right: 10px; z-index: 10; padding: 6px 10px; font-size: 16px; cursor: pointer;"
				on:mousedown=|ev: MouseEvent| ev.stop_propagation()
				on:click=move |_| refit()
			>
				"⟳"
			</button>
		</div>
	}
}
