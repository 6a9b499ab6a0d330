//! Leptos component wrapping the pipeline scheme SVG.
//!
//! The component measures its container whenever the data changes or the
//! window is resized, lays the pipelines out at that width and renders them.
//! Mouse handlers on the container drive [`SchemeState`]; clicks and hovers are
//! resolved to pipes and nodes through the data attributes set by the renderer.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlDivElement, MouseEvent, WheelEvent};

use super::context_menu::ContextMenu;
use super::interaction::{MenuAction, SchemeEvent, SchemeState, Selection};
use super::layout::{LayoutConfig, layout, scheme_width};
use super::render::{self, NODE_CLASS, NODE_ID_ATTR, PIPE_CLASS, PIPE_ID_ATTR, TOOLTIP_ATTR};
use super::theme::SchemeTheme;
use super::types::Pipeline;
use super::viewport::ZoomConfig;

/// Scheme element under the pointer.
struct Hit {
	selection: Selection,
	tooltip: Option<String>,
}

/// Resolves the event target to the pipe or node element containing it.
fn hit_test(ev: &MouseEvent) -> Option<Hit> {
	let target: Element = ev.target()?.dyn_into().ok()?;
	let selector = format!(".{PIPE_CLASS}, .{NODE_CLASS}");
	let element = target.closest(&selector).ok()??;

	let selection = if element.class_list().contains(PIPE_CLASS) {
		Selection::pipe(element.get_attribute(PIPE_ID_ATTR)?.parse().ok()?)
	} else {
		Selection::node(element.get_attribute(NODE_ID_ATTR)?.parse().ok()?)
	};
	Some(Hit {
		selection,
		tooltip: element.get_attribute(TOOLTIP_ATTR),
	})
}

/// Pointer position relative to the container's scrolled content.
fn local_point(container: &HtmlDivElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = container.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left() + container.scroll_left() as f64,
		ev.client_y() as f64 - rect.top() + container.scroll_top() as f64,
	)
}

/// Applies the responsive width rule to the container and returns the width
/// the scheme should be laid out at.
fn measure(container: &HtmlDivElement, config: &LayoutConfig) -> Option<f64> {
	let window = web_sys::window()?;
	let window_width = window.inner_width().ok()?.as_f64()?;
	let style = web_sys::HtmlElement::style(container);

	let result = if window_width < config.min_width {
		style
			.set_property("width", &format!("{}px", config.min_width))
			.and_then(|_| style.set_property("overflow-x", "auto"))
	} else {
		style
			.set_property("width", "100%")
			.and_then(|_| style.remove_property("overflow-x").map(|_| ()))
	};
	if let Err(err) = result {
		log::warn!("pipeline-scheme: failed to size container: {:?}", err);
	}

	Some(scheme_width(
		window_width,
		container.client_width() as f64,
		config,
	))
}

/// Renders pipelines as an interactive, zoomable SVG scheme.
///
/// Pass pipelines via the reactive `data` signal; every change rebuilds the
/// scheme and clears the selection. Clicking a pipe or node opens a context
/// menu; the chosen action and every selection change are reported through
/// `on_event`. The host page owns everything that follows (state-change
/// forms, API calls, reloading `data`).
#[component]
pub fn PipelineScheme(
	#[prop(into)] data: Signal<Vec<Pipeline>>,
	#[prop(optional)] layout_config: LayoutConfig,
	#[prop(optional)] zoom_config: ZoomConfig,
	#[prop(optional)] theme: SchemeTheme,
	#[prop(optional, into)] on_event: Option<Callback<SchemeEvent>>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let width = RwSignal::new(layout_config.min_width);
	let state = RwSignal::new(SchemeState::new(zoom_config));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let outside_click_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));

	let emit = move |event: SchemeEvent| {
		log::debug!("pipeline-scheme: {:?}", event);
		if let Some(cb) = on_event {
			cb.run(event);
		}
	};

	let measure_config = layout_config.clone();
	Effect::new(move |_| {
		let count = data.with(|lines| lines.len());
		let Some(container) = container_ref.get() else {
			return;
		};
		let container: HtmlDivElement = container.into();
		if let Some(w) = measure(&container, &measure_config) {
			width.set(w);
		}
		if let Some(event) = state.try_update(|s| s.data_replaced()).flatten() {
			emit(event);
		}
		log::info!("pipeline-scheme: rendering {} pipelines at {}px", count, width.get_untracked());

		if resize_cb.borrow().is_none() {
			let (container_resize, config_resize) = (container.clone(), measure_config.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				if let Some(w) = measure(&container_resize, &config_resize) {
					width.set(w);
				}
			}));
			if let (Some(window), Some(cb)) = (web_sys::window(), resize_cb.borrow().as_ref()) {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		if outside_click_cb.borrow().is_none() {
			// Clicks inside the container are resolved by `on_click`.
			let container_click = container.clone();
			*outside_click_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
				let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
				if target.is_some_and(|t| container_click.contains(Some(&t))) {
					return;
				}
				state.update(|s| s.close_menu());
			}));
			let document = web_sys::window().and_then(|w| w.document());
			if let (Some(document), Some(cb)) = (document, outside_click_cb.borrow().as_ref()) {
				let _ =
					document.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
			}
		}
	});

	let scene_config = layout_config.clone();
	let scene =
		Signal::derive(move || data.with(|lines| layout(lines, width.get(), &scene_config)));
	let selected = Memo::new(move |_| state.with(|s| s.selected_element()));
	let menu = Memo::new(move |_| state.with(|s| s.menu().cloned()));

	let point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let container: HtmlDivElement = container_ref.get()?.into();
		Some(local_point(&container, ev))
	};

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let Some((x, y)) = point(&ev) {
			state.update(|s| s.pointer_down(x, y));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if state.with_untracked(|s| !s.is_panning() && s.tooltip().is_none()) {
			return;
		}
		if let Some((x, y)) = point(&ev) {
			state.update(|s| {
				s.pointer_move(x, y);
			});
		}
	};

	let on_mouseup = move |_: MouseEvent| state.update(|s| s.pointer_up());
	let on_mouseleave = move |_: MouseEvent| state.update(|s| s.pointer_leave());

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = point(&*ev) else {
			return;
		};
		state.update(|s| {
			s.wheel(ev.delta_y(), x, y);
		});
	};

	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = point(&ev) else {
			return;
		};
		let hit = hit_test(&ev);
		if hit.is_some() || state.with_untracked(|s| s.drag_pending()) {
			ev.prevent_default();
			ev.stop_propagation();
		}
		let target = hit.map(|h| h.selection);
		if let Some(event) = state.try_update(|s| s.click(target, x, y)).flatten() {
			emit(event);
		}
	};

	let on_mouseover = move |ev: MouseEvent| {
		if state.with_untracked(|s| s.is_panning()) {
			return;
		}
		let (Some(hit), Some((x, y))) = (hit_test(&ev), point(&ev)) else {
			return;
		};
		state.update(|s| s.hover(hit.tooltip, x, y));
	};

	let on_mouseout = move |ev: MouseEvent| {
		if hit_test(&ev).is_some() {
			state.update(|s| s.unhover());
		}
	};

	let on_reset = move |ev: MouseEvent| {
		ev.stop_propagation();
		if let Some(event) = state.try_update(|s| s.reset()).flatten() {
			emit(event);
		}
	};

	let on_choose = Callback::new(move |action: MenuAction| {
		if let Some(event) = state.try_update(|s| s.choose(action)).flatten() {
			emit(event);
		}
	});

	let background = theme.background.to_css();

	view! {
		<div
			node_ref=container_ref
			class="pipeline-scheme"
			style=format!("position: relative; overflow: hidden; user-select: none; background: {background};")
			style:cursor=move || if state.with(|s| s.is_panning()) { "grabbing" } else { "grab" }
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:click=on_click
			on:mouseover=on_mouseover
			on:mouseout=on_mouseout
		>
			<svg
				class="pipeline-scheme-svg"
				width=move || scene.with(|s| s.width.to_string())
				height=move || scene.with(|s| s.height.to_string())
				style="display: block; transform-origin: 0 0;"
				style:transform=move || state.with(|s| s.transform.to_css())
			>
				{move || scene.with(|s| render::scheme_view(s, &theme, selected.into()))}
			</svg>
			<button
				class="scheme-reset"
				type="button"
				title="Reset view"
				style="position: absolute; top: 10px; right: 10px; z-index: 1000;"
				on:mousedown=|ev: MouseEvent| ev.stop_propagation()
				on:click=on_reset
			>
				"⟳"
			</button>
			<ContextMenu menu=menu on_choose=on_choose />
			{move || {
				state
					.with(|s| s.tooltip().cloned())
					.map(|t| {
						view! {
							<div
								class="pipeline-tooltip"
								style=format!(
									"position: absolute; left: {}px; top: {}px; white-space: pre-line; pointer-events: none; z-index: 1002;",
									t.x,
									t.y,
								)
							>
								{t.text}
							</div>
						}
					})
			}}
		</div>
	}
}
