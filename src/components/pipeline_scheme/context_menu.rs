//! Context menu shown next to a clicked pipe or node.

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::interaction::{ContextMenuState, MenuAction};

/// Renders the open menu, if any, at its anchor inside the scheme container.
///
/// Clicks and presses inside the menu do not propagate, so choosing an entry
/// neither starts a pan nor counts as a click on the canvas behind it.
#[component]
pub fn ContextMenu(
	#[prop(into)] menu: Signal<Option<ContextMenuState>>,
	on_choose: Callback<MenuAction>,
) -> impl IntoView {
	move || {
		menu.get().map(|m| {
			let items = MenuAction::ALL
				.iter()
				.map(|&action| {
					view! {
						<button
							class="pipeline-context-menu-item"
							type="button"
							on:click=move |ev: MouseEvent| {
								ev.stop_propagation();
								on_choose.run(action);
							}
						>
							{action.label()}
						</button>
					}
				})
				.collect_view();

			view! {
				<div
					class="pipeline-context-menu"
					style=format!("position: absolute; left: {}px; top: {}px; z-index: 1001;", m.x, m.y)
					on:mousedown=|ev: MouseEvent| ev.stop_propagation()
					on:click=|ev: MouseEvent| ev.stop_propagation()
				>
					{items}
				</div>
			}
		})
	}
}
