//! Pointer interaction state for the scheme.
//!
//! DOM handlers translate browser events into calls on [`SchemeState`]; the
//! state never touches the DOM itself. Anything the host page has to act on
//! comes back out as a [`SchemeEvent`].

use std::fmt;

use super::viewport::{ViewTransform, ZoomConfig};

/// Which kind of scheme element was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
	Pipe,
	Node,
}

impl ElementKind {
	pub fn as_str(self) -> &'static str {
		match self {
			ElementKind::Pipe => "pipe",
			ElementKind::Node => "node",
		}
	}
}

impl fmt::Display for ElementKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A clicked pipe or node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
	pub kind: ElementKind,
	pub id: u64,
}

impl Selection {
	pub fn pipe(id: u64) -> Self {
		Self {
			kind: ElementKind::Pipe,
			id,
		}
	}

	pub fn node(id: u64) -> Self {
		Self {
			kind: ElementKind::Node,
			id,
		}
	}

	/// Detail page of the element, e.g. `/pipes/7/`.
	pub fn details_url(&self) -> String {
		format!("/{}s/{}/", self.kind, self.id)
	}
}

/// Entries of the element context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
	ChangeState,
	ViewDetails,
}

impl MenuAction {
	pub const ALL: [MenuAction; 2] = [MenuAction::ChangeState, MenuAction::ViewDetails];

	pub fn label(self) -> &'static str {
		match self {
			MenuAction::ChangeState => "Change state",
			MenuAction::ViewDetails => "View details",
		}
	}
}

/// Open context menu, anchored in container coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenuState {
	pub target: Selection,
	pub x: f64,
	pub y: f64,
}

/// Something the host page is asked to do.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionRequest {
	/// Open the state-change form for the element.
	ChangeState(Selection),
	/// Navigate to the element's detail page.
	ViewDetails { selection: Selection, url: String },
}

/// Events emitted to the host page.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemeEvent {
	/// `None` once a reset or new data cleared the selection.
	SelectionChanged(Option<Selection>),
	ActionRequested(ActionRequest),
}

/// Hover tooltip in page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub text: String,
	pub x: f64,
	pub y: f64,
}

/// Distance between the pointer and the tooltip's top-left corner.
const TOOLTIP_OFFSET: f64 = 10.0;

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
struct PanState {
	active: bool,
	start_x: f64,
	start_y: f64,
	last_x: f64,
	last_y: f64,
	/// Set once the pointer travelled past the click tolerance; consumed by
	/// the click that ends the press.
	dragged: bool,
}

/// Transient view state owned by one scheme instance.
#[derive(Clone, Debug, Default)]
pub struct SchemeState {
	pub transform: ViewTransform,
	pub zoom: ZoomConfig,
	pan: PanState,
	selection: Option<Selection>,
	menu: Option<ContextMenuState>,
	tooltip: Option<Tooltip>,
}

impl SchemeState {
	pub fn new(zoom: ZoomConfig) -> Self {
		Self {
			zoom,
			..Default::default()
		}
	}

	/// Last clicked pipe or node since the data was loaded or the view reset.
	pub fn selected_element(&self) -> Option<Selection> {
		self.selection
	}

	pub fn menu(&self) -> Option<&ContextMenuState> {
		self.menu.as_ref()
	}

	pub fn tooltip(&self) -> Option<&Tooltip> {
		self.tooltip.as_ref()
	}

	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	/// Whether the next click ends a drag and will be ignored.
	pub fn drag_pending(&self) -> bool {
		self.pan.dragged
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			last_x: x,
			last_y: y,
			dragged: false,
		};
	}

	/// Returns `true` when the view moved.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		if let Some(tooltip) = self.tooltip.as_mut() {
			tooltip.x = x + TOOLTIP_OFFSET;
			tooltip.y = y + TOOLTIP_OFFSET;
		}
		if !self.pan.active {
			return false;
		}

		let (dx, dy) = (x - self.pan.last_x, y - self.pan.last_y);
		self.pan.last_x = x;
		self.pan.last_y = y;
		self.transform.pan_by(dx, dy);

		let (tx, ty) = (x - self.pan.start_x, y - self.pan.start_y);
		if (tx * tx + ty * ty).sqrt() > self.zoom.click_tolerance {
			self.pan.dragged = true;
		}
		dx != 0.0 || dy != 0.0
	}

	pub fn pointer_up(&mut self) {
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pan.active = false;
		self.pan.dragged = false;
		self.tooltip = None;
	}

	/// Pointer-anchored zoom at container position `(x, y)`.
	pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) -> bool {
		self.transform.wheel(delta_y, x, y, &self.zoom)
	}

	/// Handles a click at container position `(x, y)` on `target`, or on empty
	/// canvas when `target` is `None`.
	///
	/// A click ending a drag is ignored. A click on an element selects it and
	/// opens the menu there; a click on empty canvas only closes the menu.
	pub fn click(&mut self, target: Option<Selection>, x: f64, y: f64) -> Option<SchemeEvent> {
		if std::mem::take(&mut self.pan.dragged) {
			return None;
		}

		let Some(selection) = target else {
			self.menu = None;
			return None;
		};

		self.selection = Some(selection);
		self.tooltip = None;
		self.menu = Some(ContextMenuState {
			target: selection,
			x,
			y,
		});
		Some(SchemeEvent::SelectionChanged(Some(selection)))
	}

	/// Runs a menu entry for the element the menu is open on and closes the menu.
	pub fn choose(&mut self, action: MenuAction) -> Option<SchemeEvent> {
		let menu = self.menu.take()?;
		let selection = menu.target;
		let request = match action {
			MenuAction::ChangeState => ActionRequest::ChangeState(selection),
			MenuAction::ViewDetails => ActionRequest::ViewDetails {
				selection,
				url: selection.details_url(),
			},
		};
		Some(SchemeEvent::ActionRequested(request))
	}

	pub fn close_menu(&mut self) {
		self.menu = None;
	}

	pub fn hover(&mut self, text: Option<String>, page_x: f64, page_y: f64) {
		self.tooltip = text.map(|text| Tooltip {
			text,
			x: page_x + TOOLTIP_OFFSET,
			y: page_y + TOOLTIP_OFFSET,
		});
	}

	pub fn unhover(&mut self) {
		self.tooltip = None;
	}

	/// Reset control: identity transform, nothing selected, menu closed.
	///
	/// Returns a `SelectionChanged(None)` event if something was selected.
	pub fn reset(&mut self) -> Option<SchemeEvent> {
		self.transform.reset();
		self.menu = None;
		self.clear_selection()
	}

	/// Called when new data replaces the rendered elements.
	pub fn data_replaced(&mut self) -> Option<SchemeEvent> {
		self.menu = None;
		self.tooltip = None;
		self.clear_selection()
	}

	fn clear_selection(&mut self) -> Option<SchemeEvent> {
		self.selection.take().map(|_| SchemeEvent::SelectionChanged(None))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clicking_a_pipe_selects_it_and_opens_menu() {
		let mut state = SchemeState::default();
		assert_eq!(state.selected_element(), None);

		let event = state.click(Some(Selection::pipe(7)), 120.0, 30.0);

		assert_eq!(event, Some(SchemeEvent::SelectionChanged(Some(Selection::pipe(7)))));
		assert_eq!(state.selected_element(), Some(Selection::pipe(7)));
		let menu = state.menu().unwrap();
		assert_eq!(menu.target, Selection::pipe(7));
		assert_eq!((menu.x, menu.y), (120.0, 30.0));
	}

	#[test]
	fn empty_click_closes_menu_but_keeps_selection() {
		let mut state = SchemeState::default();
		state.click(Some(Selection::node(3)), 0.0, 0.0);

		assert_eq!(state.click(None, 50.0, 50.0), None);
		assert!(state.menu().is_none());
		assert_eq!(state.selected_element(), Some(Selection::node(3)));
	}

	#[test]
	fn menu_actions_produce_requests() {
		let mut state = SchemeState::default();
		state.click(Some(Selection::node(3)), 0.0, 0.0);
		assert_eq!(
			state.choose(MenuAction::ChangeState),
			Some(SchemeEvent::ActionRequested(ActionRequest::ChangeState(
				Selection::node(3)
			)))
		);
		assert!(state.menu().is_none());
		assert_eq!(state.choose(MenuAction::ViewDetails), None);

		state.click(Some(Selection::pipe(12)), 0.0, 0.0);
		assert_eq!(
			state.choose(MenuAction::ViewDetails),
			Some(SchemeEvent::ActionRequested(ActionRequest::ViewDetails {
				selection: Selection::pipe(12),
				url: "/pipes/12/".into(),
			}))
		);
	}

	#[test]
	fn drag_pans_and_suppresses_click() {
		let mut state = SchemeState::default();
		state.pointer_down(100.0, 100.0);
		assert!(state.pointer_move(110.0, 95.0));
		assert!(state.pointer_move(140.0, 90.0));
		state.pointer_up();

		assert_eq!((state.transform.x, state.transform.y), (40.0, -10.0));
		assert_eq!(state.click(Some(Selection::pipe(1)), 140.0, 90.0), None);
		assert!(state.menu().is_none());
		assert_eq!(state.selected_element(), None);

		// The next plain click goes through again.
		state.pointer_down(5.0, 5.0);
		state.pointer_up();
		assert!(state.click(Some(Selection::pipe(1)), 5.0, 5.0).is_some());
	}

	#[test]
	fn moves_without_press_do_not_pan() {
		let mut state = SchemeState::default();
		assert!(!state.pointer_move(50.0, 50.0));
		assert_eq!(state.transform, ViewTransform::default());
	}

	#[test]
	fn reset_restores_view_and_clears_selection() {
		let mut state = SchemeState::default();
		state.wheel(-1.0, 200.0, 200.0);
		state.pointer_down(0.0, 0.0);
		state.pointer_move(30.0, 30.0);
		state.pointer_up();
		state.click(None, 0.0, 0.0);
		state.click(Some(Selection::pipe(2)), 0.0, 0.0);

		assert_eq!(state.reset(), Some(SchemeEvent::SelectionChanged(None)));

		assert_eq!(state.transform, ViewTransform::default());
		assert_eq!(state.selected_element(), None);
		assert!(state.menu().is_none());
		// Nothing left to clear.
		assert_eq!(state.reset(), None);
	}

	#[test]
	fn drag_release_leaves_open_menu_alone() {
		let mut state = SchemeState::default();
		state.click(Some(Selection::pipe(4)), 10.0, 10.0);

		state.pointer_down(200.0, 200.0);
		state.pointer_move(240.0, 220.0);
		state.pointer_up();
		assert!(state.drag_pending());

		assert_eq!(state.click(None, 240.0, 220.0), None);
		assert!(!state.drag_pending());
		assert_eq!(state.menu().unwrap().target, Selection::pipe(4));
		assert_eq!(state.selected_element(), Some(Selection::pipe(4)));
	}

	#[test]
	fn tooltip_follows_pointer() {
		let mut state = SchemeState::default();
		state.hover(Some("Valve DN700 (12)".into()), 100.0, 50.0);
		assert_eq!(state.tooltip().unwrap().x, 110.0);
		state.pointer_move(120.0, 60.0);
		assert_eq!(state.tooltip().unwrap().y, 70.0);
		state.hover(None, 0.0, 0.0);
		assert!(state.tooltip().is_none());
	}

	#[test]
	fn new_data_clears_selection() {
		let mut state = SchemeState::default();
		assert_eq!(state.data_replaced(), None);
		state.click(Some(Selection::pipe(2)), 0.0, 0.0);
		assert_eq!(state.data_replaced(), Some(SchemeEvent::SelectionChanged(None)));
		assert_eq!(state.selected_element(), None);
		assert!(state.menu().is_none());
	}

	#[test]
	fn details_url_uses_plural_kind() {
		assert_eq!(Selection::node(5).details_url(), "/nodes/5/");
		assert_eq!(Selection::pipe(9).details_url(), "/pipes/9/");
	}
}
