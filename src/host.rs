//! Glue between the scheme and the page embedding it.
//!
//! Data comes in through JSON `<script>` blocks; user actions go out as page
//! navigation or as a bubbling `CustomEvent` the page's own popup scripts
//! listen for.

use serde::de::DeserializeOwned;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, HtmlScriptElement};

use crate::components::pipeline_scheme::{ActionRequest, Pipeline, SchemeEvent, Selection};
use crate::error::{Result, SchemeError};

pub const PIPELINE_DATA_ID: &str = "pipeline-data";
pub const CONFIG_ID: &str = "pipeline-config";
pub const TUBE_DATA_ID: &str = "tube-data";
pub const CHANGE_STATE_EVENT: &str = "pipeline-scheme:change-state";
/// Dispatched by the page after it updated the pipelines, e.g. following a
/// state change.
pub const RELOAD_EVENT: &str = "pipeline-scheme:reload";

fn document() -> Result<Document> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or(SchemeError::NoDocument)
}

/// Parses the JSON body of `<script id="{id}">`.
pub fn read_json<T: DeserializeOwned>(id: &str) -> Result<T> {
	let element = document()?
		.get_element_by_id(id)
		.ok_or_else(|| SchemeError::MissingElement(id.to_string()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| SchemeError::NotAScript(id.to_string()))?;
	let text = script.text()?;
	parse_json(id, &text)
}

fn parse_json<T: DeserializeOwned>(id: &str, text: &str) -> Result<T> {
	serde_json::from_str(text).map_err(|source| SchemeError::InvalidJson {
		id: id.to_string(),
		source,
	})
}

pub fn parse_pipelines(text: &str) -> Result<Vec<Pipeline>> {
	parse_json(PIPELINE_DATA_ID, text)
}

/// Pipelines for a reload request: the JSON string in the event detail if
/// there is one, otherwise the current `#pipeline-data` block.
pub fn reload_pipelines(event: &CustomEvent) -> Result<Vec<Pipeline>> {
	match event.detail().as_string() {
		Some(text) => parse_pipelines(&text),
		None => read_json(PIPELINE_DATA_ID),
	}
}

/// Registers `callback` for `event` on the document.
pub fn listen(event: &str, callback: &Closure<dyn FnMut(CustomEvent)>) -> Result<()> {
	document()?.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
	Ok(())
}

/// Like [`read_json`], but a missing element is not an error.
pub fn read_optional_json<T: DeserializeOwned>(id: &str) -> Result<Option<T>> {
	match read_json(id) {
		Ok(value) => Ok(Some(value)),
		Err(SchemeError::MissingElement(_)) => Ok(None),
		Err(err) => Err(err),
	}
}

/// Carries out an action chosen from the context menu.
pub fn handle_event(event: SchemeEvent) {
	let result = match event {
		SchemeEvent::SelectionChanged(_) => Ok(()),
		SchemeEvent::ActionRequested(ActionRequest::ViewDetails { url, .. }) => navigate(&url),
		SchemeEvent::ActionRequested(ActionRequest::ChangeState(selection)) => {
			dispatch_change_state(selection)
		}
	};
	if let Err(err) = result {
		log::warn!("pipeline-scheme: host action failed: {}", err);
	}
}

fn navigate(url: &str) -> Result<()> {
	let window = web_sys::window().ok_or(SchemeError::NoDocument)?;
	log::info!("pipeline-scheme: opening {}", url);
	window.location().set_href(url)?;
	Ok(())
}

fn dispatch_change_state(selection: Selection) -> Result<()> {
	let detail = js_sys::Object::new();
	js_sys::Reflect::set(&detail, &"type".into(), &selection.kind.as_str().into())?;
	js_sys::Reflect::set(&detail, &"id".into(), &JsValue::from_f64(selection.id as f64))?;

	let init = CustomEventInit::new();
	init.set_bubbles(true);
	init.set_detail(&detail);
	let event = CustomEvent::new_with_event_init_dict(CHANGE_STATE_EVENT, &init)?;

	document()?.dispatch_event(&event)?;
	log::debug!(
		"pipeline-scheme: dispatched {} for {} {}",
		CHANGE_STATE_EVENT,
		selection.kind,
		selection.id
	);
	Ok(())
}
