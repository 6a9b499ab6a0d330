//! Errors raised while reading data from, or talking back to, the host page.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
	#[error("no browser window or document available")]
	NoDocument,

	#[error("element #{0} not found")]
	MissingElement(String),

	#[error("element #{0} is not a <script> block")]
	NotAScript(String),

	#[error("invalid JSON in #{id}: {source}")]
	InvalidJson {
		id: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("DOM call failed: {0}")]
	Js(String),
}

impl From<JsValue> for SchemeError {
	fn from(value: JsValue) -> Self {
		SchemeError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub type Result<T, E = SchemeError> = std::result::Result<T, E>;
