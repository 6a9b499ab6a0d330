//! Pipeline network scheme component.
//!
//! Renders pipelines as horizontal bands of pipe segments with valves,
//! compressor hosts and bypass bridges on an SVG with:
//! - Deterministic layout from kilometre offsets to scheme coordinates
//! - Pointer-anchored zoom, unbounded panning and a reset control
//! - Click-to-context-menu with typed events for the host page
//! - Hover tooltips for pipe state and node valves
//!
//! # Example
//!
//! ```ignore
//! use pipeline_scheme::{PipelineScheme, Pipeline, SchemeEvent};
//!
//! let pipelines: Vec<Pipeline> = serde_json::from_str(json)?;
//!
//! view! {
//!     <PipelineScheme
//!         data=Signal::derive(move || pipelines.clone())
//!         on_event=Callback::new(|ev: SchemeEvent| log::info!("{ev:?}"))
//!     />
//! }
//! ```

mod component;
mod context_menu;
pub mod interaction;
pub mod layout;
mod render;
pub mod theme;
mod tooltip;
mod types;
pub mod viewport;

pub use component::PipelineScheme;
pub use interaction::{ActionRequest, ElementKind, MenuAction, SchemeEvent, Selection};
pub use layout::LayoutConfig;
pub use theme::SchemeTheme;
pub use types::{
	Department, Node, NodeState, NodeStateKind, NodeType, Pipe, PipeDepartment, PipeLimit,
	PipeState, PipeStateKind, Pipeline, ValveInfo,
};
pub use viewport::ZoomConfig;
