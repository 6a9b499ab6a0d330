//! pipeline-scheme: interactive schematic of gas pipeline networks.
//!
//! This crate provides a WASM-based scheme that renders pipelines as bands of
//! pipe segments with valves, compressor hosts and bypass bridges, supports
//! pan/zoom and a context menu, and hands chosen actions back to the host page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::closure::Closure;
use web_sys::CustomEvent;

mod config;
pub mod components;
mod error;
mod host;

pub use components::pipeline_scheme::{
	LayoutConfig, Pipeline, PipelineScheme, SchemeEvent, SchemeTheme, ZoomConfig,
};
pub use components::tube_strip::{StripConfig, Tube, TubeStrip};
pub use config::AppConfig;
pub use error::SchemeError;
pub use host::{CHANGE_STATE_EVENT, RELOAD_EVENT, handle_event};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("pipeline-scheme: logging initialized");
}

fn log_loaded(pipelines: &[Pipeline]) {
	let pipes: usize = pipelines.iter().map(|p| p.pipes.len()).sum();
	let km: f64 = pipelines.iter().map(|p| p.total_length()).sum();
	info!(
		"pipeline-scheme: loaded {} pipelines, {} pipes, {:.1} km",
		pipelines.len(),
		pipes,
		km
	);
}

/// Load pipelines from the script element with id="pipeline-data".
fn load_pipelines() -> Vec<Pipeline> {
	match host::read_json::<Vec<Pipeline>>(host::PIPELINE_DATA_ID) {
		Ok(pipelines) => {
			log_loaded(&pipelines);
			pipelines
		}
		Err(e) => {
			warn!("pipeline-scheme: failed to load pipelines: {}", e);
			Vec::new()
		}
	}
}

/// Replaces `pipelines` whenever the page dispatches [`RELOAD_EVENT`].
/// A failed reload keeps the scheme on the previous data.
fn listen_for_reload(pipelines: RwSignal<Vec<Pipeline>>) {
	let on_reload = Closure::<dyn FnMut(CustomEvent)>::new(move |ev: CustomEvent| {
		match host::reload_pipelines(&ev) {
			Ok(next) => {
				log_loaded(&next);
				pipelines.set(next);
			}
			Err(e) => warn!("pipeline-scheme: reload failed: {}", e),
		}
	});
	if let Err(e) = host::listen(RELOAD_EVENT, &on_reload) {
		warn!("pipeline-scheme: cannot listen for reloads: {}", e);
		return;
	}
	// Lives as long as the page.
	on_reload.forget();
}

fn load_config() -> AppConfig {
	host::read_optional_json::<AppConfig>(host::CONFIG_ID)
		.unwrap_or_else(|e| {
			warn!("pipeline-scheme: ignoring config: {}", e);
			None
		})
		.unwrap_or_default()
}

fn load_tubes() -> Option<Vec<Tube>> {
	host::read_optional_json::<Vec<Tube>>(host::TUBE_DATA_ID).unwrap_or_else(|e| {
		warn!("pipeline-scheme: failed to load tubes: {}", e);
		None
	})
}

/// Main application component.
/// Loads pipelines (and tubes, when the page has them) from the DOM and
/// renders the scheme.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let theme = config.theme();

	let pipelines = RwSignal::new(load_pipelines());
	listen_for_reload(pipelines);

	let tube_strip = load_tubes().map(|tubes| {
		let tube_signal = Signal::derive(move || tubes.clone());
		view! {
			<section class="tube-strip-section">
				<h2>"Tubes"</h2>
				<TubeStrip data=tube_signal config=config.strip.clone() />
			</section>
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Pipeline Scheme" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="pipeline-scheme-page">
			<PipelineScheme
				data=pipelines
				layout_config=config.layout
				zoom_config=config.zoom
				theme=theme
				on_event=Callback::new(handle_event)
			/>
			{tube_strip}
		</div>
	}
}
