//! Single-pipe tube strip component.
//!
//! Shows the tubes of one pipe segment as adjacent rects scaled by length,
//! with cursor-anchored horizontal zoom, panning and a fit-to-width reset.

mod component;
pub mod state;
mod types;

pub use component::TubeStrip;
pub use state::StripConfig;
pub use types::Tube;
