//! UI components.

pub mod pipeline_scheme;
pub mod tube_strip;
