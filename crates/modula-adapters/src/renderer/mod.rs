//! Manifest renderers.

mod json;
mod summary;

pub use json::JsonRenderer;
pub use summary::SummaryRenderer;
