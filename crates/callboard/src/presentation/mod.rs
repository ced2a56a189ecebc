//! Presentation
//!
//! Render-ready models for the call list, independent of any output
//! surface. The CLI turns these into terminal tables.

mod status_style;
mod table;

pub use status_style::*;
pub use table::*;
