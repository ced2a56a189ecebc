//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod call_status;
mod workflow;

pub use call_status::*;
pub use workflow::*;
