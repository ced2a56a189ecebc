//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the application layer
//! reaches the call-processing backend.
//!
//! The HTTP implementation lives in `adapters/`.

mod calls_api;

pub use calls_api::*;
