//! Domain Layer
//!
//! Pure domain logic without infrastructure dependencies.
//! Contains entities, value objects, validation rules, and errors.

pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use entities::*;
pub use errors::*;
pub use validation::validate;
pub use value_objects::*;
