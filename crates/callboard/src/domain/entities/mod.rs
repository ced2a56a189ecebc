//! Domain Entities
//!
//! - Call: Backend-owned record of one call request and its status
//! - CreateCallRequest: Body sent to create a new call

mod call;

pub use call::*;
