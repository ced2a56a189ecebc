//! Application Layer
//!
//! Use cases composed from the domain and the `CallsApi` port:
//! - `form`: Call submission form
//! - `call_list`: Polling list synchronizer
//! - `refresh`: Refresh signal shared between the two
//! - `page`: Page container wiring them together

mod call_list;
mod form;
mod page;
mod refresh;

pub use call_list::*;
pub use form::*;
pub use page::*;
pub use refresh::*;
