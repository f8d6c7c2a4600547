//! HTTP protocol layer module
//!
//! Response builders shared by every route, decoupled from the classification logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    health_response, internal_error, json_response, method_not_allowed, not_found, options_response,
};
