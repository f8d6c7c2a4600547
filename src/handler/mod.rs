//! Request handler module
//!
//! Routes requests to the classification endpoint, health probes and the
//! CORS preflight.

pub mod classify;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
