//! Fun fact enrichment
//!
//! The only outbound call made while handling a request.

pub mod client;

pub use client::{FactError, FunFactClient};
