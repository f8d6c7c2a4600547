// Application state module
// Immutable state shared by every connection task

use crate::fact::{FactError, FunFactClient};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    pub facts: FunFactClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, FactError> {
        let facts = FunFactClient::new(&config.fact, config.performance.request_timeout())?;
        Ok(Self { config, facts })
    }
}
