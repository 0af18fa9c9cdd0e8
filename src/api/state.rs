// src/api/state.rs
use crate::config::ServerConfig;
use crate::conjure::Conjure;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub conjure: Conjure,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let conjure = Conjure::new(&config.conjure_path).with_timeout(config.tool_timeout());
        Self {
            config: Arc::new(config),
            conjure,
        }
    }
}
