use bevy::prelude::*;
use std::env;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Runtime configuration, resolved once at startup.
#[derive(Resource, Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the circle/dome generator backend.
    pub api_base: String,
}

impl AppConfig {
    /// Read configuration from the environment. `DOMEFORGE_API` overrides
    /// the backend base URL.
    pub fn from_env() -> Self {
        let api_base = env::var("DOMEFORGE_API").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self { api_base }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}
