//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::value_objects::CoshSettings;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    /// JSON campaign snapshot seeding the in-memory store
    pub campaign_file: Option<PathBuf>,
    /// Initial runtime settings
    pub settings: CoshSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            campaign_file: env::var("COSH_CAMPAIGN_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            settings: CoshSettings::from_env(),
        })
    }
}
