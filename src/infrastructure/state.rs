//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::info;

use crate::application::services::CommandService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::memory_campaign::InMemoryCampaign;

/// Shared application state
pub struct AppState {
    /// Host store behind every port
    pub campaign: Arc<InMemoryCampaign>,
    /// Commands run one at a time, to completion
    pub commands: Mutex<CommandService>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let campaign = match &config.campaign_file {
            Some(path) => {
                info!("Loading campaign from {}", path.display());
                InMemoryCampaign::load(path)?
            }
            None => InMemoryCampaign::new(),
        };
        Ok(Self::with_campaign(config, Arc::new(campaign)))
    }

    pub fn with_campaign(config: AppConfig, campaign: Arc<InMemoryCampaign>) -> Self {
        let commands = CommandService::new(
            config.settings,
            campaign.clone(),
            campaign.clone(),
            campaign.clone(),
            campaign.clone(),
        );
        Self {
            campaign,
            commands: Mutex::new(commands),
        }
    }
}
