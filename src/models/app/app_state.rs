use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::app::Config;
use std::sync::Arc;

/// What every view-model is built from.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: Arc<ApiService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let api = Arc::new(ApiService::from_config(&config)?);
        Ok(Self { config, api })
    }
}
