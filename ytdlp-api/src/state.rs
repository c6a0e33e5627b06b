use std::sync::Arc;

use crate::auth::AuthGuard;
use crate::config::AppConfig;
use crate::extractor::Extractor;
use crate::health::HealthReporter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthGuard>,
    pub extractor: Arc<dyn Extractor>,
    pub health: Arc<HealthReporter>
}

impl AppState {
    pub fn new(config: AppConfig, extractor: Arc<dyn Extractor>) -> Self {
        Self::with_health(config, extractor, HealthReporter::with_default_checks())
    }

    pub fn with_health(
        config: AppConfig,
        extractor: Arc<dyn Extractor>,
        health: HealthReporter
    ) -> Self {
        let auth = AuthGuard::from_config(&config.auth);

        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            extractor,
            health: Arc::new(health)
        }
    }
}
