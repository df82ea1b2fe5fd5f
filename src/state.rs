use std::sync::Arc;

use crate::application::services::{
    ActivityLog, AllocatorSettings, LinkService, LinkSettings, StatsService,
};
use crate::config::Config;
use crate::domain::clock::Clock;
use crate::infrastructure::persistence::{KvLogRepository, KvRecordRepository};
use crate::infrastructure::store::KeyValueStore;

pub type AppLinkService = LinkService<KvRecordRepository, KvLogRepository>;
pub type AppStatsService = StatsService<KvRecordRepository>;

/// Services wired to one key-value store and one clock.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub stats_service: Arc<AppStatsService>,
    pub activity: Arc<ActivityLog<KvLogRepository>>,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let records = Arc::new(KvRecordRepository::new(Arc::clone(&store)));
        let logs = Arc::new(KvLogRepository::with_capacity(store, config.log_capacity));

        let activity = Arc::new(ActivityLog::new(logs, Arc::clone(&clock)));

        let link_service = Arc::new(LinkService::new(
            Arc::clone(&records),
            Arc::clone(&activity),
            Arc::clone(&clock),
            AllocatorSettings::from(config),
            LinkSettings::from(config),
        ));
        let stats_service = Arc::new(StatsService::new(records, clock));

        Self {
            link_service,
            stats_service,
            activity,
        }
    }
}
