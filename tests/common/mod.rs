#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use local_url_shortener::config::Config;
use local_url_shortener::domain::clock::ManualClock;
use local_url_shortener::domain::entities::NewUrlRecord;
use local_url_shortener::infrastructure::store::{KeyValueStore, MemoryStore};
use local_url_shortener::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

pub fn memory_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

pub fn new_record(shortcode: &str, url: &str, validity_minutes: u32) -> NewUrlRecord {
    NewUrlRecord {
        shortcode: shortcode.to_string(),
        original_url: url.to_string(),
        is_custom_shortcode: false,
        validity_minutes,
        created_at: base_time(),
    }
}

/// Wires the services to `store` and a clock frozen at [`base_time`].
pub fn create_test_state(store: Arc<dyn KeyValueStore>) -> (AppState, ManualClock) {
    create_test_state_with_config(store, Config::default())
}

pub fn create_test_state_with_config(
    store: Arc<dyn KeyValueStore>,
    config: Config,
) -> (AppState, ManualClock) {
    let clock = ManualClock::new(base_time());
    let state = AppState::new(&config, store, Arc::new(clock.clone()));
    (state, clock)
}

/// A unique file path under the system temp directory. The file is removed
/// if it already exists.
pub fn temp_store_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "shortener-test-{}-{}.json",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}
