mod common;

use chrono::Duration;
use local_url_shortener::config::Config;
use local_url_shortener::domain::entities::LogLevel;
use local_url_shortener::domain::repositories::RecordRepository;
use local_url_shortener::dto::{ShortenRequest, ShortenResultItem, UrlItem};
use local_url_shortener::error::AppError;
use local_url_shortener::infrastructure::persistence::KvRecordRepository;
use local_url_shortener::infrastructure::store::{KeyValueStore, MemoryStore};
use local_url_shortener::state::AppState;
use local_url_shortener::utils::code_generator::CHARSET;
use std::sync::Arc;

/// A store where every one-symbol code is already taken, plus a config that
/// only generates one-symbol codes, so random generation always collides.
fn exhausted_state() -> (Arc<dyn KeyValueStore>, AppState) {
    let store = common::memory_store();
    let repo = KvRecordRepository::new(Arc::clone(&store));
    for symbol in CHARSET {
        let code = (*symbol as char).to_string();
        repo.create(common::new_record(&code, "https://taken.example/", 30))
            .unwrap();
    }

    let config = Config {
        shortcode_length: 1,
        max_generation_attempts: 20,
        ..Config::default()
    };
    let (state, _clock) = common::create_test_state_with_config(Arc::clone(&store), config);
    (store, state)
}

#[tokio::test]
async fn test_batch_reports_each_item_in_order() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    let request = ShortenRequest::new(vec![
        UrlItem::new("https://example.com/one"),
        UrlItem::new("ftp://example.com/file"),
        UrlItem::new("example.com/three"),
    ]);

    let response = state.link_service.shorten_batch(request).await.unwrap();

    assert_eq!(response.summary.total, 3);
    assert_eq!(response.summary.successful, 2);
    assert_eq!(response.summary.failed, 1);

    assert!(response.items[0].is_success());
    assert_eq!(response.items[1].original_url(), "ftp://example.com/file");
    match &response.items[1] {
        ShortenResultItem::Error { error, .. } => assert_eq!(error.code, "invalid_format"),
        other => panic!("expected error, got {:?}", other),
    }
    match &response.items[2] {
        ShortenResultItem::Success { original_url, .. } => {
            assert_eq!(original_url, "https://example.com/three")
        }
        other => panic!("expected success, got {:?}", other),
    }

    assert_eq!(state.link_service.list().unwrap().len(), 2);
}

#[tokio::test]
async fn test_batch_with_too_short_custom_shortcode() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    let request = ShortenRequest::new(vec![
        UrlItem::new("https://a.com"),
        UrlItem::new("https://b.com").with_custom_shortcode("ab"),
        UrlItem::new("https://c.com"),
    ]);

    let response = state.link_service.shorten_batch(request).await.unwrap();

    assert_eq!(response.summary.total, 3);
    assert_eq!(response.summary.successful, 2);
    assert_eq!(response.summary.failed, 1);

    let outcomes: Vec<_> = response
        .items
        .iter()
        .map(|item| (item.original_url().to_string(), item.is_success()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("https://a.com/".to_string(), true),
            ("https://b.com".to_string(), false),
            ("https://c.com/".to_string(), true),
        ]
    );

    match &response.items[1] {
        ShortenResultItem::Error { error, .. } => {
            assert_eq!(error.code, "invalid_format");
            assert_eq!(error.message, "Shortcode must be between 3 and 20 characters");
        }
        other => panic!("expected error, got {:?}", other),
    }
    assert!(state.link_service.get("ab").is_err());
}

#[tokio::test]
async fn test_custom_shortcode_returned_exactly() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    let item = UrlItem::new("https://example.com").with_custom_shortcode("My_Link-1");
    let record = state.link_service.shorten_one(item).await.unwrap();

    assert_eq!(record.shortcode, "My_Link-1");
    assert!(record.is_custom_shortcode);
    assert_eq!(
        state.link_service.short_url(&record.shortcode),
        "http://localhost:3000/My_Link-1"
    );
}

#[tokio::test]
async fn test_custom_shortcode_collision() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    state
        .link_service
        .shorten_one(UrlItem::new("https://a.com").with_custom_shortcode("taken"))
        .await
        .unwrap();

    let err = state
        .link_service
        .shorten_one(UrlItem::new("https://b.com").with_custom_shortcode("taken"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Collision { .. }));
    assert_eq!(
        state.link_service.get("taken").unwrap().original_url,
        "https://a.com/"
    );
}

#[tokio::test]
async fn test_duplicate_custom_codes_within_one_batch() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    let request = ShortenRequest::new(vec![
        UrlItem::new("https://a.com").with_custom_shortcode("same"),
        UrlItem::new("https://b.com").with_custom_shortcode("same"),
    ]);

    let response = state.link_service.shorten_batch(request).await.unwrap();

    assert!(response.items[0].is_success());
    assert!(!response.items[1].is_success());
}

#[tokio::test]
async fn test_validity_and_expiry() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    let default = state
        .link_service
        .shorten_one(UrlItem::new("example.com"))
        .await
        .unwrap();
    assert_eq!(default.validity_minutes, 30);
    assert_eq!(
        default.expires_at,
        Some(common::base_time() + Duration::minutes(30))
    );

    let week = state
        .link_service
        .shorten_one(UrlItem::new("example.com").with_validity_minutes(10080))
        .await
        .unwrap();
    assert_eq!(week.expires_at, Some(common::base_time() + Duration::days(7)));

    let err = state
        .link_service
        .shorten_one(UrlItem::new("example.com").with_validity_minutes(10081))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidFormat { .. }));
}

#[tokio::test]
async fn test_configured_default_validity() {
    let config = Config {
        default_validity_minutes: 90,
        ..Config::default()
    };
    let (state, _clock) = common::create_test_state_with_config(common::memory_store(), config);

    let record = state
        .link_service
        .shorten_one(UrlItem::new("example.com"))
        .await
        .unwrap();

    assert_eq!(record.validity_minutes, 90);
}

#[tokio::test]
async fn test_batch_size_limits() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    let five = (0..5).map(|i| UrlItem::new(format!("example.com/{i}"))).collect();
    let response = state
        .link_service
        .shorten_batch(ShortenRequest::new(five))
        .await
        .unwrap();
    assert_eq!(response.summary.successful, 5);

    let six = (0..6).map(|i| UrlItem::new(format!("example.com/{i}"))).collect();
    let err = state
        .link_service
        .shorten_batch(ShortenRequest::new(six))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidFormat { .. }));

    let err = state
        .link_service
        .shorten_batch(ShortenRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidFormat { .. }));
}

#[tokio::test]
async fn test_quota_failure_reported_per_item() {
    // Room for a few records but not for many.
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_quota(1200));
    let config = Config {
        log_capacity: 1,
        ..Config::default()
    };
    let (state, _clock) = common::create_test_state_with_config(store, config);

    let urls = (0..5)
        .map(|i| UrlItem::new(format!("https://example.com/{}", "x".repeat(100 + i))))
        .collect();
    let response = state
        .link_service
        .shorten_batch(ShortenRequest::new(urls))
        .await
        .unwrap();

    assert_eq!(response.summary.total, 5);
    assert!(response.summary.successful >= 1);
    assert!(response.summary.failed >= 1);

    let failure = response
        .items
        .iter()
        .find_map(|item| match item {
            ShortenResultItem::Error { error, .. } => Some(error),
            _ => None,
        })
        .unwrap();
    assert_eq!(failure.code, "storage_failure");

    assert_eq!(
        state.link_service.list().unwrap().len(),
        response.summary.successful
    );
}

#[tokio::test]
async fn test_activity_log_records_shortening() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    state
        .link_service
        .shorten_one(UrlItem::new("example.com").with_custom_shortcode("logged"))
        .await
        .unwrap();

    let entries = state.activity.entries().unwrap();
    let success = entries
        .iter()
        .find(|e| e.message == "URL shortened successfully")
        .unwrap();

    assert_eq!(success.data["shortcode"], "logged");
    assert_eq!(success.data["originalUrl"], "https://example.com/");
    assert_eq!(success.timestamp, common::base_time());
}

#[tokio::test]
async fn test_generated_shortcode_is_logged() {
    let (state, _clock) = common::create_test_state(common::memory_store());

    let record = state
        .link_service
        .shorten_one(UrlItem::new("example.com"))
        .await
        .unwrap();

    let entries = state.activity.entries().unwrap();
    let generated = entries
        .iter()
        .find(|e| e.message == "Generated unique shortcode")
        .unwrap();

    assert_eq!(generated.level, LogLevel::Info);
    assert_eq!(generated.data["shortcode"], record.shortcode.as_str());
    assert_eq!(generated.data["attempts"], 1);
}

#[tokio::test]
async fn test_fallback_shortcode_is_stored_and_logged() {
    let (store, state) = exhausted_state();

    let record = state
        .link_service
        .shorten_one(UrlItem::new("example.com"))
        .await
        .unwrap();

    // Base36 of the frozen clock's Unix milliseconds, then three random symbols.
    assert!(record.shortcode.starts_with("lrer7ls0"));
    assert_eq!(record.shortcode.len(), 11);
    assert!(!record.is_custom_shortcode);

    let repo = KvRecordRepository::new(store);
    let stored = repo.get(&record.shortcode).unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com/");
    assert_eq!(repo.list().unwrap().len(), CHARSET.len() + 1);

    let entries = state.activity.entries().unwrap();
    let fallback = entries
        .iter()
        .find(|e| e.message == "Using fallback shortcode generation")
        .unwrap();
    assert_eq!(fallback.level, LogLevel::Warn);
    assert_eq!(fallback.data["shortcode"], record.shortcode.as_str());
    assert_eq!(fallback.data["attempts"], 20);
    assert!(!entries.iter().any(|e| e.message == "Generated unique shortcode"));
}
