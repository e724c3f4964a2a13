#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use shortener::domain::clock::ManualClock;
use shortener::domain::entities::{LINK_TTL_SECONDS, ShortLinkRecord, storage_key};
use shortener::domain::storage::Storage;
use shortener::infrastructure::storage::MemoryStorage;
use shortener::routes::{app_router, router};
use shortener::state::AppState;
use std::sync::Arc;

/// Fixed start instant for every test clock.
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
}

pub struct TestContext {
    pub state: AppState,
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
}

/// Builds state over an in-memory store whose expiry follows a manual clock.
pub fn create_test_context() -> TestContext {
    let clock = Arc::new(ManualClock::new(test_epoch()));
    let storage = Arc::new(MemoryStorage::with_clock(clock.clone()));
    let state = AppState::new(storage.clone(), clock.clone());

    TestContext {
        state,
        storage,
        clock,
    }
}

/// Full router (all routes plus tracing) around `state`.
pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// The service exactly as the server runs it, trailing-slash trimming included.
pub fn make_app_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

/// Stores a record for `code` created at the current test clock time.
pub async fn create_test_link(ctx: &TestContext, code: &str, url: &str) -> ShortLinkRecord {
    use shortener::domain::clock::Clock;

    let record = ShortLinkRecord::new(url.to_string(), ctx.clock.now());
    ctx.storage
        .put(
            &storage_key(code),
            &record.to_json().unwrap(),
            Some(LINK_TTL_SECONDS),
        )
        .await
        .unwrap();
    record
}

/// Stores a raw value under `code` that is not a valid record.
pub async fn create_corrupt_link(ctx: &TestContext, code: &str, raw: &str) {
    ctx.storage
        .put(&storage_key(code), raw, Some(LINK_TTL_SECONDS))
        .await
        .unwrap();
}
