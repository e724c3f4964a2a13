mod common;

use chrono::Duration;
use shortener::domain::entities::{ShortLinkRecord, storage_key};
use shortener::domain::storage::Storage;
use shortener::error::AppError;

#[tokio::test]
async fn test_shorten_then_resolve() {
    let ctx = common::create_test_context();

    let link = ctx
        .state
        .shorten_service
        .shorten("https://example.com/docs", "https://sho.rt/")
        .await
        .unwrap();

    assert_eq!(link.short_url, format!("https://sho.rt/s/{}", link.code));

    let target = ctx.state.redirect_resolver.resolve(&link.code).await.unwrap();
    assert_eq!(target, "https://example.com/docs");
}

#[tokio::test]
async fn test_stored_record_layout() {
    let ctx = common::create_test_context();

    let link = ctx
        .state
        .shorten_service
        .shorten("https://example.com/", "http://localhost:3000")
        .await
        .unwrap();

    let raw = ctx
        .storage
        .get(&storage_key(&link.code))
        .await
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["url"], "https://example.com/");
    assert!(json["createdAt"].is_string());
    assert!(json["expiresAt"].is_string());

    let record = ShortLinkRecord::from_json(&raw).unwrap();
    assert_eq!(record.created_at, common::test_epoch());
    assert_eq!(record.expires_at, common::test_epoch() + ShortLinkRecord::ttl());
}

#[tokio::test]
async fn test_resolve_expired_is_not_found() {
    let ctx = common::create_test_context();

    let link = ctx
        .state
        .shorten_service
        .shorten("https://example.com/", "http://localhost:3000")
        .await
        .unwrap();

    ctx.clock.advance(ShortLinkRecord::ttl());

    let result = ctx.state.redirect_resolver.resolve(&link.code).await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_resolve_record_details() {
    let ctx = common::create_test_context();
    common::create_test_link(&ctx, "QQ77", "https://example.com/x").await;

    ctx.clock.advance(Duration::days(30));

    let record = ctx
        .state
        .redirect_resolver
        .resolve_record("QQ77")
        .await
        .unwrap();

    assert_eq!(record.url, "https://example.com/x");
    assert_eq!(record.created_at, common::test_epoch());
}
