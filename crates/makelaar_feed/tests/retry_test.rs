//! Opt-in retry of transient page failures.

mod test_utils;

use makelaar_core::FeedQuery;
use makelaar_error::FeedErrorKind;
use makelaar_feed::{FeedClient, RetryConfig};
use std::sync::Arc;
use test_utils::{MockResponse, MockTransport, RecordingLimiter, page_json};
use tokio_util::sync::CancellationToken;

fn retrying_client(transport: &MockTransport, limiter: &RecordingLimiter) -> FeedClient {
    FeedClient::new(
        Arc::new(transport.clone()),
        Arc::new(limiter.clone()),
        "KEY",
    )
    .with_retry(RetryConfig {
        enabled: true,
        initial_backoff_ms: 100,
        max_retries: 2,
        max_delay_secs: 1,
    })
}

fn amsterdam() -> FeedQuery {
    FeedQuery::builder().path("/amsterdam/").build().unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_page_is_retried() -> anyhow::Result<()> {
    let limiter = RecordingLimiter::default();
    let transport = MockTransport::new(vec![
        MockResponse::Ok(page_json(2, 1, &[(1, Some("A"))])),
        MockResponse::Status(503, "Service Unavailable".to_string()),
        MockResponse::Ok(page_json(2, 2, &[(2, Some("B"))])),
    ]);

    let listings = retrying_client(&transport, &limiter)
        .fetch_all(&amsterdam(), &CancellationToken::new())
        .await?;

    assert_eq!(listings.len(), 2);
    assert_eq!(transport.call_count(), 3);
    assert_eq!(limiter.acquired(), 3);

    let paths = transport.paths();
    assert_eq!(paths[1], paths[2]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_quota_exceeded_is_never_retried() {
    let limiter = RecordingLimiter::default();
    let transport = MockTransport::new(vec![
        MockResponse::Status(401, "Unauthorized".to_string()),
        MockResponse::Ok(page_json(1, 1, &[(1, Some("A"))])),
    ]);

    let err = retrying_client(&transport, &limiter)
        .fetch_all(&amsterdam(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_quota_exceeded());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retries_are_bounded() {
    let limiter = RecordingLimiter::default();
    let transport = MockTransport::new(vec![
        MockResponse::Status(502, "Bad Gateway".to_string()),
        MockResponse::Status(502, "Bad Gateway".to_string()),
        MockResponse::Status(502, "Bad Gateway".to_string()),
        MockResponse::Ok(page_json(1, 1, &[(1, Some("A"))])),
    ]);

    let err = retrying_client(&transport, &limiter)
        .fetch_all(&amsterdam(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        FeedErrorKind::RequestFailed { status: 502, .. }
    ));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_body_is_not_retried() {
    let limiter = RecordingLimiter::default();
    let transport = MockTransport::new(vec![
        MockResponse::Ok("{}".to_string()),
        MockResponse::Ok(page_json(1, 1, &[])),
    ]);

    let err = retrying_client(&transport, &limiter)
        .fetch_all(&amsterdam(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), FeedErrorKind::MalformedResponse(_)));
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn test_disabled_policy_yields_no_retries() {
    assert!(!RetryConfig::default().enabled);
    assert_eq!(RetryConfig::enabled().strategy().count(), 3);
}
