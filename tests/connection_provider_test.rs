//! Integration tests for the shared connection provider.
//!
//! These tests verify memoization, teardown and configuration errors using an
//! in-memory session.

mod common;

use common::{FakeConnector, provider};
use mssql_mcp_server::db::ConnectionProvider;
use mssql_mcp_server::error::DbError;
use std::sync::Arc;

/// Two acquires in a row return the very same handle.
#[tokio::test]
async fn test_acquire_is_memoized() {
    let (provider, recorder) = provider(FakeConnector::with_rows(vec![]));

    let first = provider.acquire().await.unwrap();
    let second = provider.acquire().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(recorder.connects(), 1);
}

/// Release followed by acquire opens a fresh handle.
#[tokio::test]
async fn test_release_then_acquire_reconnects() {
    let (provider, recorder) = provider(FakeConnector::with_rows(vec![]));

    let first_id = provider.acquire().await.unwrap().id;
    provider.release().await.unwrap();
    assert!(!provider.is_connected().await);

    let second = provider.acquire().await.unwrap();
    assert_ne!(first_id, second.id);
    assert_eq!(recorder.connects(), 2);
    assert_eq!(recorder.closes(), 1);
}

/// Releasing with no connection is a no-op, and releasing twice is harmless.
#[tokio::test]
async fn test_release_is_idempotent() {
    let (provider, recorder) = provider(FakeConnector::with_rows(vec![]));

    provider.release().await.unwrap();
    assert_eq!(recorder.closes(), 0);

    provider.acquire().await.unwrap();
    provider.release().await.unwrap();
    provider.release().await.unwrap();
    assert_eq!(recorder.closes(), 1);
}

/// A handle still held by a caller is dropped rather than closed, but the slot is reset.
#[tokio::test]
async fn test_release_while_in_use() {
    let (provider, recorder) = provider(FakeConnector::with_rows(vec![]));

    let held = provider.acquire().await.unwrap();
    provider.release().await.unwrap();
    assert_eq!(recorder.closes(), 0);
    assert!(!provider.is_connected().await);

    let fresh = provider.acquire().await.unwrap();
    assert!(!Arc::ptr_eq(&held, &fresh));
}

/// Missing connection string fails with a configuration error naming the variable.
#[tokio::test]
async fn test_missing_connection_string() {
    let connector = FakeConnector::with_rows(vec![]);
    let recorder = connector.recorder.clone();
    let provider = ConnectionProvider::new(connector, None);

    let err = provider.acquire().await.unwrap_err();
    assert!(matches!(err, DbError::Configuration { .. }));
    assert!(err.to_string().contains("MSSQL_CONNECTION_STRING is not set"));
    assert_eq!(recorder.connects(), 0);
}

/// A blank connection string counts as missing.
#[tokio::test]
async fn test_blank_connection_string() {
    let provider =
        ConnectionProvider::new(FakeConnector::with_rows(vec![]), Some("  ".to_string()));
    let err = provider.acquire().await.unwrap_err();
    assert!(matches!(err, DbError::Configuration { .. }));
}

/// Connect failures surface unchanged and leave nothing memoized.
#[tokio::test]
async fn test_connect_failure_is_not_memoized() {
    let mut connector = FakeConnector::with_rows(vec![]);
    connector.connect_error = Some("Login failed for user 'sa'.".to_string());
    let (provider, _recorder) = provider(connector);

    let err = provider.acquire().await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed for user 'sa'.");
    assert!(!provider.is_connected().await);
}

/// Concurrent first calls share one connection.
#[tokio::test]
async fn test_concurrent_first_acquire_connects_once() {
    let (provider, recorder) = provider(FakeConnector::with_rows(vec![]));

    let (a, b) = tokio::join!(provider.acquire(), provider.acquire());
    assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    assert_eq!(recorder.connects(), 1);
}

#[test]
fn test_acquire_from_sync_context() {
    let (provider, recorder) = provider(FakeConnector::with_rows(vec![]));
    tokio_test::block_on(async {
        provider.acquire().await.unwrap();
        provider.acquire().await.unwrap();
    });
    assert_eq!(recorder.connects(), 1);
}
