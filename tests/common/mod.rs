//! In-memory database session shared by the integration tests.
//!
//! `FakeConnector` records every connect, close and query so tests can assert
//! what reached the "database" without a SQL Server instance.

#![allow(dead_code)]

use mssql_mcp_server::db::{ConnectionProvider, Connector, JsonRow, Session};
use mssql_mcp_server::error::{DbError, DbResult};
use mssql_mcp_server::models::QueryParam;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_CONNECTION_STRING: &str = "server=tcp:localhost,1433;user=sa;password=secret";

/// A query as seen by the fake session.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
    pub queries: Mutex<Vec<RecordedQuery>>,
}

impl Recorder {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }
}

pub struct FakeConnector {
    pub recorder: Arc<Recorder>,
    pub rows: Vec<JsonRow>,
    /// When set, every query fails with this server message.
    pub query_error: Option<String>,
    /// When set, connecting fails with this message.
    pub connect_error: Option<String>,
}

impl FakeConnector {
    pub fn with_rows(rows: Vec<JsonRow>) -> Self {
        Self {
            recorder: Arc::new(Recorder::default()),
            rows,
            query_error: None,
            connect_error: None,
        }
    }
}

#[derive(Debug)]
pub struct FakeSession {
    pub id: usize,
    recorder: Arc<Recorder>,
    rows: Vec<JsonRow>,
    query_error: Option<String>,
}

impl Connector for FakeConnector {
    type Handle = FakeSession;

    async fn connect(&self, connection_string: &str) -> DbResult<FakeSession> {
        assert!(!connection_string.is_empty());
        if let Some(message) = &self.connect_error {
            return Err(DbError::connection(message.clone()));
        }
        let id = self.recorder.connects.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FakeSession {
            id,
            recorder: self.recorder.clone(),
            rows: self.rows.clone(),
            query_error: self.query_error.clone(),
        })
    }

    async fn close(&self, _handle: FakeSession) -> DbResult<()> {
        self.recorder.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Session for FakeSession {
    async fn query(&self, sql: &str, params: &[QueryParam]) -> DbResult<Vec<JsonRow>> {
        self.recorder.queries.lock().unwrap().push(RecordedQuery {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        match &self.query_error {
            Some(message) => Err(DbError::database(message.clone(), Some(208))),
            None => Ok(self.rows.clone()),
        }
    }
}

/// Provider over `connector` with the test connection string configured.
pub fn provider(
    connector: FakeConnector,
) -> (Arc<ConnectionProvider<FakeConnector>>, Arc<Recorder>) {
    let recorder = connector.recorder.clone();
    let provider = Arc::new(ConnectionProvider::new(
        connector,
        Some(TEST_CONNECTION_STRING.to_string()),
    ));
    (provider, recorder)
}

/// Build a row from `(column, value)` pairs, preserving their order.
pub fn row(pairs: &[(&str, serde_json::Value)]) -> JsonRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
