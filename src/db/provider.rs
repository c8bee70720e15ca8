//! Shared connection management.
//!
//! The server holds at most one live database connection. [`ConnectionProvider`]
//! creates it on first use, hands out the same handle to every later caller,
//! and closes it on shutdown.

use crate::error::{DbError, DbResult};
use crate::models::QueryParam;
use serde_json::Value as JsonValue;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Environment variable holding the connection string.
pub const CONNECTION_STRING_ENV: &str = "MSSQL_CONNECTION_STRING";

/// One result row, keyed by column name in driver column order.
pub type JsonRow = serde_json::Map<String, JsonValue>;

/// A live database session able to run one parameterized query at a time.
pub trait Session: Send + Sync + 'static {
    /// Run `sql` with `params` bound to `@P1..@Pn` and return the first result set.
    fn query(
        &self,
        sql: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = DbResult<Vec<JsonRow>>> + Send;
}

/// Opens and closes sessions for a particular driver.
pub trait Connector: Send + Sync + 'static {
    type Handle: Session;

    fn connect(
        &self,
        connection_string: &str,
    ) -> impl Future<Output = DbResult<Self::Handle>> + Send;

    fn close(&self, handle: Self::Handle) -> impl Future<Output = DbResult<()>> + Send;
}

pub struct ConnectionProvider<C: Connector> {
    connector: C,
    /// Sensitive - never logged.
    connection_string: Option<String>,
    handle: Mutex<Option<Arc<C::Handle>>>,
}

impl<C: Connector> ConnectionProvider<C> {
    /// Create a provider. No connection is opened until [`acquire`](Self::acquire).
    pub fn new(connector: C, connection_string: Option<String>) -> Self {
        Self {
            connector,
            connection_string: connection_string.filter(|s| !s.trim().is_empty()),
            handle: Mutex::new(None),
        }
    }

    /// Return the shared handle, connecting on first use.
    ///
    /// The slot lock is held across the connect, so concurrent first callers
    /// share a single connection attempt.
    pub async fn acquire(&self) -> DbResult<Arc<C::Handle>> {
        let mut slot = self.handle.lock().await;
        if let Some(handle) = slot.as_ref() {
            return Ok(Arc::clone(handle));
        }

        let connection_string = self.connection_string.as_deref().ok_or_else(|| {
            DbError::configuration(format!(
                "{CONNECTION_STRING_ENV} is not set. Set it (or pass --connection-string) to a SQL Server connection string, e.g. \"server=tcp:localhost,1433;database=mydb;user=sa;password=...\"."
            ))
        })?;

        info!("Opening database connection");
        let handle = Arc::new(self.connector.connect(connection_string).await?);
        *slot = Some(Arc::clone(&handle));
        Ok(handle)
    }

    /// Close the shared handle if one exists. Calling this twice is a no-op.
    ///
    /// If a tool call still holds the handle, it is dropped instead of closed
    /// gracefully; the connection goes away when that call finishes.
    pub async fn release(&self) -> DbResult<()> {
        let Some(handle) = self.handle.lock().await.take() else {
            debug!("No open connection to release");
            return Ok(());
        };

        match Arc::try_unwrap(handle) {
            Ok(handle) => {
                info!("Closing database connection");
                self.connector.close(handle).await
            }
            Err(_) => {
                debug!("Connection still in use; it will close when the last call completes");
                Ok(())
            }
        }
    }

    /// True if a connection is currently memoized.
    pub async fn is_connected(&self) -> bool {
        self.handle.lock().await.is_some()
    }
}

impl<C: Connector> std::fmt::Debug for ConnectionProvider<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("configured", &self.connection_string.is_some())
            .finish()
    }
}
