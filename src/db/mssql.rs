//! SQL Server driver integration.
//!
//! Connections are made with `tiberius` over a tokio TCP stream. A session
//! wraps the single client in an async mutex because every query needs
//! exclusive access to it.

use crate::db::provider::{Connector, JsonRow, Session};
use crate::db::types::row_to_json;
use crate::error::{DbError, DbResult};
use crate::models::QueryParam;
use tiberius::{Client, Config, Query};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::info;

type TdsClient = Client<Compat<TcpStream>>;

/// Connector for SQL Server using ADO.NET-style connection strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlConnector;

pub struct MssqlSession {
    client: Mutex<TdsClient>,
}

impl MssqlConnector {
    async fn open(config: Config) -> DbResult<TdsClient> {
        let tcp = TcpStream::connect(config.get_addr()).await?;
        tcp.set_nodelay(true)?;

        match Client::connect(config.clone(), tcp.compat_write()).await {
            Ok(client) => Ok(client),
            // Azure SQL gateways answer the login with a redirect to the real node
            Err(tiberius::error::Error::Routing { host, port }) => {
                info!(%host, port, "Following server redirect");
                let mut config = config;
                config.host(&host);
                config.port(port);
                let tcp = TcpStream::connect(config.get_addr()).await?;
                tcp.set_nodelay(true)?;
                Ok(Client::connect(config, tcp.compat_write()).await?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Connector for MssqlConnector {
    type Handle = MssqlSession;

    async fn connect(&self, connection_string: &str) -> DbResult<MssqlSession> {
        let config = Config::from_ado_string(connection_string).map_err(|e| {
            DbError::configuration(format!("Invalid SQL Server connection string: {}", e))
        })?;

        let client = Self::open(config).await?;
        info!("Connected to SQL Server");
        Ok(MssqlSession {
            client: Mutex::new(client),
        })
    }

    async fn close(&self, handle: MssqlSession) -> DbResult<()> {
        handle.client.into_inner().close().await?;
        Ok(())
    }
}

impl Session for MssqlSession {
    async fn query(&self, sql: &str, params: &[QueryParam]) -> DbResult<Vec<JsonRow>> {
        let mut query = Query::new(sql.to_string());
        for param in params {
            match param {
                QueryParam::Int(v) => query.bind(*v),
                QueryParam::String(v) => query.bind(v.clone()),
            }
        }

        let mut client = self.client.lock().await;
        let rows = query.query(&mut *client).await?.into_first_result().await?;
        Ok(rows.into_iter().map(row_to_json).collect())
    }
}
