//! MSSQL MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to discover the schema of a SQL Server database and read rows from it.

use clap::Parser;
use mssql_mcp_server::config::Config;
use mssql_mcp_server::db::{ConnectionProvider, MssqlConnector};
use mssql_mcp_server::transport::{StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr; stdout carries the MCP protocol.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    init_tracing(&config);

    info!(label = %config.label, "Starting MSSQL MCP Server v{}", env!("CARGO_PKG_VERSION"));

    // The connection string is checked on first use so the server can still
    // answer `ping` and report the misconfiguration through tool results.
    if config.connection_string.is_none() {
        warn!(
            "{} is not set; database tools will fail until it is configured",
            mssql_mcp_server::db::CONNECTION_STRING_ENV
        );
    }

    let provider = Arc::new(ConnectionProvider::new(
        MssqlConnector,
        config.connection_string.clone(),
    ));

    let transport = StdioTransport::new(provider, config.label.clone());
    info!(transport = transport.name(), "MCP server running");

    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
