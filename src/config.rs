//! Configuration handling for the MSSQL MCP Server.
//!
//! This module provides configuration management via CLI arguments and environment variables.

use crate::db::CONNECTION_STRING_ENV;
use clap::Parser;

pub const DEFAULT_LABEL: &str = "SQL Server";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for the MSSQL MCP Server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mssql-mcp-server",
    about = "MCP server exposing SQL Server schema discovery and read-only record access",
    version,
    author
)]
pub struct Config {
    /// SQL Server connection string (ADO.NET format).
    /// Read on the first tool call that needs the database, not at startup.
    #[arg(
        long,
        value_name = "CONNECTION_STRING",
        env = CONNECTION_STRING_ENV,
        hide_env_values = true
    )]
    pub connection_string: Option<String>,

    /// Database name shown in tool output (e.g. "Inventory")
    #[arg(long, default_value = DEFAULT_LABEL, env = "MCP_DATABASE_LABEL")]
    pub label: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            connection_string: None,
            label: DEFAULT_LABEL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }
}
