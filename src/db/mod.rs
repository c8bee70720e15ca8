//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Shared connection provider and the driver seam (`Connector`/`Session`)
//! - SQL Server driver integration
//! - Type mappings from driver values to JSON

pub mod mssql;
pub mod provider;
pub mod types;

pub use mssql::{MssqlConnector, MssqlSession};
pub use provider::{CONNECTION_STRING_ENV, ConnectionProvider, Connector, JsonRow, Session};
