//! Data models for the MSSQL MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod query;
pub mod schema;

// Re-export commonly used types
pub use query::{
    DEFAULT_ROW_LIMIT, DEFAULT_SCHEMA, EqualityFilter, MAX_ROW_LIMIT, QualifiedName, QueryParam,
    ReadRequest, SelectStatement,
};
pub use schema::{ColumnDescriptor, TableDescriptor, group_columns};
