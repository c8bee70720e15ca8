//! MCP tool implementations.
//!
//! This module contains the database tool handlers:
//! - `describe_entities`: List base tables and their columns
//! - `read_records`: Read rows from one table
//! - `identifier`: Identifier whitelisting shared by the handlers
//! - `format`: Text rendering of listings and rows

pub mod describe;
pub mod format;
pub mod identifier;
pub mod read;

pub use describe::SchemaIntrospector;
pub use read::{ReadRecordsInput, RecordReader};
