//! Schema introspection tool.
//!
//! This module implements the `describe_entities` MCP tool, listing every base
//! table with its columns.

use crate::db::{ConnectionProvider, Connector, JsonRow, Session};
use crate::error::{DbError, DbResult};
use crate::models::{ColumnDescriptor, group_columns};
use crate::tools::format::format_entities;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

/// Base tables and their columns, in schema, table, ordinal order.
pub const LIST_COLUMNS: &str = r#"
SELECT
    t.TABLE_SCHEMA,
    t.TABLE_NAME,
    c.COLUMN_NAME,
    c.DATA_TYPE,
    c.IS_NULLABLE,
    c.CHARACTER_MAXIMUM_LENGTH
FROM INFORMATION_SCHEMA.TABLES t
JOIN INFORMATION_SCHEMA.COLUMNS c
    ON t.TABLE_SCHEMA = c.TABLE_SCHEMA AND t.TABLE_NAME = c.TABLE_NAME
WHERE t.TABLE_TYPE = 'BASE TABLE'
ORDER BY t.TABLE_SCHEMA, t.TABLE_NAME, c.ORDINAL_POSITION
"#;

/// Handler for schema listings.
pub struct SchemaIntrospector<C: Connector> {
    provider: Arc<ConnectionProvider<C>>,
    label: String,
}

impl<C: Connector> SchemaIntrospector<C> {
    /// `label` names the database in the listing header.
    pub fn new(provider: Arc<ConnectionProvider<C>>, label: impl Into<String>) -> Self {
        Self {
            provider,
            label: label.into(),
        }
    }

    pub async fn describe_entities(&self) -> DbResult<String> {
        let session = self.provider.acquire().await?;
        let rows = session.query(LIST_COLUMNS, &[]).await?;

        let columns = rows
            .into_iter()
            .map(column_from_row)
            .collect::<DbResult<Vec<_>>>()?;
        let tables = group_columns(columns);

        info!(tables = tables.len(), "Described entities");
        Ok(format_entities(&self.label, &tables))
    }
}

fn column_from_row(row: JsonRow) -> DbResult<ColumnDescriptor> {
    serde_json::from_value(JsonValue::Object(row))
        .map_err(|e| DbError::internal(format!("Unexpected column metadata row: {}", e)))
}
