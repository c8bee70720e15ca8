//! Output formatting utilities for MCP tools.

use crate::db::JsonRow;
use crate::error::{DbError, DbResult};
use crate::models::TableDescriptor;

pub const NO_RECORDS_FOUND: &str = "No records found.";

/// Render rows as a two-space indented JSON array.
pub fn format_records(rows: &[JsonRow]) -> DbResult<String> {
    if rows.is_empty() {
        return Ok(NO_RECORDS_FOUND.to_string());
    }
    serde_json::to_string_pretty(rows)
        .map_err(|e| DbError::internal(format!("Failed to serialize rows: {}", e)))
}

/// Render a schema listing.
///
/// ```text
/// <label> database entities:
///
/// ## dbo.Products
///   - Id: int
///   - Name: nvarchar(100) (nullable)
/// ```
pub fn format_entities(label: &str, tables: &[TableDescriptor]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for table in tables {
        lines.push(format!("\n## {}", table.name));
        for col in &table.columns {
            let nullable = if col.nullable() { " (nullable)" } else { "" };
            lines.push(format!("  - {}: {}{}", col.name, col.type_display(), nullable));
        }
    }
    format!("{} database entities:\n{}", label, lines.join("\n"))
}
