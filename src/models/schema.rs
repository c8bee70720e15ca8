//! Schema-related data models.
//!
//! Column rows arrive flat from `INFORMATION_SCHEMA`; [`group_columns`] folds
//! them into per-table descriptors without reordering.

use serde::Deserialize;
use std::collections::HashMap;

/// One column of a base table, as returned by the introspection query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDescriptor {
    #[serde(rename = "TABLE_SCHEMA")]
    pub schema: String,
    #[serde(rename = "TABLE_NAME")]
    pub table: String,
    #[serde(rename = "COLUMN_NAME")]
    pub name: String,
    #[serde(rename = "DATA_TYPE")]
    pub data_type: String,
    /// "YES" or "NO"
    #[serde(rename = "IS_NULLABLE")]
    pub is_nullable: String,
    /// -1 for `MAX` types, NULL for fixed-size types
    #[serde(rename = "CHARACTER_MAXIMUM_LENGTH", default)]
    pub max_length: Option<i64>,
}

impl ColumnDescriptor {
    pub fn nullable(&self) -> bool {
        self.is_nullable.eq_ignore_ascii_case("YES")
    }

    /// Data type with a `(n)` suffix when the maximum length is positive.
    pub fn type_display(&self) -> String {
        match self.max_length {
            Some(len) if len > 0 => format!("{}({})", self.data_type, len),
            _ => self.data_type.clone(),
        }
    }
}

/// A table and its columns in declared ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// `"<schema>.<table>"`
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// Group flat column rows by table, keeping tables in first-seen order.
pub fn group_columns(columns: Vec<ColumnDescriptor>) -> Vec<TableDescriptor> {
    let mut tables: Vec<TableDescriptor> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for column in columns {
        let key = format!("{}.{}", column.schema, column.table);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            tables.push(TableDescriptor {
                name: key,
                columns: Vec::new(),
            });
            tables.len() - 1
        });
        tables[slot].columns.push(column);
    }

    tables
}
