//! Query-related data models.
//!
//! This module defines the validated form of a `read_records` call and the
//! parameterized statement built from it.

use std::fmt;

/// Default row limit for record reads.
pub const DEFAULT_ROW_LIMIT: u32 = 100;

/// Maximum allowed row limit.
pub const MAX_ROW_LIMIT: u32 = 1000;

/// Schema applied to bare table names.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// A parameter value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Int(i64),
    String(String),
}

/// A schema-qualified table name whose parts have passed identifier validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub schema: String,
    pub table: String,
}

impl QualifiedName {
    /// Bracket-quoted form for use in query text, e.g. `[dbo].[Products]`.
    pub fn quoted(&self) -> String {
        format!("[{}].[{}]", self.schema, self.table)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// A single `column = value` filter. The value is always bound, never inlined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFilter {
    pub column: String,
    pub value: String,
}

/// A validated record read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub table: QualifiedName,
    /// Projected columns; empty means all columns.
    pub columns: Vec<String>,
    pub filter: Option<EqualityFilter>,
    pub limit: u32,
}

/// SQL text plus the values bound to its `@P1..@Pn` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl ReadRequest {
    /// Projection clause: bracket-quoted columns, or `*` when none were kept.
    pub fn projection(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| format!("[{}]", c))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// Build the parameterized SELECT for this request.
    ///
    /// Only the row limit and the filter value are bound; identifiers are
    /// bracket-quoted and must already be validated.
    pub fn to_statement(&self) -> SelectStatement {
        let mut params = vec![QueryParam::Int(i64::from(self.limit))];
        let mut sql = format!(
            "SELECT TOP (@P1) {} FROM {}",
            self.projection(),
            self.table.quoted()
        );

        if let Some(filter) = &self.filter {
            params.push(QueryParam::String(filter.value.clone()));
            sql.push_str(&format!(" WHERE [{}] = @P{}", filter.column, params.len()));
        }

        SelectStatement { sql, params }
    }
}
