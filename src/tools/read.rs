//! Record reading tool.
//!
//! This module implements the `read_records` MCP tool: a single-table SELECT
//! with optional projection, one optional equality filter and a row cap.

use crate::db::{ConnectionProvider, Connector, Session};
use crate::error::DbResult;
use crate::models::{DEFAULT_ROW_LIMIT, MAX_ROW_LIMIT, ReadRequest};
use crate::tools::format::format_records;
use crate::tools::identifier::{parse_columns, parse_entity, parse_filter};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for the read_records tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ReadRecordsInput {
    /// Table name (e.g. Products) or schema.table (e.g. dbo.Products)
    pub entity: String,
    /// Comma-separated column names (default: all columns)
    #[serde(default)]
    pub select: Option<String>,
    /// Simple filter: column=value (e.g. 'Status=active'). Only one equality filter supported.
    #[serde(default)]
    pub filter: Option<String>,
    /// Max rows to return. Default: 100, max: 1000
    #[serde(default, deserialize_with = "deserialize_limit")]
    #[schemars(default = "advertised_limit", range(min = 1, max = 1000))]
    pub limit: Option<u32>,
}

fn advertised_limit() -> Option<u32> {
    Some(DEFAULT_ROW_LIMIT)
}

/// Reject out-of-range limits while decoding, before the tool body runs.
///
/// JSON numbers with no fractional part (`5.0`) count as integers.
fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(v) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if v.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!(
            "limit must be a whole number, got {}",
            v
        )));
    }
    if !(1.0..=f64::from(MAX_ROW_LIMIT)).contains(&v) {
        return Err(serde::de::Error::custom(format!(
            "limit must be between 1 and {}, got {}",
            MAX_ROW_LIMIT, v
        )));
    }
    Ok(Some(v as u32))
}

impl TryFrom<ReadRecordsInput> for ReadRequest {
    type Error = crate::error::DbError;

    fn try_from(input: ReadRecordsInput) -> DbResult<Self> {
        Ok(ReadRequest {
            table: parse_entity(&input.entity)?,
            columns: parse_columns(input.select.as_deref()),
            filter: parse_filter(input.filter.as_deref()),
            limit: input.limit.unwrap_or(DEFAULT_ROW_LIMIT),
        })
    }
}

/// Handler for record reads.
pub struct RecordReader<C: Connector> {
    provider: Arc<ConnectionProvider<C>>,
}

impl<C: Connector> RecordReader<C> {
    pub fn new(provider: Arc<ConnectionProvider<C>>) -> Self {
        Self { provider }
    }

    /// Validate the input, run the SELECT and render the rows.
    ///
    /// Validation happens before a connection is acquired, so rejected input
    /// never reaches the database.
    pub async fn read_records(&self, input: ReadRecordsInput) -> DbResult<String> {
        let request = ReadRequest::try_from(input)?;
        let statement = request.to_statement();
        debug!(sql = %statement.sql, params = statement.params.len(), "Built read statement");

        let session = self.provider.acquire().await?;
        let rows = session.query(&statement.sql, &statement.params).await?;

        info!(
            entity = %request.table,
            columns = request.columns.len(),
            filtered = request.filter.is_some(),
            rows = rows.len(),
            "Read records"
        );
        format_records(&rows)
    }
}
