//! SQL Server value mappings.
//!
//! Converts `tiberius` rows into JSON objects whose keys follow the driver's
//! column order.
//!
//! | SQL Server type                         | JSON                          |
//! |-----------------------------------------|-------------------------------|
//! | tinyint, smallint, int, bigint          | number                        |
//! | real, float                             | number (`null` if not finite) |
//! | decimal, numeric, money                 | number                        |
//! | bit                                     | boolean                       |
//! | char, varchar, nchar, nvarchar, text    | string                        |
//! | xml                                     | string                        |
//! | uniqueidentifier                        | string                        |
//! | binary, varbinary, image                | base64 string                 |
//! | datetime, datetime2, smalldatetime      | RFC 3339 string (UTC, millis) |
//! | datetimeoffset                          | RFC 3339 string (UTC, millis) |
//! | date, time                              | ISO 8601 string               |

use crate::db::provider::JsonRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use tiberius::{ColumnData, FromSql, Row};

/// Convert a driver row into a JSON object.
pub fn row_to_json(row: Row) -> JsonRow {
    let names: Vec<String> = row.columns().iter().map(|c| c.name().to_string()).collect();
    names
        .into_iter()
        .zip(row)
        .map(|(name, data)| (name, column_to_json(&data)))
        .collect()
}

/// Convert a single column value into JSON.
pub fn column_to_json(data: &ColumnData<'static>) -> JsonValue {
    match data {
        ColumnData::U8(v) => v.map_or(JsonValue::Null, JsonValue::from),
        ColumnData::I16(v) => v.map_or(JsonValue::Null, JsonValue::from),
        ColumnData::I32(v) => v.map_or(JsonValue::Null, JsonValue::from),
        ColumnData::I64(v) => v.map_or(JsonValue::Null, JsonValue::from),
        ColumnData::F32(v) => v.map_or(JsonValue::Null, |f| JsonValue::from(f64::from(f))),
        ColumnData::F64(v) => v.map_or(JsonValue::Null, JsonValue::from),
        ColumnData::Bit(v) => v.map_or(JsonValue::Null, JsonValue::Bool),
        ColumnData::String(v) => v
            .as_ref()
            .map_or(JsonValue::Null, |s| JsonValue::String(s.to_string())),
        ColumnData::Guid(v) => v.map_or(JsonValue::Null, |g| JsonValue::String(g.to_string())),
        ColumnData::Binary(v) => v
            .as_ref()
            .map_or(JsonValue::Null, |b| encode_binary(b.as_ref())),
        ColumnData::Numeric(v) => v
            .as_ref()
            .map_or(JsonValue::Null, |n| decimal_to_json(&n.to_string())),
        ColumnData::Xml(v) => v
            .as_ref()
            .map_or(JsonValue::Null, |x| JsonValue::String((**x).to_string())),
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            from_sql::<NaiveDateTime>(data, |dt| {
                dt.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
            })
        }
        ColumnData::DateTimeOffset(_) => from_sql::<DateTime<Utc>>(data, |dt| {
            dt.to_rfc3339_opts(SecondsFormat::Millis, true)
        }),
        ColumnData::Date(_) => from_sql::<NaiveDate>(data, |d| d.to_string()),
        ColumnData::Time(_) => from_sql::<NaiveTime>(data, |t| t.to_string()),
        #[allow(unreachable_patterns)]
        _ => JsonValue::Null,
    }
}

/// Decode a temporal value through the driver's chrono conversions.
fn from_sql<'a, T>(data: &'a ColumnData<'static>, render: impl FnOnce(T) -> String) -> JsonValue
where
    T: FromSql<'a>,
{
    match T::from_sql(data) {
        Ok(Some(value)) => JsonValue::String(render(value)),
        Ok(None) => JsonValue::Null,
        Err(e) => {
            tracing::error!("Failed to decode temporal value: {:?}", e);
            JsonValue::Null
        }
    }
}

/// Render a decimal as a JSON number, keeping the text if it does not parse.
pub fn decimal_to_json(text: &str) -> JsonValue {
    text.parse::<serde_json::Number>()
        .map(JsonValue::Number)
        .unwrap_or_else(|_| JsonValue::String(text.to_string()))
}

/// Encode binary data as base64.
pub fn encode_binary(bytes: &[u8]) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    JsonValue::String(STANDARD.encode(bytes))
}
