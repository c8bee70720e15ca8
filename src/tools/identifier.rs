//! Identifier whitelisting.
//!
//! SQL identifiers cannot be bound as parameters, so every table, schema and
//! column name that reaches query text must match [`IDENTIFIER_PATTERN`] and
//! is then bracket-quoted. Nothing is escaped: names that do not match are
//! rejected (entities) or dropped (projected columns, filters).

use crate::error::{DbError, DbResult};
use crate::models::{DEFAULT_SCHEMA, EqualityFilter, QualifiedName};
use regex::Regex;
use std::sync::LazyLock;

pub const IDENTIFIER_PATTERN: &str = r"^[a-zA-Z_][a-zA-Z0-9_]*$";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"));

static EQUALITY_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*)=(.+)$").expect("filter pattern is valid")
});

pub const INVALID_TABLE_NAME: &str =
    "Invalid table name. Use alphanumeric and underscores only.";

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Parse `table` or `schema.table`, qualifying bare names with `dbo`.
pub fn parse_entity(entity: &str) -> DbResult<QualifiedName> {
    if entity.is_empty() {
        return Err(DbError::validation("entity (table name) is required"));
    }

    let parts: Vec<&str> = entity.split('.').collect();
    if parts.len() > 2 || !parts.iter().all(|p| is_identifier(p)) {
        return Err(DbError::validation(INVALID_TABLE_NAME));
    }

    Ok(match parts.as_slice() {
        [schema, table] => QualifiedName {
            schema: (*schema).to_string(),
            table: (*table).to_string(),
        },
        _ => QualifiedName {
            schema: DEFAULT_SCHEMA.to_string(),
            table: entity.to_string(),
        },
    })
}

/// Split a comma-separated column list, keeping only valid identifiers.
///
/// Invalid entries are dropped silently; an empty result means "all columns".
pub fn parse_columns(select: Option<&str>) -> Vec<String> {
    select
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|c| is_identifier(c))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a `column=value` filter. Anything else yields `None` and is ignored.
pub fn parse_filter(filter: Option<&str>) -> Option<EqualityFilter> {
    let trimmed = filter?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let caps = EQUALITY_FILTER.captures(trimmed)?;
    Some(EqualityFilter {
        column: caps[1].to_string(),
        value: caps[2].trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_pattern() {
        assert!(is_identifier("Products"));
        assert!(is_identifier("_tmp1"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("name\n"));
    }

    #[test]
    fn test_bare_entity_uses_default_schema() {
        let name = parse_entity("Products").unwrap();
        assert_eq!(name.to_string(), "dbo.Products");
    }

    #[test]
    fn test_qualified_entity() {
        let name = parse_entity("sales.Orders").unwrap();
        assert_eq!(name.schema, "sales");
        assert_eq!(name.table, "Orders");
    }

    #[test]
    fn test_entity_rejections() {
        for entity in [
            "a.b.c",
            "db.sales.Orders",
            "Orders;DROP",
            "9lives",
            ".Orders",
            "sales.",
            "[dbo].[Orders]",
            " Orders",
        ] {
            let err = parse_entity(entity).unwrap_err();
            assert!(matches!(err, DbError::Validation { .. }), "{entity}");
            assert_eq!(err.to_string(), INVALID_TABLE_NAME);
        }
    }

    #[test]
    fn test_empty_entity() {
        let err = parse_entity("").unwrap_err();
        assert_eq!(err.to_string(), "entity (table name) is required");
    }

    #[test]
    fn test_columns_drop_invalid_entries() {
        // Documented behavior: invalid names are dropped, not rejected.
        let cols = parse_columns(Some("Name, ; DROP TABLE x, Price"));
        assert_eq!(cols, vec!["Name", "Price"]);
    }

    #[test]
    fn test_columns_none_or_all_invalid() {
        assert!(parse_columns(None).is_empty());
        assert!(parse_columns(Some("")).is_empty());
        assert!(parse_columns(Some("1a, b-c")).is_empty());
    }

    #[test]
    fn test_filter_value_is_verbatim() {
        let f = parse_filter(Some("Status=active'; --")).unwrap();
        assert_eq!(f.column, "Status");
        assert_eq!(f.value, "active'; --");
    }

    #[test]
    fn test_filter_trims() {
        let f = parse_filter(Some("  Status= active  ")).unwrap();
        assert_eq!(f.value, "active");
    }

    #[test]
    fn test_filter_value_may_contain_equals() {
        let f = parse_filter(Some("Expr=a=b")).unwrap();
        assert_eq!(f.column, "Expr");
        assert_eq!(f.value, "a=b");
    }

    #[test]
    fn test_malformed_filter_is_ignored() {
        // Documented behavior: a malformed filter means "no filter".
        assert!(parse_filter(Some("not-a-kv-pair")).is_none());
        assert!(parse_filter(Some("Status =active")).is_none());
        assert!(parse_filter(Some("Status=")).is_none());
        assert!(parse_filter(Some("   ")).is_none());
        assert!(parse_filter(None).is_none());
    }
}
