//! Translate allow-listed filter parameters into a WHERE conjunction.

use std::collections::HashMap;

use query_engine_metadata::{FieldKind, FieldRule};
use query_engine_sql::sql::ast::{ColumnName, Comparison, Predicate, Value, Where};

use super::error::Error;

/// Build the filter conjunction by walking the allow-list in registry order.
///
/// Request fields that are not in the allow-list are silently ignored; only
/// an allow-listed field whose value fails its kind check is an error.
/// Column names are taken from the rule, never from the request, and values
/// end up as bound parameters, never in clause text.
pub fn translate_filters(
    values: &HashMap<String, String>,
    rules: &[FieldRule],
) -> Result<Where, Error> {
    let mut predicates = Vec::new();
    for rule in rules {
        let Some(raw) = values.get(&rule.request_name).filter(|v| !v.is_empty()) else {
            continue;
        };
        predicates.push(Predicate {
            column: ColumnName(rule.column_name.clone()),
            // no request-facing mechanism selects other comparisons yet
            comparison: Comparison::Equals,
            value: parse_value(rule, raw)?,
        });
    }
    Ok(Where(predicates))
}

fn parse_value(rule: &FieldRule, raw: &str) -> Result<Value, Error> {
    let mismatch = || Error::TypeMismatch {
        field: rule.request_name.clone(),
        value: raw.to_string(),
        kind: rule.kind,
    };
    match rule.kind {
        FieldKind::Integer => raw.parse().map(Value::Int).map_err(|_| mismatch()),
        FieldKind::Boolean => raw.parse().map(Value::Bool).map_err(|_| mismatch()),
        FieldKind::Text | FieldKind::Unchecked => Ok(Value::Text(raw.to_string())),
    }
}
