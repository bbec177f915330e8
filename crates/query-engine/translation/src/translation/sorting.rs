//! Translate the `order` parameter into an ORDER BY clause.
//!
//! Column identifiers cannot be bound as parameters, so the sort allow-list
//! is the only safety mechanism here: every item must name an allow-listed
//! column before it may appear in clause text.

use std::collections::HashMap;

use query_engine_metadata::FieldRegistry;
use query_engine_sql::sql::ast::{ColumnName, OrderBy, OrderByDirection, OrderByElement};

use super::error::Error;

pub const ORDER: &str = "order";

/// Parse a comma-separated list of `field` or `field:asc|desc` items.
///
/// Accepted items keep their request order: callers control sort precedence
/// by the order they list fields, each one individually allow-listed. This
/// is deliberately unlike filtering, which follows registry order.
pub fn translate_order_by(
    values: &HashMap<String, String>,
    registry: &FieldRegistry,
) -> Result<OrderBy, Error> {
    let Some(raw) = values.get(ORDER).filter(|v| !v.is_empty()) else {
        return Ok(OrderBy::default());
    };

    let mut elements = Vec::new();
    for item in raw.split(',') {
        let (field, modifier) = match item.split_once(':') {
            Some((field, modifier)) => (field, Some(modifier)),
            None => (item, None),
        };
        let direction = match modifier {
            None => OrderByDirection::Unspecified,
            Some("asc") => OrderByDirection::Asc,
            Some("desc") => OrderByDirection::Desc,
            Some(other) => {
                return Err(Error::UnknownOrderModifier {
                    field: field.to_string(),
                    modifier: other.to_string(),
                })
            }
        };
        // an empty field token fails closed as FieldNotAllowed("")
        if !registry.is_sortable(field) {
            return Err(Error::FieldNotAllowed(field.to_string()));
        }
        elements.push(OrderByElement {
            column: ColumnName(field.to_string()),
            direction,
        });
    }
    Ok(OrderBy { elements })
}
