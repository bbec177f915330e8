//! The field allow-list consulted during request translation.

use std::fmt;

/// The kind a filter value must parse as before it may be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    /// Bound as text without a kind check.
    Unchecked,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Unchecked => write!(f, "unchecked"),
        }
    }
}

/// Maps one request parameter name to its storage column and expected kind.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub request_name: String,
    pub column_name: String,
    pub kind: FieldKind,
}

/// The allow-list of filterable and sortable fields for one collection.
///
/// Registered once at startup and only read afterwards. Filter rules keep
/// their registration order; translation iterates them in that order, so the
/// registry fixes the field order of the emitted predicate clause.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    filters: Vec<FieldRule>,
    sortable: Vec<String>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filterable field.
    pub fn filter(mut self, request_name: &str, column_name: &str, kind: FieldKind) -> Self {
        self.filters.push(FieldRule {
            request_name: request_name.to_string(),
            column_name: column_name.to_string(),
            kind,
        });
        self
    }

    /// Register a sortable column.
    pub fn sortable(mut self, column_name: &str) -> Self {
        self.sortable.push(column_name.to_string());
        self
    }

    /// Filter rules, in registration order.
    pub fn filters(&self) -> &[FieldRule] {
        &self.filters
    }

    pub fn sortable_columns(&self) -> &[String] {
        &self.sortable
    }

    pub fn is_sortable(&self, column_name: &str) -> bool {
        self.sortable.iter().any(|allowed| allowed == column_name)
    }
}
