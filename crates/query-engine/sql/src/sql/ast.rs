//! Type definitions of the clause AST.
//!
//! Column names in this AST must come from a field registry, never from
//! request input. Request-supplied values only ever appear as [`Value`]s,
//! which are bound positionally at execution time.

/// A typed value bound to a positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Text(String),
}

/// A storage column name, taken from an allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnName(pub String);

/// Comparison operators the WHERE renderer supports.
///
/// The request-driven path only ever emits `Equals`; the other operators have
/// no request-facing selection mechanism yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    LessThan,
    GreaterThan,
}

/// A single WHERE clause item.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: ColumnName,
    pub comparison: Comparison,
    pub value: Value,
}

/// A conjunction of predicates. Empty means no WHERE clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Where(pub Vec<Predicate>);

/// Pagination resolved from `page` and `page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Explicit request for all rows (`page_size=0`). Renders to nothing.
    All,
    OffsetLimit { offset: i64, limit: i64 },
}

/// An ORDER BY clause. Element order is significant: the first element is
/// the primary sort key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub column: ColumnName,
    pub direction: OrderByDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
    /// No direction token was given; the storage engine default applies.
    Unspecified,
}
