//! Convert clause AST nodes to their low-level SQL string form.

use super::ast::{Comparison, OrderBy, OrderByDirection, Pagination, Predicate, Where};
use super::string::SQL;

impl Where {
    /// Render the conjunction as `column op $n` fragments joined by ` and `.
    /// Renders nothing when there are no predicates.
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(predicates) = self;
        for (index, predicate) in predicates.iter().enumerate() {
            predicate.to_sql(sql);
            if index < predicates.len() - 1 {
                sql.append_syntax(" and ");
            }
        }
    }
}

impl Predicate {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.column.0);
        sql.append_syntax(" ");
        sql.append_syntax(self.comparison.as_str());
        sql.append_syntax(" ");
        sql.append_param(self.value.clone());
    }
}

impl Comparison {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::Equals => "=",
            Comparison::LessThan => "<",
            Comparison::GreaterThan => ">",
        }
    }
}

impl Pagination {
    /// Render as `offset {o} limit {l}`, with no trailing whitespace.
    /// Interpolating here is safe: both numbers are parsed integers.
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Pagination::All => {}
            Pagination::OffsetLimit { offset, limit } => {
                sql.append_syntax(&format!("offset {offset} limit {limit}"));
            }
        }
    }
}

impl OrderBy {
    /// Render as comma-joined `column[ direction]` items, in element order.
    pub fn to_sql(&self, sql: &mut SQL) {
        for (index, element) in self.elements.iter().enumerate() {
            sql.append_identifier(&element.column.0);
            sql.append_syntax(element.direction.as_suffix());
            if index < self.elements.len() - 1 {
                sql.append_syntax(",");
            }
        }
    }
}

impl OrderByDirection {
    pub fn as_suffix(self) -> &'static str {
        match self {
            OrderByDirection::Asc => " asc",
            OrderByDirection::Desc => " desc",
            OrderByDirection::Unspecified => "",
        }
    }
}
