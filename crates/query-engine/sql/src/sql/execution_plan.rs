//! The complete description of one query, handed to the execution layer.

use super::ast::{OrderBy, Pagination, Where};
use super::string::SQL;

/// Everything the execution layer needs to build one SELECT statement:
/// a filter conjunction with its bound values, pagination, and ordering.
///
/// Built fresh per request by translation and consumed once. The execution
/// layer concatenates the rendered parts in the fixed order filter, then
/// pagination, then order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub where_: Where,
    pub pagination: Pagination,
    pub order_by: OrderBy,
}

impl QueryDescriptor {
    /// The WHERE conjunction text with its positional bound values.
    pub fn where_sql(&self) -> SQL {
        let mut sql = SQL::new();
        self.where_.to_sql(&mut sql);
        sql
    }

    /// The pagination text. Empty when all rows were requested.
    pub fn pagination_sql(&self) -> String {
        let mut sql = SQL::new();
        self.pagination.to_sql(&mut sql);
        sql.sql
    }

    /// The ORDER BY item list text, without the `order by` keywords.
    pub fn order_by_sql(&self) -> String {
        let mut sql = SQL::new();
        self.order_by.to_sql(&mut sql);
        sql.sql
    }
}
