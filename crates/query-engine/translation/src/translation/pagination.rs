//! Translate `page` and `page_size` parameters into OFFSET/LIMIT.

use std::collections::HashMap;

use query_engine_sql::sql::ast::Pagination;

use super::error::Error;

pub const PAGE: &str = "page";
pub const PAGE_SIZE: &str = "page_size";

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Resolve pagination from the request parameters.
///
/// `page` defaults to 1 and `page_size` to 50. A `page_size` of 0 is the
/// escape hatch for listing all rows and skips the remaining checks.
pub fn translate_pagination(values: &HashMap<String, String>) -> Result<Pagination, Error> {
    let page = parse_or_default(values, PAGE, DEFAULT_PAGE)?;
    let page_size = parse_or_default(values, PAGE_SIZE, DEFAULT_PAGE_SIZE)?;

    if page_size == 0 {
        return Ok(Pagination::All);
    }
    if page < 1 || page_size < 1 {
        return Err(Error::InvalidPagination { page, page_size });
    }

    let offset = (page - 1)
        .checked_mul(page_size)
        .ok_or(Error::InvalidPagination { page, page_size })?;
    Ok(Pagination::OffsetLimit {
        offset,
        limit: page_size,
    })
}

fn parse_or_default(
    values: &HashMap<String, String>,
    name: &str,
    default: i64,
) -> Result<i64, Error> {
    match values.get(name).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::InvalidParameter(name.to_string())),
    }
}
