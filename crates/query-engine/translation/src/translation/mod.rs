//! Translate a raw request parameter map into a [`QueryDescriptor`].

pub mod error;
pub mod filtering;
pub mod pagination;
pub mod sorting;

use std::collections::HashMap;

use query_engine_metadata::FieldRegistry;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use error::{Phase, TranslateError};

/// Run the filter, pagination and order translations against the registry's
/// allow-lists and merge the results into one descriptor.
///
/// The three translations are independent; the first failure wins and is
/// wrapped with the phase that produced it. Pure and stateless: safe to call
/// from any number of concurrent requests.
pub fn translate(
    values: &HashMap<String, String>,
    registry: &FieldRegistry,
) -> Result<QueryDescriptor, TranslateError> {
    let where_ = filtering::translate_filters(values, registry.filters())
        .map_err(|e| e.in_phase(Phase::Filter))?;

    let pagination = pagination::translate_pagination(values)
        .map_err(|e| e.in_phase(Phase::Pagination))?;

    let order_by =
        sorting::translate_order_by(values, registry).map_err(|e| e.in_phase(Phase::Order))?;

    let descriptor = QueryDescriptor {
        where_,
        pagination,
        order_by,
    };
    tracing::debug!(?descriptor, "translated request parameters");
    Ok(descriptor)
}
