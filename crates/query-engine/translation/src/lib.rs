//! Translate untrusted request parameters into a [`QueryDescriptor`]:
//! a parameterized filter conjunction, pagination, and ordering, checked
//! against a field allow-list.
//!
//! [`QueryDescriptor`]: query_engine_sql::sql::execution_plan::QueryDescriptor

pub mod translation;
