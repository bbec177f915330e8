//! Typed representation of the SQL clauses produced by request translation,
//! and their conversion to parameterized statement fragments.

pub mod sql;
