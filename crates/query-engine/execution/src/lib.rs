//! Execute query descriptors and task mutations against the database.

pub mod error;
pub mod store;
pub mod task;
