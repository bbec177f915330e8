//! Static descriptions of which request fields a collection accepts in
//! filters and order specs, and how they map to storage columns.

mod registry;

pub use registry::{FieldKind, FieldRegistry, FieldRule};
