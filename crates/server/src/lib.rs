//! The todolist HTTP service: task CRUD over Postgres with live watch events.

pub mod response;
pub mod routes;
pub mod state;
pub mod watcher;
