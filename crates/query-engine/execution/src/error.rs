//! Errors raised while executing statements.

use thiserror::Error;

use crate::task::UnknownStatus;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Status(#[from] UnknownStatus),
}
