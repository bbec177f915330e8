//! Errors for request translation.

use query_engine_metadata::FieldKind;
use thiserror::Error;

/// A client-input error raised by one of the translation phases.
/// None of these are fatal; callers surface them as bad-request responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("error parsing {0} as an integer")]
    InvalidParameter(String),
    #[error("pagination starts at page 1 with a page size of 1 or greater, got page {page} page size {page_size}")]
    InvalidPagination { page: i64, page_size: i64 },
    #[error("field {field} value {value} can't be converted to {kind}")]
    TypeMismatch {
        field: String,
        value: String,
        kind: FieldKind,
    },
    #[error("ordering clause {field} has wrong modifier {modifier}")]
    UnknownOrderModifier { field: String, modifier: String },
    #[error("field {0} is not allowed for sorting")]
    FieldNotAllowed(String),
}

/// The translation phase that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Filter,
    Pagination,
    Order,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::Filter => write!(f, "filter"),
            Phase::Pagination => write!(f, "pagination"),
            Phase::Order => write!(f, "order"),
        }
    }
}

/// An [`Error`] wrapped with the phase it came from.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("error parsing query {phase}: {error}")]
pub struct TranslateError {
    pub phase: Phase,
    pub error: Error,
}

impl Error {
    pub fn in_phase(self, phase: Phase) -> TranslateError {
        TranslateError { phase, error: self }
    }
}
