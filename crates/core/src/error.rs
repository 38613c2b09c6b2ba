//! Validation errors raised by the pure core

use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("Max results must be between 1 and {max}, got {got}")]
    InvalidMaxResults { got: usize, max: usize },

    #[error("Rate limit must admit at least one call per {period:?}")]
    InvalidQuota { period: Duration },

    #[error("Unknown provider: {0}. Valid providers: google, openlibrary")]
    UnknownProvider(String),
}

pub type Result<T> = std::result::Result<T, Error>;
