//! Error types for the query crate.
//!
//! Running a query never fails. These errors come from parsing query parts
//! out of user-supplied strings (command lines, config files).

use thiserror::Error;

/// Errors that can occur when parsing query parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Sort direction is neither `asc` nor `desc`.
    #[error("invalid sort direction '{0}': expected 'asc' or 'desc'")]
    InvalidDirection(String),

    /// Sort key string is malformed.
    #[error("invalid sort key '{0}': expected 'field' or 'field:asc|desc'")]
    InvalidSortKey(String),

    /// Filter specification is malformed.
    #[error("invalid filter '{0}': expected 'field=value[,value...]'")]
    InvalidFilter(String),

    /// Bound clause is malformed.
    #[error("invalid bound '{spec}': {reason}")]
    InvalidBound { spec: String, reason: &'static str },

    /// Comparison operator is not recognised.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Page size must be at least one.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Result type for query parsing.
pub type Result<T> = std::result::Result<T, QueryError>;
