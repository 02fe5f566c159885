//! Error handling for predicate evaluation and criteria loading.
//!
//! Building filters and compiling them into predicates never fails. Errors only
//! surface once a predicate meets data: a field path that does not resolve, a
//! column type the engine cannot compare, or a failure inside Arrow/Parquet.

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error as ThisError;

use crate::predicate::FieldPath;

/// Errors raised by the evaluation engine, the reader and criteria parsing
#[derive(Debug, ThisError)]
pub enum Error {
    /// A field path names a column the batch does not have
    #[error("column '{0}' not found")]
    ColumnNotFound(FieldPath),

    /// A relationship hop targets a column that is not a struct
    #[error("column '{relation}' is not a struct and cannot be traversed to '{field}'")]
    NotAStruct { relation: String, field: String },

    /// A column type or literal combination the engine cannot evaluate
    #[error("unsupported {context} for column '{field}': {detail}")]
    UnsupportedType {
        field: FieldPath,
        context: &'static str,
        detail: String,
    },

    /// Error raised by an Arrow compute kernel
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error opening or reading a file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Criteria payload could not be parsed
    #[error("invalid criteria: {0}")]
    Criteria(#[from] serde_json::Error),
}

/// Result type for evaluation and loading operations
pub type Result<T> = std::result::Result<T, Error>;

/// Create a column-not-found error for a field path
pub fn column_not_found<T>(field: &FieldPath) -> Result<T> {
    Err(Error::ColumnNotFound(field.clone()))
}

/// Create an unsupported-type error
///
/// # Arguments
/// * `field` - The field path being evaluated
/// * `context` - The operation that rejected the type, e.g. "comparison"
/// * `detail` - Description of the offending type or literal
pub fn unsupported_type<T>(
    field: &FieldPath,
    context: &'static str,
    detail: impl std::fmt::Display,
) -> Result<T> {
    Err(Error::UnsupportedType {
        field: field.clone(),
        context,
        detail: detail.to_string(),
    })
}
