//! Criteria objects: one optional filter per queryable field.

mod book;

use arrow::record_batch::RecordBatch;
use serde::de::DeserializeOwned;

use crate::engine;
use crate::error::Result;
use crate::predicate::Expr;

pub use book::{BookCriteria, author_fields, fields as book_fields};

/// A set of optional per-field filters that compiles into one predicate
pub trait Criteria {
    /// The conjunction of every present filter's conditions
    fn to_predicate(&self) -> Expr;

    /// Keep the rows of `batch` matching these criteria
    ///
    /// # Errors
    /// Returns an error if the predicate cannot be evaluated against `batch`.
    fn select(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        engine::apply_predicate(batch, &self.to_predicate())
    }
}

/// Parse a criteria object from its JSON form
///
/// Field and condition names are camelCase; absent and `null` entries are
/// both "no constraint".
///
/// # Errors
/// Returns [`crate::error::Error::Criteria`] when the payload is malformed.
pub fn from_json<C: DeserializeOwned>(json: &str) -> Result<C> {
    Ok(serde_json::from_str(json)?)
}
