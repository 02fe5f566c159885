//! Field path resolution against record batches.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StructArray, make_array};
use arrow::buffer::NullBuffer;
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result, column_not_found};
use crate::predicate::FieldPath;

/// Resolve a field path to a column of `batch`
///
/// A direct field is a top-level column. A one-hop path `relation.field`
/// reads child `field` of the struct column `relation`; rows where the
/// relation itself is null are null in the returned column.
///
/// # Errors
/// Returns `ColumnNotFound` when a column or struct child is missing and
/// `NotAStruct` when the relation column is not a struct.
pub fn resolve_column(batch: &RecordBatch, path: &FieldPath) -> Result<ArrayRef> {
    let Some(relation) = path.relation() else {
        return match batch.column_by_name(path.name()) {
            Some(column) => Ok(Arc::clone(column)),
            None => column_not_found(path),
        };
    };

    let parent = batch
        .column_by_name(relation)
        .ok_or_else(|| Error::ColumnNotFound(FieldPath::field(relation)))?;

    let parent = parent
        .as_any()
        .downcast_ref::<StructArray>()
        .ok_or_else(|| Error::NotAStruct {
            relation: relation.to_string(),
            field: path.name().to_string(),
        })?;

    let child = parent
        .column_by_name(path.name())
        .ok_or_else(|| Error::ColumnNotFound(path.clone()))?;

    with_parent_nulls(child, parent.nulls())
}

fn with_parent_nulls(child: &ArrayRef, parent_nulls: Option<&NullBuffer>) -> Result<ArrayRef> {
    if parent_nulls.is_none() {
        return Ok(Arc::clone(child));
    }

    let nulls = NullBuffer::union(child.nulls(), parent_nulls);
    let data = child.to_data().into_builder().nulls(nulls).build()?;
    Ok(make_array(data))
}
