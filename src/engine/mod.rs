//! Reference evaluation of predicates over Arrow record batches
//!
//! Evaluation follows SQL three-valued logic: comparing a null field yields
//! unknown, `NOT unknown` is unknown, and only rows whose predicate is `true`
//! are kept. Consequently `notEquals` and `notIn` never match a null field;
//! `specified` is the only condition that selects nulls.
//!
//! Literals are compared against columns of the matching type family:
//!
//! | Literal     | Column types                         |
//! |-------------|--------------------------------------|
//! | `Int`       | any integer type (cast to `Int64`)   |
//! | `String`    | `Utf8`, `LargeUtf8`, `Utf8View`      |
//! | `Boolean`   | `Boolean`                            |
//! | `Date`      | `Date32`, `Date64`                   |
//! | `Timestamp` | `Timestamp(_, None)`                 |
//!
//! A timestamp literal is converted to the column's unit when that is exact.
//! A literal finer than the column is compared against the column cast to
//! nanoseconds, so sub-unit differences are never rounded away.
//!
//! `Like` works on the text form of any column Arrow can cast to `Utf8`.

mod resolve;

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Int64Array, Scalar, StringArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray,
};
use arrow::compute::kernels::boolean::{and_kleene, is_not_null, is_null, not, or_kleene};
use arrow::compute::kernels::cmp::{eq, gt, gt_eq, lt, lt_eq, neq};
use arrow::compute::kernels::comparison::like;
use arrow::compute::{can_cast_types, cast, filter as arrow_filter};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use rayon::prelude::*;

use crate::error::{Result, unsupported_type};
use crate::predicate::{Expr, FieldPath, LiteralValue};

pub use resolve::resolve_column;

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

/// Evaluate `expr` for every row of `batch`
///
/// The returned mask has one slot per row; a null slot means the predicate is
/// unknown for that row.
///
/// # Errors
/// Returns an error if a field path does not resolve, a literal cannot be
/// compared with its column, or an Arrow kernel fails.
pub fn evaluate(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::AlwaysTrue => Ok(BooleanArray::from(vec![true; batch.num_rows()])),
        Expr::Eq(path, value) => compare(batch, path, value, Comparison::Eq),
        Expr::NotEq(path, value) => compare(batch, path, value, Comparison::NotEq),
        Expr::Gt(path, value) => compare(batch, path, value, Comparison::Gt),
        Expr::GtEq(path, value) => compare(batch, path, value, Comparison::GtEq),
        Expr::Lt(path, value) => compare(batch, path, value, Comparison::Lt),
        Expr::LtEq(path, value) => compare(batch, path, value, Comparison::LtEq),
        Expr::In(path, values) => evaluate_in(batch, path, values),
        Expr::NotIn(path, values) => Ok(not(&evaluate_in(batch, path, values)?)?),
        Expr::IsNull(path) => Ok(is_null(resolve_column(batch, path)?.as_ref())?),
        Expr::IsNotNull(path) => Ok(is_not_null(resolve_column(batch, path)?.as_ref())?),
        Expr::Like(path, pattern) => evaluate_like(batch, path, pattern),
        Expr::ContainsCi(path, needle) => evaluate_contains_ci(batch, path, needle),
        Expr::Not(inner) => Ok(not(&evaluate(batch, inner)?)?),
        Expr::And(exprs) => {
            let mut result = BooleanArray::from(vec![true; batch.num_rows()]);
            for expr in exprs {
                result = and_kleene(&result, &evaluate(batch, expr)?)?;
            }
            Ok(result)
        }
    }
}

/// Evaluate `expr` and collapse unknown to `false`
///
/// # Errors
/// Same as [`evaluate`].
pub fn matches(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    let mask = evaluate(batch, expr)?;
    if mask.null_count() == 0 {
        return Ok(mask);
    }
    Ok(mask.iter().map(|v| Some(v == Some(true))).collect())
}

/// Filter a record batch based on a boolean mask
///
/// # Errors
/// Returns an error if the mask length differs from the row count or an Arrow
/// kernel fails.
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(ArrowError::InvalidArgumentError(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        ))
        .into());
    }

    let filtered_columns = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<std::result::Result<Vec<ArrayRef>, ArrowError>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Keep the rows of `batch` that satisfy `expr`
///
/// # Errors
/// Same as [`evaluate`].
pub fn apply_predicate(batch: &RecordBatch, expr: &Expr) -> Result<RecordBatch> {
    if expr.is_always_true() {
        return Ok(batch.clone());
    }
    let mask = matches(batch, expr)?;
    filter_record_batch(batch, &mask)
}

/// Apply `expr` to every batch, dropping batches left empty
///
/// Batches are processed with rayon once there are at least
/// `parallel_threshold` of them.
///
/// # Errors
/// Returns the first evaluation error encountered.
pub fn filter_batches(
    batches: &[RecordBatch],
    expr: &Expr,
    parallel_threshold: usize,
) -> Result<Vec<RecordBatch>> {
    let filtered: Vec<RecordBatch> = if batches.len() >= parallel_threshold.max(1) {
        batches
            .par_iter()
            .map(|batch| apply_predicate(batch, expr))
            .collect::<Result<_>>()?
    } else {
        batches
            .iter()
            .map(|batch| apply_predicate(batch, expr))
            .collect::<Result<_>>()?
    };

    Ok(filtered
        .into_iter()
        .filter(|batch| batch.num_rows() > 0)
        .collect())
}

/// `ts` expressed in `unit`, if that is exact and in range
fn timestamp_value(ts: &NaiveDateTime, unit: TimeUnit) -> Option<i64> {
    let ts = ts.and_utc();
    let subsec = ts.timestamp_subsec_nanos();
    match unit {
        TimeUnit::Second => (subsec == 0).then(|| ts.timestamp()),
        TimeUnit::Millisecond => (subsec % 1_000_000 == 0).then(|| ts.timestamp_millis()),
        TimeUnit::Microsecond => (subsec % 1_000 == 0).then(|| ts.timestamp_micros()),
        TimeUnit::Nanosecond => ts.timestamp_nanos_opt(),
    }
}

fn timestamp_array(value: i64, unit: TimeUnit) -> ArrayRef {
    match unit {
        TimeUnit::Second => Arc::new(TimestampSecondArray::from(vec![value])),
        TimeUnit::Millisecond => Arc::new(TimestampMillisecondArray::from(vec![value])),
        TimeUnit::Microsecond => Arc::new(TimestampMicrosecondArray::from(vec![value])),
        TimeUnit::Nanosecond => Arc::new(TimestampNanosecondArray::from(vec![value])),
    }
}

/// Resolve `path` and pair it with `value` as a scalar of a common type
fn operands(
    batch: &RecordBatch,
    path: &FieldPath,
    value: &LiteralValue,
) -> Result<(ArrayRef, Scalar<ArrayRef>)> {
    let column = resolve_column(batch, path)?;
    let data_type = column.data_type().clone();

    let (target, literal): (DataType, ArrayRef) = match (value, &data_type) {
        (LiteralValue::Boolean(b), DataType::Boolean) => {
            (DataType::Boolean, Arc::new(BooleanArray::from(vec![*b])))
        }
        (LiteralValue::Int(n), column_type) if column_type.is_integer() => {
            (DataType::Int64, Arc::new(Int64Array::from(vec![*n])))
        }
        (LiteralValue::String(s), DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View) => {
            (DataType::Utf8, Arc::new(StringArray::from(vec![s.as_str()])))
        }
        (LiteralValue::Date(days), DataType::Date32 | DataType::Date64) => {
            (DataType::Date32, Arc::new(Date32Array::from(vec![*days])))
        }
        (LiteralValue::Timestamp(ts), DataType::Timestamp(unit, None)) => {
            let unit = if timestamp_value(ts, *unit).is_some() {
                *unit
            } else {
                TimeUnit::Nanosecond
            };
            let Some(literal) = timestamp_value(ts, unit) else {
                return unsupported_type(
                    path,
                    "comparison",
                    format!("timestamp literal {ts} is out of range for {data_type} column"),
                );
            };
            (
                DataType::Timestamp(unit, None),
                timestamp_array(literal, unit),
            )
        }
        _ => {
            return unsupported_type(
                path,
                "comparison",
                format!("{} literal against {data_type} column", value.kind()),
            );
        }
    };

    let column = if data_type == target {
        column
    } else {
        cast(&column, &target)?
    };
    Ok((column, Scalar::new(literal)))
}

fn compare(
    batch: &RecordBatch,
    path: &FieldPath,
    value: &LiteralValue,
    op: Comparison,
) -> Result<BooleanArray> {
    let (column, scalar) = operands(batch, path, value)?;
    let result = match op {
        Comparison::Eq => eq(&column, &scalar),
        Comparison::NotEq => neq(&column, &scalar),
        Comparison::Gt => gt(&column, &scalar),
        Comparison::GtEq => gt_eq(&column, &scalar),
        Comparison::Lt => lt(&column, &scalar),
        Comparison::LtEq => lt_eq(&column, &scalar),
    }?;
    Ok(result)
}

fn evaluate_in(
    batch: &RecordBatch,
    path: &FieldPath,
    values: &[LiteralValue],
) -> Result<BooleanArray> {
    let mut result = BooleanArray::from(vec![false; batch.num_rows()]);
    for value in values {
        let (column, scalar) = operands(batch, path, value)?;
        result = or_kleene(&result, &eq(&column, &scalar)?)?;
    }
    Ok(result)
}

fn text_column(batch: &RecordBatch, path: &FieldPath) -> Result<ArrayRef> {
    let column = resolve_column(batch, path)?;
    let data_type = column.data_type().clone();
    if data_type == DataType::Utf8 {
        Ok(column)
    } else if can_cast_types(&data_type, &DataType::Utf8) {
        Ok(cast(&column, &DataType::Utf8)?)
    } else {
        unsupported_type(path, "LIKE", format!("{data_type} has no text form"))
    }
}

fn evaluate_like(batch: &RecordBatch, path: &FieldPath, pattern: &str) -> Result<BooleanArray> {
    let column = text_column(batch, path)?;
    Ok(like(&column, &StringArray::new_scalar(pattern))?)
}

fn evaluate_contains_ci(
    batch: &RecordBatch,
    path: &FieldPath,
    needle: &str,
) -> Result<BooleanArray> {
    let column = resolve_column(batch, path)?;
    let column = match column.data_type().clone() {
        DataType::Utf8 => column,
        DataType::LargeUtf8 | DataType::Utf8View => cast(&column, &DataType::Utf8)?,
        other => return unsupported_type(path, "contains", other),
    };
    let Some(strings) = column.as_any().downcast_ref::<StringArray>() else {
        return unsupported_type(path, "contains", column.data_type());
    };

    Ok(strings
        .iter()
        .map(|value| value.map(|s| s.to_lowercase().contains(needle)))
        .collect())
}
