#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Int32Array, Int64Array, StringArray, StructArray,
    TimestampMicrosecondArray,
};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{DataType, Field, Fields, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime};
use criteria_filter::{Expr, LiteralValue, apply_predicate};

/// Initialize the test logger once per process
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[must_use]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[must_use]
pub fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, mi, s).unwrap()
}

fn days(d: NaiveDate) -> i32 {
    match LiteralValue::from_date(d) {
        LiteralValue::Date(days) => days,
        _ => unreachable!(),
    }
}

fn micros(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_micros()
}

/// Schema of the author relation
#[must_use]
pub fn author_fields() -> Fields {
    Fields::from(vec![
        Field::new("id", DataType::Int64, true),
        Field::new("name", DataType::Utf8, true),
    ])
}

/// Seven books with an embedded author relation
///
/// | id | title                     | pages | published  | updated_at          | in_print | author                  |
/// |----|---------------------------|-------|------------|---------------------|----------|-------------------------|
/// | 1  | Dune                      | 412   | 1965-08-01 | 2024-03-05 00:00:00 | true     | 1, Frank Herbert        |
/// | 2  | Neuromancer               | 271   | 1984-07-01 | 2024-03-05 23:59:59 | true     | 2, William Gibson       |
/// | 3  | The Left Hand of Darkness | 304   | 1969-03-01 | 2024-03-04 23:59:00 | false    | 3, Ursula K. Le Guin    |
/// | 4  | Jane Eyre                 | 500   | 1847-10-16 | 2024-03-06 00:00:00 | true     | 4, Charlotte Brontë     |
/// | 5  | Persuasion                | null  | 1817-12-20 | 2024-03-05 14:30:00 | null     | 5, Jane Austen          |
/// | 6  | null                      | 100   | null       | null                | false    | null                    |
/// | 7  | Anonymous Memoir          | 220   | 2001-05-05 | null                | true     | 6, Jane                 |
#[must_use]
pub fn books_batch() -> RecordBatch {
    let ids: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3, 4, 5, 6, 7]));
    let titles: ArrayRef = Arc::new(StringArray::from(vec![
        Some("Dune"),
        Some("Neuromancer"),
        Some("The Left Hand of Darkness"),
        Some("Jane Eyre"),
        Some("Persuasion"),
        None,
        Some("Anonymous Memoir"),
    ]));
    let pages: ArrayRef = Arc::new(Int32Array::from(vec![
        Some(412),
        Some(271),
        Some(304),
        Some(500),
        None,
        Some(100),
        Some(220),
    ]));
    let published: ArrayRef = Arc::new(Date32Array::from(vec![
        Some(days(date(1965, 8, 1))),
        Some(days(date(1984, 7, 1))),
        Some(days(date(1969, 3, 1))),
        Some(days(date(1847, 10, 16))),
        Some(days(date(1817, 12, 20))),
        None,
        Some(days(date(2001, 5, 5))),
    ]));
    let updated_at: ArrayRef = Arc::new(TimestampMicrosecondArray::from(vec![
        Some(micros(at(2024, 3, 5, 0, 0, 0))),
        Some(micros(at(2024, 3, 5, 23, 59, 59))),
        Some(micros(at(2024, 3, 4, 23, 59, 0))),
        Some(micros(at(2024, 3, 6, 0, 0, 0))),
        Some(micros(at(2024, 3, 5, 14, 30, 0))),
        None,
        None,
    ]));
    let in_print: ArrayRef = Arc::new(BooleanArray::from(vec![
        Some(true),
        Some(true),
        Some(false),
        Some(true),
        None,
        Some(false),
        Some(true),
    ]));

    let author_ids: ArrayRef = Arc::new(Int64Array::from(vec![
        Some(1),
        Some(2),
        Some(3),
        Some(4),
        Some(5),
        None,
        Some(6),
    ]));
    let author_names: ArrayRef = Arc::new(StringArray::from(vec![
        Some("Frank Herbert"),
        Some("William Gibson"),
        Some("Ursula K. Le Guin"),
        Some("Charlotte Brontë"),
        Some("Jane Austen"),
        None,
        Some("Jane"),
    ]));
    let author: ArrayRef = Arc::new(
        StructArray::try_new(
            author_fields(),
            vec![author_ids, author_names],
            Some(NullBuffer::from(vec![true, true, true, true, true, false, true])),
        )
        .unwrap(),
    );

    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("title", DataType::Utf8, true),
        Field::new("pages", DataType::Int32, true),
        Field::new("published", DataType::Date32, true),
        Field::new(
            "updated_at",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            true,
        ),
        Field::new("in_print", DataType::Boolean, true),
        Field::new("author", DataType::Struct(author_fields()), true),
    ]);

    RecordBatch::try_new(
        Arc::new(schema),
        vec![ids, titles, pages, published, updated_at, in_print, author],
    )
    .unwrap()
}

/// Values of the `id` column across all batches, in order
#[must_use]
pub fn ids(batches: &[RecordBatch]) -> Vec<i64> {
    batches
        .iter()
        .flat_map(|batch| {
            let column = batch
                .column_by_name("id")
                .unwrap()
                .as_any()
                .downcast_ref::<Int64Array>()
                .unwrap()
                .clone();
            column.values().to_vec()
        })
        .collect()
}

/// Ids of the fixture books matching `expr`
#[must_use]
pub fn matching_ids(expr: &Expr) -> Vec<i64> {
    let filtered = apply_predicate(&books_batch(), expr).unwrap();
    ids(&[filtered])
}
