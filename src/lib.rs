//! Typed filter criteria compiled into conjunctive predicates.
//!
//! Callers populate one optional filter per queryable field, such as a
//! [`filter::LongFilter`] for an id or a [`filter::StringFilter`] for a title.
//! The [`compile`] functions turn the populated filters into a single
//! [`predicate::Expr`] that ANDs every present condition. The [`engine`]
//! evaluates such a predicate over Arrow record batches and the [`reader`]
//! applies it while reading Parquet files.

pub mod compile;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod filter;
pub mod predicate;
pub mod reader;

// Core types
pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use predicate::{Expr, FieldPath, LiteralValue};

// Compilation
pub use compile::{
    FieldFilter, PredicateBuilder, combine, field_predicate, join_field_predicate, path_predicate,
};
pub use criteria::{BookCriteria, Criteria};

// Evaluation
pub use engine::{apply_predicate, evaluate, filter_batches, filter_record_batch};
pub use reader::{read_parquet_files_with_predicate, read_parquet_with_predicate};

/// Filter types and the traits needed to populate them
pub mod prelude {
    pub use crate::criteria::{BookCriteria, Criteria};
    pub use crate::filter::{
        BaseConditions, BaseFilter, BooleanFilter, DateFilter, DateTimeFilter, IntegerFilter,
        LongFilter, RangeConditions, RangeFilter, StringFilter, TextConditions,
    };
    pub use crate::predicate::{Expr, FieldPath, LiteralValue};
}
