//! Filter value objects
//!
//! A filter describes zero or more optional conditions on one field. Filters
//! are built from three condition sets, each exposed through a capability
//! trait:
//!
//! - [`BaseConditions`]: equals, not-equals, specified, in, not-in
//! - [`RangeConditions`]: greater/less than (or equal) and like
//! - [`TextConditions`]: case-insensitive contains / does-not-contain
//!
//! Concrete filters compose the sets they support instead of inheriting them:
//! [`BaseFilter`] has the base set, [`RangeFilter`] adds range bounds and
//! [`StringFilter`] adds text matching on top of a string range filter.
//!
//! Deserialization rejects unknown condition keys, and keys of a condition set
//! the filter does not have, so a misspelled condition is an error rather than
//! a silently dropped constraint.

pub mod base;
mod payload;
pub mod range;
pub mod string;
pub mod temporal;
pub mod value;

use std::fmt;

use itertools::Itertools;

pub use base::{BaseConditions, BaseFilter};
pub use range::{
    BooleanFilter, DateFilter, IntegerFilter, LongFilter, RangeBounds, RangeConditions,
    RangeFilter,
};
pub use string::{StringFilter, TextConditions, TextMatch};
pub use temporal::DateTimeFilter;
pub use value::{FilterLeaf, FilterValue};

/// Collects `name=value` pairs for a filter's `Display` output
#[derive(Debug, Default)]
pub(crate) struct ConditionWriter {
    parts: Vec<String>,
}

impl ConditionWriter {
    pub(crate) fn value<V: fmt::Display>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.parts.push(format!("{name}={value}"));
        }
    }

    pub(crate) fn list<T: fmt::Display>(&mut self, name: &str, values: Option<&[FilterValue<T>]>) {
        if let Some(values) = values {
            self.parts
                .push(format!("{name}=[{}]", values.iter().join(", ")));
        }
    }

    pub(crate) fn finish(self, f: &mut fmt::Formatter<'_>, filter_name: &str) -> fmt::Result {
        write!(f, "{filter_name} [{}]", self.parts.join(", "))
    }
}
