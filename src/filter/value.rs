//! Leaf values held by filters.

use std::fmt;
use std::hash::Hash;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::predicate::LiteralValue;

/// A leaf type a filter can constrain
///
/// Implemented for the field types criteria objects use: `i64`, `i32`,
/// `String`, `bool`, `NaiveDate` and `NaiveDateTime`.
pub trait FilterLeaf:
    Clone + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Name a range filter over this leaf type renders with
    const FILTER_NAME: &'static str;

    /// The predicate literal for this value
    fn to_literal(&self) -> LiteralValue;

    /// Text used inside a `LIKE` pattern, matching how the engine renders the field as text
    fn to_pattern_text(&self) -> String {
        self.to_string()
    }
}

impl FilterLeaf for i64 {
    const FILTER_NAME: &'static str = "LongFilter";

    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Int(*self)
    }
}

impl FilterLeaf for i32 {
    const FILTER_NAME: &'static str = "IntegerFilter";

    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Int(i64::from(*self))
    }
}

impl FilterLeaf for String {
    const FILTER_NAME: &'static str = "StringRangeFilter";

    fn to_literal(&self) -> LiteralValue {
        LiteralValue::String(self.clone())
    }
}

impl FilterLeaf for bool {
    const FILTER_NAME: &'static str = "BooleanFilter";

    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Boolean(*self)
    }
}

impl FilterLeaf for NaiveDate {
    const FILTER_NAME: &'static str = "DateFilter";

    fn to_literal(&self) -> LiteralValue {
        LiteralValue::from_date(*self)
    }
}

impl FilterLeaf for NaiveDateTime {
    const FILTER_NAME: &'static str = "DateTimeRangeFilter";

    fn to_literal(&self) -> LiteralValue {
        LiteralValue::from_datetime(*self)
    }

    fn to_pattern_text(&self) -> String {
        self.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// One immutable filter operand
///
/// Equality, ordering and hashing delegate to the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValue<T>(T);

impl<T> FilterValue<T> {
    /// Wrap a raw value
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// The raw value
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.0
    }

    /// Unwrap into the raw value
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for FilterValue<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: fmt::Display> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_and_equality_delegate_to_value() {
        assert_eq!(FilterValue::new(3_i64), FilterValue::new(3_i64));
        assert!(FilterValue::new(2_i64) < FilterValue::new(3_i64));
        assert!(FilterValue::new("b".to_string()) > FilterValue::new("a".to_string()));
        assert!(*FilterValue::new(true).value());
        assert_eq!(FilterValue::new(5_i32).into_inner(), 5);
    }

    #[test]
    fn datetime_pattern_text_uses_iso_separator() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(ts.to_pattern_text(), "2024-03-05T14:30:00");
    }
}
