//! Flat JSON form every filter is deserialized from.
//!
//! Filters compose their condition sets with `#[serde(flatten)]`, which cannot
//! be combined with `deny_unknown_fields`. Deserialization therefore goes
//! through one flat struct that knows every condition key and rejects any
//! other; each filter then refuses the keys of condition sets it lacks.

use serde::Deserialize;

use crate::filter::{BaseFilter, FilterValue, RangeBounds, TextMatch};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub(crate) struct ConditionPayload<T> {
    equals: Option<FilterValue<T>>,
    not_equals: Option<FilterValue<T>>,
    specified: Option<bool>,
    #[serde(rename = "in")]
    in_values: Option<Vec<FilterValue<T>>>,
    not_in: Option<Vec<FilterValue<T>>>,
    greater_than: Option<FilterValue<T>>,
    less_than: Option<FilterValue<T>>,
    greater_than_or_equal: Option<FilterValue<T>>,
    less_than_or_equal: Option<FilterValue<T>>,
    like: Option<FilterValue<T>>,
    contains: Option<String>,
    does_not_contain: Option<String>,
}

impl<T> ConditionPayload<T> {
    fn range_key(&self) -> Option<&'static str> {
        [
            ("greaterThan", self.greater_than.is_some()),
            ("lessThan", self.less_than.is_some()),
            ("greaterThanOrEqual", self.greater_than_or_equal.is_some()),
            ("lessThanOrEqual", self.less_than_or_equal.is_some()),
            ("like", self.like.is_some()),
        ]
        .into_iter()
        .find_map(|(key, present)| present.then_some(key))
    }

    fn text_key(&self) -> Option<&'static str> {
        if self.contains.is_some() {
            Some("contains")
        } else if self.does_not_contain.is_some() {
            Some("doesNotContain")
        } else {
            None
        }
    }

    /// Fail if a range condition is present
    pub(crate) fn reject_range(&self, filter_name: &str) -> Result<(), String> {
        match self.range_key() {
            Some(key) => Err(unsupported_key(key, filter_name)),
            None => Ok(()),
        }
    }

    /// Fail if a text condition is present
    pub(crate) fn reject_text(&self, filter_name: &str) -> Result<(), String> {
        match self.text_key() {
            Some(key) => Err(unsupported_key(key, filter_name)),
            None => Ok(()),
        }
    }

    pub(crate) fn into_parts(self) -> (BaseFilter<T>, RangeBounds<T>, TextMatch) {
        let base = BaseFilter {
            equals: self.equals,
            not_equals: self.not_equals,
            specified: self.specified,
            in_values: self.in_values,
            not_in_values: self.not_in,
        };
        let bounds = RangeBounds {
            greater_than: self.greater_than,
            less_than: self.less_than,
            greater_than_or_equal: self.greater_than_or_equal,
            less_than_or_equal: self.less_than_or_equal,
            like: self.like,
        };
        let text = TextMatch {
            contains: self.contains,
            does_not_contain: self.does_not_contain,
        };
        (base, bounds, text)
    }
}

fn unsupported_key(key: &str, filter_name: &str) -> String {
    format!("condition `{key}` is not supported by {filter_name}")
}
