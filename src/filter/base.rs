//! Conditions that apply to every leaf type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::payload::ConditionPayload;
use crate::filter::{ConditionWriter, FilterLeaf, FilterValue};

/// Equality, presence and set-membership conditions on one field
///
/// Every condition is optional; an absent condition places no constraint on
/// the field. `Clone` is a deep copy: the `in`/`notIn` lists are duplicated,
/// the immutable leaf values are copied along with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ConditionPayload<T>")]
pub struct BaseFilter<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) equals: Option<FilterValue<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) not_equals: Option<FilterValue<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) specified: Option<bool>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub(crate) in_values: Option<Vec<FilterValue<T>>>,
    #[serde(rename = "notIn", skip_serializing_if = "Option::is_none")]
    pub(crate) not_in_values: Option<Vec<FilterValue<T>>>,
}

impl<T> Default for BaseFilter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            specified: None,
            in_values: None,
            not_in_values: None,
        }
    }
}

impl<T> TryFrom<ConditionPayload<T>> for BaseFilter<T> {
    type Error = String;

    fn try_from(payload: ConditionPayload<T>) -> Result<Self, Self::Error> {
        payload.reject_range("BaseFilter")?;
        payload.reject_text("BaseFilter")?;
        Ok(payload.into_parts().0)
    }
}

impl<T: FilterLeaf> BaseFilter<T> {
    /// An empty filter with no conditions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn describe(&self, writer: &mut ConditionWriter) {
        writer.value("equals", self.equals.as_ref());
        writer.value("notEquals", self.not_equals.as_ref());
        writer.value("specified", self.specified);
        writer.list("in", self.in_values.as_deref());
        writer.list("notIn", self.not_in_values.as_deref());
    }
}

/// Capability of filters that carry the base condition set
///
/// Setters replace the previous operand and return `self` for chaining.
pub trait BaseConditions<T: FilterLeaf> {
    /// The base condition set
    fn base(&self) -> &BaseFilter<T>;

    /// Mutable access to the base condition set
    fn base_mut(&mut self) -> &mut BaseFilter<T>;

    /// Require the field to equal `value`
    fn set_equals(&mut self, value: T) -> &mut Self {
        self.base_mut().equals = Some(FilterValue::new(value));
        self
    }

    /// Require the field to differ from `value`
    fn set_not_equals(&mut self, value: T) -> &mut Self {
        self.base_mut().not_equals = Some(FilterValue::new(value));
        self
    }

    /// Require the field to be non-null (`true`) or null (`false`)
    fn set_specified(&mut self, specified: bool) -> &mut Self {
        self.base_mut().specified = Some(specified);
        self
    }

    /// Require the field to be one of `values`; an empty list is no constraint
    fn set_in(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self {
        self.base_mut().in_values = Some(values.into_iter().map(FilterValue::new).collect());
        self
    }

    /// Require the field to be none of `values`; an empty list is no constraint
    fn set_not_in(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self {
        self.base_mut().not_in_values = Some(values.into_iter().map(FilterValue::new).collect());
        self
    }

    fn equals(&self) -> Option<&T> {
        self.base().equals.as_ref().map(FilterValue::value)
    }

    fn not_equals(&self) -> Option<&T> {
        self.base().not_equals.as_ref().map(FilterValue::value)
    }

    fn specified(&self) -> Option<bool> {
        self.base().specified
    }

    fn in_values(&self) -> Option<&[FilterValue<T>]> {
        self.base().in_values.as_deref()
    }

    fn not_in_values(&self) -> Option<&[FilterValue<T>]> {
        self.base().not_in_values.as_deref()
    }
}

impl<T: FilterLeaf> BaseConditions<T> for BaseFilter<T> {
    fn base(&self) -> &BaseFilter<T> {
        self
    }

    fn base_mut(&mut self) -> &mut BaseFilter<T> {
        self
    }
}

impl<T: FilterLeaf> fmt::Display for BaseFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = ConditionWriter::default();
        self.describe(&mut writer);
        writer.finish(f, "BaseFilter")
    }
}
