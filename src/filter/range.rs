//! Ordering conditions for orderable leaf types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::payload::ConditionPayload;
use crate::filter::{BaseConditions, BaseFilter, ConditionWriter, FilterLeaf, FilterValue};

/// Filter over `i64` fields
pub type LongFilter = RangeFilter<i64>;

/// Filter over `i32` fields
pub type IntegerFilter = RangeFilter<i32>;

/// Filter over calendar-date fields
pub type DateFilter = RangeFilter<NaiveDate>;

/// Filter over boolean fields
pub type BooleanFilter = RangeFilter<bool>;

/// The ordering and pattern conditions of a range filter
///
/// Bounds are independent of each other. Contradictory bounds such as
/// `greaterThan=10, lessThan=5` are kept as given and simply match nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBounds<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) greater_than: Option<FilterValue<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) less_than: Option<FilterValue<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) greater_than_or_equal: Option<FilterValue<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) less_than_or_equal: Option<FilterValue<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) like: Option<FilterValue<T>>,
}

impl<T> Default for RangeBounds<T> {
    fn default() -> Self {
        Self {
            greater_than: None,
            less_than: None,
            greater_than_or_equal: None,
            less_than_or_equal: None,
            like: None,
        }
    }
}

impl<T: FilterLeaf> RangeBounds<T> {
    pub(crate) fn describe(&self, writer: &mut ConditionWriter) {
        writer.value("greaterThan", self.greater_than.as_ref());
        writer.value("lessThan", self.less_than.as_ref());
        writer.value("greaterThanOrEqual", self.greater_than_or_equal.as_ref());
        writer.value("lessThanOrEqual", self.less_than_or_equal.as_ref());
        writer.value("like", self.like.as_ref());
    }
}

/// Base conditions plus range bounds over an orderable leaf type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConditionPayload<T>")]
pub struct RangeFilter<T> {
    #[serde(flatten)]
    pub(crate) base: BaseFilter<T>,
    #[serde(flatten)]
    pub(crate) bounds: RangeBounds<T>,
}

impl<T> TryFrom<ConditionPayload<T>> for RangeFilter<T> {
    type Error = String;

    fn try_from(payload: ConditionPayload<T>) -> Result<Self, Self::Error> {
        payload.reject_text("RangeFilter")?;
        let (base, bounds, _) = payload.into_parts();
        Ok(Self { base, bounds })
    }
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            base: BaseFilter::default(),
            bounds: RangeBounds::default(),
        }
    }
}

impl<T: FilterLeaf> RangeFilter<T> {
    /// An empty filter with no conditions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn describe(&self, writer: &mut ConditionWriter) {
        self.base.describe(writer);
        self.bounds.describe(writer);
    }
}

/// Capability of filters that carry range bounds
pub trait RangeConditions<T: FilterLeaf>: BaseConditions<T> {
    /// The range bounds
    fn bounds(&self) -> &RangeBounds<T>;

    /// Mutable access to the range bounds
    fn bounds_mut(&mut self) -> &mut RangeBounds<T>;

    /// Require the field to be strictly greater than `value`
    fn set_greater_than(&mut self, value: T) -> &mut Self {
        self.bounds_mut().greater_than = Some(FilterValue::new(value));
        self
    }

    /// Require the field to be strictly less than `value`
    fn set_less_than(&mut self, value: T) -> &mut Self {
        self.bounds_mut().less_than = Some(FilterValue::new(value));
        self
    }

    /// Require the field to be greater than or equal to `value`
    fn set_greater_than_or_equal(&mut self, value: T) -> &mut Self {
        self.bounds_mut().greater_than_or_equal = Some(FilterValue::new(value));
        self
    }

    /// Require the field to be less than or equal to `value`
    fn set_less_than_or_equal(&mut self, value: T) -> &mut Self {
        self.bounds_mut().less_than_or_equal = Some(FilterValue::new(value));
        self
    }

    /// Require the field's text form to contain the text form of `value`
    fn set_like(&mut self, value: T) -> &mut Self {
        self.bounds_mut().like = Some(FilterValue::new(value));
        self
    }

    fn greater_than(&self) -> Option<&T> {
        self.bounds().greater_than.as_ref().map(FilterValue::value)
    }

    fn less_than(&self) -> Option<&T> {
        self.bounds().less_than.as_ref().map(FilterValue::value)
    }

    fn greater_than_or_equal(&self) -> Option<&T> {
        self.bounds()
            .greater_than_or_equal
            .as_ref()
            .map(FilterValue::value)
    }

    fn less_than_or_equal(&self) -> Option<&T> {
        self.bounds()
            .less_than_or_equal
            .as_ref()
            .map(FilterValue::value)
    }

    fn like(&self) -> Option<&T> {
        self.bounds().like.as_ref().map(FilterValue::value)
    }
}

impl<T: FilterLeaf> BaseConditions<T> for RangeFilter<T> {
    fn base(&self) -> &BaseFilter<T> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFilter<T> {
        &mut self.base
    }
}

impl<T: FilterLeaf> RangeConditions<T> for RangeFilter<T> {
    fn bounds(&self) -> &RangeBounds<T> {
        &self.bounds
    }

    fn bounds_mut(&mut self) -> &mut RangeBounds<T> {
        &mut self.bounds
    }
}

impl<T: FilterLeaf> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = ConditionWriter::default();
        self.describe(&mut writer);
        writer.finish(f, T::FILTER_NAME)
    }
}
