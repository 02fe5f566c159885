//! Date-time filter with whole-day inclusive bounds.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::filter::payload::ConditionPayload;
use crate::filter::{
    BaseConditions, BaseFilter, ConditionWriter, FilterValue, RangeBounds, RangeConditions,
    RangeFilter,
};

fn start_of_day(value: NaiveDateTime) -> NaiveDateTime {
    value.date().and_time(NaiveTime::MIN)
}

fn end_of_day(value: NaiveDateTime) -> NaiveDateTime {
    value
        .date()
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or(value)
}

/// Range filter over local date-times
///
/// The inclusive bounds widen to whole days: `greaterThanOrEqual` moves to
/// 00:00 of its day and `lessThanOrEqual` to the last instant of its day.
/// The strict bounds and the base conditions keep their exact values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "ConditionPayload<NaiveDateTime>",
    into = "RangeFilter<NaiveDateTime>"
)]
pub struct DateTimeFilter {
    range: RangeFilter<NaiveDateTime>,
}

impl DateTimeFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<RangeFilter<NaiveDateTime>> for DateTimeFilter {
    fn from(range: RangeFilter<NaiveDateTime>) -> Self {
        let mut filter = Self { range };
        if let Some(value) = filter.greater_than_or_equal().copied() {
            filter.set_greater_than_or_equal(value);
        }
        if let Some(value) = filter.less_than_or_equal().copied() {
            filter.set_less_than_or_equal(value);
        }
        filter
    }
}

impl TryFrom<ConditionPayload<NaiveDateTime>> for DateTimeFilter {
    type Error = String;

    fn try_from(payload: ConditionPayload<NaiveDateTime>) -> Result<Self, Self::Error> {
        payload.reject_text("DateTimeFilter")?;
        let (base, bounds, _) = payload.into_parts();
        Ok(RangeFilter { base, bounds }.into())
    }
}

impl From<DateTimeFilter> for RangeFilter<NaiveDateTime> {
    fn from(filter: DateTimeFilter) -> Self {
        filter.range
    }
}

impl BaseConditions<NaiveDateTime> for DateTimeFilter {
    fn base(&self) -> &BaseFilter<NaiveDateTime> {
        self.range.base()
    }

    fn base_mut(&mut self) -> &mut BaseFilter<NaiveDateTime> {
        self.range.base_mut()
    }
}

impl RangeConditions<NaiveDateTime> for DateTimeFilter {
    fn bounds(&self) -> &RangeBounds<NaiveDateTime> {
        self.range.bounds()
    }

    fn bounds_mut(&mut self) -> &mut RangeBounds<NaiveDateTime> {
        self.range.bounds_mut()
    }

    fn set_greater_than_or_equal(&mut self, value: NaiveDateTime) -> &mut Self {
        self.bounds_mut().greater_than_or_equal = Some(FilterValue::new(start_of_day(value)));
        self
    }

    fn set_less_than_or_equal(&mut self, value: NaiveDateTime) -> &mut Self {
        self.bounds_mut().less_than_or_equal = Some(FilterValue::new(end_of_day(value)));
        self
    }
}

impl fmt::Display for DateTimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = ConditionWriter::default();
        self.range.describe(&mut writer);
        writer.finish(f, "DateTimeFilter")
    }
}
