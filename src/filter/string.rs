//! Text filters: string range conditions plus case-insensitive matching.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::payload::ConditionPayload;
use crate::filter::{
    BaseConditions, BaseFilter, ConditionWriter, RangeBounds, RangeConditions, RangeFilter,
};

/// Case-insensitive substring conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) does_not_contain: Option<String>,
}

impl TextMatch {
    fn describe(&self, writer: &mut ConditionWriter) {
        writer.value("contains", self.contains.as_deref());
        writer.value("doesNotContain", self.does_not_contain.as_deref());
    }
}

/// Capability of filters that match text case-insensitively
pub trait TextConditions {
    fn text(&self) -> &TextMatch;

    fn text_mut(&mut self) -> &mut TextMatch;

    /// Require the field to contain `needle`, ignoring case
    fn set_contains(&mut self, needle: impl Into<String>) -> &mut Self {
        self.text_mut().contains = Some(needle.into());
        self
    }

    /// Require the field not to contain `needle`, ignoring case
    fn set_does_not_contain(&mut self, needle: impl Into<String>) -> &mut Self {
        self.text_mut().does_not_contain = Some(needle.into());
        self
    }

    fn contains(&self) -> Option<&str> {
        self.text().contains.as_deref()
    }

    fn does_not_contain(&self) -> Option<&str> {
        self.text().does_not_contain.as_deref()
    }
}

/// Filter over text fields
///
/// Supports every base and range condition over `String` (ordering is
/// lexicographic) plus `contains` and `doesNotContain`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConditionPayload<String>")]
pub struct StringFilter {
    #[serde(flatten)]
    range: RangeFilter<String>,
    #[serde(flatten)]
    text: TextMatch,
}

impl TryFrom<ConditionPayload<String>> for StringFilter {
    type Error = String;

    fn try_from(payload: ConditionPayload<String>) -> Result<Self, Self::Error> {
        let (base, bounds, text) = payload.into_parts();
        Ok(Self {
            range: RangeFilter { base, bounds },
            text,
        })
    }
}

impl StringFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BaseConditions<String> for StringFilter {
    fn base(&self) -> &BaseFilter<String> {
        self.range.base()
    }

    fn base_mut(&mut self) -> &mut BaseFilter<String> {
        self.range.base_mut()
    }
}

impl RangeConditions<String> for StringFilter {
    fn bounds(&self) -> &RangeBounds<String> {
        self.range.bounds()
    }

    fn bounds_mut(&mut self) -> &mut RangeBounds<String> {
        self.range.bounds_mut()
    }
}

impl TextConditions for StringFilter {
    fn text(&self) -> &TextMatch {
        &self.text
    }

    fn text_mut(&mut self) -> &mut TextMatch {
        &mut self.text
    }
}

impl fmt::Display for StringFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = ConditionWriter::default();
        self.range.describe(&mut writer);
        self.text.describe(&mut writer);
        writer.finish(f, "StringFilter")
    }
}
