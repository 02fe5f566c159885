use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Days between 0001-01-01 (CE day 1) and the Unix epoch
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Represents a literal operand in a predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    /// Boolean value
    Boolean(bool),

    /// Integer value
    Int(i64),

    /// String value
    String(String),

    /// Date value (days since epoch)
    Date(i32),

    /// Timestamp value at full precision, no time zone
    ///
    /// The engine converts it to the unit of the column it is compared with.
    Timestamp(NaiveDateTime),
}

impl LiteralValue {
    /// Date literal from a calendar date
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }

    /// Timestamp literal from a local date-time
    #[must_use]
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::Timestamp(datetime)
    }

    /// Name of the literal kind, used in error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Int(_) => "integer",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Date(days) => {
                match days
                    .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
                {
                    Some(date) => write!(f, "DATE '{date}'"),
                    None => write!(f, "DATE {days}"),
                }
            }
            Self::Timestamp(ts) => {
                write!(f, "TIMESTAMP '{}'", ts.format("%Y-%m-%d %H:%M:%S%.f"))
            }
        }
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<NaiveDate> for LiteralValue {
    fn from(value: NaiveDate) -> Self {
        Self::from_date(value)
    }
}

impl From<NaiveDateTime> for LiteralValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_datetime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_day_zero() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(LiteralValue::from_date(epoch), LiteralValue::Date(0));
        assert_eq!(
            LiteralValue::from_date(epoch.pred_opt().unwrap()),
            LiteralValue::Date(-1)
        );
    }

    #[test]
    fn temporal_literals_render_as_calendar_text() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap();

        assert_eq!(
            LiteralValue::from_datetime(ts).to_string(),
            "TIMESTAMP '2024-03-05 23:59:59.999999999'"
        );
        assert_eq!(
            LiteralValue::from_date(ts.date()).to_string(),
            "DATE '2024-03-05'"
        );
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(LiteralValue::from("O'Brien").to_string(), "'O''Brien'");
    }
}
