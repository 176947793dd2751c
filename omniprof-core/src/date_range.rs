//! Date range for filtering exported events.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{OmniprofError, OmniprofResult};
use crate::event::CalendarEvent;

/// Date range for filtering events by start date.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build a range from command-line style arguments.
    /// - `from`: "start" or omitted for unbounded, otherwise YYYY-MM-DD (start of day)
    /// - `to`: omitted for unbounded, otherwise YYYY-MM-DD (end of day)
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> OmniprofResult<Self> {
        let from_dt = match from {
            None | Some("start") => None,
            Some(s) => Some(parse_date(s)?.and_time(NaiveTime::MIN).and_utc()),
        };

        let to_dt = match to {
            None => None,
            Some(s) => {
                let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
                    .ok_or_else(|| OmniprofError::InvalidDate(s.to_string()))?;
                Some(parse_date(s)?.and_time(end_of_day).and_utc())
            }
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    pub fn contains(&self, event: &CalendarEvent) -> bool {
        self.from.is_none_or(|from| event.start_date >= from)
            && self.to.is_none_or(|to| event.start_date <= to)
    }
}

fn parse_date(s: &str) -> OmniprofResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| OmniprofError::InvalidDate(s.to_string()))
}
