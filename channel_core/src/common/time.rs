use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::channel_error::{ChannelError, Result};

/// Bar timestamp format of the raw 1-minute exports, e.g. `20240105 134500`
pub const RAW_DATETIME_FORMAT: &str = "%Y%m%d %H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time {
    datetime: NaiveDateTime,
}

impl Time {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self { datetime }
    }

    /// Parse with an explicit chrono format string.
    pub fn parse(time_str: &str, format: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(time_str.trim(), format)
            .map(Self::new)
            .map_err(|e| {
                ChannelError::SrcDataFormat(format!(
                    "cannot parse time {:?} with {:?}: {}",
                    time_str, format, e
                ))
            })
    }

    /// Supports "YYYY-MM-DD HH:MM:SS", "YYYYMMDD HHMMSS" and "YYYYMMDD".
    pub fn from_str(time_str: &str) -> Result<Self> {
        let s = time_str.trim();
        if s.contains('-') {
            Self::parse(s, "%Y-%m-%d %H:%M:%S")
        } else if s.contains(' ') {
            Self::parse(s, RAW_DATETIME_FORMAT)
        } else {
            NaiveDate::parse_from_str(s, "%Y%m%d")
                .map(|date| Self::new(date.and_time(NaiveTime::MIN)))
                .map_err(|e| ChannelError::SrcDataFormat(format!("cannot parse date {:?}: {}", s, e)))
        }
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    /// `None` when the result falls outside the representable range.
    pub fn checked_minus_days(&self, days: i64) -> Option<Self> {
        Duration::try_days(days)
            .and_then(|d| self.datetime.checked_sub_signed(d))
            .map(Self::new)
    }

    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self::new(self.datetime + Duration::minutes(minutes))
    }

    pub fn to_str(&self) -> String {
        self.datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn to_minute_str(&self) -> String {
        self.datetime.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
