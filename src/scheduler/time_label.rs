//! `HH:MM` scheduled-time labels.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A validated wall-clock time label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeLabel {
    /// Hour of day (0-23).
    pub hour: u8,
    /// Minute of hour (0-59).
    pub min: u8,
}

impl TimeLabel {
    /// Parse `HH:MM`. Returns `None` for anything else.
    ///
    /// Hours may be one or two digits; minutes must be exactly two. No
    /// whitespace is allowed anywhere in the label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let (hour, min) = label.split_once(':')?;
        if hour.is_empty() || hour.len() > 2 || min.len() != 2 {
            return None;
        }
        if !hour.bytes().chain(min.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let hour: u8 = hour.parse().ok()?;
        let min: u8 = min.parse().ok()?;
        if hour > 23 || min > 59 {
            return None;
        }
        Some(Self { hour, min })
    }

    /// Parse an optional label; absent labels are `None`.
    #[must_use]
    pub fn parse_opt(label: Option<&str>) -> Option<Self> {
        label.and_then(Self::parse)
    }

    /// The label as local wall-clock time on `date`.
    #[must_use]
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.as_time())
    }

    fn as_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.min), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl std::fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.min)
    }
}
