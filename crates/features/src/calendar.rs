//! Calendar attributes derived from the timestamp index.
//!
//! The extractor registry is data: a closed set of fields, each a pure
//! function of one timestamp. Requested field names are resolved against the
//! registry and unknown names are silently ignored; columns land in request
//! order, named by the field. The timestamp index itself is untouched and
//! remains the frame's ordering key.

use chrono::{Datelike, NaiveDateTime, Timelike};
use types::FeatureFrame;

/// The closed vocabulary of calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarField {
    /// Hour of day, 0-23.
    Hour,
    /// Raw minute value. Quarter-hour source data yields 0/15/30/45 but the
    /// field is not restricted.
    Minute,
    /// Day of week, 0 = Monday through 6 = Sunday.
    DayOfWeek,
    /// Month, 1-12.
    Month,
    /// Day of month.
    Day,
    /// ISO-8601 week number.
    Week,
    /// Calendar year.
    Year,
}

impl CalendarField {
    /// Every field, in declared order.
    pub const ALL: [CalendarField; 7] = [
        CalendarField::Hour,
        CalendarField::Minute,
        CalendarField::DayOfWeek,
        CalendarField::Month,
        CalendarField::Day,
        CalendarField::Week,
        CalendarField::Year,
    ];

    /// Canonical name, used in configuration and as the column name.
    pub fn name(self) -> &'static str {
        match self {
            CalendarField::Hour => "hour",
            CalendarField::Minute => "minute",
            CalendarField::DayOfWeek => "dayofweek",
            CalendarField::Month => "month",
            CalendarField::Day => "day",
            CalendarField::Week => "week",
            CalendarField::Year => "year",
        }
    }

    /// Look up a field by name.
    pub fn from_name(name: &str) -> Option<CalendarField> {
        CalendarField::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Extract this field from one timestamp.
    pub fn extract(self, ts: &NaiveDateTime) -> f64 {
        match self {
            CalendarField::Hour => ts.hour() as f64,
            CalendarField::Minute => ts.minute() as f64,
            CalendarField::DayOfWeek => ts.weekday().num_days_from_monday() as f64,
            CalendarField::Month => ts.month() as f64,
            CalendarField::Day => ts.day() as f64,
            CalendarField::Week => ts.iso_week().week() as f64,
            CalendarField::Year => ts.year() as f64,
        }
    }
}

/// Append one calendar column per recognized requested field.
pub fn compute(frame: &mut FeatureFrame, requested: &[String]) {
    for name in requested {
        if let Some(field) = CalendarField::from_name(name) {
            let values = frame
                .index()
                .iter()
                .map(|ts| Some(field.extract(ts)))
                .collect();
            frame.push_column(field.name(), values);
        }
    }
}
