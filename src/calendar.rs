//! Platform calendar services.
//!
//! The core never does month arithmetic on raw instants itself. It asks a
//! `Calendar` how long the month around an instant is, what a given day of
//! that month is called, and how to move between stored UTC instants and the
//! wall-clock date/time the user is picking from.

use std::fmt;
use std::sync::Arc;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, Offset,
    TimeDelta, Utc,
};

use crate::config::DAY_LABEL_FORMAT;
use crate::error::{Result, TaskListError};

pub trait Calendar: Send + Sync + fmt::Debug {
    /// Number of days in the month containing `instant`.
    fn days_in_month(&self, instant: DateTime<Utc>) -> u32;

    /// Label for the day `offset - 1` days after the first of `instant`'s month.
    fn day_label(&self, instant: DateTime<Utc>, offset: u32) -> Result<String>;

    /// Wall-clock date and time of `instant`.
    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime;

    /// Instant for a wall-clock date and time.
    fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc>;
}

pub type SharedCalendar = Arc<dyn Calendar>;

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn month_length(date: NaiveDate) -> u32 {
    let start = first_of_month(date);
    start
        .checked_add_months(Months::new(1))
        .map(|next| (next - start).num_days() as u32)
        // Only December of chrono's last representable year lands here.
        .unwrap_or(31)
}

/// Gregorian calendar evaluated at a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetCalendar {
    offset: FixedOffset,
}

impl FixedOffsetCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn from_minutes(minutes: i32) -> Result<Self> {
        FixedOffset::east_opt(minutes * 60)
            .map(Self::new)
            .ok_or_else(|| TaskListError::config(format!("invalid UTC offset of {minutes} minutes")))
    }

    /// Calendar pinned to the system's current local offset.
    pub fn system() -> Self {
        Self::new(Local::now().offset().fix())
    }

    #[cfg(test)]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Calendar for FixedOffsetCalendar {
    fn days_in_month(&self, instant: DateTime<Utc>) -> u32 {
        month_length(self.to_local(instant).date())
    }

    fn day_label(&self, instant: DateTime<Utc>, offset: u32) -> Result<String> {
        let local = self.to_local(instant).date();
        let days = month_length(local);
        if offset == 0 || offset > days {
            return Err(TaskListError::InvalidOffset { offset, days });
        }
        let day = first_of_month(local) + Days::new(u64::from(offset - 1));
        Ok(day.format(DAY_LABEL_FORMAT).to_string())
    }

    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }

    fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        (local - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }
}

pub fn shared(calendar: FixedOffsetCalendar) -> SharedCalendar {
    Arc::new(calendar)
}
