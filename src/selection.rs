//! Day and time wheel values for the inline date editor.
//!
//! A date is picked with two independent wheels: a day wheel over the days of
//! the reference month (1-based offsets) and a time wheel over 48 half-hour
//! slots. Everything here is a pure function of its inputs and the calendar.

use std::fmt;

use chrono::{DateTime, Days, NaiveTime, TimeDelta, Timelike, Utc};

use crate::calendar::{SharedCalendar, first_of_month};
use crate::config::SLOTS_PER_DAY;
use crate::error::{Result, TaskListError};

/// One half-hour interval of a day, tagged `hour * 2 + half`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    tag: u32,
}

impl TimeSlot {
    pub fn new(tag: u32) -> Result<Self> {
        if tag >= SLOTS_PER_DAY {
            return Err(TaskListError::InvalidTimeSlot {
                tag,
                slots: SLOTS_PER_DAY,
            });
        }
        Ok(Self { tag })
    }

    /// The slot a wall-clock time falls into; minutes are floored to the half hour.
    pub fn containing(time: NaiveTime) -> Self {
        Self {
            tag: time.hour() * 2 + u32::from(time.minute() >= 30),
        }
    }

    pub fn tag(self) -> u32 {
        self.tag
    }

    pub fn hour(self) -> u32 {
        self.tag / 2
    }

    pub fn minute(self) -> u32 {
        (self.tag % 2) * 30
    }

    pub fn start(self) -> NaiveTime {
        NaiveTime::default() + TimeDelta::minutes(i64::from(self.tag) * 30)
    }

    pub fn label(self) -> String {
        format!("{}:{:02}", self.hour(), self.minute())
    }

    /// Move `delta` slots, wrapping around midnight.
    pub fn step(self, delta: i32) -> Self {
        let slots = SLOTS_PER_DAY as i64;
        let tag = (i64::from(self.tag) + i64::from(delta)).rem_euclid(slots);
        Self { tag: tag as u32 }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

/// Lazy iterator over every slot of a day. Clone it to restart.
#[derive(Debug, Clone, Default)]
pub struct TimeSlots {
    next: u32,
}

impl Iterator for TimeSlots {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.next >= SLOTS_PER_DAY {
            return None;
        }
        let slot = TimeSlot { tag: self.next };
        self.next += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = SLOTS_PER_DAY.saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TimeSlots {}

pub fn time_slots() -> TimeSlots {
    TimeSlots::default()
}

/// Wheel positions describing one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub day_offset: u32,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone)]
pub struct DateTimeSelection {
    calendar: SharedCalendar,
}

impl DateTimeSelection {
    pub fn new(calendar: SharedCalendar) -> Self {
        Self { calendar }
    }

    pub fn days_in_current_period(&self, reference: DateTime<Utc>) -> u32 {
        self.calendar.days_in_month(reference)
    }

    pub fn label_for_day_offset(&self, reference: DateTime<Utc>, offset: u32) -> Result<String> {
        self.calendar.day_label(reference, offset)
    }

    pub fn time_slots(&self) -> TimeSlots {
        time_slots()
    }

    /// Instant for day `day_offset` of `reference`'s month at the start of slot `slot_tag`.
    pub fn resolve_selection(
        &self,
        day_offset: u32,
        slot_tag: u32,
        reference: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let days = self.days_in_current_period(reference);
        if day_offset == 0 || day_offset > days {
            return Err(TaskListError::InvalidOffset {
                offset: day_offset,
                days,
            });
        }
        let slot = TimeSlot::new(slot_tag)?;

        let month_start = first_of_month(self.calendar.to_local(reference).date());
        let day = month_start + Days::new(u64::from(day_offset - 1));
        Ok(self.calendar.from_local(day.and_time(slot.start())))
    }

    /// Wheel positions of `instant` within its own month.
    pub fn selection_of(&self, instant: DateTime<Utc>) -> Selection {
        let local = self.calendar.to_local(instant);
        let month_start = first_of_month(local.date());
        Selection {
            day_offset: (local.date() - month_start).num_days() as u32 + 1,
            slot: TimeSlot::containing(local.time()),
        }
    }

    /// Move the day wheel `delta` days within `reference`'s month, wrapping at both ends.
    pub fn step_day(&self, reference: DateTime<Utc>, day_offset: u32, delta: i32) -> u32 {
        let days = i64::from(self.days_in_current_period(reference).max(1));
        let zero_based = (i64::from(day_offset) - 1 + i64::from(delta)).rem_euclid(days);
        zero_based as u32 + 1
    }
}
