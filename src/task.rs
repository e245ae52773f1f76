use std::fmt;

use chrono::{DateTime, Utc};

/// Store-assigned identifier, rendered `T<N>`. Allocated monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(number: u64) -> Self {
        Self(number)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// One row of the list.
///
/// The schedule is a single instant: the date wheel and the time wheel both
/// write into it, so there is no separate time-of-day field to drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    id: TaskId,
    pub text: String,
    pub date: Option<DateTime<Utc>>,
}

impl TaskItem {
    pub(crate) fn blank(id: TaskId, date: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            text: String::new(),
            date,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
