//! Application-wide error types and result alias.
//!
//! `TaskListError` collects index and selection misuse from the core along
//! with terminal I/O and configuration failures into one enum.
//!
//! Index and offset errors mean the presentation layer addressed a row or a
//! wheel position that does not exist in the current snapshot. They are
//! returned rather than ignored so the event loop can stop on them.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TaskListError {
    #[error("index {index} out of range for {len} task(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("day offset {offset} outside 1..={days}")]
    InvalidOffset { offset: u32, days: u32 },

    #[error("time slot tag {tag} outside 0..{slots}")]
    InvalidTimeSlot { tag: u32, slots: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaskListError {
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        TaskListError::IndexOutOfRange { index, len }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        TaskListError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TaskListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = TaskListError::index_out_of_range(7, 5);
        assert_eq!(err.to_string(), "index 7 out of range for 5 task(s)");
    }

    #[test]
    fn test_invalid_offset_message() {
        let err = TaskListError::InvalidOffset {
            offset: 0,
            days: 29,
        };
        assert_eq!(err.to_string(), "day offset 0 outside 1..=29");
    }

    #[test]
    fn test_invalid_time_slot_message() {
        let err = TaskListError::InvalidTimeSlot { tag: 48, slots: 48 };
        assert_eq!(err.to_string(), "time slot tag 48 outside 0..48");
    }

    #[test]
    fn test_config_error() {
        let err = TaskListError::config("seed_count must be at least 1");
        assert_eq!(
            err.to_string(),
            "Configuration error: seed_count must be at least 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TaskListError = io_err.into();
        assert!(matches!(err, TaskListError::Io(_)));
    }
}
