use crate::calendar::SharedCalendar;
use crate::selection::DateTimeSelection;
use crate::store::TaskListStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Mode {
    List,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WheelFocus {
    Day,
    Time,
}

/// What a drawn frame depends on. A frame whose key has not changed since the
/// last draw would render identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FrameKey {
    revision: u64,
    cursor: usize,
    wheel_focus: WheelFocus,
}

#[derive(Debug, Clone)]
pub(super) struct AppModel {
    pub(super) exit: bool,
    pub(super) store: TaskListStore,
    pub(super) cursor: usize,
    pub(super) wheel_focus: WheelFocus,
    pub(super) calendar: SharedCalendar,
    pub(super) selection: DateTimeSelection,
}

impl AppModel {
    pub(super) fn new(store: TaskListStore, calendar: SharedCalendar) -> Self {
        Self {
            exit: false,
            store,
            cursor: 0,
            wheel_focus: WheelFocus::Day,
            selection: DateTimeSelection::new(calendar.clone()),
            calendar,
        }
    }

    /// First-appearance hook; seeding is guarded inside the store.
    pub(super) fn activate(&mut self) {
        self.store.seed_defaults();
        self.clamp_cursor();
    }

    pub(super) fn mode(&self) -> Mode {
        if self.store.editor().is_some() {
            Mode::Editor
        } else {
            Mode::List
        }
    }

    pub(super) fn frame_key(&self) -> FrameKey {
        FrameKey {
            revision: self.store.revision(),
            cursor: self.cursor,
            wheel_focus: self.wheel_focus,
        }
    }

    /// The row under the cursor, if the list has any rows.
    pub(super) fn cursored_index(&self) -> Option<usize> {
        (self.cursor < self.store.len()).then_some(self.cursor)
    }

    pub(super) fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.store.len().saturating_sub(1));
    }
}
