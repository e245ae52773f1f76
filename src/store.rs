//! In-memory task list and editor selection.
//!
//! `TaskListStore` owns the ordered rows and the single open date editor.
//! Every mutation goes through it so the two invariants that couple list
//! edits to derived state hold after each call:
//!
//! - auto-growth: once the last row has text, a blank row is appended.
//! - single editor: at most one row index is open, and that index always
//!   addresses the row it was opened on (rebased or closed on delete).
//!
//! Index arguments come from the presentation layer's current snapshot. An
//! index that does not exist is an integration bug and is reported as
//! `TaskListError::IndexOutOfRange`.

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::Settings;
use crate::error::{Result, TaskListError};
use crate::task::{TaskId, TaskItem};
use crate::time::SharedClock;

/// The open date editor.
///
/// `working` follows every committed date change, including dates set from
/// outside the wheels. The wheels always show `working`'s month, so the day
/// wheel can never point past the end of the month it is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenEditor {
    pub index: usize,
    pub working: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorSlot {
    #[default]
    Closed,
    OpenAt(OpenEditor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub id: TaskId,
    pub text: String,
    pub date: Option<DateTime<Utc>>,
}

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub rows: Vec<RowSnapshot>,
    pub editor: Option<OpenEditor>,
    pub revision: u64,
}

impl Snapshot {
    pub fn open_index(&self) -> Option<usize> {
        self.editor.map(|editor| editor.index)
    }
}

#[derive(Debug, Clone)]
pub struct TaskListStore {
    items: Vec<TaskItem>,
    editor: EditorSlot,
    max_capacity: Option<usize>,
    seed_count: usize,
    seeded: bool,
    next_id: u64,
    revision: u64,
    clock: SharedClock,
}

impl TaskListStore {
    pub fn new(clock: SharedClock, settings: &Settings) -> Self {
        Self {
            items: Vec::new(),
            editor: EditorSlot::Closed,
            max_capacity: settings.capacity_limit(),
            seed_count: settings.seed_count,
            seeded: false,
            next_id: 1,
            revision: 0,
            clock,
        }
    }

    /// Append the default blank rows. Only the first call has any effect;
    /// returns whether rows were added.
    pub fn seed_defaults(&mut self) -> bool {
        if self.seeded {
            debug!("Store already seeded, ignoring repeat activation");
            return false;
        }
        for _ in 0..self.seed_count {
            self.push_blank();
        }
        self.seeded = true;
        self.bump();
        info!("Seeded task list with {} blank rows", self.seed_count);
        true
    }

    pub fn add_blank_item(&mut self) -> TaskId {
        let id = self.push_blank();
        self.bump();
        debug!("Added blank task {id} at index {}", self.items.len() - 1);
        id
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let item = self.item_mut(index)?;
        item.text = text.into();
        self.bump();
        self.grow_if_needed();
        Ok(())
    }

    pub fn select_for_editing(&mut self, index: usize) -> Result<()> {
        let working = self.item(index)?.date.unwrap_or_else(|| self.clock.now());
        if let EditorSlot::OpenAt(previous) = self.editor
            && previous.index != index
        {
            debug!("Moving editor from row {} to row {index}", previous.index);
        }
        self.editor = EditorSlot::OpenAt(OpenEditor { index, working });
        self.bump();
        Ok(())
    }

    pub fn set_date(&mut self, index: usize, date: DateTime<Utc>) -> Result<()> {
        self.item_mut(index)?.date = Some(date);
        if let EditorSlot::OpenAt(editor) = &mut self.editor
            && editor.index == index
        {
            editor.working = date;
        }
        self.bump();
        Ok(())
    }

    pub fn close_editor(&mut self) {
        if self.editor != EditorSlot::Closed {
            self.editor = EditorSlot::Closed;
            self.bump();
        }
    }

    /// Remove the row at `index`.
    ///
    /// An editor open on the removed row closes. An editor open further down
    /// moves up one index so it keeps addressing the same task.
    pub fn delete_item(&mut self, index: usize) -> Result<TaskItem> {
        self.item(index)?;
        let removed = self.items.remove(index);

        self.editor = match self.editor {
            EditorSlot::OpenAt(editor) if editor.index == index => EditorSlot::Closed,
            EditorSlot::OpenAt(mut editor) if editor.index > index => {
                editor.index -= 1;
                EditorSlot::OpenAt(editor)
            }
            slot => slot,
        };

        self.bump();
        debug!("Deleted task {} from index {index}", removed.id());
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&TaskItem> {
        self.items.get(index)
    }

    #[cfg(test)]
    pub fn items(&self) -> &[TaskItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn editor(&self) -> Option<OpenEditor> {
        match self.editor {
            EditorSlot::Closed => None,
            EditorSlot::OpenAt(editor) => Some(editor),
        }
    }

    #[cfg(test)]
    pub fn editor_slot(&self) -> EditorSlot {
        self.editor
    }

    #[cfg(test)]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    /// Whether the list holds more rows than the advisory capacity.
    pub fn over_capacity(&self) -> bool {
        self.max_capacity
            .is_some_and(|capacity| self.items.len() > capacity)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self
                .items
                .iter()
                .map(|item| RowSnapshot {
                    id: item.id(),
                    text: item.text.clone(),
                    date: item.date,
                })
                .collect(),
            editor: self.editor(),
            revision: self.revision,
        }
    }

    fn item(&self, index: usize) -> Result<&TaskItem> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or_else(|| TaskListError::index_out_of_range(index, len))
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut TaskItem> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| TaskListError::index_out_of_range(index, len))
    }

    fn push_blank(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        self.items.push(TaskItem::blank(id, Some(self.clock.now())));
        id
    }

    fn grow_if_needed(&mut self) {
        if self.items.last().is_some_and(|last| !last.is_blank()) {
            let id = self.add_blank_item();
            debug!("Last row filled in, appended {id}");
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
