//! Translate key actions into store operations.
//!
//! Each action maps onto one presentation gesture: typing is a text edit,
//! Enter is a row tap, Ctrl-D is a swipe, the wheels commit a date as soon
//! as they move, and Esc is a tap outside the editor. Gestures on an empty
//! list have no row to address and do nothing.

use log::debug;

use crate::error::Result;

use super::keymap::Action;
use super::model::{AppModel, WheelFocus};

pub(super) fn update(model: &mut AppModel, action: Action) -> Result<()> {
    match action {
        Action::Quit => model.exit = true,
        Action::CursorUp => move_cursor(model, -1),
        Action::CursorDown => move_cursor(model, 1),
        Action::InsertChar(c) => edit_text(model, |text| text.push(c))?,
        Action::DeleteChar => edit_text(model, |text| {
            text.pop();
        })?,
        Action::AddRow => {
            model.store.add_blank_item();
            model.cursor = model.store.len() - 1;
        }
        Action::DeleteRow => {
            if let Some(index) = model.cursored_index() {
                model.store.delete_item(index)?;
                model.clamp_cursor();
            }
        }
        Action::OpenEditor => {
            if let Some(index) = model.cursored_index() {
                model.store.select_for_editing(index)?;
                model.wheel_focus = WheelFocus::Day;
            }
        }
        Action::CloseEditor => model.store.close_editor(),
        Action::FocusDayWheel => model.wheel_focus = WheelFocus::Day,
        Action::FocusTimeWheel => model.wheel_focus = WheelFocus::Time,
        Action::WheelUp => spin_wheel(model, -1)?,
        Action::WheelDown => spin_wheel(model, 1)?,
    }
    Ok(())
}

fn move_cursor(model: &mut AppModel, delta: isize) {
    let len = model.store.len();
    if len == 0 {
        return;
    }
    model.cursor = (model.cursor as isize + delta).rem_euclid(len as isize) as usize;
}

/// Typing into an empty list first gives it a row to type into.
fn edit_text<F>(model: &mut AppModel, op: F) -> Result<()>
where
    F: FnOnce(&mut String),
{
    if model.store.is_empty() {
        model.store.add_blank_item();
        model.cursor = 0;
    }
    let index = model.cursor;
    let mut text = model
        .store
        .get(index)
        .map(|item| item.text.clone())
        .unwrap_or_default();
    op(&mut text);
    model.store.set_text(index, text)
}

fn spin_wheel(model: &mut AppModel, delta: i32) -> Result<()> {
    let Some(editor) = model.store.editor() else {
        return Ok(());
    };
    let current = model.selection.selection_of(editor.working);

    match model.wheel_focus {
        WheelFocus::Day => {
            let day = model
                .selection
                .step_day(editor.working, current.day_offset, delta);
            day_wheel_changed(model, day)
        }
        WheelFocus::Time => time_wheel_changed(model, current.slot.step(delta).tag()),
    }
}

pub(super) fn day_wheel_changed(model: &mut AppModel, day_offset: u32) -> Result<()> {
    let Some(editor) = model.store.editor() else {
        return Ok(());
    };
    let slot = model.selection.selection_of(editor.working).slot;
    let date = model
        .selection
        .resolve_selection(day_offset, slot.tag(), editor.working)?;
    debug!("Day wheel moved to {day_offset} for row {}", editor.index);
    model.store.set_date(editor.index, date)
}

pub(super) fn time_wheel_changed(model: &mut AppModel, slot_tag: u32) -> Result<()> {
    let Some(editor) = model.store.editor() else {
        return Ok(());
    };
    let day = model.selection.selection_of(editor.working).day_offset;
    let date = model
        .selection
        .resolve_selection(day, slot_tag, editor.working)?;
    debug!("Time wheel moved to slot {slot_tag} for row {}", editor.index);
    model.store.set_date(editor.index, date)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::calendar::{FixedOffsetCalendar, shared};
    use crate::config::Settings;
    use crate::error::TaskListError;
    use crate::store::TaskListStore;
    use crate::time::test_clock;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn active_model() -> AppModel {
        let store = TaskListStore::new(test_clock(), &Settings::default());
        let mut model = AppModel::new(store, shared(FixedOffsetCalendar::utc()));
        model.activate();
        model
    }

    fn type_text(model: &mut AppModel, text: &str) {
        for c in text.chars() {
            update(model, Action::InsertChar(c)).unwrap();
        }
    }

    #[test]
    fn typing_on_the_last_row_grows_the_list() {
        let mut model = active_model();
        model.cursor = 4;
        type_text(&mut model, "Buy milk");

        assert_eq!(model.store.len(), 6);
        assert_eq!(model.store.get(4).unwrap().text, "Buy milk");
        assert!(model.store.get(5).unwrap().is_blank());
    }

    #[test]
    fn backspace_erases_the_last_character() {
        let mut model = active_model();
        type_text(&mut model, "ab");
        update(&mut model, Action::DeleteChar).unwrap();
        assert_eq!(model.store.get(0).unwrap().text, "a");

        update(&mut model, Action::DeleteChar).unwrap();
        update(&mut model, Action::DeleteChar).unwrap();
        assert!(model.store.get(0).unwrap().is_blank());
    }

    #[test]
    fn cursor_wraps_at_both_ends() {
        let mut model = active_model();
        update(&mut model, Action::CursorUp).unwrap();
        assert_eq!(model.cursor, 4);
        update(&mut model, Action::CursorDown).unwrap();
        assert_eq!(model.cursor, 0);
    }

    #[test]
    fn enter_then_escape_opens_and_closes_the_editor() {
        let mut model = active_model();
        model.cursor = 2;
        update(&mut model, Action::OpenEditor).unwrap();
        assert_eq!(model.store.editor().map(|e| e.index), Some(2));

        update(&mut model, Action::CloseEditor).unwrap();
        assert!(model.store.editor().is_none());
    }

    #[test]
    fn delete_row_removes_the_cursored_row_and_clamps() {
        let mut model = active_model();
        model.cursor = 4;
        update(&mut model, Action::DeleteRow).unwrap();
        assert_eq!(model.store.len(), 4);
        assert_eq!(model.cursor, 3);
    }

    #[test]
    fn gestures_on_an_empty_list_do_nothing_but_typing_adds_a_row() {
        let mut model = active_model();
        for _ in 0..5 {
            update(&mut model, Action::DeleteRow).unwrap();
        }
        assert!(model.store.is_empty());

        update(&mut model, Action::DeleteRow).unwrap();
        update(&mut model, Action::OpenEditor).unwrap();
        update(&mut model, Action::CursorDown).unwrap();
        assert!(model.store.editor().is_none());

        type_text(&mut model, "x");
        assert_eq!(model.store.len(), 2);
        assert_eq!(model.store.get(0).unwrap().text, "x");
    }

    #[test]
    fn add_row_moves_the_cursor_to_it() {
        let mut model = active_model();
        update(&mut model, Action::AddRow).unwrap();
        assert_eq!(model.store.len(), 6);
        assert_eq!(model.cursor, 5);
    }

    #[test]
    fn wheels_commit_dates_immediately() {
        // test clock: 2024-02-24 09:15 UTC, slot 18 (9:00).
        let mut model = active_model();
        update(&mut model, Action::OpenEditor).unwrap();

        update(&mut model, Action::WheelDown).unwrap();
        assert_eq!(
            model.store.get(0).unwrap().date,
            Some(at("2024-02-25T09:00:00Z"))
        );

        update(&mut model, Action::FocusTimeWheel).unwrap();
        update(&mut model, Action::WheelUp).unwrap();
        assert_eq!(
            model.store.get(0).unwrap().date,
            Some(at("2024-02-25T08:30:00Z"))
        );
        assert_eq!(
            model.store.editor().unwrap().working,
            at("2024-02-25T08:30:00Z")
        );
    }

    #[test]
    fn day_wheel_wraps_inside_the_shown_month() {
        let mut model = active_model();
        update(&mut model, Action::OpenEditor).unwrap();
        for _ in 0..6 {
            update(&mut model, Action::WheelDown).unwrap();
        }
        assert_eq!(
            model.store.get(0).unwrap().date,
            Some(at("2024-02-01T09:00:00Z"))
        );
    }

    #[test]
    fn wheels_follow_a_date_set_into_a_longer_month() {
        // Open on Feb 24, 2024, then move the row to Jan 31 directly.
        let mut model = active_model();
        update(&mut model, Action::OpenEditor).unwrap();
        model.store.set_date(0, at("2024-01-31T10:00:00Z")).unwrap();

        update(&mut model, Action::FocusTimeWheel).unwrap();
        update(&mut model, Action::WheelDown).unwrap();
        assert_eq!(
            model.store.get(0).unwrap().date,
            Some(at("2024-01-31T10:30:00Z"))
        );

        update(&mut model, Action::FocusDayWheel).unwrap();
        update(&mut model, Action::WheelDown).unwrap();
        assert_eq!(
            model.store.get(0).unwrap().date,
            Some(at("2024-01-01T10:30:00Z"))
        );
    }

    #[test]
    fn wheel_changes_without_an_editor_are_ignored() {
        let mut model = active_model();
        update(&mut model, Action::WheelDown).unwrap();
        day_wheel_changed(&mut model, 3).unwrap();
        assert_eq!(model.store.get(0).unwrap().date, Some(test_clock().now()));
    }

    #[test]
    fn out_of_range_wheel_values_are_errors() {
        let mut model = active_model();
        update(&mut model, Action::OpenEditor).unwrap();
        assert!(matches!(
            day_wheel_changed(&mut model, 30),
            Err(TaskListError::InvalidOffset { offset: 30, days: 29 })
        ));
        assert!(matches!(
            time_wheel_changed(&mut model, 48),
            Err(TaskListError::InvalidTimeSlot { .. })
        ));
    }

    #[test]
    fn swiping_the_open_row_closes_the_editor() {
        let mut model = active_model();
        model.cursor = 4;
        type_text(&mut model, "Buy milk");
        update(&mut model, Action::OpenEditor).unwrap();
        assert_eq!(model.store.editor().map(|e| e.index), Some(4));

        update(&mut model, Action::DeleteRow).unwrap();
        assert_eq!(model.store.len(), 5);
        assert!(model.store.editor().is_none());
    }
}
