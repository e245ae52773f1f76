//! Stateless rendering layer for the TUI.
//!
//! Every frame is drawn from a fresh `Snapshot` of the store plus the
//! presentation-only cursor and wheel focus. The open row is followed by an
//! inline line holding the day and time wheels, each showing the previous,
//! current and next value.

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::config::ROW_DATE_FORMAT;
use crate::store::{OpenEditor, Snapshot};

use super::keymap::help_text;
use super::model::{AppModel, WheelFocus};

const TITLE: &str = "To-Do";
const PLACEHOLDER: &str = "Enter Task";
const EDITOR_INDENT: &str = "      ";

pub(super) fn draw(frame: &mut Frame, model: &AppModel) {
    let snapshot = model.store.snapshot();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, chunks[0]);

    let rows: Vec<ListItem> = (0..snapshot.rows.len())
        .map(|index| ListItem::new(row_text(model, &snapshot, index)))
        .collect();
    let list = List::new(rows).block(Block::default().title("Tasks").borders(Borders::ALL));
    let mut list_state = ListState::default();
    if !snapshot.rows.is_empty() {
        list_state.select(Some(model.cursor));
    }
    frame.render_stateful_widget(list, chunks[1], &mut list_state);

    render_footer(frame, chunks[2], model, &snapshot);
}

fn render_footer(frame: &mut Frame, area: Rect, model: &AppModel, snapshot: &Snapshot) {
    let count = snapshot.rows.len();
    let mut status = vec![Span::raw(format!(
        "{count} task{}",
        if count == 1 { "" } else { "s" }
    ))];
    if model.store.over_capacity()
        && let Some(capacity) = model.store.max_capacity()
    {
        status.push(Span::styled(
            format!(" (over soft limit of {capacity})"),
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(Text::from(vec![
        Line::raw(help_text(model.mode())),
        Line::from(status),
    ]))
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

pub(super) fn row_text(model: &AppModel, snapshot: &Snapshot, index: usize) -> Text<'static> {
    let Some(row) = snapshot.rows.get(index) else {
        return Text::default();
    };
    let is_cursored = index == model.cursor;

    let mut spans = vec![
        Span::raw(if is_cursored { "▶ " } else { "  " }),
        Span::raw("[ ] "),
    ];

    if row.text.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
    } else if is_cursored {
        spans.push(Span::styled(
            row.text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::raw(row.text.clone()));
    }

    if let Some(date) = row.date {
        spans.push(Span::styled(
            format!("  {}", format_row_date(model, date)),
            Style::default().fg(Color::Cyan),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if snapshot.open_index() == Some(index)
        && let Some(editor) = snapshot.editor
    {
        lines.push(editor_line(model, editor));
    }
    Text::from(lines)
}

fn format_row_date(model: &AppModel, date: DateTime<Utc>) -> String {
    model
        .calendar
        .to_local(date)
        .format(ROW_DATE_FORMAT)
        .to_string()
}

fn editor_line(model: &AppModel, editor: OpenEditor) -> Line<'static> {
    let selection = &model.selection;
    let current = selection.selection_of(editor.working);

    let day_label = |offset: u32| -> String {
        selection
            .label_for_day_offset(editor.working, offset)
            .unwrap_or_default()
    };
    let day_values = [
        day_label(selection.step_day(editor.working, current.day_offset, -1)),
        day_label(current.day_offset),
        day_label(selection.step_day(editor.working, current.day_offset, 1)),
    ];
    let before = current.slot.step(-1).tag() as usize;
    let time_values: [String; 3] = selection
        .time_slots()
        .cycle()
        .skip(before)
        .take(3)
        .map(|slot| slot.label())
        .collect::<Vec<_>>()
        .try_into()
        .unwrap_or_default();

    let mut spans = vec![Span::raw(EDITOR_INDENT)];
    spans.extend(wheel_spans(
        "Day",
        day_values,
        model.wheel_focus == WheelFocus::Day,
    ));
    spans.push(Span::raw("   "));
    spans.extend(wheel_spans(
        "Time",
        time_values,
        model.wheel_focus == WheelFocus::Time,
    ));
    Line::from(spans)
}

fn wheel_spans(name: &'static str, values: [String; 3], focused: bool) -> Vec<Span<'static>> {
    let [previous, current, next] = values;
    let current_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let dim = Style::default().fg(Color::DarkGray);

    vec![
        Span::raw(format!("{name} ‹ ")),
        Span::styled(previous, dim),
        Span::raw(" "),
        Span::styled(format!("[{current}]"), current_style),
        Span::raw(" "),
        Span::styled(next, dim),
        Span::raw(" ›"),
    ]
}
