mod keymap;
mod model;
mod update;
mod view;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::calendar::SharedCalendar;
use crate::error::Result;
use crate::store::TaskListStore;

use keymap::action_for_key;
use model::{AppModel, FrameKey};

/// Terminal front end for a `TaskListStore`.
///
/// `App` owns the event loop: it seeds the store on first run, redraws from
/// a snapshot whenever an event changed what is shown, and routes key presses through the keymap
/// into store operations. An operation that fails ends the loop with that
/// error instead of continuing on an inconsistent index.
///
/// # Example
///
/// ```ignore
/// let store = TaskListStore::new(system_clock(), &settings);
/// let mut app = App::new(store, calendar);
/// let mut terminal = ratatui::init();
/// let result = app.run(&mut terminal);
/// ratatui::restore();
/// ```
pub struct App {
    model: AppModel,
}

impl App {
    pub fn new(store: TaskListStore, calendar: SharedCalendar) -> Self {
        Self {
            model: AppModel::new(store, calendar),
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.model.activate();
        let mut drawn: Option<FrameKey> = None;
        while !self.model.exit {
            let key = self.model.frame_key();
            if drawn != Some(key) {
                terminal.draw(|frame| view::draw(frame, &self.model))?;
                drawn = Some(key);
            }
            match event::read()? {
                Event::Key(key_event) => self.handle_key(key_event)?,
                Event::Resize(..) => drawn = None,
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(());
        }
        match action_for_key(self.model.mode(), key_event) {
            Some(action) => update::update(&mut self.model, action),
            None => Ok(()),
        }
    }

    pub fn store(&self) -> &TaskListStore {
        &self.model.store
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::calendar::{FixedOffsetCalendar, shared};
    use crate::config::Settings;
    use crate::time::test_clock;

    fn app() -> App {
        let store = TaskListStore::new(test_clock(), &Settings::default());
        let mut app = App::new(store, shared(FixedOffsetCalendar::utc()));
        app.model.activate();
        app
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers)).unwrap();
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn activation_seeds_once() {
        let mut app = app();
        app.model.activate();
        assert_eq!(app.store().len(), 5);
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        app.handle_key(release).unwrap();
        assert!(app.store().get(0).unwrap().is_blank());
    }

    #[test]
    fn buy_milk_walkthrough() {
        let mut app = app();
        for _ in 0..4 {
            press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        }
        type_str(&mut app, "Buy milk");
        assert_eq!(app.store().len(), 6);
        assert!(app.store().get(5).unwrap().is_blank());

        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.store().editor().map(|e| e.index), Some(4));
        assert_eq!(app.store().editor().unwrap().working, test_clock().now());

        // Typing while the wheels are open does not touch the text.
        type_str(&mut app, "zz");
        assert_eq!(app.store().get(4).unwrap().text, "Buy milk");

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(app.store().len(), 5);
        assert!(app.store().editor().is_none());
    }

    #[test]
    fn frame_key_changes_only_when_the_screen_would() {
        let mut app = app();
        let drawn = app.model.frame_key();

        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        app.handle_key(release).unwrap();
        press(&mut app, KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(app.model.frame_key(), drawn);

        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        let moved = app.model.frame_key();
        assert_ne!(moved, drawn);

        type_str(&mut app, "x");
        assert_ne!(app.model.frame_key(), moved);
    }

    #[test]
    fn quit_keys_end_the_loop() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.model.exit);
    }
}
