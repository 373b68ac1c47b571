//! Main application state and TUI event loop for geolabel.
//!
//! [`App`] owns the theme, the configured taxonomy, and the last received
//! session snapshot. Keyboard input is translated into [`SessionCommand`]s
//! for the coordinator; rendering always consumes the latest snapshot, so
//! the UI never mutates workflow state directly.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::watch;

use label_core::models::Taxonomy;
use label_runtime::coordinator::{SessionCommand, SessionHandle, SessionSnapshot};

use crate::annotate_view::{self, AnnotateViewData};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the geolabel TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Configured label taxonomy offered to the operator.
    pub taxonomy: Taxonomy,
    /// Human-readable timezone string for timestamp display.
    pub timezone: String,
    /// Whether timestamps use the 12-hour clock.
    pub twelve_hour: bool,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Most recent session snapshot, `None` until the first one arrives.
    pub last_snapshot: Option<SessionSnapshot>,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, taxonomy: Taxonomy, timezone: String, twelve_hour: bool) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            taxonomy,
            timezone,
            twelve_hour,
            should_quit: false,
            last_snapshot: None,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the annotation TUI.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// that the terminal event loop stays on the current thread while state
    /// updates arrive on the `watch` channel.
    ///
    /// The loop exits on `q`, `Q`, or `Ctrl+C`.
    pub async fn run(
        mut self,
        handle: &SessionHandle,
        mut rx: watch::Receiver<SessionSnapshot>,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        // Seed the display with whatever state the coordinator already holds.
        self.last_snapshot = Some(rx.borrow_and_update().clone());

        let result = loop {
            // Pick up the latest snapshot (non-blocking).
            match rx.has_changed() {
                Ok(true) => {
                    self.last_snapshot = Some(rx.borrow_and_update().clone());
                }
                Ok(false) => {}
                Err(_) => {
                    // Coordinator shut down; keep the last state and exit.
                    self.should_quit = true;
                }
            }

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break Ok(());
                    }
                    match self.command_for_key(key.code) {
                        KeyAction::Quit => break Ok(()),
                        KeyAction::Command(command) => {
                            if !handle.send(command).await {
                                // Coordinator gone; nothing left to drive.
                                break Ok(());
                            }
                        }
                        KeyAction::None => {}
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Translate a key press into an action.
    ///
    /// Digit keys map to taxonomy classes by position; only configured
    /// classes produce a command, which is where the advisory taxonomy
    /// validation lives.
    fn command_for_key(&self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            KeyCode::Char('n') | KeyCode::Right => KeyAction::Command(SessionCommand::Skip),
            KeyCode::Char('b') | KeyCode::Left => KeyAction::Command(SessionCommand::GoBack),
            KeyCode::Char('i') | KeyCode::Tab => KeyAction::Command(SessionCommand::CycleImagery),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                let index = (c as usize) - ('1' as usize);
                match self.taxonomy.get(index) {
                    Some(class) => KeyAction::Command(SessionCommand::AnnotateCurrent {
                        class: class.value.clone(),
                    }),
                    None => KeyAction::None,
                }
            }
            _ => KeyAction::None,
        }
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        match &self.last_snapshot {
            Some(snapshot) if snapshot.progress.total > 0 || snapshot.loading => {
                let data = AnnotateViewData {
                    snapshot,
                    taxonomy: &self.taxonomy,
                    timezone: &self.timezone,
                    twelve_hour: self.twelve_hour,
                };
                annotate_view::render_annotate_view(frame, area, &data, &self.theme);
            }
            _ => annotate_view::render_no_points(frame, area, &self.theme),
        }
    }
}

/// Result of mapping one key press.
enum KeyAction {
    /// Exit the event loop.
    Quit,
    /// Forward a command to the coordinator.
    Command(SessionCommand),
    /// Key is not bound.
    None,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new("dark", Taxonomy::default(), "UTC".to_string(), false)
    }

    #[test]
    fn test_app_initial_state() {
        let app = app();
        assert!(!app.should_quit);
        assert!(app.last_snapshot.is_none());
        assert_eq!(app.timezone, "UTC");
    }

    #[test]
    fn test_digit_keys_map_to_taxonomy_classes() {
        let app = app();

        match app.command_for_key(KeyCode::Char('1')) {
            KeyAction::Command(SessionCommand::AnnotateCurrent { class }) => {
                assert_eq!(class, "rapeseed");
            }
            _ => panic!("digit 1 must map to the first class"),
        }
        match app.command_for_key(KeyCode::Char('4')) {
            KeyAction::Command(SessionCommand::AnnotateCurrent { class }) => {
                assert_eq!(class, "nocrop");
            }
            _ => panic!("digit 4 must map to the fourth class"),
        }
    }

    #[test]
    fn test_digit_beyond_taxonomy_is_unbound() {
        // The default taxonomy has 4 classes; digit 5 must produce nothing.
        let app = app();
        assert!(matches!(
            app.command_for_key(KeyCode::Char('5')),
            KeyAction::None
        ));
        assert!(matches!(
            app.command_for_key(KeyCode::Char('0')),
            KeyAction::None
        ));
    }

    #[test]
    fn test_navigation_keys() {
        let app = app();
        assert!(matches!(
            app.command_for_key(KeyCode::Char('n')),
            KeyAction::Command(SessionCommand::Skip)
        ));
        assert!(matches!(
            app.command_for_key(KeyCode::Right),
            KeyAction::Command(SessionCommand::Skip)
        ));
        assert!(matches!(
            app.command_for_key(KeyCode::Char('b')),
            KeyAction::Command(SessionCommand::GoBack)
        ));
        assert!(matches!(
            app.command_for_key(KeyCode::Left),
            KeyAction::Command(SessionCommand::GoBack)
        ));
        assert!(matches!(
            app.command_for_key(KeyCode::Char('i')),
            KeyAction::Command(SessionCommand::CycleImagery)
        ));
    }

    #[test]
    fn test_quit_keys() {
        let app = app();
        assert!(matches!(
            app.command_for_key(KeyCode::Char('q')),
            KeyAction::Quit
        ));
        assert!(matches!(
            app.command_for_key(KeyCode::Char('Q')),
            KeyAction::Quit
        ));
    }

    #[test]
    fn test_unbound_keys_do_nothing() {
        let app = app();
        assert!(matches!(
            app.command_for_key(KeyCode::Char('x')),
            KeyAction::None
        ));
        assert!(matches!(app.command_for_key(KeyCode::Esc), KeyAction::None));
    }
}
