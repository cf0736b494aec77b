//! Terminal management system
//!
//! Handles crossterm backend initialization, screen management and input
//! polling. Key release reporting is switched on where the terminal
//! supports it so hold gestures end on the real key-up.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyboardEnhancementFlags,
        MouseEvent, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};
use tracing::{debug, warn};

/// Input the application cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

impl TuiEvent {
    /// Keep keys, mouse and resizes; drop focus and paste events
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(TuiEvent::Key(key)),
            Event::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
            Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
            _ => None,
        }
    }
}

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    active: bool,
    key_release: bool,
}

impl Tui {
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            tick_rate,
            active: false,
            key_release: false,
        })
    }

    /// Raw mode, alternate screen, mouse capture
    pub fn init(&mut self) -> io::Result<()> {
        enter_session(&mut self.active, enable_raw_mode, || {
            execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
        })?;

        self.key_release = matches!(supports_keyboard_enhancement(), Ok(true));
        if self.key_release {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        debug!(key_release = self.key_release, "terminal initialized");

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if self.key_release {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Whether key-up events will arrive
    pub fn reports_key_release(&self) -> bool {
        self.key_release
    }

    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Wait up to one tick for input
    pub fn next_event(&mut self) -> io::Result<Option<TuiEvent>> {
        if event::poll(self.tick_rate)? {
            return Ok(TuiEvent::from_crossterm(event::read()?));
        }
        Ok(None)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Switch raw mode on, then the screen modes. `active` is set as soon as
/// raw mode is on so a failure after that point is still restored.
fn enter_session(
    active: &mut bool,
    raw: impl FnOnce() -> io::Result<()>,
    screen: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    raw()?;
    *active = true;
    screen()
}
