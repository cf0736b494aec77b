//! Main application controller
//!
//! `Journey` owns the navigation state and the live screen and routes input
//! to it; `App` wraps it in a terminal and drives the loop.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratatui::Frame;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    app::{
        screens::{self, Outcome, RenderContext, ScreenContext, ScreenView},
        state::{Edge, Screen, StateManager},
        tui::{Tui, TuiEvent},
    },
    audio::SoundBoard,
    config::GiftConfig,
    store::{AppSnapshot, AppStore, Intent},
    theme::Palette,
    Result,
};

/// Shortcuts that work on every screen that is not taking text
fn global_intent(key: &KeyEvent) -> Option<Intent> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Intent::ToggleMute),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Intent::ToggleTheme),
        KeyCode::Char('[') => Some(Intent::PreviousTrack),
        KeyCode::Char(']') => Some(Intent::NextTrack),
        _ => None,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Navigation, shared state and the screen currently shown
pub struct Journey {
    state: StateManager,
    view: Box<dyn ScreenView>,
    store: AppStore,
    updates: watch::Receiver<AppSnapshot>,
    sounds: SoundBoard,
    config: GiftConfig,
    rng: SmallRng,
}

impl Journey {
    /// Open the journey at the configured start screen. Must run inside the
    /// tokio runtime.
    pub fn new(config: GiftConfig, store: AppStore, mut sounds: SoundBoard) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.ui.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let start = config.start_screen();
        let view = screens::build(start, &config, &mut rng)?;
        let updates = store.subscribe();
        sounds.set_muted(store.snapshot().muted);
        info!(start = start.path(), "journey started");

        Ok(Self {
            state: StateManager::new(start),
            view,
            store,
            updates,
            sounds,
            config,
            rng,
        })
    }

    pub fn current(&self) -> Screen {
        self.state.current()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.store.snapshot()
    }

    pub fn history(&self) -> &[Screen] {
        self.state.history()
    }

    /// Tell hold gestures whether key-up events arrive. Rebuilds the
    /// current screen so it picks the setting up.
    pub fn set_key_release(&mut self, reported: bool) -> Result<()> {
        if self.config.hold.release_events == reported {
            return Ok(());
        }
        self.config.hold.release_events = reported;
        self.view = screens::build(self.state.current(), &self.config, &mut self.rng)?;
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            let mut ctx = ScreenContext::new(&self.store, &mut self.sounds, &self.config);
            self.view.handle_release(key, &mut ctx);
            return Ok(());
        }
        if is_interrupt(&key) {
            self.state.quit();
            return Ok(());
        }
        if !self.view.captures_text() {
            if let Some(intent) = global_intent(&key) {
                let snapshot = self.store.dispatch(intent);
                self.sounds.set_muted(snapshot.muted);
                return Ok(());
            }
        }

        let outcome = {
            let mut ctx = ScreenContext::new(&self.store, &mut self.sounds, &self.config);
            self.view.handle_key(key, &mut ctx)
        };
        self.apply(outcome, Some(key))
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let outcome = {
            let mut ctx = ScreenContext::new(&self.store, &mut self.sounds, &self.config);
            self.view.handle_mouse(mouse, &mut ctx)
        };
        self.apply(outcome, None)
    }

    /// Run timers and pick up preference changes
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if self.updates.has_changed().unwrap_or(false) {
            let snapshot = self.updates.borrow_and_update().clone();
            self.sounds.set_muted(snapshot.muted);
            debug!(dark_mode = snapshot.dark_mode, muted = snapshot.muted, "preferences changed");
        }
        let outcome = {
            let mut ctx = ScreenContext::new(&self.store, &mut self.sounds, &self.config);
            self.view.on_tick(now, &mut ctx)
        };
        self.apply(outcome, None)
    }

    pub fn render(&mut self, f: &mut Frame) {
        let snapshot = self.store.snapshot();
        let ctx = RenderContext {
            palette: Palette::for_mode(snapshot.dark_mode),
            snapshot: &snapshot,
        };
        screens::render_page(f, self.view.as_mut(), self.state.current().step(), &ctx);
    }

    fn apply(&mut self, outcome: Outcome, key: Option<KeyEvent>) -> Result<()> {
        let before = self.state.current();
        match outcome {
            Outcome::Handled => {}
            Outcome::Unhandled => {
                if let Some(key) = key {
                    self.state.handle_navigation(StateManager::key_to_navigation(key));
                }
            }
            Outcome::Continue => {
                self.state.advance(Edge::Continue);
            }
            Outcome::Skip => {
                self.state.advance(Edge::Skip);
            }
            Outcome::Back => {
                if !self.state.go_back() {
                    self.state.quit();
                }
            }
            Outcome::Quit => self.state.quit(),
        }

        if self.state.current() != before && !self.state.should_quit() {
            self.view = screens::build(self.state.current(), &self.config, &mut self.rng)?;
        }
        Ok(())
    }
}

/// TUI application controller
pub struct App {
    tui: Tui,
    journey: Journey,
}

impl App {
    pub fn new(config: GiftConfig, store: AppStore) -> Result<Self> {
        let tui = Tui::new(config.ui.tick_rate)?;
        let sounds = SoundBoard::from_output(config.ui.sound);
        Ok(Self {
            tui,
            journey: Journey::new(config, store, sounds)?,
        })
    }

    /// Take over the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()?;
        let key_release = self.tui.reports_key_release();
        if !key_release {
            info!("terminal does not report key release, holds end when repeats stop");
        }
        self.journey.set_key_release(key_release)
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.journey.should_quit() {
            self.tui.draw(|f| self.journey.render(f))?;

            match self.tui.next_event()? {
                Some(TuiEvent::Key(key)) => self.journey.handle_key(key)?,
                Some(TuiEvent::Mouse(mouse)) => self.journey.handle_mouse(mouse)?,
                Some(TuiEvent::Resize(width, height)) => debug!(width, height, "resized"),
                None => {}
            }

            self.journey.tick(Instant::now())?;
            // let the screen timers deliver
            tokio::task::yield_now().await;
        }
        info!(screen = self.journey.current().path(), "journey ended");
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentSink;

    fn journey(config: GiftConfig) -> Journey {
        let store = AppStore::in_memory(&config.recipient.default_name);
        Journey::new(config, store, SoundBoard::new(Box::new(SilentSink))).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_global_keys_dispatch_intents() {
        let mut journey = journey(GiftConfig::default().with_seed(1));
        assert!(journey.snapshot().dark_mode);
        journey.handle_key(key(KeyCode::Char('t'))).unwrap();
        journey.handle_key(key(KeyCode::Char('m'))).unwrap();
        journey.handle_key(key(KeyCode::Char(']'))).unwrap();
        let snapshot = journey.snapshot();
        assert!(!snapshot.dark_mode);
        assert!(snapshot.muted);
        assert_eq!(snapshot.track_index, 1);
        assert_eq!(journey.current(), Screen::Entry);
    }

    #[tokio::test]
    async fn test_key_release_reaches_hold_screen() {
        let mut journey = journey(GiftConfig::default().with_seed(1).with_start_at("/hold-reveal"));
        assert!(!journey.config.hold.release_events);

        journey.set_key_release(true).unwrap();
        assert!(journey.config.hold.release_events);
        assert_eq!(journey.current(), Screen::HoldReveal);

        // screens built later see it too
        journey.handle_key(key(KeyCode::Char('s'))).unwrap();
        journey.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(journey.current(), Screen::HoldReveal);
        assert!(journey.config.hold.release_events);
    }

    #[tokio::test]
    async fn test_typing_screen_keeps_global_letters() {
        let mut journey = journey(GiftConfig::default().with_seed(1).with_start_at("/personalization"));
        journey.handle_key(key(KeyCode::Char('m'))).unwrap();
        journey.handle_key(key(KeyCode::Char('t'))).unwrap();
        assert!(!journey.snapshot().muted);
        journey.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(journey.snapshot().display_name, "mt");
        assert_eq!(journey.current(), Screen::Origin);
    }

    #[tokio::test]
    async fn test_back_returns_and_quits_at_root() {
        let mut journey = journey(GiftConfig::default().with_seed(1));
        journey.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(journey.current(), Screen::Personalization);
        journey.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(journey.current(), Screen::Entry);
        journey.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(journey.should_quit());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_typing_screen() {
        let mut journey = journey(GiftConfig::default().with_seed(1).with_start_at("/crossword"));
        journey
            .handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(journey.should_quit());
    }
}
