//! Application state management
//!
//! The journey is a fixed path of screens. Each screen has a literal path,
//! a successor for "continue" and one for "skip", and the manager keeps a
//! back stack so Esc retraces the steps taken.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

/// Every screen of the journey, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Entry,
    Personalization,
    Origin,
    EarlyFeelings,
    Memories,
    WordHunt,
    Crossword,
    CardMatch,
    ScratchCard,
    LockScreen,
    LoveMeter,
    HoldReveal,
    ShakeReveal,
    NicknameCarousel,
    Poems,
    Confession,
    Question,
    Celebration,
    Surprise,
    QuietStars,
}

/// How a screen was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Finished the screen
    Continue,
    /// Used the screen's skip control
    Skip,
}

impl Screen {
    pub const ALL: [Screen; 20] = [
        Screen::Entry,
        Screen::Personalization,
        Screen::Origin,
        Screen::EarlyFeelings,
        Screen::Memories,
        Screen::WordHunt,
        Screen::Crossword,
        Screen::CardMatch,
        Screen::ScratchCard,
        Screen::LockScreen,
        Screen::LoveMeter,
        Screen::HoldReveal,
        Screen::ShakeReveal,
        Screen::NicknameCarousel,
        Screen::Poems,
        Screen::Confession,
        Screen::Question,
        Screen::Celebration,
        Screen::Surprise,
        Screen::QuietStars,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Screen::Entry => "/",
            Screen::Personalization => "/personalization",
            Screen::Origin => "/origin",
            Screen::EarlyFeelings => "/early-feelings",
            Screen::Memories => "/memories",
            Screen::WordHunt => "/word-hunt",
            Screen::Crossword => "/crossword",
            Screen::CardMatch => "/card-match",
            Screen::ScratchCard => "/scratch-card",
            Screen::LockScreen => "/lock-screen",
            Screen::LoveMeter => "/love-meter",
            Screen::HoldReveal => "/hold-reveal",
            Screen::ShakeReveal => "/shake-reveal",
            Screen::NicknameCarousel => "/nickname-carousel",
            Screen::Poems => "/poems",
            Screen::Confession => "/confession",
            Screen::Question => "/question",
            Screen::Celebration => "/celebration",
            Screen::Surprise => "/surprise",
            Screen::QuietStars => "/quiet-stars",
        }
    }

    /// Look a screen up by path; a trailing slash is tolerated
    pub fn from_path(path: &str) -> Option<Screen> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL.into_iter().find(|s| s.path() == normalized)
    }

    /// Successor along `edge`; `None` only for the last screen
    pub fn next(self, edge: Edge) -> Option<Screen> {
        if edge == Edge::Skip {
            if let Some(target) = self.skip_target() {
                return Some(target);
            }
        }
        let index = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// Screens whose skip leaves the story for the puzzles
    fn skip_target(self) -> Option<Screen> {
        match self {
            Screen::Personalization | Screen::Origin | Screen::EarlyFeelings | Screen::WordHunt => {
                Some(Screen::Crossword)
            }
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next(Edge::Continue).is_none()
    }

    /// 1-based position along the journey
    pub fn step(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).map_or(0, |i| i + 1)
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm (Enter, Space)
    Select,
    /// Go back (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Skip ahead (s)
    Skip,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Current screen plus the way back
#[derive(Debug)]
pub struct StateManager {
    current: Screen,
    history: Vec<Screen>,
    should_quit: bool,
}

impl StateManager {
    pub fn new(start: Screen) -> Self {
        Self {
            current: start,
            history: Vec::new(),
            should_quit: false,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn previous(&self) -> Option<Screen> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Jump to `screen`, remembering where we came from
    pub fn transition_to(&mut self, screen: Screen) {
        if screen != self.current {
            info!(from = self.current.path(), to = screen.path(), "navigate");
            self.history.push(self.current);
            self.current = screen;
        }
    }

    /// Follow the current screen's edge. Returns the new screen, or `None`
    /// at the end of the journey.
    pub fn advance(&mut self, edge: Edge) -> Option<Screen> {
        let next = self.current.next(edge)?;
        self.transition_to(next);
        Some(next)
    }

    /// Pop one step. Returns false when there is nowhere to go back to.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                info!(from = self.current.path(), to = previous.path(), "navigate back");
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Apply the actions that mean the same on every screen
    pub fn handle_navigation(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Quit => self.should_quit = true,
            NavigationAction::Back => {
                // back from the very first screen leaves
                if !self.go_back() {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,
            KeyCode::Char('s') | KeyCode::Char('S') => NavigationAction::Skip,

            KeyCode::BackTab => NavigationAction::Previous,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }

            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new(Screen::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_paths_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_path(screen.path()), Some(screen));
        }
        assert_eq!(Screen::from_path("/crossword/"), Some(Screen::Crossword));
        assert_eq!(Screen::from_path("/nope"), None);
    }

    #[test]
    fn test_continue_walks_the_whole_journey() {
        let mut screen = Screen::Entry;
        let mut visited = vec![screen];
        while let Some(next) = screen.next(Edge::Continue) {
            screen = next;
            visited.push(screen);
        }
        assert_eq!(visited, Screen::ALL.to_vec());
        assert!(Screen::QuietStars.is_terminal());
    }

    #[test]
    fn test_skip_edges() {
        assert_eq!(Screen::Personalization.next(Edge::Skip), Some(Screen::Crossword));
        assert_eq!(Screen::Origin.next(Edge::Skip), Some(Screen::Crossword));
        assert_eq!(Screen::EarlyFeelings.next(Edge::Skip), Some(Screen::Crossword));
        assert_eq!(Screen::WordHunt.next(Edge::Skip), Some(Screen::Crossword));
        // elsewhere skip and continue agree
        assert_eq!(Screen::CardMatch.next(Edge::Skip), Some(Screen::ScratchCard));
        assert_eq!(Screen::LockScreen.next(Edge::Skip), Screen::LockScreen.next(Edge::Continue));
        assert_eq!(Screen::QuietStars.next(Edge::Skip), None);
    }

    #[test]
    fn test_advance_and_back() {
        let mut state = StateManager::default();
        assert_eq!(state.advance(Edge::Continue), Some(Screen::Personalization));
        assert_eq!(state.advance(Edge::Skip), Some(Screen::Crossword));
        assert_eq!(state.previous(), Some(Screen::Personalization));

        assert!(state.go_back());
        assert_eq!(state.current(), Screen::Personalization);
        assert!(state.go_back());
        assert_eq!(state.current(), Screen::Entry);
        assert!(!state.go_back());
    }

    #[test]
    fn test_advance_stops_at_the_end() {
        let mut state = StateManager::new(Screen::QuietStars);
        assert_eq!(state.advance(Edge::Continue), None);
        assert_eq!(state.current(), Screen::QuietStars);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_back_from_first_screen_quits() {
        let mut state = StateManager::default();
        state.handle_navigation(NavigationAction::Back);
        assert!(state.should_quit());

        let mut state = StateManager::new(Screen::Poems);
        state.transition_to(Screen::Confession);
        state.handle_navigation(NavigationAction::Back);
        assert!(!state.should_quit());
        assert_eq!(state.current(), Screen::Poems);
    }

    #[test]
    fn test_key_to_navigation() {
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::Char('q'))), NavigationAction::Quit);
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            NavigationAction::Quit
        );
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::Up)), NavigationAction::Up);
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::Char('l'))), NavigationAction::Right);
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::Enter)), NavigationAction::Select);
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::Esc)), NavigationAction::Back);
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::Char('s'))), NavigationAction::Skip);
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::BackTab)), NavigationAction::Previous);
        assert_eq!(StateManager::key_to_navigation(key(KeyCode::F(5))), NavigationAction::None);
    }
}
