//! Memory cards
//!
//! Each card opens into its story. The way forward appears only after every
//! memory has been opened and closed once.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::MEMORIES;
use crate::puzzle::FoundSet;

#[derive(Debug)]
pub struct MemoriesScreen {
    selected: usize,
    open: Option<usize>,
    viewed: FoundSet<usize>,
    list_state: ListState,
}

impl MemoriesScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            open: None,
            viewed: FoundSet::new(MEMORIES.len()),
            list_state,
        }
    }

    pub fn all_viewed(&self) -> bool {
        self.viewed.is_complete()
    }

    pub fn viewed_count(&self) -> usize {
        self.viewed.count()
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }

    fn close(&mut self, ctx: &mut ScreenContext) {
        if let Some(index) = self.open.take() {
            if self.viewed.mark(index) && self.all_viewed() {
                ctx.cue(SoundCue::Success);
            }
        }
    }
}

impl Default for MemoriesScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenView for MemoriesScreen {
    fn title(&self) -> String {
        "Memories".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.open.is_some() {
            return vec![("Enter/Esc", "Close")];
        }
        let mut help = vec![("↑↓", "Choose"), ("Enter", "Open")];
        if self.all_viewed() {
            help.push(("Tab", "Continue"));
        }
        help.push(("Esc", "Back"));
        help
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(2)])
            .split(centered(area, 60, 12));

        let items: Vec<ListItem> = MEMORIES
            .iter()
            .enumerate()
            .map(|(i, memory)| {
                let mark = if self.viewed.contains(&i) { "♥ " } else { "♡ " };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, palette.accent()),
                    Span::styled(memory.title, palette.body()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(card("Tap a memory", palette))
            .highlight_style(palette.highlight())
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let status = if self.all_viewed() {
            Line::from(Span::styled("All memories opened. Press Tab to continue.", palette.accent()))
        } else {
            Line::from(Span::styled(
                format!("{} / {} opened", self.viewed.count(), self.viewed.total()),
                palette.muted(),
            ))
        };
        f.render_widget(prose(vec![status]), chunks[1]);

        if let Some(memory) = self.open.and_then(|i| MEMORIES.get(i)) {
            let popup = centered(area, 50, 9);
            let block = card(memory.title, palette);
            let inner = block.inner(popup);
            f.render_widget(Clear, popup);
            f.render_widget(block, popup);
            f.render_widget(
                prose(vec![Line::from(Span::styled(memory.content, palette.body()))]),
                inner,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        let action = StateManager::key_to_navigation(key);
        if self.open.is_some() {
            return match action {
                NavigationAction::Select | NavigationAction::Back => {
                    self.close(ctx);
                    Outcome::Handled
                }
                NavigationAction::Quit => Outcome::Quit,
                _ => Outcome::Handled,
            };
        }

        match action {
            NavigationAction::Up => {
                self.select(self.selected.checked_sub(1).unwrap_or(MEMORIES.len() - 1));
                Outcome::Handled
            }
            NavigationAction::Down => {
                self.select((self.selected + 1) % MEMORIES.len());
                Outcome::Handled
            }
            NavigationAction::Select => {
                self.open = Some(self.selected);
                ctx.cue(SoundCue::Pop);
                Outcome::Handled
            }
            NavigationAction::Next if self.all_viewed() => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            _ => Outcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;
    use crossterm::event::KeyCode;

    #[test]
    fn test_continue_needs_every_memory() {
        let mut harness = Harness::new();
        let mut screen = MemoriesScreen::new();
        assert_eq!(harness.press(&mut screen, KeyCode::Tab), Outcome::Unhandled);

        for _ in 0..MEMORIES.len() {
            harness.press(&mut screen, KeyCode::Enter);
            harness.press(&mut screen, KeyCode::Esc);
            harness.press(&mut screen, KeyCode::Down);
        }
        assert!(screen.all_viewed());
        assert_eq!(harness.press(&mut screen, KeyCode::Tab), Outcome::Continue);
    }

    #[test]
    fn test_reopening_counts_once() {
        let mut harness = Harness::new();
        let mut screen = MemoriesScreen::new();
        for _ in 0..3 {
            harness.press(&mut screen, KeyCode::Enter);
            harness.press(&mut screen, KeyCode::Enter);
        }
        assert_eq!(screen.viewed_count(), 1);
    }

    #[test]
    fn test_esc_closes_before_going_back() {
        let mut harness = Harness::new();
        let mut screen = MemoriesScreen::new();
        harness.press(&mut screen, KeyCode::Enter);
        assert_eq!(harness.press(&mut screen, KeyCode::Esc), Outcome::Handled);
        assert_eq!(harness.press(&mut screen, KeyCode::Esc), Outcome::Unhandled);
    }

    #[test]
    fn test_selection_wraps() {
        let mut harness = Harness::new();
        let mut screen = MemoriesScreen::new();
        harness.press(&mut screen, KeyCode::Up);
        assert_eq!(screen.selected, MEMORIES.len() - 1);
    }
}
