//! Memory card game screen

use std::time::Instant;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::SmallRng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    Frame,
};

use super::{card, local_position, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::config::GiftConfig;
use crate::content::{CARD_CAPTIONS, PHOTOS};
use crate::puzzle::{CardFace, FlipOutcome, MemoryGame, PairOutcome};

const COLUMNS: usize = 4;

#[derive(Debug)]
pub struct CardMatchScreen {
    game: MemoryGame,
    cursor: usize,
    board_area: Rect,
}

impl CardMatchScreen {
    pub fn new(config: &GiftConfig, rng: &mut SmallRng) -> Self {
        let pairs: Vec<(&str, &str)> = PHOTOS.iter().copied().zip(CARD_CAPTIONS.iter().copied()).collect();
        Self {
            game: MemoryGame::new(&pairs, config.card_match.reveal_delay, rng),
            cursor: 0,
            board_area: Rect::default(),
        }
    }

    pub fn game(&self) -> &MemoryGame {
        &self.game
    }

    fn rows(&self) -> usize {
        self.game.cards().len().div_ceil(COLUMNS)
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let total = self.game.cards().len();
        if total == 0 {
            return;
        }
        let row = (self.cursor / COLUMNS) as isize + d_row;
        let col = (self.cursor % COLUMNS) as isize + d_col;
        let row = row.clamp(0, self.rows() as isize - 1) as usize;
        let col = col.clamp(0, COLUMNS as isize - 1) as usize;
        self.cursor = (row * COLUMNS + col).min(total - 1);
    }

    fn flip(&mut self, index: usize, ctx: &mut ScreenContext) {
        match self.game.flip(index, Instant::now()) {
            FlipOutcome::First | FlipOutcome::Checking => ctx.cue(SoundCue::Pop),
            FlipOutcome::Ignored => {}
        }
    }

    fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let (x, y) = local_position(self.board_area, column, row)?;
        let cell_width = (self.board_area.width / COLUMNS as u16).max(1);
        let cell_height = (self.board_area.height / self.rows().max(1) as u16).max(1);
        let index = usize::from(y / cell_height) * COLUMNS + usize::from(x / cell_width);
        (index < self.game.cards().len()).then_some(index)
    }
}

impl ScreenView for CardMatchScreen {
    fn title(&self) -> String {
        format!("Card Match · {}/{} pairs", self.game.matches(), self.game.pair_count())
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.game.is_complete() {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        vec![("←↑↓→", "Move"), ("Enter", "Flip"), ("s", "Skip"), ("Esc", "Back")]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(2)])
            .split(area);
        self.board_area = chunks[0];

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, self.rows().max(1) as u32); self.rows()])
            .split(chunks[0]);
        for (r, row_area) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
                .split(*row_area);
            for (c, cell_area) in cells.iter().enumerate() {
                let index = r * COLUMNS + c;
                let Some(entry) = self.game.cards().get(index) else {
                    continue;
                };
                let face_up = entry.flipped || entry.matched;
                let text = match (face_up, entry.face) {
                    (false, _) => Span::styled("♥", palette.accent()),
                    (true, CardFace::Photo) => Span::styled(format!("photo {}", entry.pair_id + 1), palette.body()),
                    (true, CardFace::Caption) => Span::styled(entry.content.clone(), palette.title()),
                };
                let mut block = card("", palette);
                if entry.matched {
                    block = block.border_style(palette.found());
                } else if index == self.cursor {
                    block = block.border_style(palette.highlight());
                }
                let inner = block.inner(*cell_area);
                f.render_widget(block, *cell_area);
                f.render_widget(prose(vec![Line::from(""), Line::from(text)]), inner);
            }
        }

        let status = if self.game.is_complete() {
            Span::styled("Every pair matched! Press Enter.", palette.accent())
        } else {
            Span::styled("Match each photo with its caption", palette.muted())
        };
        f.render_widget(prose(vec![Line::from(status)]), chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        let action = StateManager::key_to_navigation(key);
        if self.game.is_complete() {
            return match action {
                NavigationAction::Select => {
                    ctx.cue(SoundCue::Click);
                    Outcome::Continue
                }
                _ => Outcome::Unhandled,
            };
        }
        match action {
            NavigationAction::Up => self.move_cursor(-1, 0),
            NavigationAction::Down => self.move_cursor(1, 0),
            NavigationAction::Left => self.move_cursor(0, -1),
            NavigationAction::Right => self.move_cursor(0, 1),
            NavigationAction::Select => self.flip(self.cursor, ctx),
            NavigationAction::Skip => {
                ctx.cue(SoundCue::Click);
                return Outcome::Skip;
            }
            _ => return Outcome::Unhandled,
        }
        Outcome::Handled
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &mut ScreenContext) -> Outcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.game.is_complete() {
            return Outcome::Unhandled;
        }
        let Some(index) = self.card_at(mouse.column, mouse.row) else {
            return Outcome::Unhandled;
        };
        self.cursor = index;
        self.flip(index, ctx);
        Outcome::Handled
    }

    fn on_tick(&mut self, now: Instant, ctx: &mut ScreenContext) -> Outcome {
        match self.game.resolve(now) {
            Some(PairOutcome::Matched) if self.game.is_complete() => ctx.cue(SoundCue::Complete),
            Some(PairOutcome::Matched) => ctx.cue(SoundCue::Success),
            Some(PairOutcome::Mismatched) | None => {}
        }
        Outcome::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;
    use crossterm::event::KeyCode;
    use rand::SeedableRng;
    use std::time::Duration;

    fn screen(harness: &Harness) -> CardMatchScreen {
        let mut rng = SmallRng::seed_from_u64(7);
        CardMatchScreen::new(&harness.config, &mut rng)
    }

    fn index_of(screen: &CardMatchScreen, pair_id: usize, face: CardFace) -> usize {
        screen
            .game()
            .cards()
            .iter()
            .position(|c| c.pair_id == pair_id && c.face == face)
            .unwrap()
    }

    #[test]
    fn test_pair_resolves_on_tick_after_delay() {
        let mut harness = Harness::new();
        let mut screen = screen(&harness);
        let photo = index_of(&screen, 0, CardFace::Photo);
        let caption = index_of(&screen, 0, CardFace::Caption);

        screen.cursor = photo;
        harness.press(&mut screen, KeyCode::Enter);
        screen.cursor = caption;
        harness.press(&mut screen, KeyCode::Enter);
        assert!(screen.game().is_checking());

        harness.tick(&mut screen, Instant::now() + Duration::from_secs(2));
        assert_eq!(screen.game().matches(), 1);
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut harness = Harness::new();
        let mut screen = screen(&harness);
        harness.press(&mut screen, KeyCode::Up);
        harness.press(&mut screen, KeyCode::Left);
        assert_eq!(screen.cursor, 0);
        for _ in 0..10 {
            harness.press(&mut screen, KeyCode::Right);
            harness.press(&mut screen, KeyCode::Down);
        }
        assert_eq!(screen.cursor, screen.game().cards().len() - 1);
    }

    #[test]
    fn test_skip() {
        let mut harness = Harness::new();
        let mut screen = screen(&harness);
        assert_eq!(harness.press(&mut screen, KeyCode::Char('s')), Outcome::Skip);
    }
}
