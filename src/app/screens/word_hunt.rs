//! Word search screen
//!
//! Drag across letters with the mouse, or mark both ends with the keyboard
//! cursor and Space.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::SmallRng;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{card, local_position, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::{WORD_SEARCH_PLACEMENTS, WORD_SEARCH_SIZE};
use crate::puzzle::word_search::Pos;
use crate::puzzle::WordSearch;
use crate::Result;

/// Each letter takes two columns so the grid reads square
const CELL_WIDTH: u16 = 2;

#[derive(Debug)]
pub struct WordHuntScreen {
    board: WordSearch,
    cursor: Pos,
    grid_area: Rect,
    last_found: Option<&'static str>,
}

impl WordHuntScreen {
    pub fn new(rng: &mut SmallRng) -> Result<Self> {
        Ok(Self::with_board(WordSearch::new(
            WORD_SEARCH_SIZE,
            WORD_SEARCH_PLACEMENTS,
            rng.gen(),
        )?))
    }

    fn with_board(board: WordSearch) -> Self {
        Self {
            board,
            cursor: (0, 0),
            grid_area: Rect::default(),
            last_found: None,
        }
    }

    pub fn board(&self) -> &WordSearch {
        &self.board
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<Pos> {
        let (x, y) = local_position(self.grid_area, column, row)?;
        let pos = (usize::from(y), usize::from(x / CELL_WIDTH));
        (pos.0 < self.board.size() && pos.1 < self.board.size()).then_some(pos)
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max = self.board.size() as isize - 1;
        let row = (self.cursor.0 as isize + d_row).clamp(0, max) as usize;
        let col = (self.cursor.1 as isize + d_col).clamp(0, max) as usize;
        self.cursor = (row, col);
        if self.board.is_selecting() {
            self.board.extend(self.cursor);
        }
    }

    fn finish_selection(&mut self, ctx: &mut ScreenContext) {
        match self.board.finish() {
            Some(word) => {
                self.last_found = Some(word);
                if self.board.is_complete() {
                    ctx.cue(SoundCue::Complete);
                } else {
                    ctx.cue(SoundCue::Success);
                }
            }
            None => ctx.cue(SoundCue::Pop),
        }
    }

    fn render_grid(&self, f: &mut Frame, ctx: &RenderContext) {
        let palette = ctx.palette;
        let selection = self.board.selection();
        let lines: Vec<Line> = (0..self.board.size())
            .map(|row| {
                let spans: Vec<Span> = (0..self.board.size())
                    .map(|col| {
                        let pos = (row, col);
                        let letter = self.board.letter(pos).unwrap_or(' ');
                        let style = if selection.contains(&pos) || pos == self.cursor {
                            palette.highlight()
                        } else if self.board.is_highlighted(pos) {
                            palette.found()
                        } else {
                            palette.body()
                        };
                        Span::styled(format!("{} ", letter), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        f.render_widget(Paragraph::new(lines), self.grid_area);
    }
}

impl ScreenView for WordHuntScreen {
    fn title(&self) -> String {
        "Word Hunt".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.board.is_complete() {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        vec![
            ("Drag/Space", "Select"),
            ("←↑↓→", "Move"),
            ("s", "Skip"),
            ("Esc", "Back"),
        ]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let size = self.board.size() as u16;
        let grid_width = size * CELL_WIDTH + 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(grid_width), Constraint::Min(20)])
            .split(area);

        let block = card(
            &format!("Found {}/{}", self.board.found_count(), self.board.words().len()),
            palette,
        );
        self.grid_area = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);
        self.render_grid(f, ctx);

        let mut lines: Vec<Line> = self
            .board
            .words()
            .iter()
            .map(|word| {
                if self.board.is_found(word) {
                    Line::from(Span::styled(format!("✓ {}", word), palette.found()))
                } else {
                    Line::from(Span::styled(format!("  {}", word), palette.secondary_text()))
                }
            })
            .collect();
        if self.board.is_complete() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("You found every word!", palette.accent())));
        } else if let Some(word) = self.last_found {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("Found {}!", word), palette.accent())));
        }
        let words = card("Words", palette);
        let inner = words.inner(chunks[1]);
        f.render_widget(words, chunks[1]);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        let action = StateManager::key_to_navigation(key);
        if self.board.is_complete() {
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
            NavigationAction::Select => {
                if self.board.is_selecting() {
                    self.finish_selection(ctx);
                } else {
                    self.board.begin(self.cursor);
                }
            }
            NavigationAction::Back if self.board.is_selecting() => self.board.cancel(),
            NavigationAction::Skip => {
                ctx.cue(SoundCue::Click);
                return Outcome::Skip;
            }
            _ => return Outcome::Unhandled,
        }
        Outcome::Handled
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &mut ScreenContext) -> Outcome {
        if self.board.is_complete() {
            return Outcome::Unhandled;
        }
        let cell = self.cell_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(pos) = cell {
                    self.cursor = pos;
                    self.board.begin(pos);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(pos) = cell {
                    self.cursor = pos;
                    self.board.extend(pos);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.board.is_selecting() {
                    self.finish_selection(ctx);
                }
            }
            _ => return Outcome::Unhandled,
        }
        Outcome::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn screen() -> WordHuntScreen {
        let board = WordSearch::new(WORD_SEARCH_SIZE, WORD_SEARCH_PLACEMENTS, 11).unwrap();
        let mut screen = WordHuntScreen::with_board(board);
        screen.grid_area = Rect::new(1, 4, WORD_SEARCH_SIZE as u16 * CELL_WIDTH, WORD_SEARCH_SIZE as u16);
        screen
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_keyboard_selection_finds_word() {
        let mut harness = Harness::new();
        let mut screen = screen();
        // HEART runs down column 0 from the top
        harness.press(&mut screen, KeyCode::Char(' '));
        for _ in 0..4 {
            harness.press(&mut screen, KeyCode::Down);
        }
        harness.press(&mut screen, KeyCode::Enter);
        assert!(screen.board().is_found("HEART"));
    }

    #[test]
    fn test_mouse_drag_finds_word_backwards() {
        let mut harness = Harness::new();
        let mut screen = screen();
        let mut ctx = crate::app::screens::ScreenContext::new(
            &harness.store,
            &mut harness.sounds,
            &harness.config,
        );
        // SEHAJ sits on row 13 from column 9; drag from the J back to the S
        let (left, top) = (1, 4);
        let row = top + 13;
        let end_col = left + 13 * CELL_WIDTH;
        let start_col = left + 9 * CELL_WIDTH;
        screen.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), end_col, row), &mut ctx);
        screen.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), start_col + 1, row), &mut ctx);
        screen.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), start_col, row), &mut ctx);
        assert!(screen.board().is_found("SEHAJ"));
    }

    #[test]
    fn test_skip_and_outside_clicks() {
        let mut harness = Harness::new();
        let mut screen = screen();
        assert_eq!(screen.cell_at(0, 4), None);
        assert_eq!(screen.cell_at(1, 4), Some((0, 0)));
        assert_eq!(harness.press(&mut screen, KeyCode::Char('s')), Outcome::Skip);
    }
}
