//! Crossword screen

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{card, local_position, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::audio::SoundCue;
use crate::content::{CROSSWORD_ENTRIES, CROSSWORD_SIZE};
use crate::puzzle::{Crossword, Direction};
use crate::Result;

/// Clue number, letter, gap
const CELL_WIDTH: u16 = 3;

#[derive(Debug)]
pub struct CrosswordScreen {
    puzzle: Crossword,
    grid_area: Rect,
}

impl CrosswordScreen {
    pub fn new() -> Result<Self> {
        Ok(Self {
            puzzle: Crossword::new(CROSSWORD_SIZE, CROSSWORD_ENTRIES)?,
            grid_area: Rect::default(),
        })
    }

    pub fn puzzle(&self) -> &Crossword {
        &self.puzzle
    }

    fn type_letter(&mut self, letter: char, ctx: &mut ScreenContext) {
        let was_complete = self.puzzle.is_complete();
        let found = self.puzzle.input(letter);
        if self.puzzle.is_complete() && !was_complete {
            ctx.cue(SoundCue::Complete);
        } else if !found.is_empty() {
            ctx.cue(SoundCue::Success);
        } else {
            ctx.cue(SoundCue::Pop);
        }
    }

    fn render_grid(&self, f: &mut Frame, ctx: &RenderContext) {
        let palette = ctx.palette;
        let cursor = self.puzzle.cursor();
        let lines: Vec<Line> = (0..self.puzzle.size())
            .map(|row| {
                let spans: Vec<Span> = (0..self.puzzle.size())
                    .flat_map(|col| {
                        if !self.puzzle.is_open(row, col) {
                            return vec![Span::styled("   ", Style::default().bg(palette.background))];
                        }
                        let number = self
                            .puzzle
                            .number_at(row, col)
                            .map_or(" ".to_string(), |n| n.to_string());
                        let letter = self.puzzle.letter(row, col).unwrap_or('·');
                        let style = if (row, col) == cursor {
                            palette.highlight()
                        } else if self.puzzle.is_locked(row, col) {
                            palette.found()
                        } else {
                            Style::default().fg(palette.text).bg(palette.card)
                        };
                        vec![
                            Span::styled(number, style.fg(palette.secondary)),
                            Span::styled(format!("{} ", letter), style.add_modifier(Modifier::BOLD)),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        f.render_widget(Paragraph::new(lines), self.grid_area);
    }

    fn clue_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let palette = ctx.palette;
        let active = self.puzzle.active_entry().map(|e| e.id());
        let mut lines = Vec::new();
        for direction in [Direction::Across, Direction::Down] {
            lines.push(Line::from(Span::styled(direction.label().to_uppercase(), palette.title())));
            for entry in self.puzzle.entries().iter().filter(|e| e.direction == direction) {
                let style = if self.puzzle.is_found(entry.number, entry.direction) {
                    palette.found()
                } else if Some(entry.id()) == active {
                    palette.accent()
                } else {
                    palette.secondary_text()
                };
                lines.push(Line::from(Span::styled(
                    format!("{}. {} ({})", entry.number, entry.hint, entry.len()),
                    style,
                )));
            }
            lines.push(Line::from(""));
        }
        if self.puzzle.is_complete() {
            lines.push(Line::from(Span::styled("Perfect! Every word is in.", palette.accent())));
        }
        lines
    }
}

impl ScreenView for CrosswordScreen {
    fn title(&self) -> String {
        format!(
            "Crossword · {}/{} · typing {}",
            self.puzzle.found_count(),
            self.puzzle.entries().len(),
            self.puzzle.direction().label()
        )
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.puzzle.is_complete() {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        vec![
            ("A-Z", "Type"),
            ("←↑↓→", "Move"),
            ("Tab", "Across/Down"),
            ("Ctrl+S", "Skip"),
            ("Esc", "Back"),
        ]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let size = self.puzzle.size() as u16;
        let chunks = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Length(size * CELL_WIDTH + 2), Constraint::Min(24)])
            .split(area);

        let block = card("Grid", ctx.palette);
        self.grid_area = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);
        self.render_grid(f, ctx);

        let clues = card("Clues", ctx.palette);
        let inner = clues.inner(chunks[1]);
        f.render_widget(clues, chunks[1]);
        f.render_widget(prose(self.clue_lines(ctx)), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Outcome::Back,
            KeyCode::Char('s') if ctrl => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
            }
            KeyCode::Enter if self.puzzle.is_complete() => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            KeyCode::Char(c) if !ctrl && c.is_ascii_alphabetic() => {
                self.type_letter(c, ctx);
                Outcome::Handled
            }
            KeyCode::Backspace => {
                self.puzzle.backspace();
                Outcome::Handled
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char(' ') | KeyCode::Enter => {
                let (row, col) = self.puzzle.cursor();
                self.puzzle.select(row, col);
                ctx.cue(SoundCue::Click);
                Outcome::Handled
            }
            KeyCode::Up => {
                self.puzzle.move_cursor(-1, 0);
                Outcome::Handled
            }
            KeyCode::Down => {
                self.puzzle.move_cursor(1, 0);
                Outcome::Handled
            }
            KeyCode::Left => {
                self.puzzle.move_cursor(0, -1);
                Outcome::Handled
            }
            KeyCode::Right => {
                self.puzzle.move_cursor(0, 1);
                Outcome::Handled
            }
            _ => Outcome::Unhandled,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &mut ScreenContext) -> Outcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Outcome::Unhandled;
        }
        let Some((x, y)) = local_position(self.grid_area, mouse.column, mouse.row) else {
            return Outcome::Unhandled;
        };
        if self.puzzle.select(usize::from(y), usize::from(x / CELL_WIDTH)) {
            ctx.cue(SoundCue::Click);
        }
        Outcome::Handled
    }

    fn captures_text(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;

    #[test]
    fn test_typing_an_entry_marks_it_found() {
        let mut harness = Harness::new();
        let mut screen = CrosswordScreen::new().unwrap();
        // start on 2 across
        screen.puzzle.select(2, 0);
        while screen.puzzle.direction() != Direction::Across {
            screen.puzzle.select(2, 0);
        }
        for c in "soulmate".chars() {
            harness.press(&mut screen, KeyCode::Char(c));
        }
        assert!(screen.puzzle().is_found(2, Direction::Across));
    }

    #[test]
    fn test_letters_never_navigate() {
        let mut harness = Harness::new();
        let mut screen = CrosswordScreen::new().unwrap();
        assert_eq!(harness.press(&mut screen, KeyCode::Char('q')), Outcome::Handled);
        assert_eq!(harness.press(&mut screen, KeyCode::Char('s')), Outcome::Handled);
        assert_eq!(harness.press(&mut screen, KeyCode::Esc), Outcome::Back);
    }

    #[test]
    fn test_tab_toggles_direction() {
        let mut harness = Harness::new();
        let mut screen = CrosswordScreen::new().unwrap();
        let before = screen.puzzle().direction();
        harness.press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.puzzle().direction(), before.toggled());
    }
}
