//! Scratch card screen
//!
//! Drag with the mouse to scratch. On the keyboard, Space puts the brush
//! down and the arrows scratch as they move.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::SmallRng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{card, centered, local_position, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::config::GiftConfig;
use crate::gesture::ScratchCard;

#[derive(Debug)]
pub struct ScratchScreen {
    card: ScratchCard,
    brush: (u16, u16),
    brush_down: bool,
    card_area: Rect,
}

impl ScratchScreen {
    pub fn new(config: &GiftConfig, rng: &mut SmallRng) -> Self {
        Self::with_card(ScratchCard::with_random_message(&config.scratch, rng))
    }

    fn with_card(card: ScratchCard) -> Self {
        Self {
            card,
            brush: (0, 0),
            brush_down: false,
            card_area: Rect::default(),
        }
    }

    pub fn card(&self) -> &ScratchCard {
        &self.card
    }

    fn scratch_at(&mut self, x: u16, y: u16, ctx: &mut ScreenContext) {
        if self.card.scratch(x, y) && self.card.is_revealed() {
            ctx.cue(SoundCue::Magic);
        }
    }

    fn move_brush(&mut self, dx: i32, dy: i32, ctx: &mut ScreenContext) {
        let x = (i32::from(self.brush.0) + dx).clamp(0, i32::from(self.card.width()) - 1);
        let y = (i32::from(self.brush.1) + dy).clamp(0, i32::from(self.card.height()) - 1);
        self.brush = (x as u16, y as u16);
        if self.brush_down {
            self.scratch_at(self.brush.0, self.brush.1, ctx);
        }
    }

    /// The hidden message laid out over the card, one row per line
    fn message_rows(&self) -> Vec<Vec<char>> {
        let width = usize::from(self.card.width());
        let mut rows: Vec<Vec<char>> = Vec::new();
        let mut current = String::new();
        for word in self.card.message().split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
                rows.push(current.chars().collect());
                current.clear();
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            rows.push(current.chars().collect());
        }

        let height = usize::from(self.card.height());
        let top = height.saturating_sub(rows.len()) / 2;
        let mut grid = vec![vec![' '; width]; height];
        for (i, row) in rows.iter().enumerate() {
            let Some(target) = grid.get_mut(top + i) else {
                break;
            };
            let left = width.saturating_sub(row.len()) / 2;
            for (j, c) in row.iter().take(width).enumerate() {
                target[left + j] = *c;
            }
        }
        grid
    }

    fn render_card(&self, f: &mut Frame, ctx: &RenderContext) {
        let palette = ctx.palette;
        let message = self.message_rows();
        let lines: Vec<Line> = message
            .iter()
            .enumerate()
            .map(|(y, row)| {
                let spans: Vec<Span> = row
                    .iter()
                    .enumerate()
                    .map(|(x, c)| {
                        let (x, y) = (x as u16, y as u16);
                        if (x, y) == self.brush && !self.card.is_revealed() {
                            Span::styled(c.to_string(), palette.highlight())
                        } else if self.card.is_revealed() || self.card.is_scratched(x, y) {
                            Span::styled(c.to_string(), palette.title())
                        } else {
                            Span::styled("░", palette.muted())
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        f.render_widget(Paragraph::new(lines), self.card_area);
    }
}

impl ScreenView for ScratchScreen {
    fn title(&self) -> String {
        "Scratch Card".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.card.is_revealed() {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        vec![
            ("Drag", "Scratch"),
            ("Space", if self.brush_down { "Lift brush" } else { "Brush down" }),
            ("←↑↓→", "Move"),
            ("s", "Skip"),
            ("Esc", "Back"),
        ]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(2)])
            .split(area);

        let outer = centered(chunks[0], self.card.width() + 2, self.card.height() + 2);
        let block = card("Scratch me", palette);
        self.card_area = block.inner(outer);
        f.render_widget(block, outer);
        self.render_card(f, ctx);

        let status = if self.card.is_revealed() {
            Span::styled("♥ Revealed! Press Enter.", palette.accent())
        } else {
            Span::styled(format!("{:.0}% scratched", self.card.coverage()), palette.muted())
        };
        f.render_widget(prose(vec![Line::from(status)]), chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        if self.card.is_revealed() {
            return match StateManager::key_to_navigation(key) {
                NavigationAction::Select => {
                    ctx.cue(SoundCue::Click);
                    Outcome::Continue
                }
                _ => Outcome::Unhandled,
            };
        }
        if key.code == KeyCode::Char(' ') {
            self.brush_down = !self.brush_down;
            if self.brush_down {
                self.scratch_at(self.brush.0, self.brush.1, ctx);
            }
            return Outcome::Handled;
        }
        match StateManager::key_to_navigation(key) {
            NavigationAction::Up => self.move_brush(0, -1, ctx),
            NavigationAction::Down => self.move_brush(0, 1, ctx),
            NavigationAction::Left => self.move_brush(-1, 0, ctx),
            NavigationAction::Right => self.move_brush(1, 0, ctx),
            NavigationAction::Skip => {
                ctx.cue(SoundCue::Click);
                return Outcome::Skip;
            }
            _ => return Outcome::Unhandled,
        }
        Outcome::Handled
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &mut ScreenContext) -> Outcome {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                let Some((x, y)) = local_position(self.card_area, mouse.column, mouse.row) else {
                    return Outcome::Unhandled;
                };
                self.brush = (x, y);
                self.scratch_at(x, y, ctx);
                Outcome::Handled
            }
            _ => Outcome::Unhandled,
        }
    }
}
