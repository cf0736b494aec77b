//! Love meter
//!
//! Slide it all the way up and it breaks: from then on it only shows 100.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Gauge,
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::LOVE_METER_MESSAGE;

const MAX: u16 = 100;
const STEP: u16 = 5;

#[derive(Debug, Default)]
pub struct LoveMeterScreen {
    value: u16,
    broken: bool,
}

impl LoveMeterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn slide(&mut self, up: bool, ctx: &mut ScreenContext) {
        if self.broken {
            return;
        }
        self.value = if up {
            (self.value + STEP).min(MAX)
        } else {
            self.value.saturating_sub(STEP)
        };
        if self.value == MAX {
            self.broken = true;
            ctx.cue(SoundCue::Magic);
        }
    }
}

impl ScreenView for LoveMeterScreen {
    fn title(&self) -> String {
        "Love Meter".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.broken {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        vec![("←→", "Slide"), ("s", "Skip"), ("Esc", "Back")]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let body = centered(area, 56, 14);
        let block = card("How much do I love you?", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Min(3)])
            .split(inner);

        let gauge = Gauge::default()
            .gauge_style(palette.title())
            .percent(self.value)
            .label(format!("{}%", self.value));
        f.render_widget(gauge, chunks[1]);

        let lines: Vec<Line> = if self.broken {
            LOVE_METER_MESSAGE
                .lines()
                .map(|line| Line::from(Span::styled(line, palette.accent())))
                .collect()
        } else {
            vec![Line::from(Span::styled("Slide it up", palette.muted()))]
        };
        f.render_widget(prose(lines), chunks[2]);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Right | NavigationAction::Up => {
                self.slide(true, ctx);
                Outcome::Handled
            }
            NavigationAction::Left | NavigationAction::Down => {
                self.slide(false, ctx);
                Outcome::Handled
            }
            NavigationAction::Select if self.broken => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            NavigationAction::Skip if !self.broken => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
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
    fn test_full_slide_breaks_and_pins() {
        let mut harness = Harness::new();
        let mut screen = LoveMeterScreen::new();
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Unhandled);
        for _ in 0..(MAX / STEP) {
            harness.press(&mut screen, KeyCode::Right);
        }
        assert!(screen.is_broken());

        harness.press(&mut screen, KeyCode::Left);
        assert_eq!(screen.value(), MAX);
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Continue);
    }

    #[test]
    fn test_slide_down_floors_at_zero() {
        let mut harness = Harness::new();
        let mut screen = LoveMeterScreen::new();
        harness.press(&mut screen, KeyCode::Right);
        harness.press(&mut screen, KeyCode::Left);
        harness.press(&mut screen, KeyCode::Left);
        assert_eq!(screen.value(), 0);
        assert!(!screen.is_broken());
    }
}
