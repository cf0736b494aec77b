//! Lock screen keypad

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::config::GiftConfig;
use crate::puzzle::{LockPad, PressOutcome};

/// How long a wrong code stays on screen
const WRONG_CODE_HOLD: Duration = Duration::from_millis(500);

const KEYPAD: [&str; 4] = ["1 2 3", "4 5 6", "7 8 9", "  0  "];

#[derive(Debug)]
pub struct LockScreen {
    pad: LockPad,
    clear_at: Option<Instant>,
}

impl LockScreen {
    pub fn new(config: &GiftConfig) -> Self {
        Self {
            pad: LockPad::new(config.lock.code.clone()),
            clear_at: None,
        }
    }

    pub fn pad(&self) -> &LockPad {
        &self.pad
    }

    fn press(&mut self, digit: char, ctx: &mut ScreenContext) {
        match self.pad.press(digit) {
            PressOutcome::Entered => ctx.cue(SoundCue::Click),
            PressOutcome::Unlocked => ctx.cue(SoundCue::Success),
            PressOutcome::Wrong => {
                ctx.cue(SoundCue::Pop);
                self.clear_at = Some(Instant::now() + WRONG_CODE_HOLD);
            }
            PressOutcome::Ignored => {}
        }
    }
}

impl ScreenView for LockScreen {
    fn title(&self) -> String {
        "Locked".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.pad.is_unlocked() {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        vec![("0-9", "Enter code"), ("Backspace", "Delete"), ("s", "Skip"), ("Esc", "Back")]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let dots: String = (0..self.pad.code_len())
            .map(|i| if i < self.pad.entered() { "● " } else { "○ " })
            .collect();
        let dots_style = if self.pad.is_wrong() {
            palette.muted().fg(palette.error)
        } else if self.pad.is_unlocked() {
            palette.muted().fg(palette.success)
        } else {
            palette.accent()
        };

        let prompt = if self.pad.is_unlocked() {
            Span::styled("Unlocked ♥ Press Enter.", palette.accent())
        } else if self.pad.is_wrong() {
            Span::styled("Not quite. Try again.", palette.muted().fg(palette.error))
        } else {
            Span::styled("Hint: the day it all began", palette.muted())
        };

        let mut lines = vec![
            Line::from(Span::styled("Enter the code", palette.title())),
            Line::from(""),
            Line::from(Span::styled(dots.trim_end().to_string(), dots_style)),
            Line::from(""),
        ];
        lines.extend(KEYPAD.iter().map(|row| Line::from(Span::styled(*row, palette.body()))));
        lines.push(Line::from(""));
        lines.push(Line::from(prompt));

        let body = centered(area, 40, lines.len() as u16 + 2);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.press(c, ctx);
                return Outcome::Handled;
            }
            KeyCode::Backspace if !self.pad.is_unlocked() => {
                self.pad.delete();
                return Outcome::Handled;
            }
            _ => {}
        }
        match StateManager::key_to_navigation(key) {
            NavigationAction::Select if self.pad.is_unlocked() => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            NavigationAction::Skip if !self.pad.is_unlocked() => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
            }
            _ => Outcome::Unhandled,
        }
    }

    fn on_tick(&mut self, now: Instant, _ctx: &mut ScreenContext) -> Outcome {
        if let Some(at) = self.clear_at {
            if now >= at {
                self.pad.clear_wrong();
                self.clear_at = None;
            }
        }
        Outcome::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;

    fn type_code(harness: &mut Harness, screen: &mut LockScreen, code: &str) {
        for c in code.chars() {
            harness.press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_correct_code_unlocks() {
        let mut harness = Harness::new();
        let mut screen = LockScreen::new(&harness.config);
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Unhandled);
        type_code(&mut harness, &mut screen, "0711");
        assert!(screen.pad().is_unlocked());
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Continue);
    }

    #[test]
    fn test_wrong_code_clears_after_hold() {
        let mut harness = Harness::new();
        let mut screen = LockScreen::new(&harness.config);
        type_code(&mut harness, &mut screen, "1234");
        assert!(screen.pad().is_wrong());

        harness.tick(&mut screen, Instant::now());
        assert!(screen.pad().is_wrong());

        harness.tick(&mut screen, Instant::now() + Duration::from_secs(1));
        assert!(!screen.pad().is_wrong());
        assert_eq!(screen.pad().entered(), 0);
    }

    #[test]
    fn test_backspace_deletes_instead_of_going_back() {
        let mut harness = Harness::new();
        let mut screen = LockScreen::new(&harness.config);
        type_code(&mut harness, &mut screen, "07");
        assert_eq!(harness.press(&mut screen, KeyCode::Backspace), Outcome::Handled);
        assert_eq!(screen.pad().entered(), 1);
        assert_eq!(harness.press(&mut screen, KeyCode::Char('s')), Outcome::Skip);
    }
}
