//! Hold-to-reveal screen
//!
//! Space or Enter must stay down for the whole fill. Terminals with key
//! release reporting end the hold on key-up; others end it when repeats
//! stop arriving.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Gauge,
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::config::GiftConfig;
use crate::content::HOLD_MESSAGE;
use crate::gesture::{HoldReveal, TickHandle, Ticker};

#[derive(Debug)]
pub struct HoldScreen {
    hold: HoldReveal,
    ticker: TickHandle,
}

impl HoldScreen {
    pub fn new(config: &GiftConfig) -> Self {
        Self {
            hold: HoldReveal::new(&config.hold),
            ticker: Ticker::start(config.hold.tick_interval),
        }
    }

    pub fn hold(&self) -> &HoldReveal {
        &self.hold
    }

    /// Apply `ticks` timer ticks. Returns true if the card revealed.
    fn advance(&mut self, ticks: usize, now: Instant) -> bool {
        let mut revealed = false;
        for _ in 0..ticks {
            revealed |= self.hold.tick(now);
        }
        revealed
    }

    fn is_hold_key(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter)
    }
}

impl ScreenView for HoldScreen {
    fn title(&self) -> String {
        "Hold On".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.hold.is_revealed() {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        vec![("Hold Space", "Reveal"), ("s", "Skip"), ("Esc", "Back")]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let body = centered(area, 56, 14);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);

        if self.hold.is_revealed() {
            let lines = HOLD_MESSAGE
                .lines()
                .map(|line| Line::from(Span::styled(line, palette.body())))
                .collect();
            f.render_widget(prose(lines), inner);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(1)])
            .split(inner);
        let prompt = if self.hold.is_holding() {
            "Don't let go..."
        } else {
            "Press and hold"
        };
        f.render_widget(
            prose(vec![
                Line::from(""),
                Line::from(Span::styled("♥", palette.title())),
                Line::from(Span::styled(prompt, palette.secondary_text())),
            ]),
            chunks[0],
        );
        let gauge = Gauge::default()
            .gauge_style(palette.title())
            .percent(self.hold.percent().round().clamp(0.0, 100.0) as u16);
        f.render_widget(gauge, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        if !self.hold.is_revealed() && Self::is_hold_key(&key) {
            if self.hold.press(Instant::now()) {
                ctx.cue(SoundCue::Pop);
            }
            return Outcome::Handled;
        }
        match StateManager::key_to_navigation(key) {
            NavigationAction::Select if self.hold.is_revealed() => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            NavigationAction::Skip if !self.hold.is_revealed() => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
            }
            _ => Outcome::Unhandled,
        }
    }

    fn handle_release(&mut self, key: KeyEvent, _ctx: &mut ScreenContext) -> Outcome {
        if Self::is_hold_key(&key) {
            self.hold.release();
            return Outcome::Handled;
        }
        Outcome::Unhandled
    }

    fn on_tick(&mut self, now: Instant, ctx: &mut ScreenContext) -> Outcome {
        let ticks = self.ticker.drain();
        if self.advance(ticks, now) {
            ctx.cue(SoundCue::Magic);
        }
        Outcome::Handled
    }
}
