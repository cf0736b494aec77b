//! Fingerprint surprise
//!
//! One press starts the pulse; presses while it runs are ignored. The
//! message appears when the last pulse lands.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};
use tracing::info;

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::SURPRISE_MESSAGE;
use crate::gesture::{TickHandle, Ticker};

const PULSE_PERIOD: Duration = Duration::from_millis(200);
/// 25 pulses of 200 ms
const PULSES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Pulsing(u32),
    Done,
}

#[derive(Debug)]
pub struct SurpriseScreen {
    phase: Phase,
    ticker: Option<TickHandle>,
}

impl SurpriseScreen {
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            ticker: None,
        }
    }

    pub fn is_pulsing(&self) -> bool {
        matches!(self.phase, Phase::Pulsing(_))
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    fn start(&mut self, ctx: &mut ScreenContext) {
        self.phase = Phase::Pulsing(0);
        self.ticker = Some(Ticker::start(PULSE_PERIOD));
        ctx.cue(SoundCue::Kiss);
    }

    fn advance(&mut self, pulses: usize) {
        for _ in 0..pulses {
            if let Phase::Pulsing(n) = self.phase {
                self.phase = if n + 1 >= PULSES {
                    Phase::Done
                } else {
                    Phase::Pulsing(n + 1)
                };
            }
        }
        if self.is_done() && self.ticker.take().is_some() {
            info!("surprise revealed");
        }
    }
}

impl Default for SurpriseScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenView for SurpriseScreen {
    fn title(&self) -> String {
        "One More Thing".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        match self.phase {
            Phase::Waiting => vec![("Enter", "Touch"), ("Esc", "Back")],
            Phase::Pulsing(_) => vec![("Esc", "Back")],
            Phase::Done => vec![("Enter", "Continue"), ("Esc", "Back")],
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let lines = match self.phase {
            Phase::Waiting => vec![
                Line::from(Span::styled("Touch to feel the love...", palette.secondary_text())),
                Line::from(""),
                Line::from(Span::styled("( @ )", palette.title())),
            ],
            Phase::Pulsing(n) => {
                let heart = if n % 2 == 0 { "♥" } else { "♡" };
                vec![
                    Line::from(""),
                    Line::from(Span::styled(heart, palette.title())),
                    Line::from(""),
                    Line::from(Span::styled("♥".repeat(n as usize + 1), palette.accent())),
                ]
            }
            Phase::Done => vec![
                Line::from(Span::styled("♥", palette.title())),
                Line::from(""),
                Line::from(Span::styled(SURPRISE_MESSAGE, palette.body())),
            ],
        };

        let body = centered(area, 56, 10);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match (StateManager::key_to_navigation(key), self.phase) {
            (NavigationAction::Select, Phase::Waiting) => {
                self.start(ctx);
                Outcome::Handled
            }
            (NavigationAction::Select, Phase::Pulsing(_)) => Outcome::Handled,
            (NavigationAction::Select, Phase::Done) => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            _ => Outcome::Unhandled,
        }
    }

    fn on_tick(&mut self, _now: Instant, _ctx: &mut ScreenContext) -> Outcome {
        if let Some(ticker) = self.ticker.as_mut() {
            let pulses = ticker.drain();
            self.advance(pulses);
        }
        Outcome::Handled
    }
}
