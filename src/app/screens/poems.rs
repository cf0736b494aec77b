//! Poems
//!
//! Lines appear one at a time. A poem counts as read a moment after its last
//! line lands; only then does Enter move to the next one.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::{Poem, POEMS};
use crate::gesture::{TickHandle, Ticker};

const BEAT: Duration = Duration::from_millis(100);
/// 800 ms per line
const LINE_BEATS: u32 = 8;
/// 500 ms after the last line
const SETTLE_BEATS: u32 = 5;

/// Timed reveal of one poem's lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LineReveal {
    shown: usize,
    beats: u32,
    complete: bool,
}

impl LineReveal {
    /// One beat for a poem of `total` lines. Returns true when a line appears.
    fn beat(&mut self, total: usize) -> bool {
        if self.complete {
            return false;
        }
        self.beats += 1;
        if self.shown < total {
            if self.beats >= LINE_BEATS {
                self.beats = 0;
                self.shown += 1;
                return true;
            }
        } else if self.beats >= SETTLE_BEATS {
            self.complete = true;
        }
        false
    }
}

#[derive(Debug)]
pub struct PoemsScreen {
    poem: usize,
    reveal: LineReveal,
    ticker: TickHandle,
}

impl PoemsScreen {
    pub fn new() -> Self {
        Self {
            poem: 0,
            reveal: LineReveal::default(),
            ticker: Ticker::start(BEAT),
        }
    }

    fn current(&self) -> &'static Poem {
        &POEMS[self.poem.min(POEMS.len() - 1)]
    }

    pub fn poem_index(&self) -> usize {
        self.poem
    }

    pub fn lines_shown(&self) -> usize {
        self.reveal.shown
    }

    pub fn is_complete(&self) -> bool {
        self.reveal.complete
    }

    /// Apply `beats` timer beats. Returns true if a line appeared.
    fn advance(&mut self, beats: usize) -> bool {
        let total = self.current().lines.len();
        let mut appeared = false;
        for _ in 0..beats {
            appeared |= self.reveal.beat(total);
        }
        appeared
    }
}

impl Default for PoemsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenView for PoemsScreen {
    fn title(&self) -> String {
        format!("Poems · {}/{}", self.poem + 1, POEMS.len())
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        let mut help = Vec::new();
        if self.reveal.complete {
            let label = if self.poem + 1 < POEMS.len() { "Next poem" } else { "Continue" };
            help.push(("Enter", label));
        }
        help.push(("s", "Skip"));
        help.push(("Esc", "Back"));
        help
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let poem = self.current();
        let mut lines = vec![
            Line::from(Span::styled(poem.title, palette.title())),
            Line::from(Span::styled(poem.mood, palette.muted())),
            Line::from(""),
        ];
        lines.extend(
            poem.lines
                .iter()
                .take(self.reveal.shown)
                .map(|line| Line::from(Span::styled(*line, palette.body()))),
        );
        if self.reveal.complete {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("♥", palette.accent())));
        }

        let body = centered(area, 60, poem.lines.len() as u16 + 8);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Select | NavigationAction::Right if self.reveal.complete => {
                ctx.cue(SoundCue::Click);
                if self.poem + 1 < POEMS.len() {
                    self.poem += 1;
                    self.reveal = LineReveal::default();
                    Outcome::Handled
                } else {
                    Outcome::Continue
                }
            }
            NavigationAction::Skip => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
            }
            _ => Outcome::Unhandled,
        }
    }

    fn on_tick(&mut self, _now: Instant, ctx: &mut ScreenContext) -> Outcome {
        let beats = self.ticker.drain();
        if self.advance(beats) {
            ctx.cue(SoundCue::Pop);
        }
        Outcome::Handled
    }
}
