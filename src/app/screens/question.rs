//! The question

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
use crate::content::QUESTION_LINES;
use crate::gesture::{TickHandle, Ticker};

const BEAT: Duration = Duration::from_millis(100);
/// 1.5 s between lead-in lines, and before the question
const LINE_BEATS: u32 = 15;
/// The answer appears 800 ms after the question
const ANSWER_BEATS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Lines(usize),
    Question,
    Answer,
}

#[derive(Debug)]
pub struct QuestionScreen {
    stage: Stage,
    beats: u32,
    drumroll_played: bool,
    ticker: TickHandle,
}

impl QuestionScreen {
    pub fn new() -> Self {
        Self {
            stage: Stage::Lines(1),
            beats: 0,
            drumroll_played: false,
            ticker: Ticker::start(BEAT),
        }
    }

    pub fn lines_shown(&self) -> usize {
        match self.stage {
            Stage::Lines(n) => n,
            Stage::Question | Stage::Answer => QUESTION_LINES.len(),
        }
    }

    pub fn can_answer(&self) -> bool {
        self.stage == Stage::Answer
    }

    /// Skipping is offered only while the lead-in plays
    pub fn can_skip(&self) -> bool {
        self.stage < Stage::Question
    }

    fn advance(&mut self, beats: usize) {
        for _ in 0..beats {
            self.beats += 1;
            let (needed, next) = match self.stage {
                Stage::Lines(n) if n < QUESTION_LINES.len() => (LINE_BEATS, Stage::Lines(n + 1)),
                Stage::Lines(_) => (LINE_BEATS, Stage::Question),
                Stage::Question => (ANSWER_BEATS, Stage::Answer),
                Stage::Answer => return,
            };
            if self.beats >= needed {
                self.beats = 0;
                self.stage = next;
            }
        }
    }
}

impl Default for QuestionScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenView for QuestionScreen {
    fn title(&self) -> String {
        "One Question".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.can_answer() {
            vec![("y/Enter", "YES"), ("Esc", "Back")]
        } else if self.can_skip() {
            vec![("s", "Skip"), ("Esc", "Back")]
        } else {
            vec![("Esc", "Back")]
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let mut lines: Vec<Line> = QUESTION_LINES
            .iter()
            .take(self.lines_shown())
            .map(|line| Line::from(Span::styled(*line, palette.secondary_text())))
            .collect();

        if self.stage >= Stage::Question {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("♥", palette.title())));
            lines.push(Line::from(vec![
                Span::styled("Will you be my Valentine, ", palette.body()),
                Span::styled(ctx.snapshot.display_name.clone(), palette.title()),
                Span::styled("?", palette.body()),
            ]));
        }
        if self.can_answer() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("[ YES ♥ ]", palette.highlight())));
        }

        let body = centered(area, 60, 14);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        let action = StateManager::key_to_navigation(key);
        if action == NavigationAction::Skip && self.can_skip() {
            return Outcome::Skip;
        }
        let yes =
            matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) || action == NavigationAction::Select;
        if yes && self.can_answer() {
            ctx.cue(SoundCue::Complete);
            return Outcome::Continue;
        }
        Outcome::Unhandled
    }

    fn on_tick(&mut self, _now: Instant, ctx: &mut ScreenContext) -> Outcome {
        if !self.drumroll_played {
            self.drumroll_played = true;
            ctx.cue(SoundCue::Drumroll);
        }
        let beats = self.ticker.drain();
        self.advance(beats);
        Outcome::Handled
    }
}
