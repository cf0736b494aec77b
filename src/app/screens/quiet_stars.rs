//! The last stop: a quiet star field and a whispered track
//!
//! Always drawn on the dark palette, whatever the theme preference says.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::SmallRng;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::audio::{track_label, SoundCue};
use crate::content::WHISPER_TRACK;
use crate::theme::DARK;

const STAR_COUNT: usize = 100;
const TWINKLE_PERIOD: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy)]
struct Star {
    /// Position as a fraction of the area
    x: f32,
    y: f32,
    bright: bool,
    /// Offset into the twinkle cycle
    phase: Duration,
}

#[derive(Debug)]
pub struct QuietStarsScreen {
    stars: Vec<Star>,
    playing: bool,
    started: Instant,
    now: Instant,
}

impl QuietStarsScreen {
    pub fn new(rng: &mut SmallRng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                bright: rng.gen_bool(0.3),
                phase: Duration::from_millis(rng.gen_range(0..2000)),
            })
            .collect();
        let now = Instant::now();
        Self {
            stars,
            playing: false,
            started: now,
            now,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_lit(&self, star: &Star) -> bool {
        let elapsed = self.now.saturating_duration_since(self.started) + star.phase;
        let cycle = elapsed.as_millis() % TWINKLE_PERIOD.as_millis();
        star.bright || cycle < TWINKLE_PERIOD.as_millis() / 2
    }

    fn render_sky(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut rows = vec![vec![' '; usize::from(area.width)]; usize::from(area.height)];
        for star in &self.stars {
            let x = ((star.x * f32::from(area.width)) as usize).min(usize::from(area.width) - 1);
            let y = ((star.y * f32::from(area.height)) as usize).min(usize::from(area.height) - 1);
            rows[y][x] = if !self.is_lit(star) {
                '·'
            } else if star.bright {
                '✦'
            } else {
                '*'
            };
        }
        let lines: Vec<Line> = rows
            .into_iter()
            .map(|row| Line::from(row.into_iter().collect::<String>()))
            .collect();
        let sky = Paragraph::new(lines).style(Style::default().fg(DARK.text_secondary).bg(DARK.background));
        f.render_widget(sky, area);
    }
}

impl ScreenView for QuietStarsScreen {
    fn title(&self) -> String {
        "Quiet Stars".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Space", if self.playing { "Pause" } else { "Play" }),
            ("Esc", "Back"),
            ("q", "Quit"),
        ]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _ctx: &RenderContext) {
        f.render_widget(Block::default().style(Style::default().bg(DARK.background)), area);
        self.render_sky(f, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(9), Constraint::Min(1)])
            .split(area);
        let control = if self.playing { "❚❚ pause" } else { "▶ play" };
        let lines = vec![
            Line::from(Span::styled("volume up", Style::default().fg(DARK.text).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(WHISPER_TRACK.title, Style::default().fg(DARK.text_secondary))),
            Line::from(""),
            Line::from(Span::styled(control, Style::default().fg(DARK.primary_light))),
            Line::from(Span::styled(track_label(&WHISPER_TRACK), Style::default().fg(DARK.text_muted))),
            Line::from(""),
            Line::from(Span::styled("♥", Style::default().fg(DARK.primary))),
            Line::from(Span::styled("for you, always", Style::default().fg(DARK.text_muted))),
        ];
        f.render_widget(prose(lines), chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.playing = !self.playing;
                ctx.cue(SoundCue::Click);
                Outcome::Handled
            }
            _ => Outcome::Unhandled,
        }
    }

    fn on_tick(&mut self, now: Instant, _ctx: &mut ScreenContext) -> Outcome {
        self.now = now;
        Outcome::Handled
    }
}
