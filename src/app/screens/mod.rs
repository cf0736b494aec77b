//! TUI screen components
//!
//! Every stop on the journey is a `ScreenView`. The app builds a fresh
//! view on each transition and drops it on the way out, which also stops
//! any ticker the view owns.

use std::time::Instant;

use crossterm::event::{KeyEvent, MouseEvent};
use rand::rngs::SmallRng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::state::Screen;
use crate::audio::{track_at, track_label, SoundBoard, SoundCue};
use crate::config::GiftConfig;
use crate::store::{AppSnapshot, AppStore, Intent};
use crate::theme::Palette;
use crate::Result;

pub mod card_match;
pub mod celebration;
pub mod crossword;
pub mod hold;
pub mod lock;
pub mod love_meter;
pub mod memories;
pub mod nicknames;
pub mod personalization;
pub mod poems;
pub mod question;
pub mod quiet_stars;
pub mod scratch;
pub mod shake;
pub mod story;
pub mod surprise;
pub mod word_hunt;

pub use card_match::CardMatchScreen;
pub use celebration::CelebrationScreen;
pub use crossword::CrosswordScreen;
pub use hold::HoldScreen;
pub use lock::LockScreen;
pub use love_meter::LoveMeterScreen;
pub use memories::MemoriesScreen;
pub use nicknames::NicknameScreen;
pub use personalization::PersonalizationScreen;
pub use poems::PoemsScreen;
pub use question::QuestionScreen;
pub use quiet_stars::QuietStarsScreen;
pub use scratch::ScratchScreen;
pub use shake::ShakeScreen;
pub use story::StoryScreen;
pub use surprise::SurpriseScreen;
pub use word_hunt::WordHuntScreen;

/// What the app should do after a screen handled input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input consumed, stay here
    Handled,
    /// Not for this screen; fall back to the common key bindings
    Unhandled,
    /// Finished, follow the continue edge
    Continue,
    /// Follow the skip edge
    Skip,
    Back,
    Quit,
}

/// Handles a screen gets for the shared state while handling input
pub struct ScreenContext<'a> {
    store: &'a AppStore,
    sounds: &'a mut SoundBoard,
    config: &'a GiftConfig,
}

impl<'a> ScreenContext<'a> {
    pub fn new(store: &'a AppStore, sounds: &'a mut SoundBoard, config: &'a GiftConfig) -> Self {
        Self { store, sounds, config }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.store.snapshot()
    }

    pub fn config(&self) -> &GiftConfig {
        self.config
    }

    pub fn dispatch(&mut self, intent: Intent) -> AppSnapshot {
        let snapshot = self.store.dispatch(intent);
        self.sounds.set_muted(snapshot.muted);
        snapshot
    }

    pub fn cue(&mut self, cue: SoundCue) {
        self.sounds.play(cue);
    }
}

/// Read-only view of the shared state while drawing
pub struct RenderContext<'a> {
    pub palette: &'static Palette,
    pub snapshot: &'a AppSnapshot,
}

pub trait ScreenView {
    fn title(&self) -> String;

    /// Key bindings shown in the footer
    fn help(&self) -> Vec<(&'static str, &'static str)>;

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome;

    /// Key-up, on terminals that report it
    fn handle_release(&mut self, _key: KeyEvent, _ctx: &mut ScreenContext) -> Outcome {
        Outcome::Unhandled
    }

    fn handle_mouse(&mut self, _mouse: MouseEvent, _ctx: &mut ScreenContext) -> Outcome {
        Outcome::Unhandled
    }

    /// Called once per loop iteration; timers are drained here
    fn on_tick(&mut self, _now: Instant, _ctx: &mut ScreenContext) -> Outcome {
        Outcome::Handled
    }

    /// While true the screen receives every key, global shortcuts included
    fn captures_text(&self) -> bool {
        false
    }
}

/// Build the view for `screen`. Must run inside the tokio runtime, since
/// timed screens start their tickers immediately.
pub fn build(screen: Screen, config: &GiftConfig, rng: &mut SmallRng) -> Result<Box<dyn ScreenView>> {
    let view: Box<dyn ScreenView> = match screen {
        Screen::Entry => Box::new(StoryScreen::entry()),
        Screen::Personalization => Box::new(PersonalizationScreen::new()),
        Screen::Origin => Box::new(StoryScreen::origin()),
        Screen::EarlyFeelings => Box::new(StoryScreen::early_feelings()),
        Screen::Memories => Box::new(MemoriesScreen::new()),
        Screen::WordHunt => Box::new(WordHuntScreen::new(rng)?),
        Screen::Crossword => Box::new(CrosswordScreen::new()?),
        Screen::CardMatch => Box::new(CardMatchScreen::new(config, rng)),
        Screen::ScratchCard => Box::new(ScratchScreen::new(config, rng)),
        Screen::LockScreen => Box::new(LockScreen::new(config)),
        Screen::LoveMeter => Box::new(LoveMeterScreen::new()),
        Screen::HoldReveal => Box::new(HoldScreen::new(config)),
        Screen::ShakeReveal => Box::new(ShakeScreen::new(config)),
        Screen::NicknameCarousel => Box::new(NicknameScreen::new()),
        Screen::Poems => Box::new(PoemsScreen::new()),
        Screen::Confession => Box::new(StoryScreen::confession()),
        Screen::Question => Box::new(QuestionScreen::new()),
        Screen::Celebration => Box::new(CelebrationScreen::new()),
        Screen::Surprise => Box::new(SurpriseScreen::new()),
        Screen::QuietStars => Box::new(QuietStarsScreen::new(rng)),
    };
    Ok(view)
}

/// Draw the shared header and footer around `view`
pub fn render_page(f: &mut Frame, view: &mut dyn ScreenView, step: usize, ctx: &RenderContext) {
    let palette = ctx.palette;
    let size = f.size();
    f.render_widget(Block::default().style(palette.base()), size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and now playing
            Constraint::Min(8),    // Screen body
            Constraint::Length(3), // Help text
        ])
        .split(size);

    render_header(f, chunks[0], &view.title(), step, ctx);
    view.render(f, chunks[1], ctx);
    render_help(f, chunks[2], &view.help(), !view.captures_text(), palette);
}

fn render_header(f: &mut Frame, area: Rect, title: &str, step: usize, ctx: &RenderContext) {
    let palette = ctx.palette;
    let snapshot = ctx.snapshot;
    let music = if snapshot.muted {
        "muted".to_string()
    } else {
        format!("♪ {}", track_label(track_at(snapshot.track_index)))
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", title), palette.title()),
        Span::styled(format!("  {}/{}  ", step, Screen::ALL.len()), palette.muted()),
        Span::styled(music, palette.secondary_text()),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style()),
    );
    f.render_widget(header, area);
}

fn render_help(
    f: &mut Frame,
    area: Rect,
    bindings: &[(&'static str, &'static str)],
    with_globals: bool,
    palette: &Palette,
) {
    // typing screens swallow the global letters
    let global: &[(&str, &str)] = if with_globals {
        &[("m", "Mute"), ("t", "Theme"), ("[ ]", "Track")]
    } else {
        &[]
    };
    let mut spans = Vec::new();
    for (key, label) in bindings.iter().chain(global.iter()) {
        spans.push(Span::styled(*key, palette.key()));
        spans.push(Span::styled(format!(" {}  ", label), palette.secondary_text()));
    }

    let help = Paragraph::new(Line::from(spans)).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style()),
    );
    f.render_widget(help, area);
}

/// Bordered card used for most screen bodies
pub fn card<'a>(title: &str, palette: &Palette) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.card));
    if title.is_empty() {
        block
    } else {
        block.title(Span::styled(format!(" {} ", title), palette.title()))
    }
}

/// Centered, wrapped paragraph
pub fn prose<'a>(lines: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

/// A `width` x `height` rect centered in `area`, clipped to it
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Position of a terminal cell relative to `area`, if inside it
pub fn local_position(area: Rect, column: u16, row: u16) -> Option<(u16, u16)> {
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    inside.then(|| (column - area.x, row - area.y))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(10, 5, 40, 10);
        assert_eq!(centered(area, 20, 4), Rect::new(20, 8, 20, 4));
        assert_eq!(centered(area, 100, 100), area);
    }

    #[test]
    fn test_local_position() {
        let area = Rect::new(2, 3, 4, 2);
        assert_eq!(local_position(area, 2, 3), Some((0, 0)));
        assert_eq!(local_position(area, 5, 4), Some((3, 1)));
        assert_eq!(local_position(area, 6, 4), None);
        assert_eq!(local_position(area, 1, 3), None);
    }
}
