//! Nickname carousel

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::NICKNAMES;

#[derive(Debug, Default)]
pub struct NicknameScreen {
    index: usize,
}

impl NicknameScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static str {
        NICKNAMES[self.index % NICKNAMES.len()]
    }

    fn step(&mut self, forward: bool) {
        let len = NICKNAMES.len();
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
    }
}

impl ScreenView for NicknameScreen {
    fn title(&self) -> String {
        "Things I Call You".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![("←→", "Browse"), ("Enter", "Continue"), ("Esc", "Back")]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let dots: String = (0..NICKNAMES.len())
            .map(|i| if i == self.index { '●' } else { '·' })
            .collect();
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("‹  {}  ›", self.current()), palette.title())),
            Line::from(""),
            Line::from(Span::styled(dots, palette.muted())),
        ];

        let body = centered(area, 48, 8);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Right | NavigationAction::Next => {
                self.step(true);
                ctx.cue(SoundCue::Pop);
                Outcome::Handled
            }
            NavigationAction::Left | NavigationAction::Previous => {
                self.step(false);
                ctx.cue(SoundCue::Pop);
                Outcome::Handled
            }
            NavigationAction::Select => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            _ => Outcome::Unhandled,
        }
    }
}
