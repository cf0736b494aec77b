//! Name entry

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::audio::SoundCue;
use crate::store::Intent;

const MAX_NAME_LEN: usize = 30;

#[derive(Debug, Default)]
pub struct PersonalizationScreen {
    input: String,
}

impl PersonalizationScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl ScreenView for PersonalizationScreen {
    fn title(&self) -> String {
        "What should I call you?".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![("Enter", "Continue"), ("Ctrl+S", "Skip"), ("Esc", "Back")]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let default_name = ctx.snapshot.display_name.as_str();
        let field = if self.input.is_empty() {
            Span::styled("Your name...", palette.muted())
        } else {
            Span::styled(format!("{}▏", self.input), palette.accent())
        };

        let lines = vec![
            Line::from(Span::styled("What should I call you?", palette.title())),
            Line::from(""),
            Line::from(Span::styled(
                "wife, Berryboo, poopypants, whatever your name is",
                Style::default().fg(palette.primary_light),
            )),
            Line::from(Span::styled(
                format!("(You can skip to continue as {})", default_name),
                palette.muted(),
            )),
            Line::from(""),
            Line::from(field),
        ];

        let body = centered(area, 60, 12);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
            }
            KeyCode::Char(c) if !ctrl => {
                if self.input.chars().count() < MAX_NAME_LEN {
                    self.input.push(c);
                }
                Outcome::Handled
            }
            KeyCode::Backspace => {
                self.input.pop();
                Outcome::Handled
            }
            KeyCode::Enter => {
                ctx.dispatch(Intent::SetDisplayName(self.input.clone()));
                ctx.cue(SoundCue::Kiss);
                Outcome::Continue
            }
            KeyCode::Esc => Outcome::Back,
            _ => Outcome::Unhandled,
        }
    }

    fn captures_text(&self) -> bool {
        true
    }
}
