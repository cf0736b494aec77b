//! Celebration after the yes

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::{CELEBRATION_MEMORIES, SECRET_MESSAGE};

#[derive(Debug, Default)]
pub struct CelebrationScreen {
    secret_shown: bool,
}

impl CelebrationScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secret_shown(&self) -> bool {
        self.secret_shown
    }
}

impl ScreenView for CelebrationScreen {
    fn title(&self) -> String {
        "♥ ♥ ♥".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![("b", "Blue heart"), ("Enter", "Continue"), ("Esc", "Back")]
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let mut lines = vec![
            Line::from(Span::styled("♥", palette.title())),
            Line::from(Span::styled("You said YES!", palette.title())),
            Line::from(Span::styled(
                format!("I love you, {}", ctx.snapshot.display_name),
                palette.accent(),
            )),
            Line::from(""),
        ];
        lines.extend(
            CELEBRATION_MEMORIES
                .iter()
                .map(|memory| Line::from(Span::styled(format!("♡ {}", memory), palette.secondary_text()))),
        );
        lines.push(Line::from(""));
        if self.secret_shown {
            lines.push(Line::from(Span::styled(SECRET_MESSAGE, palette.accent())));
        } else {
            lines.push(Line::from(Span::styled("💙", palette.muted())));
        }

        let body = centered(area, 60, lines.len() as u16 + 2);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        if matches!(key.code, KeyCode::Char('b') | KeyCode::Char('B')) {
            self.secret_shown = !self.secret_shown;
            if self.secret_shown {
                ctx.cue(SoundCue::Magic);
            }
            return Outcome::Handled;
        }
        match StateManager::key_to_navigation(key) {
            NavigationAction::Select => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            _ => Outcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;

    #[test]
    fn test_secret_toggles() {
        let mut harness = Harness::new();
        let mut screen = CelebrationScreen::new();
        assert!(!screen.secret_shown());
        harness.press(&mut screen, KeyCode::Char('b'));
        assert!(screen.secret_shown());
        harness.press(&mut screen, KeyCode::Char('b'));
        assert!(!screen.secret_shown());
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Continue);
    }
}
