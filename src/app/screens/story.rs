//! Static story pages
//!
//! The opening, the origin story, the early feelings and the confession are
//! all pages of text. Multi-page stories step with the arrow keys; Enter on
//! the last page moves on.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::content::{
    CONFESSION_CLOSING, CONFESSION_DATE, CONFESSION_LINES, EARLY_FEELINGS, ENTRY_SIGNATURE,
    ENTRY_TAGLINE, ORIGIN_STORY,
};
use crate::store::Intent;

/// One page; `{name}` in any line is replaced with the display name
#[derive(Debug, Clone)]
struct Page {
    heading: &'static str,
    lines: Vec<&'static str>,
    footer: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoryKind {
    Entry,
    Origin,
    EarlyFeelings,
    Confession,
}

#[derive(Debug)]
pub struct StoryScreen {
    kind: StoryKind,
    pages: Vec<Page>,
    page: usize,
}

impl StoryScreen {
    pub fn entry() -> Self {
        Self::with_pages(
            StoryKind::Entry,
            vec![Page {
                heading: "For {name}",
                lines: vec![ENTRY_TAGLINE, "♥", ENTRY_SIGNATURE],
                footer: None,
            }],
        )
    }

    pub fn origin() -> Self {
        Self::with_pages(
            StoryKind::Origin,
            vec![Page {
                heading: "How It Started",
                lines: ORIGIN_STORY.to_vec(),
                footer: None,
            }],
        )
    }

    pub fn early_feelings() -> Self {
        let pages = EARLY_FEELINGS
            .iter()
            .map(|&(heading, text)| Page {
                heading,
                lines: vec![text],
                footer: None,
            })
            .collect();
        Self::with_pages(StoryKind::EarlyFeelings, pages)
    }

    pub fn confession() -> Self {
        let mut lines = vec!["Dear {name},", ""];
        lines.extend(CONFESSION_LINES.iter().copied());
        lines.push("");
        lines.push(CONFESSION_CLOSING);
        Self::with_pages(
            StoryKind::Confession,
            vec![Page {
                heading: "A Confession",
                lines,
                footer: Some(CONFESSION_DATE),
            }],
        )
    }

    fn with_pages(kind: StoryKind, pages: Vec<Page>) -> Self {
        Self { kind, pages, page: 0 }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn is_last_page(&self) -> bool {
        self.page + 1 >= self.pages.len()
    }

    fn skippable(&self) -> bool {
        self.kind != StoryKind::Entry
    }
}

impl ScreenView for StoryScreen {
    fn title(&self) -> String {
        match self.kind {
            StoryKind::Entry => "Keepsake",
            StoryKind::Origin => "Origin",
            StoryKind::EarlyFeelings => "Early Feelings",
            StoryKind::Confession => "Confession",
        }
        .to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        let mut help = Vec::new();
        if self.pages.len() > 1 {
            help.push(("←→", "Page"));
        }
        help.push(("Enter", if self.kind == StoryKind::Entry { "Begin" } else { "Next" }));
        if self.skippable() {
            help.push(("s", "Skip"));
        }
        help.push(("Esc", "Back"));
        help
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let name = ctx.snapshot.display_name.as_str();
        let Some(page) = self.pages.get(self.page) else {
            return;
        };

        let heading = page.heading.replace("{name}", name);
        let mut lines = vec![Line::from(Span::styled(heading, palette.title())), Line::from("")];
        for line in &page.lines {
            lines.push(Line::from(Span::styled(line.replace("{name}", name), palette.body())));
        }
        if let Some(footer) = page.footer {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(footer, palette.accent())));
        }
        if self.pages.len() > 1 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} / {}", self.page + 1, self.pages.len()),
                palette.muted(),
            )));
        }

        let height = lines.len() as u16 + 4;
        let body = centered(area, 64, height.max(10));
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Right | NavigationAction::Next if !self.is_last_page() => {
                self.page += 1;
                ctx.cue(SoundCue::Pop);
                Outcome::Handled
            }
            NavigationAction::Left | NavigationAction::Previous if self.page > 0 => {
                self.page -= 1;
                Outcome::Handled
            }
            NavigationAction::Select => {
                if !self.is_last_page() {
                    self.page += 1;
                    ctx.cue(SoundCue::Pop);
                    return Outcome::Handled;
                }
                if self.kind == StoryKind::Entry {
                    ctx.dispatch(Intent::MarkIntroSeen);
                }
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            NavigationAction::Skip if self.skippable() => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
            }
            _ => Outcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;
    use crossterm::event::KeyCode;

    #[test]
    fn test_page_counts() {
        assert_eq!(StoryScreen::entry().page_count(), 1);
        assert_eq!(StoryScreen::early_feelings().page_count(), EARLY_FEELINGS.len());
        assert!(!StoryScreen::entry().skippable());
        assert!(StoryScreen::confession().skippable());
    }

    #[test]
    fn test_enter_pages_then_continues() {
        let mut harness = Harness::new();
        let mut screen = StoryScreen::early_feelings();
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Handled);
        assert_eq!(screen.page(), 1);
        assert_eq!(harness.press(&mut screen, KeyCode::Right), Outcome::Unhandled);
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Continue);
        assert_eq!(harness.press(&mut screen, KeyCode::Char('s')), Outcome::Skip);
    }

    #[test]
    fn test_entry_marks_intro_seen() {
        let mut harness = Harness::new();
        let mut screen = StoryScreen::entry();
        assert_eq!(harness.press(&mut screen, KeyCode::Char('s')), Outcome::Unhandled);
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Continue);
        assert!(harness.store.snapshot().intro_seen.is_some());
    }

    #[test]
    fn test_confession_addresses_by_name() {
        let screen = StoryScreen::confession();
        assert_eq!(screen.pages[0].lines[0], "Dear {name},");
        assert_eq!(screen.pages[0].footer, Some(CONFESSION_DATE));
    }
}
