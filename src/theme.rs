//! Color palettes
//!
//! Rose and lavender on near-black by default, with a warm light variant.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub card: Color,
    pub primary: Color,
    pub primary_light: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Rgb(0x0D, 0x0D, 0x12),
    card: Color::Rgb(0x1A, 0x1A, 0x24),
    primary: Color::Rgb(0xE8, 0x63, 0x8F),
    primary_light: Color::Rgb(0xF4, 0xA5, 0xBD),
    secondary: Color::Rgb(0xA7, 0x8B, 0xFA),
    tertiary: Color::Rgb(0xFF, 0xD0, 0xE0),
    text: Color::Rgb(0xF0, 0xEB, 0xF4),
    text_secondary: Color::Rgb(0x9B, 0x9B, 0xAE),
    text_muted: Color::Rgb(0x6B, 0x6B, 0x7B),
    border: Color::Rgb(0x3A, 0x3A, 0x4A),
    success: Color::Rgb(0x4A, 0xDE, 0x80),
    error: Color::Rgb(0xF8, 0x71, 0x71),
    warning: Color::Rgb(0xFB, 0xBF, 0x24),
};

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(0xFF, 0xF8, 0xF5),
    card: Color::Rgb(0xFF, 0xFF, 0xFF),
    primary: Color::Rgb(0xE8, 0x63, 0x8F),
    primary_light: Color::Rgb(0xC7, 0x4B, 0x78),
    secondary: Color::Rgb(0x8B, 0x5C, 0xF6),
    tertiary: Color::Rgb(0xE8, 0x89, 0x9E),
    text: Color::Rgb(0x2D, 0x1F, 0x36),
    text_secondary: Color::Rgb(0x5A, 0x4A, 0x64),
    text_muted: Color::Rgb(0x8A, 0x7A, 0x94),
    border: Color::Rgb(0xF0, 0xE0, 0xE8),
    success: Color::Rgb(0x22, 0xC5, 0x5E),
    error: Color::Rgb(0xEF, 0x44, 0x44),
    warning: Color::Rgb(0xF5, 0x9E, 0x0B),
};

impl Palette {
    pub fn for_mode(dark_mode: bool) -> &'static Palette {
        if dark_mode {
            &DARK
        } else {
            &LIGHT
        }
    }

    /// Page background and default text
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn secondary_text(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.secondary).add_modifier(Modifier::BOLD)
    }

    pub fn key(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Selected item or cursor cell
    pub fn highlight(&self) -> Style {
        Style::default().fg(self.background).bg(self.primary)
    }

    /// Solved cells, found words, matched cards
    pub fn found(&self) -> Style {
        Style::default().fg(self.background).bg(self.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        assert_eq!(Palette::for_mode(true), &DARK);
        assert_eq!(Palette::for_mode(false), &LIGHT);
        assert_ne!(DARK.background, LIGHT.background);
        assert_eq!(DARK.primary, LIGHT.primary);
    }
}
