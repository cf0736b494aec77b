//! Shake-to-reveal screen
//!
//! A terminal has no accelerometer, so this normally runs on the manual
//! control: every Space press is one shake.

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{card, centered, prose, Outcome, RenderContext, ScreenContext, ScreenView};
use crate::app::state::{NavigationAction, StateManager};
use crate::audio::SoundCue;
use crate::config::GiftConfig;
use crate::content::SHAKE_MESSAGE;
use crate::gesture::{MotionSensor, NoMotionSensor, ShakeDetector, ShakeSource};

#[derive(Debug)]
pub struct ShakeScreen {
    detector: ShakeDetector,
}

impl ShakeScreen {
    pub fn new(config: &GiftConfig) -> Self {
        Self::with_sensor(config, Box::new(NoMotionSensor))
    }

    pub fn with_sensor(config: &GiftConfig, sensor: Box<dyn MotionSensor>) -> Self {
        let mut detector = ShakeDetector::new(&config.shake);
        detector.attach(sensor);
        Self { detector }
    }

    pub fn detector(&self) -> &ShakeDetector {
        &self.detector
    }
}

impl ScreenView for ShakeScreen {
    fn title(&self) -> String {
        "Shake It".to_string()
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        if self.detector.is_revealed() {
            return vec![("Enter", "Continue"), ("Esc", "Back")];
        }
        let mut help = Vec::new();
        if self.detector.source() == ShakeSource::Manual {
            help.push(("Space", "Shake"));
        }
        help.push(("s", "Skip"));
        help.push(("Esc", "Back"));
        help
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = ctx.palette;
        let lines = if self.detector.is_revealed() {
            vec![
                Line::from(Span::styled("♥ ♥ ♥", palette.title())),
                Line::from(""),
                Line::from(Span::styled(SHAKE_MESSAGE, palette.body())),
            ]
        } else {
            let hint = match self.detector.source() {
                ShakeSource::Sensor => "Shake your device",
                ShakeSource::Manual => "Tap Space to shake",
            };
            let hearts: String = (0..self.detector.required())
                .map(|i| if i < self.detector.shakes() { "♥ " } else { "♡ " })
                .collect();
            vec![
                Line::from(Span::styled(hint, palette.secondary_text())),
                Line::from(""),
                Line::from(Span::styled(hearts.trim_end().to_string(), palette.title())),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} / {}", self.detector.shakes(), self.detector.required()),
                    palette.muted(),
                )),
            ]
        };

        let body = centered(area, 56, 10);
        let block = card("", palette);
        let inner = block.inner(body);
        f.render_widget(block, body);
        f.render_widget(prose(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Outcome {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Select if self.detector.is_revealed() => {
                ctx.cue(SoundCue::Click);
                Outcome::Continue
            }
            NavigationAction::Select if self.detector.source() == ShakeSource::Manual => {
                if self.detector.manual_shake() {
                    ctx.cue(SoundCue::Magic);
                } else {
                    ctx.cue(SoundCue::Pop);
                }
                Outcome::Handled
            }
            NavigationAction::Skip if !self.detector.is_revealed() => {
                ctx.cue(SoundCue::Click);
                Outcome::Skip
            }
            _ => Outcome::Unhandled,
        }
    }

    fn on_tick(&mut self, now: Instant, ctx: &mut ScreenContext) -> Outcome {
        if self.detector.poll_sensor(now) {
            ctx.cue(SoundCue::Magic);
        }
        Outcome::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::Harness;
    use crate::gesture::MotionSample;
    use crate::Result;
    use crossterm::event::KeyCode;
    use std::time::Duration;

    struct Spikes(Vec<MotionSample>);

    impl MotionSensor for Spikes {
        fn name(&self) -> &str {
            "spikes"
        }

        fn start(&mut self) -> Result<()> {
            Ok(())
        }

        fn poll(&mut self) -> Option<MotionSample> {
            self.0.pop()
        }
    }

    #[test]
    fn test_manual_fallback_reveals_after_three_presses() {
        let mut harness = Harness::new();
        let mut screen = ShakeScreen::new(&harness.config);
        assert_eq!(screen.detector().source(), ShakeSource::Manual);

        for _ in 0..3 {
            assert_eq!(harness.press(&mut screen, KeyCode::Char(' ')), Outcome::Handled);
        }
        assert!(screen.detector().is_revealed());
        assert_eq!(harness.press(&mut screen, KeyCode::Enter), Outcome::Continue);
    }

    #[test]
    fn test_sensor_samples_drained_on_tick() {
        let mut harness = Harness::new();
        let strong = MotionSample::new(2.0, 0.0, 0.0);
        let sensor = Spikes(vec![strong; 3]);
        let mut screen = ShakeScreen::with_sensor(&harness.config, Box::new(sensor));
        assert_eq!(screen.detector().source(), ShakeSource::Sensor);

        // all three arrive in one poll, so they coalesce into one shake
        let now = Instant::now();
        harness.tick(&mut screen, now);
        assert_eq!(screen.detector().shakes(), 1);
        assert!(!screen.detector().is_revealed());
        harness.tick(&mut screen, now + Duration::from_secs(1));
        assert_eq!(screen.detector().shakes(), 1);
    }
}
