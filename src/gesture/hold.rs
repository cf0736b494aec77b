//! Hold-to-reveal
//!
//! Progress grows by a fixed step on every tick while the key is held.
//! Terminals without key-release reporting only send repeats, so a hold
//! also ends when no repeat arrives within the release grace.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::ProgressAccumulator;
use crate::config::HoldConfig;

const FULL: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct HoldReveal {
    progress: ProgressAccumulator,
    step: f64,
    /// None when the terminal reports key release
    release_grace: Option<Duration>,
    last_press: Option<Instant>,
}

impl HoldReveal {
    pub fn new(config: &HoldConfig) -> Self {
        Self {
            progress: ProgressAccumulator::new(FULL, FULL),
            step: config.step_percent,
            release_grace: (!config.release_events).then_some(config.release_grace),
            last_press: None,
        }
    }

    /// Key down or key repeat. Returns true when a new hold begins.
    pub fn press(&mut self, now: Instant) -> bool {
        if self.progress.is_revealed() {
            return false;
        }
        let started = self.last_press.is_none();
        self.last_press = Some(now);
        if started {
            debug!("hold started");
        }
        started
    }

    /// Letting go before the end throws the progress away
    pub fn release(&mut self) {
        if self.last_press.take().is_some() && !self.progress.is_revealed() {
            debug!(progress = self.progress.value(), "hold released early");
            self.progress.reset();
        }
    }

    /// One timer tick. Returns true on the tick that reveals.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_press else {
            return false;
        };
        if let Some(grace) = self.release_grace {
            if now.saturating_duration_since(last) > grace {
                self.release();
                return false;
            }
        }
        let revealed = self.progress.advance(self.step);
        if revealed {
            self.last_press = None;
            info!("hold reveal complete");
        }
        revealed
    }

    pub fn is_holding(&self) -> bool {
        self.last_press.is_some()
    }

    /// Percent held, 0 to 100
    pub fn percent(&self) -> f64 {
        self.progress.value()
    }

    pub fn is_revealed(&self) -> bool {
        self.progress.is_revealed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold() -> HoldReveal {
        HoldReveal::new(&HoldConfig::default())
    }

    /// Press then tick `n` times, repeating the key every tick
    fn hold_for(reveal: &mut HoldReveal, start: Instant, ticks: u32) -> bool {
        let mut revealed = false;
        for i in 1..=ticks {
            let now = start + Duration::from_millis(100) * i;
            reveal.press(now);
            revealed |= reveal.tick(now);
        }
        revealed
    }

    #[test]
    fn test_full_hold_reveals() {
        let mut reveal = hold();
        let start = Instant::now();
        assert!(reveal.press(start));
        assert!(!hold_for(&mut reveal, start, 49));
        assert_eq!(reveal.percent(), 98.0);
        assert!(hold_for(&mut reveal, start + Duration::from_millis(4900), 1));
        assert!(reveal.is_revealed());
        assert!(!reveal.is_holding());
    }

    #[test]
    fn test_early_release_resets() {
        let mut reveal = hold();
        let start = Instant::now();
        reveal.press(start);
        hold_for(&mut reveal, start, 30);
        assert_eq!(reveal.percent(), 60.0);

        reveal.release();
        assert_eq!(reveal.percent(), 0.0);
        assert!(!reveal.is_revealed());
    }

    #[test]
    fn test_silence_past_grace_is_release() {
        let mut reveal = hold();
        let start = Instant::now();
        reveal.press(start);
        reveal.tick(start + Duration::from_millis(100));
        assert!(reveal.percent() > 0.0);

        assert!(!reveal.tick(start + Duration::from_millis(800)));
        assert!(!reveal.is_holding());
        assert_eq!(reveal.percent(), 0.0);
    }

    #[test]
    fn test_key_release_terminals_ignore_grace() {
        let config = HoldConfig {
            release_events: true,
            ..HoldConfig::default()
        };
        let mut reveal = HoldReveal::new(&config);
        let start = Instant::now();
        reveal.press(start);

        // no repeats during the keyboard's initial delay
        assert!(!reveal.tick(start + Duration::from_millis(700)));
        assert!(reveal.is_holding());
        assert_eq!(reveal.percent(), 2.0);

        reveal.release();
        assert_eq!(reveal.percent(), 0.0);
    }

    #[test]
    fn test_ticks_without_press_do_nothing() {
        let mut reveal = hold();
        assert!(!reveal.tick(Instant::now()));
        assert_eq!(reveal.percent(), 0.0);
    }

    #[test]
    fn test_input_after_reveal_ignored() {
        let mut reveal = hold();
        let start = Instant::now();
        reveal.press(start);
        hold_for(&mut reveal, start, 50);
        assert!(reveal.is_revealed());

        assert!(!reveal.press(start + Duration::from_secs(6)));
        assert!(!reveal.tick(start + Duration::from_secs(6)));
        reveal.release();
        assert_eq!(reveal.percent(), 100.0);
    }
}
