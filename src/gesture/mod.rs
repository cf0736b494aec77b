//! Gesture-driven reveals
//!
//! Hold, shake and scratch screens all turn a stream of raw input into a
//! bounded progress value. Crossing the threshold is a one-way transition
//! into the revealed state; input after that is ignored.

pub mod hold;
pub mod scratch;
pub mod shake;
pub mod ticker;

pub use hold::HoldReveal;
pub use scratch::ScratchCard;
pub use shake::{MotionSample, MotionSensor, NoMotionSensor, ShakeDetector, ShakeSource};
pub use ticker::{TickHandle, Ticker};

/// Whether hidden content is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Locked,
    Revealed,
}

/// Bounded progress counter with a one-shot reveal
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressAccumulator {
    value: f64,
    max: f64,
    threshold: f64,
    state: RevealState,
}

impl ProgressAccumulator {
    /// `threshold` is clamped into `[0, max]`
    pub fn new(max: f64, threshold: f64) -> Self {
        Self {
            value: 0.0,
            max,
            threshold: threshold.clamp(0.0, max),
            state: RevealState::Locked,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Progress as a fraction of `max`
    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.value / self.max
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// Add `step` (negative steps are ignored). Returns true exactly once,
    /// on the call that crosses the threshold.
    pub fn advance(&mut self, step: f64) -> bool {
        if self.is_revealed() || step <= 0.0 {
            return false;
        }
        self.value = (self.value + step).clamp(0.0, self.max);
        self.check_threshold()
    }

    /// Raise progress to an absolute value; never lowers it.
    pub fn raise_to(&mut self, value: f64) -> bool {
        if self.is_revealed() || value <= self.value {
            return false;
        }
        self.value = value.clamp(0.0, self.max);
        self.check_threshold()
    }

    /// Back to zero, only while still locked
    pub fn reset(&mut self) {
        if !self.is_revealed() {
            self.value = 0.0;
        }
    }

    fn check_threshold(&mut self) -> bool {
        if self.value >= self.threshold {
            self.state = RevealState::Revealed;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_clamps_and_reveals_once() {
        let mut acc = ProgressAccumulator::new(3.0, 3.0);
        assert!(!acc.advance(1.0));
        assert!(!acc.advance(1.0));
        assert!(acc.advance(5.0));
        assert_eq!(acc.value(), 3.0);
        assert!(acc.is_revealed());

        assert!(!acc.advance(1.0));
        assert_eq!(acc.value(), 3.0);
    }

    #[test]
    fn test_monotonic_without_reset() {
        let mut acc = ProgressAccumulator::new(100.0, 100.0);
        let mut last = 0.0;
        for _ in 0..20 {
            acc.advance(2.0);
            assert!(acc.value() >= last);
            last = acc.value();
        }
        assert!(!acc.advance(-10.0));
        assert_eq!(acc.value(), last);
        assert!(!acc.raise_to(1.0));
        assert_eq!(acc.value(), last);
    }

    #[test]
    fn test_reset_only_before_reveal() {
        let mut acc = ProgressAccumulator::new(100.0, 40.0);
        acc.advance(30.0);
        acc.reset();
        assert_eq!(acc.value(), 0.0);

        acc.raise_to(41.0);
        assert!(acc.is_revealed());
        acc.reset();
        assert_eq!(acc.value(), 41.0);
    }
}
