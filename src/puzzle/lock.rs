//! Lock screen keypad
//!
//! A fixed-length numeric code. A wrong code stays on screen (flagged) until
//! the wrong-code shake finishes and the caller clears it.

use tracing::{debug, info};

use super::matcher::check_solved;

/// Outcome of a keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Digit accepted, code not yet full
    Entered,
    /// Code full and correct
    Unlocked,
    /// Code full and wrong
    Wrong,
    /// Press ignored (lock open, code full, or not a digit)
    Ignored,
}

#[derive(Debug, Clone)]
pub struct LockPad {
    code: String,
    entry: String,
    unlocked: bool,
    wrong: bool,
}

impl LockPad {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            entry: String::new(),
            unlocked: false,
            wrong: false,
        }
    }

    pub fn code_len(&self) -> usize {
        self.code.chars().count()
    }

    pub fn entered(&self) -> usize {
        self.entry.chars().count()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_wrong(&self) -> bool {
        self.wrong
    }

    pub fn press(&mut self, digit: char) -> PressOutcome {
        if self.unlocked || self.wrong || !digit.is_ascii_digit() || self.entered() >= self.code_len() {
            return PressOutcome::Ignored;
        }
        self.entry.push(digit);
        if self.entered() < self.code_len() {
            return PressOutcome::Entered;
        }

        if check_solved(&self.entry, &self.code) {
            self.unlocked = true;
            info!("lock opened");
            PressOutcome::Unlocked
        } else {
            self.wrong = true;
            debug!("wrong lock code");
            PressOutcome::Wrong
        }
    }

    /// Remove the last digit
    pub fn delete(&mut self) -> bool {
        if self.unlocked || self.wrong {
            return false;
        }
        self.entry.pop().is_some()
    }

    /// Reset after a wrong attempt
    pub fn clear_wrong(&mut self) {
        if self.wrong {
            self.wrong = false;
            self.entry.clear();
        }
    }
}
