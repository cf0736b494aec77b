//! Scratch card
//!
//! The card is split into brush-sized buckets. Coverage is the share of
//! buckets touched at least once, and the card reveals once coverage is
//! strictly above the configured percent.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::ProgressAccumulator;
use crate::config::ScratchConfig;
use crate::content::LOVE_MESSAGES;

#[derive(Debug, Clone)]
pub struct ScratchCard {
    width: u16,
    height: u16,
    brush: (u16, u16),
    scratched: HashSet<(u16, u16)>,
    progress: ProgressAccumulator,
    message: String,
}

impl ScratchCard {
    pub fn new(config: &ScratchConfig, message: impl Into<String>) -> Self {
        let brush_w = config.brush_width.max(1);
        let brush_h = config.brush_height.max(1);
        let columns = config.width.div_ceil(brush_w);
        let rows = config.height.div_ceil(brush_h);
        let total = f64::from(columns) * f64::from(rows);
        // one bucket past the percent, so coverage must exceed it
        let needed = (total * config.reveal_percent / 100.0).floor() + 1.0;

        Self {
            width: config.width,
            height: config.height,
            brush: (brush_w, brush_h),
            scratched: HashSet::new(),
            progress: ProgressAccumulator::new(total, needed),
            message: message.into(),
        }
    }

    /// Hide one of the love messages under the foil
    pub fn with_random_message<R: Rng + ?Sized>(config: &ScratchConfig, rng: &mut R) -> Self {
        let message = LOVE_MESSAGES.choose(rng).copied().unwrap_or_default();
        Self::new(config, message)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Scratch at card-local cell `(x, y)`. Returns true on the stroke
    /// that reveals the card.
    pub fn scratch(&mut self, x: u16, y: u16) -> bool {
        if self.progress.is_revealed() || x >= self.width || y >= self.height {
            return false;
        }
        let bucket = self.bucket_of(x, y);
        if !self.scratched.insert(bucket) {
            return false;
        }
        let revealed = self.progress.advance(1.0);
        debug!(coverage = self.coverage(), "scratched");
        if revealed {
            info!("scratch card revealed");
        }
        revealed
    }

    /// Percent of the card scratched
    pub fn coverage(&self) -> f64 {
        self.progress.ratio() * 100.0
    }

    /// Whether the foil over `(x, y)` is gone
    pub fn is_scratched(&self, x: u16, y: u16) -> bool {
        self.progress.is_revealed() || self.scratched.contains(&self.bucket_of(x, y))
    }

    pub fn is_revealed(&self) -> bool {
        self.progress.is_revealed()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn bucket_of(&self, x: u16, y: u16) -> (u16, u16) {
        (x / self.brush.0, y / self.brush.1)
    }
}
