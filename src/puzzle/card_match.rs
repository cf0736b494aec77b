//! Memory card game
//!
//! Photo cards are paired with caption cards. Two face-up cards are checked
//! only after a short delay so the player can see the second card.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Photo,
    Caption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub pair_id: usize,
    pub face: CardFace,
    pub content: String,
    pub flipped: bool,
    pub matched: bool,
}

/// Result of flipping a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of a pair is face up
    First,
    /// Second card is face up; the pair will be checked at the deadline
    Checking,
    Ignored,
}

/// Result of checking a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Matched,
    Mismatched,
}

#[derive(Debug, Clone)]
pub struct MemoryGame {
    cards: Vec<Card>,
    face_up: Vec<usize>,
    check_at: Option<Instant>,
    reveal_delay: Duration,
    matches: usize,
}

impl MemoryGame {
    /// Deal a shuffled board from `(photo, caption)` pairs
    pub fn new<R: Rng + ?Sized>(pairs: &[(&str, &str)], reveal_delay: Duration, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = pairs
            .iter()
            .enumerate()
            .flat_map(|(pair_id, (photo, caption))| {
                [
                    Card {
                        pair_id,
                        face: CardFace::Photo,
                        content: photo.to_string(),
                        flipped: false,
                        matched: false,
                    },
                    Card {
                        pair_id,
                        face: CardFace::Caption,
                        content: caption.to_string(),
                        flipped: false,
                        matched: false,
                    },
                ]
            })
            .collect();
        cards.shuffle(rng);

        Self {
            cards,
            face_up: Vec::with_capacity(2),
            check_at: None,
            reveal_delay,
            matches: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn is_checking(&self) -> bool {
        self.check_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.matches == self.pair_count()
    }

    pub fn flip(&mut self, index: usize, now: Instant) -> FlipOutcome {
        if self.is_checking() || self.face_up.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return FlipOutcome::Ignored;
        };
        if card.flipped || card.matched {
            return FlipOutcome::Ignored;
        }

        card.flipped = true;
        self.face_up.push(index);
        if self.face_up.len() == 2 {
            self.check_at = Some(now + self.reveal_delay);
            FlipOutcome::Checking
        } else {
            FlipOutcome::First
        }
    }

    /// Check the face-up pair once its deadline has passed
    pub fn resolve(&mut self, now: Instant) -> Option<PairOutcome> {
        match self.check_at {
            Some(at) if now >= at => {}
            _ => return None,
        }
        self.check_at = None;

        let pair: Vec<usize> = self.face_up.drain(..).collect();
        let (first, second) = (pair[0], pair[1]);
        if self.cards[first].pair_id == self.cards[second].pair_id {
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            self.matches += 1;
            info!(matches = self.matches, "cards matched");
            Some(PairOutcome::Matched)
        } else {
            self.cards[first].flipped = false;
            self.cards[second].flipped = false;
            Some(PairOutcome::Mismatched)
        }
    }
}
