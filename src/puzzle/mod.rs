//! Puzzle logic
//!
//! Pure, synchronous checks for the puzzle screens. Nothing in here knows
//! about the terminal.

pub mod card_match;
pub mod crossword;
pub mod lock;
pub mod matcher;
pub mod word_search;

pub use card_match::{CardFace, FlipOutcome, MemoryGame, PairOutcome};
pub use crossword::{Crossword, Direction, EntrySpec};
pub use lock::{LockPad, PressOutcome};
pub use matcher::{check_solved, check_solved_either_way, FoundSet};
pub use word_search::{cells_in_line, Orientation, Placement, WordSearch};
