//! Word search grid
//!
//! Target words are laid out from a placement table, the remaining cells are
//! filled with random letters. A selection is a straight line between two
//! cells and may be dragged in either direction.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::matcher::{check_solved_either_way, FoundSet};
use crate::{KeepsakeError, Result};

pub type Pos = (usize, usize);

/// Direction a word runs in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Down and to the right
    Diagonal,
}

/// Where one target word sits in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub word: &'static str,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Placement {
    pub fn cells(&self) -> Vec<Pos> {
        (0..self.word.chars().count())
            .map(|i| match self.orientation {
                Orientation::Horizontal => (self.row, self.col + i),
                Orientation::Vertical => (self.row + i, self.col),
                Orientation::Diagonal => (self.row + i, self.col + i),
            })
            .collect()
    }
}

/// Cells on the straight line from `start` to `end`, inclusive.
///
/// Only horizontal, vertical and 45-degree lines are allowed; anything else
/// collapses to the start cell. Cells outside a `size` grid are dropped.
pub fn cells_in_line(start: Pos, end: Pos, size: usize) -> Vec<Pos> {
    let row_diff = end.0 as isize - start.0 as isize;
    let col_diff = end.1 as isize - start.1 as isize;
    let steps = row_diff.abs().max(col_diff.abs());

    if steps == 0 || (row_diff != 0 && col_diff != 0 && row_diff.abs() != col_diff.abs()) {
        return vec![start];
    }

    let row_step = row_diff.signum();
    let col_step = col_diff.signum();

    (0..=steps)
        .filter_map(|i| {
            let row = start.0 as isize + i * row_step;
            let col = start.1 as isize + i * col_step;
            if row >= 0 && col >= 0 && (row as usize) < size && (col as usize) < size {
                Some((row as usize, col as usize))
            } else {
                None
            }
        })
        .collect()
}

/// Word search state for one visit to the screen
#[derive(Debug, Clone)]
pub struct WordSearch {
    size: usize,
    grid: Vec<Vec<char>>,
    words: Vec<&'static str>,
    found: FoundSet<&'static str>,
    highlighted: HashSet<Pos>,
    anchor: Option<Pos>,
    selection: Vec<Pos>,
}

impl WordSearch {
    /// Lay out the placements and fill the gaps from `seed`
    pub fn new(size: usize, placements: &[Placement], seed: u64) -> Result<Self> {
        let mut slots: Vec<Vec<Option<char>>> = vec![vec![None; size]; size];

        for placement in placements {
            for ((row, col), letter) in placement.cells().into_iter().zip(placement.word.chars()) {
                if row >= size || col >= size {
                    return Err(KeepsakeError::Content(format!(
                        "word {} runs off the grid",
                        placement.word
                    )));
                }
                let letter = letter.to_ascii_uppercase();
                match slots[row][col] {
                    Some(existing) if existing != letter => {
                        return Err(KeepsakeError::Content(format!(
                            "words overlap at ({}, {}): {} vs {}",
                            row, col, existing, letter
                        )));
                    }
                    _ => slots[row][col] = Some(letter),
                }
            }
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = slots
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|slot| slot.unwrap_or_else(|| (b'A' + rng.gen_range(0..26u8)) as char))
                    .collect()
            })
            .collect();

        let words: Vec<&'static str> = placements.iter().map(|p| p.word).collect();
        Ok(Self {
            size,
            grid,
            found: FoundSet::new(words.len()),
            words,
            highlighted: HashSet::new(),
            anchor: None,
            selection: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn letter(&self, pos: Pos) -> Option<char> {
        self.grid.get(pos.0).and_then(|r| r.get(pos.1)).copied()
    }

    pub fn words(&self) -> &[&'static str] {
        &self.words
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.words
            .iter()
            .any(|w| *w == word && self.found.contains(w))
    }

    pub fn found_count(&self) -> usize {
        self.found.count()
    }

    pub fn is_complete(&self) -> bool {
        self.found.is_complete()
    }

    pub fn is_highlighted(&self, pos: Pos) -> bool {
        self.highlighted.contains(&pos)
    }

    pub fn selection(&self) -> &[Pos] {
        &self.selection
    }

    pub fn is_selecting(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start a selection at a cell
    pub fn begin(&mut self, pos: Pos) {
        if pos.0 >= self.size || pos.1 >= self.size {
            return;
        }
        self.anchor = Some(pos);
        self.selection = vec![pos];
    }

    /// Drag the selection to a cell. Returns true when the selection changed.
    pub fn extend(&mut self, pos: Pos) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        if pos.0 >= self.size || pos.1 >= self.size {
            return false;
        }
        let cells = cells_in_line(anchor, pos, self.size);
        if cells == self.selection {
            return false;
        }
        self.selection = cells;
        true
    }

    /// End the selection and check it. Returns the word found, if any.
    pub fn finish(&mut self) -> Option<&'static str> {
        let cells = std::mem::take(&mut self.selection);
        self.anchor = None;
        if cells.len() < 2 {
            return None;
        }
        self.check_selection(&cells)
    }

    /// Drop an in-progress selection without checking it
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.selection.clear();
    }

    /// Match a run of cells against the words not yet found
    pub fn check_selection(&mut self, cells: &[Pos]) -> Option<&'static str> {
        let selected: String = cells.iter().filter_map(|p| self.letter(*p)).collect();
        debug!(selected = %selected, "word search selection");

        let word = self
            .words
            .iter()
            .copied()
            .find(|w| !self.found.contains(w) && check_solved_either_way(&selected, w))?;

        self.found.mark(word);
        self.highlighted.extend(cells.iter().copied());
        info!(word, found = self.found.count(), total = self.found.total(), "word found");
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{WORD_SEARCH_PLACEMENTS, WORD_SEARCH_SIZE};

    fn board() -> WordSearch {
        WordSearch::new(WORD_SEARCH_SIZE, WORD_SEARCH_PLACEMENTS, 7).unwrap()
    }

    #[test]
    fn test_placements_are_consistent() {
        let ws = board();
        assert_eq!(ws.words().len(), 14);
        assert_eq!(ws.letter((0, 0)), Some('H'));
        assert_eq!(ws.letter((3, 1)), Some('S'));
        assert_eq!(ws.letter((7, 9)), Some('E'));
    }

    #[test]
    fn test_overlapping_placements_rejected() {
        let bad = [
            Placement { word: "HEART", row: 0, col: 0, orientation: Orientation::Vertical },
            Placement { word: "SOUL", row: 3, col: 0, orientation: Orientation::Horizontal },
        ];
        assert!(WordSearch::new(5, &bad, 1).is_err());

        let off_grid = [Placement { word: "LONG", row: 0, col: 3, orientation: Orientation::Horizontal }];
        assert!(WordSearch::new(5, &off_grid, 1).is_err());
    }

    #[test]
    fn test_line_shapes() {
        assert_eq!(cells_in_line((0, 0), (0, 3), 15), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(cells_in_line((3, 0), (0, 0), 15), vec![(3, 0), (2, 0), (1, 0), (0, 0)]);
        assert_eq!(cells_in_line((0, 0), (2, 2), 15), vec![(0, 0), (1, 1), (2, 2)]);
        // knight's move is not a line
        assert_eq!(cells_in_line((0, 0), (1, 2), 15), vec![(0, 0)]);
        assert_eq!(cells_in_line((4, 4), (4, 4), 15), vec![(4, 4)]);
    }

    #[test]
    fn test_forward_selection_finds_word() {
        let mut ws = board();
        ws.begin((0, 0));
        assert!(ws.extend((4, 0)));
        assert_eq!(ws.finish(), Some("HEART"));
        assert!(ws.is_found("HEART"));
        assert!(ws.is_highlighted((2, 0)));
        assert!(!ws.is_selecting());
    }

    #[test]
    fn test_reverse_selection_finds_word() {
        let mut ws = board();
        ws.begin((3, 8));
        ws.extend((3, 1));
        assert_eq!(ws.finish(), Some("SOULMATE"));
    }

    #[test]
    fn test_diagonal_selection() {
        let mut ws = board();
        ws.begin((4, 6));
        ws.extend((7, 9));
        assert_eq!(ws.finish(), Some("LOVE"));
    }

    #[test]
    fn test_single_cell_and_repeat_ignored() {
        let mut ws = board();
        ws.begin((0, 0));
        assert_eq!(ws.finish(), None);

        ws.begin((0, 13));
        ws.extend((2, 13));
        assert_eq!(ws.finish(), Some("HUG"));

        ws.begin((0, 13));
        ws.extend((2, 13));
        assert_eq!(ws.finish(), None);
        assert_eq!(ws.found_count(), 1);
    }

    #[test]
    fn test_all_words_complete_the_board() {
        let mut ws = board();
        for placement in WORD_SEARCH_PLACEMENTS {
            let cells = placement.cells();
            assert_eq!(ws.check_selection(&cells), Some(placement.word));
        }
        assert!(ws.is_complete());
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = board();
        let b = board();
        for row in 0..WORD_SEARCH_SIZE {
            for col in 0..WORD_SEARCH_SIZE {
                assert_eq!(a.letter((row, col)), b.letter((row, col)));
            }
        }
    }
}
