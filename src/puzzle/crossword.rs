//! Crossword grid
//!
//! Open cells are derived from the answer key: a cell is open when at least
//! one entry passes through it. Entries that cross must agree on the shared
//! letter, which is checked when the grid is built.

use std::collections::HashMap;

use tracing::{debug, info};

use super::matcher::{check_solved, FoundSet};
use crate::{KeepsakeError, Result};

/// Entry direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Across => "Across",
            Direction::Down => "Down",
        }
    }
}

/// One answer in the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySpec {
    pub number: u8,
    pub direction: Direction,
    pub word: &'static str,
    pub row: usize,
    pub col: usize,
    pub hint: &'static str,
}

impl EntrySpec {
    pub fn id(&self) -> EntryId {
        (self.number, self.direction)
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Grid coordinates covered by this entry, in reading order
    pub fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.len())
            .map(|i| match self.direction {
                Direction::Across => (self.row, self.col + i),
                Direction::Down => (self.row + i, self.col),
            })
            .collect()
    }
}

pub type EntryId = (u8, Direction);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Blocked,
    Open(Option<char>),
}

/// Crossword state for one visit to the screen
#[derive(Debug, Clone)]
pub struct Crossword {
    size: usize,
    cells: Vec<Vec<Cell>>,
    numbers: HashMap<(usize, usize), u8>,
    entries: Vec<EntrySpec>,
    cursor: (usize, usize),
    direction: Direction,
    found: FoundSet<EntryId>,
}

impl Crossword {
    /// Build a grid from an answer key
    pub fn new(size: usize, entries: &[EntrySpec]) -> Result<Self> {
        if entries.is_empty() {
            return Err(KeepsakeError::Content("crossword has no entries".to_string()));
        }

        let mut solution: Vec<Vec<Option<char>>> = vec![vec![None; size]; size];
        let mut numbers = HashMap::new();

        for entry in entries {
            for ((row, col), letter) in entry.cells().into_iter().zip(entry.word.chars()) {
                if row >= size || col >= size {
                    return Err(KeepsakeError::Content(format!(
                        "entry {} {} runs off the grid",
                        entry.number,
                        entry.direction.label()
                    )));
                }
                let letter = letter.to_ascii_uppercase();
                match solution[row][col] {
                    Some(existing) if existing != letter => {
                        return Err(KeepsakeError::Content(format!(
                            "entries disagree at ({}, {}): {} vs {}",
                            row, col, existing, letter
                        )));
                    }
                    _ => solution[row][col] = Some(letter),
                }
            }
            numbers.entry((entry.row, entry.col)).or_insert(entry.number);
        }

        let cells = solution
            .iter()
            .map(|row| {
                row.iter()
                    .map(|slot| match slot {
                        Some(_) => Cell::Open(None),
                        None => Cell::Blocked,
                    })
                    .collect()
            })
            .collect();

        let first = entries
            .iter()
            .min_by_key(|e| e.number)
            .copied()
            .unwrap_or(entries[0]);

        Ok(Self {
            size,
            cells,
            numbers,
            entries: entries.to_vec(),
            cursor: (first.row, first.col),
            direction: first.direction,
            found: FoundSet::new(entries.len()),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn entries(&self) -> &[EntrySpec] {
        &self.entries
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        matches!(self.cell(row, col), Some(Cell::Open(_)))
    }

    /// Letter currently entered at a cell
    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        match self.cell(row, col) {
            Some(Cell::Open(letter)) => letter,
            _ => None,
        }
    }

    /// Clue number printed in a cell, if an entry starts there
    pub fn number_at(&self, row: usize, col: usize) -> Option<u8> {
        self.numbers.get(&(row, col)).copied()
    }

    pub fn is_found(&self, number: u8, direction: Direction) -> bool {
        self.found.contains(&(number, direction))
    }

    pub fn found_count(&self) -> usize {
        self.found.count()
    }

    pub fn is_complete(&self) -> bool {
        self.found.is_complete()
    }

    /// Cells belonging to a found entry can no longer change
    pub fn is_locked(&self, row: usize, col: usize) -> bool {
        self.entries
            .iter()
            .filter(|e| self.found.contains(&e.id()))
            .any(|e| e.cells().contains(&(row, col)))
    }

    /// Select a cell. Selecting the cursor cell again flips the direction.
    pub fn select(&mut self, row: usize, col: usize) -> bool {
        if !self.is_open(row, col) {
            return false;
        }
        if self.cursor == (row, col) {
            self.direction = self.direction.toggled();
        } else {
            self.cursor = (row, col);
        }
        true
    }

    /// Move the cursor by one open cell, skipping blocked cells
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let (mut row, mut col) = (self.cursor.0 as isize, self.cursor.1 as isize);
        loop {
            row += d_row;
            col += d_col;
            if row < 0 || col < 0 || row >= self.size as isize || col >= self.size as isize {
                return;
            }
            if self.is_open(row as usize, col as usize) {
                self.cursor = (row as usize, col as usize);
                return;
            }
        }
    }

    /// Type a letter at the cursor and advance in the current direction.
    /// Returns entries found by this keystroke.
    pub fn input(&mut self, letter: char) -> Vec<EntryId> {
        if self.is_complete() || !letter.is_ascii_alphabetic() {
            return Vec::new();
        }

        let (row, col) = self.cursor;
        if !self.is_locked(row, col) {
            self.cells[row][col] = Cell::Open(Some(letter.to_ascii_uppercase()));
        }
        self.advance();
        self.check_entries()
    }

    /// Clear the cursor cell, or step back when it is already empty
    pub fn backspace(&mut self) {
        if self.is_complete() {
            return;
        }
        let (row, col) = self.cursor;
        if self.letter(row, col).is_some() {
            if !self.is_locked(row, col) {
                self.cells[row][col] = Cell::Open(None);
            }
            return;
        }
        match self.direction {
            Direction::Across => self.move_cursor(0, -1),
            Direction::Down => self.move_cursor(-1, 0),
        }
    }

    /// Submit a whole word for one entry.
    ///
    /// The attempt must match the answer exactly (case-insensitively); a
    /// longer or shorter attempt is rejected and nothing is written.
    pub fn enter_word(&mut self, number: u8, direction: Direction, attempt: &str) -> Result<bool> {
        let entry = self.entry(number, direction)?;
        if self.is_complete() || !check_solved(attempt, entry.word) {
            debug!(number, ?direction, "crossword attempt rejected");
            return Ok(false);
        }
        for ((row, col), letter) in entry.cells().into_iter().zip(attempt.chars()) {
            self.cells[row][col] = Cell::Open(Some(letter.to_ascii_uppercase()));
        }
        self.check_entries();
        Ok(true)
    }

    /// The attempt currently in the grid for an entry
    pub fn word_at(&self, entry: &EntrySpec) -> String {
        entry
            .cells()
            .into_iter()
            .filter_map(|(row, col)| self.letter(row, col))
            .collect()
    }

    /// Whether the grid currently holds the answer for an entry
    pub fn check_entry(&self, number: u8, direction: Direction) -> Result<bool> {
        let entry = self.entry(number, direction)?;
        Ok(check_solved(&self.word_at(&entry), entry.word))
    }

    /// Clue text for the entry under the cursor in the current direction
    pub fn active_entry(&self) -> Option<&EntrySpec> {
        self.entries
            .iter()
            .find(|e| e.direction == self.direction && e.cells().contains(&self.cursor))
            .or_else(|| self.entries.iter().find(|e| e.cells().contains(&self.cursor)))
    }

    fn entry(&self, number: u8, direction: Direction) -> Result<EntrySpec> {
        self.entries
            .iter()
            .find(|e| e.number == number && e.direction == direction)
            .copied()
            .ok_or_else(|| {
                KeepsakeError::Content(format!("no crossword entry {} {}", number, direction.label()))
            })
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    fn advance(&mut self) {
        let (row, col) = self.cursor;
        let (d_row, d_col) = match self.direction {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        };
        let (mut r, mut c) = (row + d_row, col + d_col);
        while r < self.size && c < self.size {
            if self.is_open(r, c) {
                self.cursor = (r, c);
                return;
            }
            r += d_row;
            c += d_col;
        }
    }

    fn check_entries(&mut self) -> Vec<EntryId> {
        let mut newly_found = Vec::new();
        for entry in &self.entries {
            if self.found.contains(&entry.id()) {
                continue;
            }
            if check_solved(&self.word_at(entry), entry.word) {
                newly_found.push(entry.id());
            }
        }
        for id in &newly_found {
            self.found.mark(*id);
            info!(number = id.0, direction = ?id.1, "crossword entry found");
        }
        newly_found
    }
}
