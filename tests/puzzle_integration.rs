//! Puzzles against the real answer keys

use std::time::{Duration, Instant};

use keepsake::content::{
    CARD_CAPTIONS, CROSSWORD_ENTRIES, CROSSWORD_SIZE, DEFAULT_LOCK_CODE, PHOTOS, WORD_SEARCH_PLACEMENTS,
    WORD_SEARCH_SIZE,
};
use keepsake::puzzle::{
    cells_in_line, check_solved, Crossword, Direction, LockPad, MemoryGame, PairOutcome, PressOutcome,
    WordSearch,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_matching_ignores_case_only() {
    assert!(check_solved("soulmate", "SOULMATE"));
    assert!(!check_solved("SOULMATES", "SOULMATE"));
    assert!(!check_solved("", ""));
}

#[test]
fn test_crossword_solved_by_whole_words() {
    let mut crossword = Crossword::new(CROSSWORD_SIZE, CROSSWORD_ENTRIES).unwrap();

    assert!(!crossword.enter_word(2, Direction::Across, "SOULMATES").unwrap());
    assert!(!crossword.is_found(2, Direction::Across));

    assert!(crossword.enter_word(2, Direction::Across, "soulmate").unwrap());
    assert!(crossword.is_found(2, Direction::Across));
    assert!(crossword.check_entry(2, Direction::Across).unwrap());

    for entry in CROSSWORD_ENTRIES {
        crossword.enter_word(entry.number, entry.direction, entry.word).unwrap();
    }
    assert!(crossword.is_complete());
    assert_eq!(crossword.found_count(), CROSSWORD_ENTRIES.len());
}

#[test]
fn test_crossword_unknown_entry_is_an_error() {
    let mut crossword = Crossword::new(CROSSWORD_SIZE, CROSSWORD_ENTRIES).unwrap();
    assert!(crossword.enter_word(9, Direction::Down, "LOVE").is_err());
}

#[test]
fn test_word_search_either_direction() {
    let mut search = WordSearch::new(WORD_SEARCH_SIZE, WORD_SEARCH_PLACEMENTS, 11).unwrap();

    // HOME at row 8, columns 1..=4
    let forward = cells_in_line((8, 1), (8, 4), WORD_SEARCH_SIZE);
    assert_eq!(search.check_selection(&forward), Some("HOME"));

    // LOVE runs diagonally from (4, 6)
    let backward = cells_in_line((7, 9), (4, 6), WORD_SEARCH_SIZE);
    assert_eq!(search.check_selection(&backward), Some("LOVE"));

    // a word only counts once
    assert_eq!(search.check_selection(&forward), None);
    assert_eq!(search.found_count(), 2);
    assert!(!search.is_complete());
}

#[test]
fn test_word_search_complete_from_placements() {
    let mut search = WordSearch::new(WORD_SEARCH_SIZE, WORD_SEARCH_PLACEMENTS, 2).unwrap();
    for placement in WORD_SEARCH_PLACEMENTS {
        assert_eq!(search.check_selection(&placement.cells()), Some(placement.word));
    }
    assert!(search.is_complete());
}

#[test]
fn test_lock_wrong_then_right() {
    let mut lock = LockPad::new(DEFAULT_LOCK_CODE);
    for digit in "071".chars() {
        assert_eq!(lock.press(digit), PressOutcome::Entered);
    }
    assert_eq!(lock.press('2'), PressOutcome::Wrong);
    assert_eq!(lock.press('1'), PressOutcome::Ignored);

    lock.clear_wrong();
    let outcomes: Vec<_> = DEFAULT_LOCK_CODE.chars().map(|d| lock.press(d)).collect();
    assert_eq!(outcomes.last(), Some(&PressOutcome::Unlocked));
    assert!(lock.is_unlocked());
}

#[test]
fn test_memory_game_cleared_pair_by_pair() {
    let pairs: Vec<(&str, &str)> = PHOTOS.iter().copied().zip(CARD_CAPTIONS.iter().copied()).collect();
    let delay = Duration::from_millis(800);
    let mut game = MemoryGame::new(&pairs, delay, &mut SmallRng::seed_from_u64(4));
    let mut now = Instant::now();

    for pair_id in 0..game.pair_count() {
        let indices: Vec<usize> = game
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.pair_id == pair_id)
            .map(|(i, _)| i)
            .collect();
        game.flip(indices[0], now);
        game.flip(indices[1], now);
        assert_eq!(game.resolve(now), None);

        now += delay;
        assert_eq!(game.resolve(now), Some(PairOutcome::Matched));
    }
    assert!(game.is_complete());
}
