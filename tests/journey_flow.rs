//! Walking the journey through the same key handling the app uses

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use keepsake::app::{Journey, Screen};
use keepsake::audio::{SilentSink, SoundBoard};
use keepsake::config::GiftConfig;
use keepsake::store::AppStore;

fn journey(config: GiftConfig) -> Journey {
    let store = AppStore::in_memory(&config.recipient.default_name);
    Journey::new(config, store, SoundBoard::new(Box::new(SilentSink))).unwrap()
}

fn press(journey: &mut Journey, code: KeyCode) {
    journey.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
}

fn ctrl(journey: &mut Journey, c: char) {
    journey
        .handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
        .unwrap();
}

#[tokio::test]
async fn test_walk_from_entry_to_celebration() {
    let mut journey = journey(GiftConfig::default().with_seed(42));
    assert_eq!(journey.current(), Screen::Entry);

    press(&mut journey, KeyCode::Enter);
    assert_eq!(journey.current(), Screen::Personalization);
    assert!(journey.snapshot().intro_seen.is_some());

    // skipping the name goes straight to the crossword
    ctrl(&mut journey, 's');
    assert_eq!(journey.current(), Screen::Crossword);

    ctrl(&mut journey, 's');
    assert_eq!(journey.current(), Screen::CardMatch);
    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::ScratchCard);
    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::LockScreen);

    for c in "0711".chars() {
        press(&mut journey, KeyCode::Char(c));
    }
    press(&mut journey, KeyCode::Enter);
    assert_eq!(journey.current(), Screen::LoveMeter);

    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::HoldReveal);
    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::ShakeReveal);

    for _ in 0..3 {
        press(&mut journey, KeyCode::Char(' '));
    }
    press(&mut journey, KeyCode::Enter);
    assert_eq!(journey.current(), Screen::NicknameCarousel);

    press(&mut journey, KeyCode::Enter);
    assert_eq!(journey.current(), Screen::Poems);
    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::Confession);
    press(&mut journey, KeyCode::Enter);
    assert_eq!(journey.current(), Screen::Question);

    // the lead-in can be skipped
    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::Celebration);

    assert_eq!(journey.history().first(), Some(&Screen::Entry));
    assert!(!journey.should_quit());
}

#[tokio::test]
async fn test_name_flows_into_snapshot() {
    let mut journey = journey(GiftConfig::default().with_seed(1).with_start_at("/personalization"));
    for c in "Berryboo".chars() {
        press(&mut journey, KeyCode::Char(c));
    }
    press(&mut journey, KeyCode::Enter);
    assert_eq!(journey.current(), Screen::Origin);
    assert_eq!(journey.snapshot().display_name, "Berryboo");

    press(&mut journey, KeyCode::Esc);
    assert_eq!(journey.current(), Screen::Personalization);
}

#[tokio::test]
async fn test_word_hunt_skip_jumps_to_crossword() {
    let mut journey = journey(GiftConfig::default().with_seed(3).with_start_at("/word-hunt"));
    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::Crossword);
}

#[tokio::test]
async fn test_end_of_journey_has_nowhere_to_go() {
    let mut journey = journey(GiftConfig::default().with_seed(9).with_start_at("/quiet-stars"));
    press(&mut journey, KeyCode::Enter);
    press(&mut journey, KeyCode::Tab);
    assert_eq!(journey.current(), Screen::QuietStars);

    press(&mut journey, KeyCode::Char('q'));
    assert!(journey.should_quit());
}

#[tokio::test]
async fn test_key_release_does_not_navigate() {
    let mut journey = journey(GiftConfig::default().with_seed(5).with_start_at("/hold-reveal"));
    let release = KeyEvent {
        code: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    journey.handle_key(release).unwrap();
    assert_eq!(journey.current(), Screen::HoldReveal);
}

#[tokio::test]
async fn test_question_skip_goes_to_celebration() {
    let mut journey = journey(GiftConfig::default().with_seed(8).with_start_at("/question"));
    press(&mut journey, KeyCode::Char('s'));
    assert_eq!(journey.current(), Screen::Celebration);
}
