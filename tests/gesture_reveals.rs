//! Gesture reveals driven by their configured timings

use std::time::{Duration, Instant};

use keepsake::config::GiftConfig;
use keepsake::gesture::{HoldReveal, MotionSample, ScratchCard, ShakeDetector, Ticker};

#[test]
fn test_five_second_hold_reveals() {
    let config = GiftConfig::default();
    let mut hold = HoldReveal::new(&config.hold);
    let start = Instant::now();
    hold.press(start);

    let interval = config.hold.tick_interval;
    let mut revealed_at = None;
    for i in 1..=60u32 {
        let now = start + interval * i;
        // key repeats keep the hold alive
        hold.press(now);
        if hold.tick(now) {
            revealed_at = Some(i);
        }
    }
    assert_eq!(revealed_at, Some(50));
    assert_eq!(interval * 50, config.hold.full_hold());
    assert!(hold.is_revealed());
}

#[test]
fn test_release_at_sixty_percent_resets() {
    let config = GiftConfig::default();
    let mut hold = HoldReveal::new(&config.hold);
    let now = Instant::now();
    hold.press(now);
    for _ in 0..30 {
        hold.tick(now);
    }
    assert_eq!(hold.percent(), 60.0);

    hold.release();
    assert_eq!(hold.percent(), 0.0);
    assert!(!hold.is_revealed());
}

#[test]
fn test_silence_past_grace_counts_as_release() {
    let config = GiftConfig::default();
    let mut hold = HoldReveal::new(&config.hold);
    let now = Instant::now();
    hold.press(now);
    hold.tick(now);
    assert!(hold.percent() > 0.0);

    hold.tick(now + config.hold.release_grace + Duration::from_millis(1));
    assert_eq!(hold.percent(), 0.0);
    assert!(!hold.is_holding());
}

#[test]
fn test_three_spaced_shakes_reveal() {
    let config = GiftConfig::default();
    let mut detector = ShakeDetector::new(&config.shake);
    let spike = MotionSample::new(1.2, 1.2, 0.0);
    let start = Instant::now();

    assert!(!detector.on_sample(spike, start));
    // too soon, coalesced
    assert!(!detector.on_sample(spike, start + Duration::from_millis(200)));
    assert_eq!(detector.shakes(), 1);

    assert!(!detector.on_sample(spike, start + Duration::from_millis(600)));
    assert!(detector.on_sample(spike, start + Duration::from_millis(1200)));
    assert!(detector.is_revealed());

    assert!(!detector.on_sample(spike, start + Duration::from_secs(5)));
    assert_eq!(detector.shakes(), 3);
}

#[test]
fn test_gentle_motion_is_not_a_shake() {
    let config = GiftConfig::default();
    let mut detector = ShakeDetector::new(&config.shake);
    let resting = MotionSample::new(0.0, 0.0, 1.0);
    assert!(!detector.on_sample(resting, Instant::now()));
    assert_eq!(detector.shakes(), 0);
}

#[test]
fn test_scratch_reveal_is_permanent() {
    let config = GiftConfig::default();
    let mut card = ScratchCard::new(&config.scratch, "hello");
    let mut revealed = 0;
    for y in 0..config.scratch.height {
        for x in 0..config.scratch.width {
            if card.scratch(x, y) {
                revealed += 1;
            }
        }
    }
    assert_eq!(revealed, 1);
    assert!(card.is_revealed());
    assert!(card.coverage() > config.scratch.reveal_percent);
    assert!(!card.scratch(0, 0));
}

#[tokio::test(start_paused = true)]
async fn test_ticker_drives_hold() {
    let config = GiftConfig::default();
    let mut hold = HoldReveal::new(&config.hold);
    let mut ticker = Ticker::start(config.hold.tick_interval);
    hold.press(Instant::now());

    while !hold.is_revealed() {
        ticker.next().await.unwrap();
        let now = Instant::now();
        hold.press(now);
        hold.tick(now);
    }
    assert_eq!(hold.percent(), 100.0);
}
