//! Integration Tests für den WiFi-Signal-Tracker

use matrix_core::signal::{LOST_COLOR, MISS_LIMIT, SEARCHING_COLOR};
use matrix_core::{AccessPoint, Indicator, SignalTracker, TrackerState};

const TARGET: &str = "Werkstatt";
const BSSID: [u8; 6] = [0x24, 0x0a, 0xc4, 0x11, 0x22, 0x33];

fn target(rssi: i8) -> AccessPoint {
    AccessPoint::new(TARGET, BSSID, 6, rssi)
}

fn locked_tracker(rssi: i8) -> SignalTracker {
    let mut tracker = SignalTracker::new(TARGET);
    tracker.tick(&[target(rssi)]);
    assert_eq!(tracker.state(), TrackerState::Locked);
    tracker
}

// ============================================================================
// Tests: Suche
// ============================================================================

#[test]
fn test_searching_until_target_seen() {
    let mut tracker = SignalTracker::new(TARGET);
    let other = AccessPoint::new("Nachbar", [1; 6], 11, -30);

    let update = tracker.tick(&[other]);
    assert_eq!(update.state, TrackerState::Discovery);
    assert_eq!(update.indicator, Indicator::Searching);
    assert_eq!(update.indicator.color(), SEARCHING_COLOR);
    assert_eq!(update.scan_channel, None);
}

#[test]
fn test_locks_on_strongest_matching_bssid() {
    let mut tracker = SignalTracker::new(TARGET);
    let weak = AccessPoint::new(TARGET, [9; 6], 1, -85);
    let strong = AccessPoint::new(TARGET, BSSID, 6, -55);

    let update = tracker.tick(&[weak, strong]);
    assert_eq!(update.state, TrackerState::Locked);
    assert_eq!(update.scan_channel, Some(6));
    assert_eq!(tracker.locked_bssid(), Some(BSSID));
    assert_eq!(tracker.smoothed_dbm(), Some(-55.0));
}

#[test]
fn test_locked_ignores_other_bssid_with_same_name() {
    let mut tracker = locked_tracker(-55);
    let twin = AccessPoint::new(TARGET, [9; 6], 6, -30);

    tracker.tick(&[twin]);
    assert_eq!(tracker.state(), TrackerState::Locked);
    assert_eq!(tracker.smoothed_dbm(), Some(-55.0));
}

// ============================================================================
// Tests: Glättung
// ============================================================================

#[test]
fn test_smoothing_converges_to_steady_input() {
    let mut tracker = locked_tracker(-80);
    let mut last = -80.0;

    for _ in 0..40 {
        let update = tracker.tick(&[target(-50)]);
        let Indicator::Signal { dbm, level, .. } = update.indicator else {
            panic!("Signal erwartet, {:?}", update.indicator);
        };
        assert!(dbm >= last, "geglätteter Wert fällt: {last} -> {dbm}");
        assert!((0.0..=1.0).contains(&level));
        last = dbm;
    }
    assert!((last - -50.0).abs() < 0.5, "nicht konvergiert: {last}");
}

#[test]
fn test_single_dropout_value_is_filtered() {
    let mut tracker = locked_tracker(-60);
    tracker.tick(&[target(-60)]);
    tracker.tick(&[target(-95)]);
    assert_eq!(tracker.smoothed_dbm(), Some(-60.0));
}

// ============================================================================
// Tests: Verlust und Wiederfinden
// ============================================================================

#[test]
fn test_lost_after_consecutive_misses_then_rescan() {
    let mut tracker = locked_tracker(-60);

    for _ in 0..MISS_LIMIT {
        let update = tracker.tick(&[]);
        assert_eq!(update.state, TrackerState::Locked);
        assert!(matches!(update.indicator, Indicator::Signal { .. }));
    }

    let update = tracker.tick(&[]);
    assert_eq!(update.state, TrackerState::Lost);
    assert_eq!(update.indicator.color(), LOST_COLOR);
    assert_eq!(update.scan_channel, None);

    let update = tracker.tick(&[]);
    assert_eq!(update.state, TrackerState::Scanning);
    assert_eq!(update.indicator, Indicator::Lost);
    assert_eq!(tracker.locked_bssid(), None);
    assert_eq!(tracker.smoothed_dbm(), None);

    let update = tracker.tick(&[]);
    assert_eq!(update.state, TrackerState::Scanning);
    assert_eq!(update.indicator, Indicator::Searching);

    let update = tracker.tick(&[target(-70)]);
    assert_eq!(update.state, TrackerState::Locked);
    assert_eq!(update.scan_channel, Some(6));
}

#[test]
fn test_lost_step_skips_scan_results() {
    let mut tracker = locked_tracker(-60);
    assert!(tracker.needs_scan());
    for _ in 0..=MISS_LIMIT {
        tracker.tick(&[]);
    }
    assert_eq!(tracker.state(), TrackerState::Lost);
    assert!(!tracker.needs_scan());

    // Ergebnisse im Lost-Zustand werden nicht ausgewertet
    let update = tracker.tick(&[target(-50)]);
    assert_eq!(update.state, TrackerState::Scanning);
    assert_eq!(update.indicator, Indicator::Lost);
    assert_eq!(tracker.locked_bssid(), None);
    assert!(tracker.needs_scan());
}

#[test]
fn test_hit_resets_miss_counter() {
    let mut tracker = locked_tracker(-60);
    for _ in 0..10 {
        for _ in 0..MISS_LIMIT {
            tracker.tick(&[]);
        }
        tracker.tick(&[target(-60)]);
        assert_eq!(tracker.state(), TrackerState::Locked);
    }
}
