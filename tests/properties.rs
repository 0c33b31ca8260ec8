//! Property tests for the bounded, time-driven pieces.

use chessterm::clock::{ClockState, ClockTick, Side};
use chessterm::config::{FIRE_COOLDOWN_MS, LINE_BUFFER_LEN, MAX_MOVE_LEN};
use chessterm::keypad::Debouncer;
use chessterm::protocol::LineBuffer;
use chessterm::{Key, Terminal};
use proptest::prelude::*;

fn any_key() -> impl Strategy<Value = Option<Key>> {
    prop_oneof![
        1 => Just(None),
        3 => proptest::sample::select(Key::ALL.to_vec()).prop_map(Some),
    ]
}

// ═══════════════════════════════════════════════════════════════
//  Debouncer
// ═══════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn held_key_never_refires_inside_cooldown(
        readings in proptest::collection::vec((any_key(), 1u64..40), 1..300),
    ) {
        let mut debouncer = Debouncer::new();
        let mut now = 0u64;
        // (key, fired at, released since)
        let mut last: Option<(Key, u64, bool)> = None;

        for (raw, gap) in readings {
            now += gap;
            if raw.is_none() {
                if let Some(entry) = last.as_mut() {
                    entry.2 = true;
                }
            }
            if let Some(key) = debouncer.update(raw, now) {
                prop_assert_eq!(Some(key), raw);
                if let Some((prev, at, released)) = last {
                    if prev == key && !released {
                        prop_assert!(now - at >= FIRE_COOLDOWN_MS);
                    }
                }
                last = Some((key, now, false));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Clock
// ═══════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clock_loses_at_most_one_second_per_call(
        minutes in 0u32..3,
        gaps in proptest::collection::vec(0u64..5_000, 1..200),
        moves in proptest::collection::vec(any::<bool>(), 200),
    ) {
        let mut clock = ClockState::default();
        clock.seed(minutes, 1, 0);
        clock.resume(0);
        let mut now = 0u64;

        for (gap, mv) in gaps.into_iter().zip(moves) {
            now += gap;
            let before = clock.white_secs() + clock.black_secs();
            let tick = clock.tick(now, true);
            let after = clock.white_secs() + clock.black_secs();
            prop_assert!(before - after <= 1);
            if let ClockTick::Expired(side) = tick {
                prop_assert_eq!(clock.remaining(side), 0);
                prop_assert!(clock.is_paused());
            }
            if mv && !clock.is_paused() {
                clock.complete_move();
            }
        }
    }

    #[test]
    fn clock_never_runs_outside_gameplay(gaps in proptest::collection::vec(0u64..5_000, 1..50)) {
        let mut clock = ClockState::default();
        clock.seed(5, 0, 0);
        clock.resume(0);
        let mut now = 0u64;
        for gap in gaps {
            now += gap;
            prop_assert_eq!(clock.tick(now, false), ClockTick::Idle);
        }
        prop_assert_eq!(clock.remaining(Side::White), 300);
    }
}

// ═══════════════════════════════════════════════════════════════
//  Line buffer and input buffer bounds
// ═══════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn line_buffer_stays_bounded(bytes in proptest::collection::vec(any::<u8>(), 0..1_000)) {
        let mut buf = LineBuffer::new();
        for b in bytes {
            if let Some(Ok(line)) = buf.push(b) {
                prop_assert!(!line.is_empty());
                prop_assert!(!line.contains('\n'));
            }
            prop_assert!(buf.pending() <= LINE_BUFFER_LEN);
        }
    }

    #[test]
    fn move_buffer_never_exceeds_its_length(
        keys in proptest::collection::vec(proptest::sample::select(Key::ALL.to_vec()), 0..60),
    ) {
        let mut t = Terminal::new(1, 0);
        t.receive_line("START:5,10,0,W", 0);
        let mut now = 0u64;
        for key in keys {
            now += 300;
            t.dispatch_key(key, now);
            t.advance(now);
            while t.outputs_mut().pop_command().is_some() {}
            if let Some(buffer) = t.input_buffer() {
                prop_assert!(buffer.len() <= MAX_MOVE_LEN);
            }
        }
    }
}
