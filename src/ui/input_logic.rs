//! Pure helpers behind the keypad-driven screens: list cursors, option
//! cycling and the move entry buffer.

use heapless::String;

use crate::config::{INPUT_IDLE_MS, MAX_MOVE_LEN, MIN_MOVE_LEN};
use crate::error::Error;
use crate::keypad::Key;

/// Move selection cursor one item up.
pub fn select_prev(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Move selection cursor one item down if another item exists.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        selected
    }
}

/// Advance an option index, wrapping to the first option.
pub fn cycle_next(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else {
        (selected + 1) % item_count
    }
}

/// Character a key contributes to a move, if any.
///
/// `1`–`8` are ranks. `A`–`D` are files a–d, or e–h with shift on.
/// `0`, `9`, `*` and `#` are control keys.
pub fn move_char(key: Key, shift: bool) -> Option<char> {
    let offset = if shift { 4 } else { 0 };
    let c = match key {
        Key::A => b'a' + offset,
        Key::B => b'b' + offset,
        Key::C => b'c' + offset,
        Key::D => b'd' + offset,
        _ => match key.digit() {
            Some(d @ 1..=8) => b'0' + d,
            _ => return None,
        },
    };
    Some(c as char)
}

/// Characters typed so far for the move being entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSession {
    buffer: String<MAX_MOVE_LEN>,
    shift: bool,
    last_activity_ms: u64,
}

impl InputSession {
    pub fn new(now_ms: u64) -> Self {
        Self {
            buffer: String::new(),
            shift: false,
            last_activity_ms: now_ms,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    /// Append one character. A full buffer rejects it unchanged.
    pub fn push(&mut self, c: char, now_ms: u64) -> Result<(), Error> {
        self.buffer.push(c).map_err(|_| Error::BufferOverflow)?;
        self.last_activity_ms = now_ms;
        Ok(())
    }

    /// Flip which half of the board `A`–`D` address. Already typed
    /// characters are kept as they are.
    pub fn toggle_shift(&mut self, now_ms: u64) {
        self.shift = !self.shift;
        self.last_activity_ms = now_ms;
    }

    pub fn clear(&mut self, now_ms: u64) {
        self.buffer.clear();
        self.last_activity_ms = now_ms;
    }

    pub fn is_submittable(&self) -> bool {
        self.buffer.len() >= MIN_MOVE_LEN
    }

    /// No key for [`INPUT_IDLE_MS`].
    pub fn is_idle(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_activity_ms) >= INPUT_IDLE_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_prev_saturates_at_zero() {
        assert_eq!(select_prev(0), 0);
        assert_eq!(select_prev(3), 2);
    }

    #[test]
    fn select_next_stops_at_last_item() {
        assert_eq!(select_next(0, 3), 1);
        assert_eq!(select_next(2, 3), 2);
        assert_eq!(select_next(0, 1), 0);
    }

    #[test]
    fn cycle_next_wraps() {
        assert_eq!(cycle_next(0, 3), 1);
        assert_eq!(cycle_next(2, 3), 0);
        assert_eq!(cycle_next(5, 0), 0);
    }

    #[test]
    fn move_chars_follow_shift() {
        assert_eq!(move_char(Key::A, false), Some('a'));
        assert_eq!(move_char(Key::D, false), Some('d'));
        assert_eq!(move_char(Key::A, true), Some('e'));
        assert_eq!(move_char(Key::D, true), Some('h'));
        assert_eq!(move_char(Key::Num1, true), Some('1'));
        assert_eq!(move_char(Key::Num8, false), Some('8'));
        for key in [Key::Num0, Key::Num9, Key::Star, Key::Hash] {
            assert_eq!(move_char(key, false), None);
        }
    }

    #[test]
    fn buffer_is_bounded() {
        let mut s = InputSession::new(0);
        for c in "e2e4q".chars() {
            s.push(c, 1).unwrap();
        }
        assert_eq!(s.push('x', 2), Err(Error::BufferOverflow));
        assert_eq!(s.buffer(), "e2e4q");
    }

    #[test]
    fn submittable_from_two_chars() {
        let mut s = InputSession::new(0);
        s.push('e', 0).unwrap();
        assert!(!s.is_submittable());
        s.push('4', 0).unwrap();
        assert!(s.is_submittable());
    }

    #[test]
    fn shift_does_not_rewrite_buffer() {
        let mut s = InputSession::new(0);
        s.push('a', 0).unwrap();
        s.toggle_shift(10);
        assert!(s.shift());
        assert_eq!(s.buffer(), "a");
    }

    #[test]
    fn idle_after_quiet_period() {
        let mut s = InputSession::new(0);
        s.push('e', 1_000).unwrap();
        assert!(!s.is_idle(1_000 + INPUT_IDLE_MS - 1));
        assert!(s.is_idle(1_000 + INPUT_IDLE_MS));
    }
}
