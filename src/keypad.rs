//! 4×4 matrix keypad: key legend, scan resolution and debouncing.
//!
//! Layout (row-major, as wired):
//! ```text
//!   1  2  3  A
//!   4  5  6  B
//!   7  8  9  C
//!   *  0  #  D
//! ```
//!
//! The hardware driver produces a raw `[[bool; 4]; 4]` matrix every pass.
//! [`resolve_scan`] collapses it to at most one key and [`Debouncer`] turns
//! the stream of raw readings into single-fire key events.

use crate::config::{DEBOUNCE_MS, FIRE_COOLDOWN_MS};

/// One physical keypad key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    Star,
    Hash,
}

/// Keypad legend, indexed `[row][col]`.
pub const KEYMAP: [[Key; 4]; 4] = [
    [Key::Num1, Key::Num2, Key::Num3, Key::A],
    [Key::Num4, Key::Num5, Key::Num6, Key::B],
    [Key::Num7, Key::Num8, Key::Num9, Key::C],
    [Key::Star, Key::Num0, Key::Hash, Key::D],
];

impl Key {
    /// Every key, in legend order.
    pub const ALL: [Key; 16] = [
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::A,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::B,
        Key::Num7,
        Key::Num8,
        Key::Num9,
        Key::C,
        Key::Star,
        Key::Num0,
        Key::Hash,
        Key::D,
    ];

    /// Character printed on the key cap.
    pub const fn as_char(self) -> char {
        match self {
            Key::Num0 => '0',
            Key::Num1 => '1',
            Key::Num2 => '2',
            Key::Num3 => '3',
            Key::Num4 => '4',
            Key::Num5 => '5',
            Key::Num6 => '6',
            Key::Num7 => '7',
            Key::Num8 => '8',
            Key::Num9 => '9',
            Key::A => 'A',
            Key::B => 'B',
            Key::C => 'C',
            Key::D => 'D',
            Key::Star => '*',
            Key::Hash => '#',
        }
    }

    /// Inverse of [`Key::as_char`]; letters are case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        let key = match c.to_ascii_uppercase() {
            '0' => Key::Num0,
            '1' => Key::Num1,
            '2' => Key::Num2,
            '3' => Key::Num3,
            '4' => Key::Num4,
            '5' => Key::Num5,
            '6' => Key::Num6,
            '7' => Key::Num7,
            '8' => Key::Num8,
            '9' => Key::Num9,
            'A' => Key::A,
            'B' => Key::B,
            'C' => Key::C,
            'D' => Key::D,
            '*' => Key::Star,
            '#' => Key::Hash,
            _ => return None,
        };
        Some(key)
    }

    /// Numeric value for digit keys.
    pub const fn digit(self) -> Option<u8> {
        match self {
            Key::Num0 => Some(0),
            Key::Num1 => Some(1),
            Key::Num2 => Some(2),
            Key::Num3 => Some(3),
            Key::Num4 => Some(4),
            Key::Num5 => Some(5),
            Key::Num6 => Some(6),
            Key::Num7 => Some(7),
            Key::Num8 => Some(8),
            Key::Num9 => Some(9),
            _ => None,
        }
    }
}

/// Collapse a raw matrix scan to a single key.
///
/// Rows are scanned top to bottom, columns left to right; when several
/// contacts read closed (multi-press or ghosting) the last match wins.
pub fn resolve_scan(pressed: &[[bool; 4]; 4]) -> Option<Key> {
    let mut hit = None;
    for (row, cols) in pressed.iter().enumerate() {
        for (col, &closed) in cols.iter().enumerate() {
            if closed {
                hit = Some(KEYMAP[row][col]);
            }
        }
    }
    hit
}

/// Edge-triggered debouncer with a cooldown-based repeat fallback.
#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    /// Last raw reading.
    raw: Option<Key>,
    /// When the raw reading last changed.
    raw_changed_ms: u64,
    /// Key delivered most recently, cleared on release.
    fired: Option<Key>,
    /// When `fired` was delivered.
    fired_ms: u64,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            raw: None,
            raw_changed_ms: 0,
            fired: None,
            fired_ms: 0,
        }
    }

    /// Feed one raw scan result; returns the key to deliver, if any.
    pub fn update(&mut self, raw: Option<Key>, now_ms: u64) -> Option<Key> {
        if raw != self.raw {
            self.raw = raw;
            self.raw_changed_ms = now_ms;
        }

        // Release forgets the fired key straight away so the next press is
        // not held back by the cooldown.
        let key = match raw {
            Some(key) => key,
            None => {
                self.fired = None;
                return None;
            }
        };

        if now_ms.saturating_sub(self.raw_changed_ms) < DEBOUNCE_MS {
            return None;
        }

        let fire = match self.fired {
            Some(prev) if prev == key => now_ms.saturating_sub(self.fired_ms) >= FIRE_COOLDOWN_MS,
            _ => true,
        };

        if fire {
            self.fired = Some(key);
            self.fired_ms = now_ms;
            Some(key)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_roundtrips_through_chars() {
        for key in Key::ALL {
            assert_eq!(Key::from_char(key.as_char()), Some(key));
        }
        assert_eq!(Key::from_char('a'), Some(Key::A));
        assert_eq!(Key::from_char('x'), None);
    }

    #[test]
    fn scan_with_nothing_pressed_is_none() {
        assert_eq!(resolve_scan(&[[false; 4]; 4]), None);
    }

    #[test]
    fn scan_prefers_last_scanned_match() {
        let mut m = [[false; 4]; 4];
        m[0][0] = true; // 1
        m[2][3] = true; // C
        assert_eq!(resolve_scan(&m), Some(Key::C));

        m[3][1] = true; // 0
        assert_eq!(resolve_scan(&m), Some(Key::Num0));
    }

    #[test]
    fn press_fires_once_after_debounce() {
        let mut d = Debouncer::new();
        assert_eq!(d.update(Some(Key::Num5), 0), None);
        assert_eq!(d.update(Some(Key::Num5), 29), None);
        assert_eq!(d.update(Some(Key::Num5), 30), Some(Key::Num5));
        assert_eq!(d.update(Some(Key::Num5), 31), None);
        assert_eq!(d.update(Some(Key::Num5), 200), None);
    }

    #[test]
    fn bounce_restarts_debounce_window() {
        let mut d = Debouncer::new();
        assert_eq!(d.update(Some(Key::A), 0), None);
        assert_eq!(d.update(Some(Key::B), 20), None);
        assert_eq!(d.update(Some(Key::A), 25), None);
        assert_eq!(d.update(Some(Key::A), 50), None);
        assert_eq!(d.update(Some(Key::A), 55), Some(Key::A));
    }

    #[test]
    fn held_key_refires_after_cooldown() {
        let mut d = Debouncer::new();
        d.update(Some(Key::B), 0);
        assert_eq!(d.update(Some(Key::B), 30), Some(Key::B));
        assert_eq!(d.update(Some(Key::B), 279), None);
        assert_eq!(d.update(Some(Key::B), 280), Some(Key::B));
    }

    #[test]
    fn release_allows_immediate_repress() {
        let mut d = Debouncer::new();
        d.update(Some(Key::Num2), 0);
        assert_eq!(d.update(Some(Key::Num2), 30), Some(Key::Num2));
        assert_eq!(d.update(None, 40), None);
        d.update(Some(Key::Num2), 50);
        assert_eq!(d.update(Some(Key::Num2), 80), Some(Key::Num2));
    }

    #[test]
    fn different_key_fires_without_cooldown() {
        let mut d = Debouncer::new();
        d.update(Some(Key::Num1), 0);
        assert_eq!(d.update(Some(Key::Num1), 30), Some(Key::Num1));
        d.update(Some(Key::Num3), 40);
        assert_eq!(d.update(Some(Key::Num3), 70), Some(Key::Num3));
    }
}
