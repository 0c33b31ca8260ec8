//! In-game move list and the host's archive of past games.
//!
//! Both are bounded and never evict: once full, further entries are simply
//! not recorded. The player's confirmed moves and the host's replies land
//! in [`MoveHistory`] in play order.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::{ARCHIVE_CAPACITY, HISTORY_CAPACITY, LCD_COLS};
use crate::error::Error;
use crate::protocol::{ArchiveEntry, MoveText};

#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
    moves: Vec<MoveText, HISTORY_CAPACITY>,
}

impl MoveHistory {
    pub const fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// Record a move. Fails without evicting anything when full.
    pub fn push(&mut self, mv: &str) -> Result<(), Error> {
        let mut text = MoveText::new();
        for c in mv.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        self.moves.push(text).map_err(|_| Error::HistoryFull)
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.moves.get(index).map(|m| m.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.moves.last().map(|m| m.as_str())
    }

    /// Largest valid scroll offset: the start of the last ply pair.
    pub fn max_offset(&self) -> usize {
        self.moves.len().saturating_sub(1) & !1
    }

    /// One display row for the ply pair starting at `offset` (even),
    /// e.g. `" 3.e2e4   e7e5"`. Empty past the end.
    pub fn pair_row(&self, offset: usize) -> String<LCD_COLS> {
        let mut row = String::new();
        if let Some(first) = self.get(offset) {
            let _ = write!(row, "{:>2}.{:<7}", offset / 2 + 1, first);
            if let Some(second) = self.get(offset + 1) {
                let _ = row.push_str(second);
            }
        }
        row
    }
}

/// Past-game results, in the order the host sent them.
#[derive(Clone, Debug, Default)]
pub struct GameArchive {
    games: Vec<ArchiveEntry, ARCHIVE_CAPACITY>,
}

impl GameArchive {
    pub const fn new() -> Self {
        Self { games: Vec::new() }
    }

    pub fn push(&mut self, entry: ArchiveEntry) -> Result<(), Error> {
        self.games.push(entry).map_err(|_| Error::HistoryFull)
    }

    pub fn clear(&mut self) {
        self.games.clear();
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.games.get(index).map(|g| g.as_str())
    }

    /// Largest scroll offset that still fills both rows.
    pub fn max_offset(&self) -> usize {
        self.games.len().saturating_sub(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order() {
        let mut h = MoveHistory::new();
        h.push("e2e4").unwrap();
        h.push("e7e5").unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h.get(0), Some("e2e4"));
        assert_eq!(h.last(), Some("e7e5"));
    }

    #[test]
    fn full_history_rejects_without_eviction() {
        let mut h = MoveHistory::new();
        for _ in 0..HISTORY_CAPACITY {
            h.push("a1a2").unwrap();
        }
        assert_eq!(h.push("h7h8"), Err(Error::HistoryFull));
        assert_eq!(h.len(), HISTORY_CAPACITY);
        assert_eq!(h.get(0), Some("a1a2"));
        assert_eq!(h.last(), Some("a1a2"));
    }

    #[test]
    fn long_moves_are_truncated_to_capacity() {
        let mut h = MoveHistory::new();
        h.push("abcdefghijk").unwrap();
        assert_eq!(h.get(0), Some("abcdefgh"));
    }

    #[test]
    fn max_offset_is_last_pair_start() {
        let mut h = MoveHistory::new();
        assert_eq!(h.max_offset(), 0);
        for (n, mv) in ["e4", "e5", "Nf3", "Nc6", "Bb5"].iter().enumerate() {
            h.push(mv).unwrap();
            assert_eq!(h.max_offset(), n & !1);
        }
    }

    #[test]
    fn pair_rows_are_numbered() {
        let mut h = MoveHistory::new();
        for mv in ["e2e4", "e7e5", "g1f3"] {
            h.push(mv).unwrap();
        }
        assert_eq!(h.pair_row(0).as_str(), " 1.e2e4   e7e5");
        assert_eq!(h.pair_row(2).as_str(), " 2.g1f3   ");
        assert_eq!(h.pair_row(4).as_str(), "");
    }

    #[test]
    fn archive_is_bounded_and_clearable() {
        let mut a = GameArchive::new();
        assert_eq!(a.max_offset(), 0);
        for n in 0..ARCHIVE_CAPACITY {
            let entry = if n % 2 == 0 { "Play-Stoc 1-0" } else { "Stoc-Play 1/2" };
            a.push(ArchiveEntry::try_from(entry).unwrap()).unwrap();
        }
        let extra = ArchiveEntry::try_from("Play-Stoc 0-1").unwrap();
        assert_eq!(a.push(extra), Err(Error::HistoryFull));
        assert_eq!(a.len(), ARCHIVE_CAPACITY);
        assert_eq!(a.get(0), Some("Play-Stoc 1-0"));
        assert_eq!(a.max_offset(), ARCHIVE_CAPACITY - 2);

        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.get(0), None);
    }
}
