//! Line protocol spoken with the move-analysis host.
//!
//! Every message is one line of ASCII terminated by `\n` (a `\r` before it
//! is tolerated). The host sends results ([`Message`]); the terminal sends
//! requests ([`Command`]).
//!
//! ```text
//! host → terminal   EVAL:<BRILLIANT|GOOD|INAC|MISTAKE|BLUNDER>  BEST:<mv>
//!                   ILLEGAL  PROMOTE  CHECKMATE:<WHITE|BLACK>  STALEMATE
//!                   HINT:<mv>  LAST:<mv>  TIME:<w>,<b>  DEPTH:<n>
//!                   RESIGN  DRAW  START:<d>,<min>,<inc>,<W|B>
//!                   HISTORY_CLEAR  HISTORY_ADD:<white>-<black> <result>
//! terminal → host   MOVE:<uci>  HINT  RESIGN  DRAW  DEPTH:<n>  REQ_HISTORY
//!                   START:<d>,<min>,<inc>,<W|B>  [LCD] <row0>|<row1>
//! ```

use core::fmt;

use heapless::{String, Vec};

use crate::clock::Side;
use crate::config::{LCD_COLS, LINE_BUFFER_LEN, MOVE_TEXT_LEN};
use crate::error::{Error, ProtocolError};

/// A move as text (UCI or SAN), as short as the wire allows.
pub type MoveText = String<MOVE_TEXT_LEN>;

/// One past-game summary, e.g. `Play-Stoc 1-0`; one display row at most.
pub type ArchiveEntry = String<LCD_COLS>;

/// Move quality tier reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Quality {
    Brilliant,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Brilliant,
        Quality::Good,
        Quality::Inaccuracy,
        Quality::Mistake,
        Quality::Blunder,
    ];

    /// Wire label.
    pub const fn label(self) -> &'static str {
        match self {
            Quality::Brilliant => "BRILLIANT",
            Quality::Good => "GOOD",
            Quality::Inaccuracy => "INAC",
            Quality::Mistake => "MISTAKE",
            Quality::Blunder => "BLUNDER",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.label() == label)
    }

    /// 0 (best) to 4 (worst).
    pub const fn tier(self) -> usize {
        match self {
            Quality::Brilliant => 0,
            Quality::Good => 1,
            Quality::Inaccuracy => 2,
            Quality::Mistake => 3,
            Quality::Blunder => 4,
        }
    }
}

/// Parameters of a game, as carried by `START:`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameSetup {
    pub difficulty: u8,
    pub timer_minutes: u32,
    pub increment_secs: u32,
    /// Side the keypad player plays.
    pub side: Side,
}

/// A decoded host → terminal line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Eval(Quality),
    Best(MoveText),
    Illegal,
    Promote,
    Checkmate(Side),
    Stalemate,
    Hint(MoveText),
    Last(MoveText),
    Time { white_secs: u32, black_secs: u32 },
    Depth(u8),
    Resign,
    Draw,
    Start(GameSetup),
    /// The past-game list follows; forget the old one.
    HistoryClear,
    HistoryAdd(ArchiveEntry),
}

/// Decode one line (terminator already removed).
pub fn parse_line(line: &str) -> Result<Message, ProtocolError> {
    let line = line.trim();

    match line {
        "ILLEGAL" => return Ok(Message::Illegal),
        "PROMOTE" => return Ok(Message::Promote),
        "STALEMATE" => return Ok(Message::Stalemate),
        "RESIGN" => return Ok(Message::Resign),
        "DRAW" => return Ok(Message::Draw),
        "HISTORY_CLEAR" => return Ok(Message::HistoryClear),
        _ => {}
    }

    let (head, payload) = line.split_once(':').ok_or(ProtocolError::Unknown)?;
    let payload = payload.trim();

    match head {
        "EVAL" => Quality::from_label(payload)
            .map(Message::Eval)
            .ok_or(ProtocolError::BadLabel),
        "BEST" => move_text(payload).map(Message::Best),
        "HINT" => move_text(payload).map(Message::Hint),
        "LAST" => move_text(payload).map(Message::Last),
        "CHECKMATE" => match payload {
            "WHITE" => Ok(Message::Checkmate(Side::White)),
            "BLACK" => Ok(Message::Checkmate(Side::Black)),
            _ => Err(ProtocolError::BadLabel),
        },
        "TIME" => {
            let (w, b) = payload.split_once(',').ok_or(ProtocolError::MissingField)?;
            Ok(Message::Time {
                white_secs: w.trim().parse()?,
                black_secs: b.trim().parse()?,
            })
        }
        "DEPTH" => Ok(Message::Depth(payload.parse()?)),
        "START" => parse_setup(payload).map(Message::Start),
        "HISTORY_ADD" => archive_entry(payload).map(Message::HistoryAdd),
        _ => Err(ProtocolError::Unknown),
    }
}

fn move_text(payload: &str) -> Result<MoveText, ProtocolError> {
    if payload.is_empty() {
        return Err(ProtocolError::MissingField);
    }
    let mut text = MoveText::new();
    text.push_str(payload).map_err(|_| ProtocolError::TooLong)?;
    Ok(text)
}

fn archive_entry(payload: &str) -> Result<ArchiveEntry, ProtocolError> {
    if payload.is_empty() {
        return Err(ProtocolError::MissingField);
    }
    let mut text = ArchiveEntry::new();
    text.push_str(payload).map_err(|_| ProtocolError::TooLong)?;
    Ok(text)
}

fn parse_setup(payload: &str) -> Result<GameSetup, ProtocolError> {
    let mut fields: Vec<&str, 4> = Vec::new();
    for field in payload.split(',') {
        fields
            .push(field.trim())
            .map_err(|_| ProtocolError::TooLong)?;
    }
    let [difficulty, minutes, increment, side] = fields.as_slice() else {
        return Err(ProtocolError::MissingField);
    };

    let side = match *side {
        "W" => Side::White,
        "B" => Side::Black,
        _ => return Err(ProtocolError::BadLabel),
    };

    Ok(GameSetup {
        difficulty: difficulty.parse()?,
        timer_minutes: minutes.parse()?,
        increment_secs: increment.parse()?,
        side,
    })
}

/// A terminal → host line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(MoveText),
    Hint,
    Resign,
    Draw,
    Depth(u8),
    Start(GameSetup),
    /// Ask for the past-game list.
    ReqHistory,
    /// Diagnostic mirror of the display; the host ignores it.
    Lcd([String<LCD_COLS>; 2]),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(mv) => write!(f, "MOVE:{}", mv),
            Command::Hint => f.write_str("HINT"),
            Command::Resign => f.write_str("RESIGN"),
            Command::Draw => f.write_str("DRAW"),
            Command::Depth(n) => write!(f, "DEPTH:{}", n),
            Command::ReqHistory => f.write_str("REQ_HISTORY"),
            Command::Start(s) => write!(
                f,
                "START:{},{},{},{}",
                s.difficulty,
                s.timer_minutes,
                s.increment_secs,
                s.side.code()
            ),
            Command::Lcd([row0, row1]) => write!(f, "[LCD] {}|{}", row0, row1),
        }
    }
}

/// Accumulates incoming bytes until a line terminator arrives.
///
/// Lines longer than the buffer are dropped up to and including their
/// terminator; partial lines survive across calls.
#[derive(Clone, Debug, Default)]
pub struct LineBuffer {
    bytes: Vec<u8, LINE_BUFFER_LEN>,
    overflowed: bool,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte. Returns a finished line, an error for a line that had
    /// to be discarded, or `None` while a line is still accumulating.
    /// Blank lines are skipped.
    pub fn push(&mut self, byte: u8) -> Option<Result<String<LINE_BUFFER_LEN>, Error>> {
        if byte != b'\n' {
            if !self.overflowed && self.bytes.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        if self.overflowed {
            self.clear();
            return Some(Err(Error::LineOverflow));
        }

        let mut end = self.bytes.len();
        if end > 0 && self.bytes[end - 1] == b'\r' {
            end -= 1;
        }
        if end == 0 {
            self.clear();
            return None;
        }

        let line = core::str::from_utf8(&self.bytes[..end])
            .map_err(|_| Error::InvalidUtf8)
            .map(|s| {
                let mut out = String::new();
                // Fits: `end` never exceeds the buffer capacity.
                let _ = out.push_str(s);
                out
            });
        self.clear();
        Some(line)
    }

    /// Bytes of the line in progress.
    pub fn pending(&self) -> usize {
        self.bytes.len()
    }

    fn clear(&mut self) {
        self.bytes.clear();
        self.overflowed = false;
    }
}
