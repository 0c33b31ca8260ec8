//! Unified error type for chessterm.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Input
    /// Keypad buffer already holds the maximum number of characters.
    BufferOverflow,

    /// Move history reached its capacity.
    HistoryFull,

    // Control channel
    /// An incoming line exceeded the line buffer and was discarded.
    LineOverflow,

    /// An incoming line was not valid UTF-8.
    InvalidUtf8,

    /// A complete line could not be decoded into a message.
    Protocol(ProtocolError),

    /// The outgoing command queue is full.
    OutboxFull,

    // Hardware
    /// USB CDC endpoint returned an error.
    Usb,

    /// I²C transaction to the display failed.
    Display,
}

/// Why a control-channel line was rejected (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// No known prefix or keyword.
    Unknown,
    /// A prefixed message is missing its payload or a field.
    MissingField,
    /// A numeric field did not parse.
    BadNumber,
    /// An enumerated field (quality, side) had an unknown value.
    BadLabel,
    /// A text field does not fit its fixed-size buffer.
    TooLong,
}

// Convenience conversions

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}

impl From<core::num::ParseIntError> for ProtocolError {
    fn from(_: core::num::ParseIntError) -> Self {
        ProtocolError::BadNumber
    }
}
