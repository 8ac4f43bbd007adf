//! Error types for the Hamming simulator.
//!
//! Every failure a caller can trigger with bad input is reported as a value,
//! never as a panic. The presentation layer decides how to show it.

use thiserror::Error;

/// Errors reported by conversion, error injection, decoding and report export.
#[derive(Debug, Error)]
pub enum Error {
    /// Decimal or hexadecimal input that is not a non-negative integer
    #[error("Invalid {kind} number: {input:?}")]
    InvalidNumericInput { kind: &'static str, input: String },

    /// Manual error injection outside `[0, length)`
    #[error("error position {position} is out of range for a {length}-bit codeword (valid: 0..{length})")]
    OutOfRange { position: i64, length: usize },

    /// No `0`/`1` characters were left to work on
    #[error("no valid binary digits in input")]
    EmptyInput,

    /// The syndrome names a position past the end of the received codeword
    #[error("syndrome {syndrome} exceeds codeword length {length}; no correction applied")]
    UncorrectableSyndrome { syndrome: usize, length: usize },

    /// Strict bit-string parsing hit a character other than `0` or `1`
    #[error("invalid bit {symbol:?} at index {index}")]
    InvalidBit { symbol: char, index: usize },

    /// Writing an exported report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
