//! Conversion of user input into a binary digit string.
//!
//! Supported formats:
//! - Binary: every character other than `0`/`1` is dropped
//! - Decimal: a non-negative base-10 integer of any size
//! - Hexadecimal: a non-negative base-16 integer, optional `0x`/`0X` prefix
//! - ASCII / plain text: each character becomes an 8-bit group of its code point
//!
//! # Examples
//!
//! ```
//! use hamming_sim::convert::{convert, InputFormat};
//!
//! let conversion = convert("13", InputFormat::Decimal).unwrap();
//! assert_eq!(conversion.binary.to_string(), "1101");
//! ```

use crate::bits::BitString;
use crate::error::{Error, Result};
use crate::trace::{StepKind, TraceStep};
use log::warn;
use num_bigint::BigUint;
use num_traits::Num;
use std::fmt::{self, Display, Formatter};

/// How the raw input should be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    #[default]
    Binary,
    Decimal,
    Hexadecimal,
    Ascii,
    Text,
}

impl InputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Binary => "binary",
            InputFormat::Decimal => "decimal",
            InputFormat::Hexadecimal => "hexadecimal",
            InputFormat::Ascii => "ascii",
            InputFormat::Text => "text",
        }
    }
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for InputFormat {
    /// Parses a format name. Unknown names fall back to binary.
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "binary" | "bin" => InputFormat::Binary,
            "decimal" | "dec" => InputFormat::Decimal,
            "hexadecimal" | "hex" => InputFormat::Hexadecimal,
            "ascii" => InputFormat::Ascii,
            "text" | "plaintext" | "plain" => InputFormat::Text,
            other => {
                warn!("unknown input format {other:?}, treating input as binary");
                InputFormat::Binary
            }
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: String,
    pub format: InputFormat,
    pub binary: BitString,
    pub message: String,
}

impl Conversion {
    /// The "Input Conversion" step that precedes an encode trace.
    pub fn trace_step(&self) -> TraceStep {
        TraceStep::new(
            "conversion",
            StepKind::Info,
            "Input Conversion",
            self.message.clone(),
        )
        .with_result(format!("Binary: {}", self.binary))
        .with_details([
            format!("Input format: {}", self.format),
            format!("Input value: {}", self.input),
            format!("Binary output: {}", self.binary),
            format!("Length: {} bits", self.binary.len()),
        ])
    }
}

/// Converts `input` to a bit string according to `format`.
///
/// Only decimal and hexadecimal input can fail, with
/// [`Error::InvalidNumericInput`].
pub fn convert(input: &str, format: InputFormat) -> Result<Conversion> {
    let (binary, message) = match format {
        InputFormat::Binary => (
            BitString::from_filtered(input),
            "Input is already in binary format".to_string(),
        ),
        InputFormat::Decimal => {
            let value = parse_unsigned(input.trim(), 10, "decimal", input)?;
            let message = format!("Decimal {value} converted to binary");
            (unsigned_to_bits(&value), message)
        }
        InputFormat::Hexadecimal => {
            let trimmed = input.trim();
            let digits = trimmed
                .strip_prefix("0x")
                .or_else(|| trimmed.strip_prefix("0X"))
                .unwrap_or(trimmed);
            let value = parse_unsigned(digits, 16, "hexadecimal", input)?;
            let message = format!("Hexadecimal 0x{digits} converted to binary");
            (unsigned_to_bits(&value), message)
        }
        InputFormat::Ascii => (
            text_to_bits(input),
            format!(
                "ASCII text converted to binary ({} characters)",
                input.chars().count()
            ),
        ),
        InputFormat::Text => (
            text_to_bits(input),
            format!(
                "Plain text converted to binary ({} characters)",
                input.chars().count()
            ),
        ),
    };

    Ok(Conversion {
        input: input.to_string(),
        format,
        binary,
        message,
    })
}

fn parse_unsigned(digits: &str, radix: u32, kind: &'static str, input: &str) -> Result<BigUint> {
    let invalid = || Error::InvalidNumericInput {
        kind,
        input: input.to_string(),
    };
    // BigUint tolerates a leading '+' and '_' separators; plain digits only here.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    BigUint::from_str_radix(digits, radix).map_err(|_| invalid())
}

/// Minimal unsigned binary form, `0` for zero.
fn unsigned_to_bits(value: &BigUint) -> BitString {
    BitString::from_filtered(&value.to_str_radix(2))
}

/// One zero-padded group per character, at least 8 bits and always a
/// multiple of 8.
fn text_to_bits(text: &str) -> BitString {
    let mut bits = BitString::new();
    for ch in text.chars() {
        let code = u32::from(ch);
        let significant = (u32::BITS - code.leading_zeros()) as usize;
        let width = significant.div_ceil(8).max(1) * 8;
        for shift in (0..width).rev() {
            bits.push((code >> shift) & 1 == 1);
        }
    }
    bits
}
