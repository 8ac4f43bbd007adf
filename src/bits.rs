//! Bit strings as the simulator sees them.
//!
//! A [`BitString`] is an ordered sequence of bits that prints as `0`/`1` text.
//! Storage is a `bitvec` vector in most-significant-bit-first order, so the
//! first character of the text form is bit index 0 (codeword position 1).

use crate::error::{Error, Result};
use bitvec::prelude::*;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Text symbol for a single bit.
pub fn symbol(bit: bool) -> char {
    if bit {
        '1'
    } else {
        '0'
    }
}

/// An ordered, owned sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitString {
    bits: BitVec<u8, Msb0>,
}

impl BitString {
    /// Creates an empty bit string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bit string of `len` zero bits.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bits: bitvec![u8, Msb0; 0; len],
        }
    }

    /// Builds a bit string from free text, keeping only `0` and `1` characters.
    ///
    /// Never fails; text with no binary digits yields an empty string.
    pub fn from_filtered(text: &str) -> Self {
        text.chars()
            .filter_map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at the 0-based `index`, if present.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    /// Returns the bit at the 1-based codeword `position`.
    ///
    /// Positions outside `1..=len` read as zero.
    pub fn at(&self, position: usize) -> bool {
        position
            .checked_sub(1)
            .and_then(|index| self.get(index))
            .unwrap_or(false)
    }

    /// Sets the bit at the 0-based `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if index < self.bits.len() {
            self.bits.set(index, value);
        }
    }

    /// Inverts the bit at the 0-based `index`, returning the new value.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let flipped = !self.get(index)?;
        self.bits.set(index, flipped);
        Some(flipped)
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }
}

impl From<BitVec<u8, Msb0>> for BitString {
    fn from(bits: BitVec<u8, Msb0>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl FromStr for BitString {
    type Err = Error;

    /// Strict parse: every character must be `0` or `1`.
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(index, symbol)| match symbol {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(Error::InvalidBit { symbol, index }),
            })
            .collect()
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", symbol(bit))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_input() {
        let bits: BitString = "0110011".parse().unwrap();
        assert_eq!(bits.len(), 7);
        assert_eq!(bits.to_string(), "0110011");
    }

    #[test]
    fn test_strict_parse_rejects_other_symbols() {
        let err = "10a1".parse::<BitString>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBit {
                symbol: 'a',
                index: 2
            }
        ));
    }

    #[test]
    fn test_filtered_keeps_only_binary_digits() {
        assert_eq!(BitString::from_filtered("1 0-1_1x").to_string(), "1011");
        assert!(BitString::from_filtered("hello").is_empty());
    }

    #[test]
    fn test_positions_are_one_based() {
        let bits: BitString = "100".parse().unwrap();
        assert!(bits.at(1));
        assert!(!bits.at(2));
        assert!(!bits.at(0));
        assert!(!bits.at(4));
    }

    #[test]
    fn test_toggle() {
        let mut bits = BitString::zeroed(3);
        assert_eq!(bits.toggle(1), Some(true));
        assert_eq!(bits.to_string(), "010");
        assert_eq!(bits.toggle(3), None);
    }
}
