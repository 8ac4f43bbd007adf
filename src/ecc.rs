//! Hamming error correction with a narrated trace.
//!
//! The pipeline is
//! [`convert`](crate::convert::convert) → [`encode`] → optional
//! [`inject_random`] / [`inject_at`] → [`decode`]. Every stage is a pure
//! function of its inputs (random injection aside) and owns the buffers it
//! works on, so the stages can be called from any thread without coordination.
//!
//! # Examples
//!
//! ```rust
//! use hamming_sim::bits::BitString;
//! use hamming_sim::ecc::{decode, encode, inject_at};
//!
//! let data: BitString = "1011".parse().unwrap();
//! let encoding = encode(&data);
//! assert_eq!(encoding.codeword.to_string(), "0110011");
//!
//! let damaged = inject_at(&encoding.codeword, 3).unwrap();
//! let decoding = decode(&damaged.codeword);
//! assert_eq!(decoding.syndrome, 4);
//! assert_eq!(decoding.corrected_codeword, encoding.codeword);
//! assert_eq!(decoding.data_bits, data);
//! ```

use crate::bits::symbol;

pub mod decoder;
pub mod encoder;
pub mod hamming;
pub mod injector;

pub use decoder::{decode, decode_str, Correction, Decoding};
pub use encoder::{encode, Encoding};
pub use hamming::{HammingCode, Sizing, SizingCandidate};
pub use injector::{inject_at, inject_random, inject_random_with, Injection};

/// One parity bit's covering set and its even-parity XOR.
///
/// On encode `parity` is the value written into the parity slot. On decode it
/// is the recomputed check: `false` passes, `true` fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityRecord {
    /// 1-based parity position (a power of two)
    pub position: usize,
    /// Ascending 1-based positions `i` with `i & position == position`
    pub covered: Vec<usize>,
    /// Bit values read at `covered`, in the same order
    pub bit_values: Vec<bool>,
    pub parity: bool,
}

impl ParityRecord {
    /// XORs `bit_at(i)` over every position `i` covered by parity `position`.
    pub(crate) fn compute(
        hamming: &HammingCode,
        position: usize,
        bit_at: impl Fn(usize) -> bool,
    ) -> Self {
        let covered = hamming.covered_positions(position);
        let bit_values: Vec<bool> = covered.iter().map(|&i| bit_at(i)).collect();
        let parity = bit_values.iter().fold(false, |acc, &bit| acc ^ bit);
        Self {
            position,
            covered,
            bit_values,
            parity,
        }
    }

    /// On decode, whether the check held.
    pub fn passed(&self) -> bool {
        !self.parity
    }

    pub(crate) fn formula(&self) -> String {
        let operands = self
            .covered
            .iter()
            .map(|i| format!("bit_{{{i}}}"))
            .collect::<Vec<_>>()
            .join(" ⊕ ");
        format!("P_{{{}}} = {}", self.position, operands)
    }

    pub(crate) fn value_list(&self) -> String {
        self.bit_values
            .iter()
            .map(|&bit| symbol(bit).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
