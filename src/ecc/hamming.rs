//! Hamming code layout.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! A Hamming code places `r` parity bits at the power-of-two positions (1, 2, 4, 8, ...) of an
//! `n = m + r` bit codeword and fills every other position with the `m` data bits in order.
//! Parity bit `p` covers every position whose binary representation has the bit `p` set,
//! including `p` itself, so a single flipped bit fails exactly the checks whose positions sum to
//! its own position.
//!
//! This module only answers layout questions:
//! - how many parity bits `m` data bits need (`2^r >= m + r + 1`)
//! - which positions hold parity and which hold data
//! - which positions each parity bit covers
//!
//! Positions are 1-based throughout, matching the way the code is usually taught.

use log::debug;

/// One tested value of `r` while sizing a code for `m` data bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingCandidate {
    pub r: usize,
    /// `2^r`, saturating at `usize::MAX`
    pub capacity: usize,
    /// `m + r + 1`
    pub required: usize,
    pub accepted: bool,
}

/// The redundancy search for `m` data bits, with every candidate tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sizing {
    pub code: HammingCode,
    pub candidates: Vec<SizingCandidate>,
}

/// Represents a Hamming code configuration.
/// A Hamming(n, m) code carries m data bits and r = n - m parity bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HammingCode {
    /// Number of data bits per codeword
    data_bits: usize,
    /// Number of parity bits per codeword
    parity_bits: usize,
}

impl HammingCode {
    /// Sizes a code for `data_bits` data bits, recording each candidate `r`.
    ///
    /// `r` starts at 0 and grows until `2^r >= m + r + 1`. The left side doubles while the
    /// right side grows by one, so the search always ends.
    pub fn sizing(data_bits: usize) -> Sizing {
        let mut candidates = Vec::new();
        let mut r = 0;
        loop {
            let capacity = 1usize.checked_shl(r as u32).unwrap_or(usize::MAX);
            let required = data_bits.saturating_add(r).saturating_add(1);
            let accepted = capacity >= required;
            debug!(
                "m = {data_bits}: 2^{r} = {capacity} {} {required}",
                if accepted { ">=" } else { "<" }
            );
            candidates.push(SizingCandidate {
                r,
                capacity,
                required,
                accepted,
            });
            if accepted {
                break;
            }
            r += 1;
        }

        Sizing {
            code: HammingCode {
                data_bits,
                parity_bits: r,
            },
            candidates,
        }
    }

    /// The minimal code for `data_bits` data bits.
    pub fn for_data_bits(data_bits: usize) -> Self {
        Self::sizing(data_bits).code
    }

    /// The layout a decoder assumes for a received codeword of `total_bits` bits:
    /// every power of two not exceeding `total_bits` is a parity position.
    pub fn for_codeword_len(total_bits: usize) -> Self {
        let parity_bits = if total_bits == 0 {
            0
        } else {
            total_bits.ilog2() as usize + 1
        };
        HammingCode {
            data_bits: total_bits - parity_bits,
            parity_bits,
        }
    }

    /// Creates a standard (7,4) Hamming code
    pub fn standard_7_4() -> Self {
        Self::for_data_bits(4)
    }

    pub fn data_bits(&self) -> usize {
        self.data_bits
    }

    pub fn parity_bits(&self) -> usize {
        self.parity_bits
    }

    /// Gets the total code word length (data bits + parity bits)
    pub fn total_bits(&self) -> usize {
        self.data_bits + self.parity_bits
    }

    /// Parity positions in ascending order: 1, 2, 4, ... up to `2^(r-1)`.
    pub fn parity_positions(&self) -> Vec<usize> {
        (0..self.parity_bits).map(|k| 1usize << k).collect()
    }

    pub fn is_parity_position(&self, position: usize) -> bool {
        position.is_power_of_two() && position <= self.total_bits()
    }

    /// Data positions in ascending order.
    pub fn data_positions(&self) -> Vec<usize> {
        (1..=self.total_bits())
            .filter(|&position| !self.is_parity_position(position))
            .collect()
    }

    /// Every position `i` in `1..=n` with `i & parity == parity`, ascending.
    pub fn covered_positions(&self, parity: usize) -> Vec<usize> {
        (1..=self.total_bits())
            .filter(|&i| i & parity == parity)
            .collect()
    }
}
