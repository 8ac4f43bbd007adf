//! Single-bit transmission errors.
//!
//! The "channel" is simulated in memory: injection copies the codeword and flips exactly one
//! bit of the copy. Indices here are 0-based; narration reports them 1-based.

use crate::bits::{symbol, BitString};
use crate::error::{Error, Result};
use crate::trace::{StepKind, TraceStep};
use log::info;
use rand::Rng;

/// A codeword with one bit flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub codeword: BitString,
    /// 0-based index of the flipped bit
    pub position: usize,
    pub from: bool,
    pub to: bool,
}

impl Injection {
    /// The "Error Simulation" step recorded after encoding.
    pub fn trace_step(&self) -> TraceStep {
        let position = self.position + 1;
        TraceStep::new(
            "error-simulation",
            StepKind::Info,
            "Error Simulation",
            "A single-bit transmission error has been introduced",
        )
        .with_result(format!("Error at position {position}"))
        .with_details([
            format!("Error introduced at bit position: {position}"),
            format!(
                "Bit flipped from {} to {}",
                symbol(self.from),
                symbol(self.to)
            ),
            format!("Transmitted codeword: {}", self.codeword),
        ])
    }
}

/// Flips one uniformly chosen bit using the thread-local RNG.
pub fn inject_random(codeword: &BitString) -> Result<Injection> {
    inject_random_with(codeword, &mut rand::thread_rng())
}

/// Flips one uniformly chosen bit using `rng`.
///
/// An empty codeword has no bit to flip and yields [`Error::EmptyInput`].
pub fn inject_random_with<R: Rng + ?Sized>(
    codeword: &BitString,
    rng: &mut R,
) -> Result<Injection> {
    if codeword.is_empty() {
        return Err(Error::EmptyInput);
    }
    let index = rng.gen_range(0..codeword.len());
    flip(codeword, index)
}

/// Flips the bit at the 0-based `position`.
///
/// Positions outside `[0, len)`, negative ones included, yield [`Error::OutOfRange`] and leave
/// nothing modified.
pub fn inject_at(codeword: &BitString, position: i64) -> Result<Injection> {
    let index = usize::try_from(position)
        .ok()
        .filter(|&index| index < codeword.len())
        .ok_or(Error::OutOfRange {
            position,
            length: codeword.len(),
        })?;
    flip(codeword, index)
}

fn flip(codeword: &BitString, index: usize) -> Result<Injection> {
    let mut damaged = codeword.clone();
    let from = codeword.get(index).ok_or(Error::OutOfRange {
        position: i64::try_from(index).unwrap_or(i64::MAX),
        length: codeword.len(),
    })?;
    damaged.set(index, !from);
    info!(
        "flipped bit {} of {}: {} -> {}",
        index + 1,
        codeword.len(),
        symbol(from),
        symbol(!from)
    );

    Ok(Injection {
        codeword: damaged,
        position: index,
        from,
        to: !from,
    })
}
