//! Hamming decoding: syndrome computation, single-bit correction and data extraction.
//!
//! The decoder accepts a codeword of any length. It takes every power of two not exceeding the
//! length as a parity position, recomputes each check over the received bits, and sums the
//! positions of the failing checks into the syndrome. A syndrome of 0 means no error was
//! detected; any other value in `1..=n` is the position of the flipped bit.
//!
//! A codeword whose length no encoder would produce can yield a syndrome larger than `n`. That
//! case is reported as [`Correction::Uncorrectable`] and the codeword is left as received.

use crate::bits::{symbol, BitString};
use crate::ecc::hamming::HammingCode;
use crate::ecc::ParityRecord;
use crate::error::{Error, Result};
use crate::trace::{join_positions, xor_chain, BitCell, BitRecord, StepKind, Trace, TraceStep};
use log::{debug, info, warn};

/// What the decoder did about the syndrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Syndrome 0, codeword passed through unchanged
    Clean,
    /// The bit at 1-based `position` was flipped from `from` to `to`
    Flipped { position: usize, from: bool, to: bool },
    /// The syndrome points past the end of the codeword; nothing was flipped
    Uncorrectable { syndrome: usize },
}

/// Result of decoding a received codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoding {
    pub received: BitString,
    pub parity_checks: Vec<ParityRecord>,
    pub syndrome: usize,
    /// 1-based position of the corrected bit, `None` when nothing was corrected
    pub error_position: Option<usize>,
    pub correction: Correction,
    pub corrected_codeword: BitString,
    pub data_bits: BitString,
    pub parity_positions: Vec<usize>,
    pub trace: Trace,
}

impl Decoding {
    /// Reports an uncorrectable syndrome as an error; every other outcome is `Ok`.
    pub fn check(&self) -> Result<()> {
        match self.correction {
            Correction::Uncorrectable { syndrome } => Err(Error::UncorrectableSyndrome {
                syndrome,
                length: self.received.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Filters `text` down to its `0`/`1` characters and decodes the result.
///
/// Returns [`Error::EmptyInput`] without decoding when no binary digit remains.
pub fn decode_str(text: &str) -> Result<Decoding> {
    let received = BitString::from_filtered(text);
    if received.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(decode(&received))
}

/// Decodes `received`, correcting at most one bit.
pub fn decode(received: &BitString) -> Decoding {
    let n = received.len();
    let mut trace = Trace::new();
    trace.push(received_step(received));

    let code = HammingCode::for_codeword_len(n);
    let parity_positions = code.parity_positions();
    trace.push(parity_positions_step(&parity_positions));

    let mut parity_checks = Vec::with_capacity(parity_positions.len());
    let mut failed = Vec::new();
    for &position in &parity_positions {
        let record = ParityRecord::compute(&code, position, |i| received.at(i));
        debug!(
            "check P{} over [{}]: {}",
            position,
            join_positions(&record.covered),
            if record.passed() { "pass" } else { "fail" }
        );
        if !record.passed() {
            failed.push(position);
        }
        trace.push(check_step(&record));
        parity_checks.push(record);
    }

    let syndrome: usize = failed.iter().sum();
    trace.push(syndrome_step(&failed, syndrome));

    let mut corrected_codeword = received.clone();
    let correction = if syndrome == 0 {
        Correction::Clean
    } else if syndrome <= n {
        let from = received.at(syndrome);
        corrected_codeword.set(syndrome - 1, !from);
        Correction::Flipped {
            position: syndrome,
            from,
            to: !from,
        }
    } else {
        warn!("syndrome {syndrome} exceeds codeword length {n}; leaving codeword unchanged");
        Correction::Uncorrectable { syndrome }
    };
    trace.push(correction_step(&correction, &corrected_codeword, n));

    let data_positions = code.data_positions();
    let data_bits: BitString = data_positions
        .iter()
        .map(|&position| corrected_codeword.at(position))
        .collect();
    trace.push(extract_step(&data_positions, &data_bits));

    let error_position = match correction {
        Correction::Flipped { position, .. } => Some(position),
        _ => None,
    };
    info!(
        "decoded {n}-bit codeword: syndrome {syndrome}, {} data bits",
        data_bits.len()
    );

    Decoding {
        received: received.clone(),
        parity_checks,
        syndrome,
        error_position,
        correction,
        corrected_codeword,
        data_bits,
        parity_positions,
        trace,
    }
}

fn received_step(received: &BitString) -> TraceStep {
    let bits = received
        .iter()
        .enumerate()
        .map(|(index, bit)| BitRecord::new(index + 1, BitCell::Bit(bit), false))
        .collect();

    TraceStep::new(
        "received",
        StepKind::Info,
        "Received Codeword",
        format!("Analyzing received {}-bit codeword for errors", received.len()),
    )
    .with_result(format!("Received: {received}"))
    .with_bits(bits)
    .with_detail(format!("Codeword length: {} bits", received.len()))
}

fn parity_positions_step(positions: &[usize]) -> TraceStep {
    TraceStep::new(
        "parity-positions",
        StepKind::Info,
        "Identify Parity Positions",
        "Every power-of-2 position up to the codeword length holds a parity bit",
    )
    .with_result(format!(
        "Found {} parity bits at positions: {}",
        positions.len(),
        join_positions(positions)
    ))
    .with_details(
        positions
            .iter()
            .enumerate()
            .map(|(k, p)| format!("P{p} at position {p} (2^{k})")),
    )
}

fn check_step(record: &ParityRecord) -> TraceStep {
    let p = record.position;
    let value = u8::from(record.parity);
    let chain = xor_chain(&record.bit_values);
    let bits = record
        .covered
        .iter()
        .zip(&record.bit_values)
        .map(|(&position, &bit)| BitRecord::new(position, BitCell::Bit(bit), position == p))
        .collect();

    let (result, verdict) = if record.passed() {
        (
            "✓ PASS (parity = 0)",
            "Even parity holds ✓ (no error in this group)",
        )
    } else {
        (
            "✗ FAIL (parity = 1)",
            "Odd parity detected ✗ (an error lies in this group)",
        )
    };

    TraceStep::new(
        format!("check-{p}"),
        StepKind::Calculation,
        format!("Parity Check P_{{{p}}}"),
        format!("Verifying even parity at position {p} across every position it covers"),
    )
    .with_formula(record.formula())
    .with_calculation(format!("{chain} = {value}"))
    .with_result(result)
    .with_bits(bits)
    .with_details([
        format!("Positions checked: {}", join_positions(&record.covered)),
        format!("Bit values at those positions: {}", record.value_list()),
        format!("XOR result: {chain} = {value}"),
        verdict.to_string(),
    ])
}

fn syndrome_step(failed: &[usize], syndrome: usize) -> TraceStep {
    let sum = failed
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" + ");
    let width = (usize::BITS - syndrome.leading_zeros()).max(4) as usize;

    let (calculation, failures) = if failed.is_empty() {
        ("0 (no failures)".to_string(), "None".to_string())
    } else {
        (format!("{sum} = {syndrome}"), join_positions(failed))
    };
    let result = if syndrome == 0 {
        format!("Syndrome = {syndrome} → No error")
    } else {
        format!("Syndrome = {syndrome} → Error at position {syndrome}")
    };
    let meaning = if syndrome == 0 {
        "Syndrome = 0 means no error detected ✓".to_string()
    } else {
        format!("Syndrome = {syndrome} directly gives the error position")
    };

    TraceStep::new(
        "syndrome",
        StepKind::Formula,
        "Calculate Error Syndrome",
        "Summing the positions of the failed parity checks locates the error",
    )
    .with_formula("Syndrome = Σ(failed parity bit positions)")
    .with_calculation(calculation)
    .with_result(result)
    .with_details([
        format!("Failed parity checks: {failures}"),
        format!(
            "Syndrome calculation: {}",
            if failed.is_empty() { "0" } else { sum.as_str() }
        ),
        format!("Syndrome value: {syndrome} (decimal) = {syndrome:0width$b} (binary)"),
        meaning,
    ])
}

fn correction_step(correction: &Correction, corrected: &BitString, n: usize) -> TraceStep {
    match *correction {
        Correction::Clean => TraceStep::new(
            "no-error",
            StepKind::Result,
            "No Error Detected",
            "All parity checks passed, the codeword is correct",
        )
        .with_result("✓ Transmission successful")
        .with_details(["Syndrome = 0", "No correction needed"]),

        Correction::Flipped { position, from, to } => {
            let bits = corrected
                .iter()
                .enumerate()
                .map(|(index, bit)| {
                    BitRecord::new(index + 1, BitCell::Bit(bit), index + 1 == position)
                })
                .collect();
            TraceStep::new(
                "correction",
                StepKind::Result,
                "Error Correction Applied",
                format!("Single-bit error detected at position {position} and corrected"),
            )
            .with_formula(format!("bit_{{{position}}} = NOT(bit_{{{position}}})"))
            .with_calculation(format!(
                "Flip bit at position {position}: {} → {}",
                symbol(from),
                symbol(to)
            ))
            .with_result(format!("Error corrected at position {position}"))
            .with_bits(bits)
            .with_details([
                format!("Error location: position {position}"),
                format!("Original (erroneous) bit value: {}", symbol(from)),
                format!("Corrected bit value: {}", symbol(to)),
                format!("Corrected codeword: {corrected}"),
            ])
        }

        Correction::Uncorrectable { syndrome } => TraceStep::new(
            "uncorrectable",
            StepKind::Result,
            "Uncorrectable Syndrome",
            format!("Syndrome {syndrome} points past the end of the {n}-bit codeword"),
        )
        .with_result("✗ No correction applied")
        .with_details([
            format!("Syndrome: {syndrome}"),
            format!("Codeword length: {n}"),
            "The received length does not match any Hamming code, so the error cannot be located"
                .to_string(),
        ]),
    }
}

fn extract_step(data_positions: &[usize], data_bits: &BitString) -> TraceStep {
    TraceStep::new(
        "extract",
        StepKind::Result,
        "Extract Data Bits",
        "Drop the parity bits to recover the original data",
    )
    .with_result(format!("Data: {data_bits}"))
    .with_details([
        format!("Data bit positions: {}", join_positions(data_positions)),
        format!("Extracted {} data bits", data_bits.len()),
        format!("Original data: {data_bits}"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::encode;

    fn bits(text: &str) -> BitString {
        text.parse().unwrap()
    }

    #[test]
    fn test_clean_codeword() {
        let decoding = decode(&bits("0110011"));
        assert_eq!(decoding.syndrome, 0);
        assert_eq!(decoding.error_position, None);
        assert_eq!(decoding.correction, Correction::Clean);
        assert_eq!(decoding.corrected_codeword.to_string(), "0110011");
        assert_eq!(decoding.data_bits.to_string(), "1011");
        assert_eq!(decoding.parity_positions, vec![1, 2, 4]);
        assert!(decoding.parity_checks.iter().all(ParityRecord::passed));
        assert!(decoding.trace.find("no-error").is_some());
        assert!(decoding.check().is_ok());
    }

    #[test]
    fn test_corrects_parity_bit_error() {
        // 0110011 with position 4 flipped
        let decoding = decode(&bits("0111011"));
        assert_eq!(decoding.syndrome, 4);
        assert_eq!(decoding.error_position, Some(4));
        assert_eq!(
            decoding.correction,
            Correction::Flipped {
                position: 4,
                from: true,
                to: false
            }
        );
        assert_eq!(decoding.corrected_codeword.to_string(), "0110011");
        assert_eq!(decoding.data_bits.to_string(), "1011");
    }

    #[test]
    fn test_corrects_data_bit_error() {
        // 0110011 with position 6 flipped: checks 2 and 4 fail
        let decoding = decode(&bits("0110001"));
        let failed: Vec<_> = decoding
            .parity_checks
            .iter()
            .filter(|c| !c.passed())
            .map(|c| c.position)
            .collect();
        assert_eq!(failed, vec![2, 4]);
        assert_eq!(decoding.syndrome, 6);
        assert_eq!(decoding.data_bits.to_string(), "1011");
    }

    #[test]
    fn test_every_single_flip_is_corrected() {
        let encoding = encode(&bits("10011010"));
        for index in 0..encoding.codeword.len() {
            let mut damaged = encoding.codeword.clone();
            damaged.toggle(index);
            let decoding = decode(&damaged);
            assert_eq!(decoding.error_position, Some(index + 1));
            assert_eq!(decoding.corrected_codeword, encoding.codeword);
            assert_eq!(decoding.data_bits, encoding.data_bits);
        }
    }

    #[test]
    fn test_syndrome_past_the_end_is_uncorrectable() {
        // n = 5: checks 1, 2 and 4 all fail, syndrome 7 > 5
        let received = bits("11010");
        let decoding = decode(&received);
        assert_eq!(decoding.syndrome, 7);
        assert_eq!(decoding.error_position, None);
        assert_eq!(
            decoding.correction,
            Correction::Uncorrectable { syndrome: 7 }
        );
        assert_eq!(decoding.corrected_codeword, received);
        assert!(decoding.trace.find("uncorrectable").is_some());
        assert!(matches!(
            decoding.check(),
            Err(Error::UncorrectableSyndrome {
                syndrome: 7,
                length: 5
            })
        ));
    }

    #[test]
    fn test_decode_str_filters_input() {
        let decoding = decode_str("0 1 1 0 0 1 1").unwrap();
        assert_eq!(decoding.data_bits.to_string(), "1011");

        assert!(matches!(decode_str("hello"), Err(Error::EmptyInput)));
        assert!(matches!(decode_str(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_empty_codeword_decodes_to_empty_data() {
        let decoding = decode(&BitString::new());
        assert_eq!(decoding.syndrome, 0);
        assert!(decoding.data_bits.is_empty());
        assert!(decoding.parity_positions.is_empty());
    }

    #[test]
    fn test_trace_order() {
        let decoding = decode(&bits("0111011"));
        let ids: Vec<_> = decoding.trace.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "received",
                "parity-positions",
                "check-1",
                "check-2",
                "check-4",
                "syndrome",
                "correction",
                "extract"
            ]
        );
    }

    #[test]
    fn test_syndrome_step_narration() {
        let decoding = decode(&bits("0110001"));
        let step = decoding.trace.find("syndrome").unwrap();
        assert_eq!(step.calculation.as_deref(), Some("2 + 4 = 6"));
        assert_eq!(
            step.result.as_deref(),
            Some("Syndrome = 6 → Error at position 6")
        );
        assert!(step
            .details
            .iter()
            .any(|d| d == "Syndrome value: 6 (decimal) = 0110 (binary)"));

        let clean = decode(&bits("0110011"));
        let step = clean.trace.find("syndrome").unwrap();
        assert_eq!(step.calculation.as_deref(), Some("0 (no failures)"));
    }

    #[test]
    fn test_correction_step_reports_bit_values() {
        let decoding = decode(&bits("0111011"));
        let step = decoding.trace.find("correction").unwrap();
        assert_eq!(
            step.calculation.as_deref(),
            Some("Flip bit at position 4: 1 → 0")
        );
        let highlighted: Vec<_> = step
            .bits
            .iter()
            .filter(|b| b.highlight)
            .map(|b| b.position)
            .collect();
        assert_eq!(highlighted, vec![4]);
    }
}
