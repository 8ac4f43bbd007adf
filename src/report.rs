//! Plain-text export of a trace.
//!
//! A report is a title, a block of `Label: value` header lines and then every step in order:
//!
//! ```text
//! Step 1: Input Data Bits
//! Received 4 data bits to encode
//! Result: Data: 1011
//! • Binary representation: 1011
//! ============================================================
//! ```
//!
//! The layout is line-oriented and can be rebuilt from the trace alone.

use crate::convert::Conversion;
use crate::ecc::{Decoding, Encoding, Injection};
use crate::trace::{Trace, TraceStep};
use std::fmt::{self, Display, Formatter};

const SEPARATOR_WIDTH: usize = 60;

/// A titled, printable explanation of one run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    title: String,
    fields: Vec<(String, String)>,
    steps: Vec<TraceStep>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Display) -> Self {
        self.fields.push((label.into(), value.to_string()));
        self
    }

    pub fn steps(mut self, trace: &Trace) -> Self {
        self.steps.extend(trace.iter().cloned());
        self
    }

    /// Header block for an encode run: input, conversion, codeword and any injected error.
    pub fn for_encoding(
        conversion: &Conversion,
        encoding: &Encoding,
        injection: Option<&Injection>,
    ) -> Self {
        let input = if conversion.input.is_empty() {
            "(empty)"
        } else {
            conversion.input.as_str()
        };
        let mut report = Report::new("Hamming Code - Encode Report")
            .field("User Input", input)
            .field("Input Format", conversion.format)
            .field("Binary Stream", &conversion.binary)
            .field("Encoded Codeword", &encoding.codeword);
        if let Some(injection) = injection {
            report = report
                .field("Error Position", injection.position + 1)
                .field("Transmitted Codeword", &injection.codeword);
        }
        report
    }

    /// Header block for a decode run.
    pub fn for_decoding(decoding: &Decoding) -> Self {
        let error_position = decoding
            .error_position
            .map_or_else(|| "None".to_string(), |p| p.to_string());
        Report::new("Hamming Code - Decode Report")
            .field("Received Codeword", &decoding.received)
            .field("Syndrome", decoding.syndrome)
            .field("Error Position", error_position)
            .field("Corrected Codeword", &decoding.corrected_codeword)
            .field("Extracted Data Bits", &decoding.data_bits)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        for (label, value) in &self.fields {
            writeln!(f, "{label}: {value}")?;
        }
        writeln!(f)?;
        for (index, step) in self.steps.iter().enumerate() {
            write_step(f, index + 1, step)?;
        }
        Ok(())
    }
}

fn write_step(f: &mut Formatter<'_>, number: usize, step: &TraceStep) -> fmt::Result {
    writeln!(f, "Step {number}: {}", step.title)?;
    if !step.description.is_empty() {
        writeln!(f, "{}", step.description)?;
    }
    if let Some(formula) = &step.formula {
        writeln!(f, "Formula: {formula}")?;
    }
    if let Some(calculation) = &step.calculation {
        writeln!(f, "Calculation: {calculation}")?;
    }
    if let Some(result) = &step.result {
        writeln!(f, "Result: {result}")?;
    }
    if !step.bits.is_empty() {
        let cells: String = step.bits.iter().map(|b| b.value.to_string()).collect();
        writeln!(f, "Bits: {cells}")?;
    }
    for detail in &step.details {
        writeln!(f, "• {detail}")?;
    }
    writeln!(f, "{}", "=".repeat(SEPARATOR_WIDTH))
}
