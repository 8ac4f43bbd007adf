//! Step-by-step explanation of a computation.
//!
//! Encoding, decoding, conversion and error injection each narrate what they
//! do as a sequence of [`TraceStep`]s. A [`Trace`] only ever grows: steps are
//! appended in causal order and never edited afterwards. The presentation
//! layer renders the steps; [`crate::report`] turns them into plain text.

use std::fmt::{self, Display, Formatter};

/// What sort of narration a step carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Info,
    Formula,
    Calculation,
    Result,
    Visual,
}

/// Contents of one cell in a bit diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitCell {
    /// A resolved bit value
    Bit(bool),
    /// A parity slot whose value has not been computed yet
    Pending,
}

impl Display for BitCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BitCell::Bit(true) => f.write_str("1"),
            BitCell::Bit(false) => f.write_str("0"),
            BitCell::Pending => f.write_str("P"),
        }
    }
}

/// One cell of a bit diagram attached to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRecord {
    /// 1-based codeword position
    pub position: usize,
    pub value: BitCell,
    pub highlight: bool,
}

impl BitRecord {
    pub fn new(position: usize, value: BitCell, highlight: bool) -> Self {
        Self {
            position,
            value,
            highlight,
        }
    }
}

/// A single narrated computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Stable identifier such as `parity-4` or `syndrome`
    pub id: String,
    pub kind: StepKind,
    pub title: String,
    pub description: String,
    pub formula: Option<String>,
    pub calculation: Option<String>,
    pub result: Option<String>,
    pub bits: Vec<BitRecord>,
    pub details: Vec<String>,
}

impl TraceStep {
    pub fn new(
        id: impl Into<String>,
        kind: StepKind,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: description.into(),
            formula: None,
            calculation: None,
            result: None,
            bits: Vec::new(),
            details: Vec::new(),
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_calculation(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = Some(calculation.into());
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn with_bits(mut self, bits: Vec<BitRecord>) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details.extend(details.into_iter().map(Into::into));
        self
    }
}

/// Append-only log of [`TraceStep`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    /// Appends every step of `other` after the steps already recorded.
    pub fn append(&mut self, other: Trace) {
        self.steps.extend(other.steps);
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }

    /// Finds the first step with the given id.
    pub fn find(&self, id: &str) -> Option<&TraceStep> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn into_steps(self) -> Vec<TraceStep> {
        self.steps
    }
}

impl From<TraceStep> for Trace {
    fn from(step: TraceStep) -> Self {
        Self { steps: vec![step] }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceStep;
    type IntoIter = std::slice::Iter<'a, TraceStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Joins positions as `1, 2, 4`.
pub(crate) fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders bit values as an XOR chain `1 ⊕ 0 ⊕ 1`.
pub(crate) fn xor_chain(values: &[bool]) -> String {
    if values.is_empty() {
        return "0".to_string();
    }
    values
        .iter()
        .map(|&bit| crate::bits::symbol(bit).to_string())
        .collect::<Vec<_>>()
        .join(" ⊕ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_optional_fields() {
        let step = TraceStep::new("syndrome", StepKind::Formula, "Syndrome", "sum it up")
            .with_formula("S = Σ p")
            .with_calculation("1 + 4 = 5")
            .with_result("5")
            .with_detail("one")
            .with_details(["two", "three"]);

        assert_eq!(step.formula.as_deref(), Some("S = Σ p"));
        assert_eq!(step.calculation.as_deref(), Some("1 + 4 = 5"));
        assert_eq!(step.result.as_deref(), Some("5"));
        assert_eq!(step.details, vec!["one", "two", "three"]);
        assert!(step.bits.is_empty());
    }

    #[test]
    fn test_trace_keeps_order_across_append() {
        let mut first = Trace::new();
        first.push(TraceStep::new("a", StepKind::Info, "A", ""));
        let mut second = Trace::new();
        second.push(TraceStep::new("b", StepKind::Info, "B", ""));
        second.push(TraceStep::new("c", StepKind::Info, "C", ""));

        first.append(second);
        let ids: Vec<_> = first.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(first.find("b").is_some());
        assert!(first.find("z").is_none());
    }

    #[test]
    fn test_bit_cell_symbols() {
        assert_eq!(BitCell::Bit(true).to_string(), "1");
        assert_eq!(BitCell::Bit(false).to_string(), "0");
        assert_eq!(BitCell::Pending.to_string(), "P");
    }

    #[test]
    fn test_helpers() {
        assert_eq!(join_positions(&[1, 2, 4]), "1, 2, 4");
        assert_eq!(xor_chain(&[true, false, true]), "1 ⊕ 0 ⊕ 1");
        assert_eq!(xor_chain(&[]), "0");
    }
}
