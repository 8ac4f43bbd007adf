//! Hamming encoding with a step-by-step trace.
//!
//! Encoding runs in a fixed order:
//! 1. size the code (`2^r >= m + r + 1`)
//! 2. lay out data bits around the power-of-two parity slots
//! 3. compute each parity bit in ascending position order
//! 4. emit the finished codeword
//!
//! Parity bits are written into the buffer as soon as they are computed, so a later parity bit
//! reads whatever an earlier one left there.

use crate::bits::BitString;
use crate::ecc::hamming::{HammingCode, Sizing};
use crate::ecc::ParityRecord;
use crate::trace::{join_positions, xor_chain, BitCell, BitRecord, StepKind, Trace, TraceStep};
use log::{debug, info};

/// Result of encoding a data bit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub codeword: BitString,
    pub parity_positions: Vec<usize>,
    pub parity_calculations: Vec<ParityRecord>,
    pub data_bits: BitString,
    pub code: HammingCode,
    pub trace: Trace,
}

/// Encodes `data` into a Hamming codeword.
///
/// Any bit string can be encoded, including the empty one, which yields an empty codeword.
pub fn encode(data: &BitString) -> Encoding {
    let m = data.len();
    let mut trace = Trace::new();
    trace.push(input_step(data));

    let sizing = HammingCode::sizing(m);
    trace.push(sizing_step(&sizing));
    let code = sizing.code;
    let n = code.total_bits();

    let parity_positions = code.parity_positions();
    trace.push(parity_positions_step(&parity_positions));

    // Data bits fill the gaps between parity slots, in their original order.
    let mut codeword = BitString::zeroed(n);
    for (position, bit) in code.data_positions().into_iter().zip(data.iter()) {
        codeword.set(position - 1, bit);
    }
    trace.push(layout_step(&code, &codeword));

    let mut parity_calculations = Vec::with_capacity(parity_positions.len());
    for &position in &parity_positions {
        let record = ParityRecord::compute(&code, position, |i| codeword.at(i));
        codeword.set(position - 1, record.parity);
        debug!(
            "P{} over [{}] = {}",
            position,
            join_positions(&record.covered),
            u8::from(record.parity)
        );
        trace.push(parity_step(&record));
        parity_calculations.push(record);
    }

    trace.push(final_step(&code, &codeword));
    info!(
        "encoded {m} data bits into a {n}-bit codeword with {} parity bits",
        code.parity_bits()
    );

    Encoding {
        codeword,
        parity_positions,
        parity_calculations,
        data_bits: data.clone(),
        code,
        trace,
    }
}

fn input_step(data: &BitString) -> TraceStep {
    TraceStep::new(
        "input",
        StepKind::Info,
        "Input Data Bits",
        format!("Received {} data bits to encode", data.len()),
    )
    .with_result(format!("Data: {data}"))
    .with_details([
        format!("Binary representation: {data}"),
        format!("Total data bits (m): {}", data.len()),
    ])
}

fn sizing_step(sizing: &Sizing) -> TraceStep {
    let m = sizing.code.data_bits();
    let tested = sizing.candidates.iter().map(|c| {
        if c.accepted {
            format!("2^{} = {} ≥ {} + {} + 1 = {} ✓", c.r, c.capacity, m, c.r, c.required)
        } else {
            format!("2^{} = {} < {} + {} + 1 = {}", c.r, c.capacity, m, c.r, c.required)
        }
    });

    TraceStep::new(
        "parity-count",
        StepKind::Formula,
        "Calculate Required Parity Bits",
        "Find the smallest r whose 2^r positions can name every bit of the codeword plus the no-error case",
    )
    .with_formula("2^{r} ≥ m + r + 1")
    .with_calculation(format!(
        "m = {m}, testing r = 0, 1, 2, ... until the condition holds"
    ))
    .with_result(format!("r = {} parity bits needed", sizing.code.parity_bits()))
    .with_details(tested)
}

fn parity_positions_step(positions: &[usize]) -> TraceStep {
    TraceStep::new(
        "parity-positions",
        StepKind::Info,
        "Identify Parity Bit Positions",
        "Parity bits sit at the positions that are powers of 2",
    )
    .with_result(format!("Positions: {}", join_positions(positions)))
    .with_details(
        positions
            .iter()
            .enumerate()
            .map(|(k, p)| format!("P{} at position {p} (2^{k})", k + 1)),
    )
}

fn layout_step(code: &HammingCode, codeword: &BitString) -> TraceStep {
    let bits = (1..=code.total_bits())
        .map(|position| {
            if code.is_parity_position(position) {
                BitRecord::new(position, BitCell::Pending, false)
            } else {
                BitRecord::new(position, BitCell::Bit(codeword.at(position)), true)
            }
        })
        .collect();

    TraceStep::new(
        "layout",
        StepKind::Visual,
        "Initial Codeword Layout",
        "Data bits placed at non-parity positions, parity slots marked P",
    )
    .with_result(format!(
        "Total codeword length: {} bits ({} data + {} parity)",
        code.total_bits(),
        code.data_bits(),
        code.parity_bits()
    ))
    .with_bits(bits)
    .with_details([
        format!("Data bit positions: {}", join_positions(&code.data_positions())),
        format!(
            "Parity bit positions: {}",
            join_positions(&code.parity_positions())
        ),
    ])
}

fn parity_step(record: &ParityRecord) -> TraceStep {
    let p = record.position;
    let value = u8::from(record.parity);
    let chain = xor_chain(&record.bit_values);
    let bits = record
        .covered
        .iter()
        .zip(&record.bit_values)
        .map(|(&position, &bit)| BitRecord::new(position, BitCell::Bit(bit), position == p))
        .collect();

    TraceStep::new(
        format!("parity-{p}"),
        StepKind::Calculation,
        format!("Calculate Parity Bit P_{{{p}}}"),
        format!("Position {p} covers every position whose binary form has the {p}s bit set"),
    )
    .with_formula(record.formula())
    .with_calculation(format!("{chain} = {value}"))
    .with_result(format!("P_{{{p}}} = {value}"))
    .with_bits(bits)
    .with_details([
        format!("Checking positions: {}", join_positions(&record.covered)),
        format!("Bit values at those positions: {}", record.value_list()),
        format!("XOR calculation (even parity): {chain} = {value}"),
        format!("Result: parity bit P{p} is set to {value}"),
    ])
}

fn final_step(code: &HammingCode, codeword: &BitString) -> TraceStep {
    let bits = (1..=code.total_bits())
        .map(|position| {
            BitRecord::new(
                position,
                BitCell::Bit(codeword.at(position)),
                code.is_parity_position(position),
            )
        })
        .collect();

    TraceStep::new(
        "final",
        StepKind::Result,
        "Final Encoded Codeword",
        "Complete Hamming code with every parity bit filled in",
    )
    .with_result(format!("Encoded: {codeword}"))
    .with_bits(bits)
    .with_details([
        format!("Total bits: {}", code.total_bits()),
        format!("Data bits: {}", code.data_bits()),
        format!("Parity bits: {}", code.parity_bits()),
        format!("Codeword: {codeword}"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(text: &str) -> BitString {
        text.parse().unwrap()
    }

    #[test]
    fn test_encode_7_4() {
        let encoding = encode(&bits("1011"));
        assert_eq!(encoding.code.parity_bits(), 3);
        assert_eq!(encoding.code.total_bits(), 7);
        assert_eq!(encoding.parity_positions, vec![1, 2, 4]);
        assert_eq!(encoding.codeword.to_string(), "0110011");

        let data: String = [3, 5, 6, 7]
            .iter()
            .map(|&p| crate::bits::symbol(encoding.codeword.at(p)))
            .collect();
        assert_eq!(data, "1011");
    }

    #[test]
    fn test_parity_records() {
        let encoding = encode(&bits("1011"));
        let records = &encoding.parity_calculations;
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].position, 1);
        assert_eq!(records[0].covered, vec![1, 3, 5, 7]);
        assert!(!records[0].parity);

        assert_eq!(records[1].position, 2);
        assert_eq!(records[1].covered, vec![2, 3, 6, 7]);
        assert!(records[1].parity);

        assert_eq!(records[2].position, 4);
        assert_eq!(records[2].bit_values, vec![false, false, true, true]);
        assert!(!records[2].parity);
    }

    #[test]
    fn test_every_covering_set_has_even_parity() {
        let encoding = encode(&bits("110100111010110"));
        for record in &encoding.parity_calculations {
            let ones = record
                .covered
                .iter()
                .filter(|&&i| encoding.codeword.at(i))
                .count();
            assert_eq!(ones % 2, 0, "P{} is odd", record.position);
        }
    }

    #[test]
    fn test_empty_data() {
        let encoding = encode(&BitString::new());
        assert!(encoding.codeword.is_empty());
        assert!(encoding.parity_positions.is_empty());
        assert!(encoding.parity_calculations.is_empty());
        assert!(encoding.trace.find("final").is_some());
    }

    #[test]
    fn test_single_bit() {
        // m = 1 needs r = 2: Hamming(3,1), the repetition code
        let encoding = encode(&bits("1"));
        assert_eq!(encoding.codeword.to_string(), "111");
        let encoding = encode(&bits("0"));
        assert_eq!(encoding.codeword.to_string(), "000");
    }

    #[test]
    fn test_trace_order() {
        let encoding = encode(&bits("1011"));
        let ids: Vec<_> = encoding.trace.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "input",
                "parity-count",
                "parity-positions",
                "layout",
                "parity-1",
                "parity-2",
                "parity-4",
                "final"
            ]
        );
    }

    #[test]
    fn test_sizing_step_lists_every_candidate() {
        let encoding = encode(&bits("1011"));
        let step = encoding.trace.find("parity-count").unwrap();
        assert_eq!(step.details.len(), 4);
        assert!(step.details[0].starts_with("2^0 = 1 < 4 + 0 + 1 = 5"));
        assert!(step.details[3].ends_with('✓'));
        assert_eq!(step.result.as_deref(), Some("r = 3 parity bits needed"));
    }

    #[test]
    fn test_layout_marks_parity_slots_pending() {
        let encoding = encode(&bits("1011"));
        let layout = encoding.trace.find("layout").unwrap();
        let cells: String = layout.bits.iter().map(|b| b.value.to_string()).collect();
        assert_eq!(cells, "PP1P011");
    }

    #[test]
    fn test_parity_step_narrates_xor() {
        let encoding = encode(&bits("1011"));
        let step = encoding.trace.find("parity-2").unwrap();
        assert_eq!(
            step.formula.as_deref(),
            Some("P_{2} = bit_{2} ⊕ bit_{3} ⊕ bit_{6} ⊕ bit_{7}")
        );
        assert_eq!(step.calculation.as_deref(), Some("0 ⊕ 1 ⊕ 1 ⊕ 1 = 1"));
        assert_eq!(step.result.as_deref(), Some("P_{2} = 1"));
        assert!(step.bits.iter().any(|b| b.position == 2 && b.highlight));
    }
}
