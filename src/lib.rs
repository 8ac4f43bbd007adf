//! hamming-sim: an educational simulator for Hamming error-correcting codes.
//!
//! The engine converts user input to bits, encodes them into a Hamming codeword, optionally
//! flips one bit to simulate a transmission error, and decodes the received codeword while
//! correcting at most one bit. Every stage narrates its arithmetic as a [`trace::Trace`] that a
//! front end can render or export with [`report::Report`].
//!
//! - `bits`: the [`BitString`] type
//! - `convert`: binary / decimal / hexadecimal / text input conversion
//! - `ecc`: the Hamming layout, encoder, error injector and decoder
//! - `trace`: narrated computation steps
//! - `report`: plain-text export

pub mod bits;
pub mod convert;
pub mod ecc;
pub mod error;
pub mod report;
pub mod trace;

pub use bits::BitString;
pub use convert::{convert, Conversion, InputFormat};
pub use ecc::{
    decode, decode_str, encode, inject_at, inject_random, inject_random_with, Correction,
    Decoding, Encoding, HammingCode, Injection, ParityRecord,
};
pub use error::{Error, Result};
pub use report::Report;
pub use trace::{BitCell, BitRecord, StepKind, Trace, TraceStep};
