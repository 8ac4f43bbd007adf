//! Command-line front end for the Hamming simulator.
//!
//! ```bash
//! # Encode a character and flip position 4 (0-based 3)
//! hamming-sim encode --format ascii A --flip 3 --steps
//!
//! # Decode a received codeword
//! hamming-sim decode 0111011
//!
//! # Whole pipeline with a reproducible random error
//! hamming-sim simulate --format decimal 1234 --seed 7 --export run.txt
//! ```

use clap::{Args, Parser, Subcommand};
use hamming_sim::convert::{convert, Conversion, InputFormat};
use hamming_sim::ecc::{
    decode, decode_str, encode, inject_at, inject_random, inject_random_with, Correction,
    Decoding, Encoding, Injection,
};
use hamming_sim::report::Report;
use hamming_sim::trace::Trace;
use hamming_sim::{BitString, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Hamming code simulator: encode, inject a single-bit error, decode and explain every step
#[derive(Parser, Debug)]
#[command(name = "hamming-sim", version)]
struct Cli {
    /// Log verbosity: -v info, -vv debug, -vvv trace (RUST_LOG overrides)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert input to a binary digit string
    Convert(InputArgs),

    /// Encode input into a Hamming codeword, optionally flipping one bit
    Encode(EncodeArgs),

    /// Decode a received codeword, correcting at most one bit
    Decode(DecodeArgs),

    /// Convert, encode, flip one bit (random unless --flip) and decode
    Simulate(EncodeArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input format: binary, decimal, hexadecimal, ascii or text (unknown names mean binary)
    #[arg(short, long, default_value = "binary")]
    format: String,

    /// Value to convert
    #[arg(allow_hyphen_values = true)]
    input: String,
}

#[derive(Args, Debug)]
struct InjectionArgs {
    /// Flip the bit at this 0-based position after encoding
    #[arg(long, allow_negative_numbers = true, conflicts_with = "random")]
    flip: Option<i64>,

    /// Flip one randomly chosen bit after encoding
    #[arg(long)]
    random: bool,

    /// Seed for the random bit choice, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print every narrated step
    #[arg(long)]
    steps: bool,

    /// Write the full report to FILE
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    injection: InjectionArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Received codeword; characters other than 0 and 1 are ignored
    codeword: String,

    #[command(flatten)]
    output: OutputArgs,
}

impl InjectionArgs {
    /// Applies the requested error, if any. `random_by_default` makes a random flip the
    /// fallback when no position was given.
    fn apply(&self, codeword: &BitString, random_by_default: bool) -> Result<Option<Injection>> {
        if let Some(position) = self.flip {
            return inject_at(codeword, position).map(Some);
        }
        if !(self.random || random_by_default) {
            if self.seed.is_some() {
                warn!("--seed has no effect without --random");
            }
            return Ok(None);
        }
        let injection = match self.seed {
            Some(seed) => inject_random_with(codeword, &mut ChaCha8Rng::seed_from_u64(seed)),
            None => inject_random(codeword),
        }?;
        Ok(Some(injection))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => run_convert(&args),
        Command::Encode(args) => run_encode(&args),
        Command::Decode(args) => run_decode(&args),
        Command::Simulate(args) => run_simulate(&args),
    }
}

fn convert_input(args: &InputArgs) -> Result<Conversion> {
    let format = InputFormat::from(args.format.as_str());
    let conversion = convert(&args.input, format)?;
    info!(
        "converted {} input to {} bits",
        conversion.format,
        conversion.binary.len()
    );
    Ok(conversion)
}

fn run_convert(args: &InputArgs) -> Result<()> {
    let conversion = convert_input(args)?;
    println!("{}", conversion.message);
    println!("Binary: {}", conversion.binary);
    println!("Length: {} bits", conversion.binary.len());
    Ok(())
}

fn run_encode(args: &EncodeArgs) -> Result<()> {
    let conversion = convert_input(&args.input)?;
    let encoding = encode(&conversion.binary);
    let injection = args.injection.apply(&encoding.codeword, false)?;

    print_encoding(&conversion, &encoding);
    if let Some(injection) = &injection {
        print_injection(injection);
    }

    let mut trace = Trace::from(conversion.trace_step());
    trace.append(encoding.trace.clone());
    if let Some(injection) = &injection {
        trace.push(injection.trace_step());
    }
    let report = Report::for_encoding(&conversion, &encoding, injection.as_ref()).steps(&trace);
    emit(&report, &args.output)
}

fn run_decode(args: &DecodeArgs) -> Result<()> {
    let decoding = decode_str(&args.codeword)?;
    print_decoding(&decoding);

    let report = Report::for_decoding(&decoding).steps(&decoding.trace);
    emit(&report, &args.output)
}

fn run_simulate(args: &EncodeArgs) -> Result<()> {
    let conversion = convert_input(&args.input)?;
    let encoding = encode(&conversion.binary);
    let injection = args.injection.apply(&encoding.codeword, true)?;
    let received = injection
        .as_ref()
        .map_or(&encoding.codeword, |injection| &injection.codeword);
    let decoding = decode(received);

    print_encoding(&conversion, &encoding);
    if let Some(injection) = &injection {
        print_injection(injection);
    }
    print_decoding(&decoding);

    let recovered = decoding.data_bits == conversion.binary;
    if recovered {
        println!("Recovered data matches the input");
    } else {
        warn!("recovered data differs from the input");
        println!("Recovered data does NOT match the input");
    }

    let mut trace = Trace::from(conversion.trace_step());
    trace.append(encoding.trace.clone());
    if let Some(injection) = &injection {
        trace.push(injection.trace_step());
    }
    trace.append(decoding.trace.clone());

    let error_position = injection
        .as_ref()
        .map_or_else(|| "None".to_string(), |i| (i.position + 1).to_string());
    let report = Report::new("Hamming Code - Simulation Report")
        .field("User Input", &conversion.input)
        .field("Input Format", conversion.format)
        .field("Binary Stream", &conversion.binary)
        .field("Encoded Codeword", &encoding.codeword)
        .field("Injected Error Position", error_position)
        .field("Received Codeword", &decoding.received)
        .field("Syndrome", decoding.syndrome)
        .field("Corrected Codeword", &decoding.corrected_codeword)
        .field("Extracted Data Bits", &decoding.data_bits)
        .field("Recovered", if recovered { "yes" } else { "no" })
        .steps(&trace);
    emit(&report, &args.output)
}

fn print_encoding(conversion: &Conversion, encoding: &Encoding) {
    println!("Binary:           {}", conversion.binary);
    println!(
        "Parity bits:      {} at positions {:?}",
        encoding.code.parity_bits(),
        encoding.parity_positions
    );
    println!("Encoded codeword: {}", encoding.codeword);
}

fn print_injection(injection: &Injection) {
    println!(
        "Flipped bit:      position {} (index {})",
        injection.position + 1,
        injection.position
    );
    println!("Transmitted:      {}", injection.codeword);
}

fn print_decoding(decoding: &Decoding) {
    println!("Received:         {}", decoding.received);
    println!("Syndrome:         {}", decoding.syndrome);
    match decoding.correction {
        Correction::Clean => println!("No error detected"),
        Correction::Flipped { position, .. } => {
            println!("Corrected bit:    position {position}")
        }
        Correction::Uncorrectable { .. } => {}
    }
    if let Err(err) = decoding.check() {
        warn!("{err}");
        println!("Warning: {err}");
    }
    println!("Corrected:        {}", decoding.corrected_codeword);
    println!("Data bits:        {}", decoding.data_bits);
}

fn emit(report: &Report, output: &OutputArgs) -> Result<()> {
    if output.steps {
        println!();
        print!("{report}");
    }
    if let Some(path) = &output.export {
        std::fs::write(path, report.to_string())?;
        info!("report written to {}", path.display());
        println!("Report written to {}", path.display());
    }
    Ok(())
}
