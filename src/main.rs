//! `bitmath` command line.
//!
//! Run with: cargo run -- next-pow2 5 1025 -1
//! Or:       RUST_LOG=info cargo run --release -- scan 1 0x1000000
//!
//! `scan` without arguments reads its range from `BITMATH_SCAN_START` and
//! `BITMATH_SCAN_END`.

use bitmath::{
  Operand,
  divergence::{self, DivergenceReport},
  errors::BitMathError,
};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
  name = "bitmath",
  about = "Power-of-two and integer log2 over 32-bit operands"
)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
  /// Round each operand up to the next power of two
  #[command(name = "next-pow2")]
  NextPow2 {
    #[arg(required = true, allow_hyphen_values = true)]
    operands: Vec<Operand>,
  },
  /// Exact floor(log2) of each operand
  #[command(name = "log2")]
  Log2 {
    #[arg(required = true, allow_hyphen_values = true)]
    operands: Vec<Operand>,
  },
  /// Float-based floor(log2) of each operand; may differ near powers of two
  #[command(name = "log2-approx")]
  Log2Approx {
    #[arg(required = true, allow_hyphen_values = true)]
    operands: Vec<Operand>,
  },
  /// List operands in [start, end] where log2-approx differs from log2
  #[command(name = "scan")]
  Scan {
    #[arg(
      env = "BITMATH_SCAN_START",
      default_value = "1",
      allow_hyphen_values = true
    )]
    start: Operand,
    #[arg(
      env = "BITMATH_SCAN_END",
      default_value = "0x1000000",
      allow_hyphen_values = true
    )]
    end: Operand,
  },
}

fn write_results<W: Write>(
  out: &mut W,
  operands: &[Operand],
  f: fn(Operand) -> u32,
) -> io::Result<()> {
  for op in operands {
    writeln!(out, "{op}\t{}", f(*op))?;
  }
  Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &DivergenceReport) -> io::Result<()> {
  for d in &report.divergences {
    writeln!(out, "{d}")?;
  }
  writeln!(
    out,
    "scanned [{}, {}]: {} operands, {} divergences",
    report.start,
    report.end,
    report.checked,
    report.divergences.len()
  )
}

fn run<W: Write>(command: Command, out: &mut W) -> Result<(), BitMathError> {
  debug!(command = ?command, "dispatch");

  let written = match command {
    Command::NextPow2 { operands } => write_results(out, &operands, Operand::next_pow2),
    Command::Log2 { operands } => write_results(out, &operands, Operand::log2),
    Command::Log2Approx { operands } => write_results(out, &operands, Operand::log2_approx),
    Command::Scan { start, end } => {
      let report = divergence::scan(start.get(), end.get())?;
      write_report(out, &report)
    }
  };
  written.map_err(|e| BitMathError::Output {
    reason: e.to_string(),
  })
}

fn main() -> ExitCode {
  // logs go to stderr so results can be piped from stdout
  tracing_subscriber::fmt()
    .with_target(false)
    .with_ansi(true)
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  match run(cli.command, &mut io::stdout().lock()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{e}");
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bitmath::divergence::Divergence;

  fn parse(args: &[&str]) -> Result<Command, clap::Error> {
    Cli::try_parse_from(args).map(|cli| cli.command)
  }

  fn ops(values: &[u32]) -> Vec<Operand> {
    values.iter().copied().map(Operand::new).collect()
  }

  #[test]
  fn test_parse_operand_commands() {
    assert_eq!(
      parse(&["bitmath", "next-pow2", "5", "0x400", "-1"]).unwrap(),
      Command::NextPow2 {
        operands: ops(&[5, 1024, u32::MAX])
      }
    );
    assert_eq!(
      parse(&["bitmath", "log2", "1023"]).unwrap(),
      Command::Log2 {
        operands: ops(&[1023])
      }
    );
    assert_eq!(
      parse(&["bitmath", "log2-approx", "4294967301", "-3.5"]).unwrap(),
      Command::Log2Approx {
        operands: ops(&[5, 0xFFFF_FFFD])
      }
    );
  }

  #[test]
  fn test_parse_rejects_bad_input() {
    assert!(parse(&["bitmath", "frobnicate"]).is_err());
    assert!(parse(&["bitmath", "log2"]).is_err());
    assert!(parse(&["bitmath", "next-pow2", "abc"]).is_err());
  }

  #[test]
  fn test_scan_range_from_args_env_and_defaults() {
    // the only test that resolves scan's range without explicit arguments
    // SAFETY: no other test reads these variables
    unsafe {
      std::env::set_var("BITMATH_SCAN_START", "0x10");
      std::env::set_var("BITMATH_SCAN_END", "32");
    }
    assert_eq!(
      parse(&["bitmath", "scan"]).unwrap(),
      Command::Scan {
        start: Operand::new(16),
        end: Operand::new(32)
      }
    );
    assert_eq!(
      parse(&["bitmath", "scan", "5", "6"]).unwrap(),
      Command::Scan {
        start: Operand::new(5),
        end: Operand::new(6)
      }
    );

    unsafe {
      std::env::remove_var("BITMATH_SCAN_START");
      std::env::remove_var("BITMATH_SCAN_END");
    }
    assert_eq!(
      parse(&["bitmath", "scan"]).unwrap(),
      Command::Scan {
        start: Operand::new(1),
        end: Operand::new(1 << 24)
      }
    );
  }

  #[test]
  fn test_write_results() {
    let mut out = Vec::new();
    write_results(&mut out, &ops(&[5, 1024]), Operand::next_pow2).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "5\t8\n1024\t1024\n");
  }

  #[test]
  fn test_write_report() {
    let report = DivergenceReport {
      start: 1,
      end: 8,
      checked: 8,
      divergences: vec![Divergence {
        value: 4,
        exact: 2,
        approx: 1,
      }],
    };
    let mut out = Vec::new();
    write_report(&mut out, &report).unwrap();
    assert_eq!(
      String::from_utf8(out).unwrap(),
      "4\texact=2\tapprox=1\nscanned [1, 8]: 8 operands, 1 divergences\n"
    );
  }

  #[test]
  fn test_run_writes_results_and_propagates_errors() {
    let mut out = Vec::new();
    run(
      Command::Log2 {
        operands: ops(&[0, 1024]),
      },
      &mut out,
    )
    .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0\t0\n1024\t10\n");

    let mut out = Vec::new();
    assert_eq!(
      run(
        Command::Scan {
          start: Operand::new(9),
          end: Operand::new(3)
        },
        &mut out
      ),
      Err(BitMathError::InvalidRange { start: 9, end: 3 })
    );
  }

  #[test]
  fn test_run_reports_write_failure() {
    struct Closed;
    impl Write for Closed {
      fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
      }
      fn flush(&mut self) -> io::Result<()> {
        Ok(())
      }
    }

    let err = run(
      Command::NextPow2 {
        operands: ops(&[5]),
      },
      &mut Closed,
    )
    .unwrap_err();
    assert!(matches!(err, BitMathError::Output { .. }));
  }
}
