//! This module defines errors returned by the library.
use core::fmt::Debug;
use thiserror::Error;

/// Errors returned by bitmath
///
/// The bit primitives themselves are total; only text parsing, range
/// validation and writing results can fail.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BitMathError {
  /// returned if the supplied text is not a number in any accepted notation
  #[error("InvalidOperand: {input:?}")]
  InvalidOperand {
    /// The text that failed to parse
    input: String,
  },
  /// returned if a scan range starts after it ends
  #[error("InvalidRange: start {start} > end {end}")]
  InvalidRange {
    /// First operand of the requested range
    start: u32,
    /// Last operand of the requested range
    end: u32,
  },
  /// returned if results cannot be written to the output
  #[error("Output: {reason}")]
  Output {
    /// The underlying I/O failure
    reason: String,
  },
}
