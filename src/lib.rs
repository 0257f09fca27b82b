//! This library implements branch-free bit primitives over 32-bit operands:
//! rounding up to the next power of two, the exact integer base-2 logarithm,
//! and a float-based approximation of that logarithm whose rounding caveat is
//! made observable through a divergence scan.
#![deny(
  warnings,
  unused,
  future_incompatible,
  nonstandard_style,
  rust_2018_idioms,
  missing_docs
)]
#![forbid(unsafe_code)]

// public modules
pub mod divergence;
pub mod errors;
pub mod math;
pub mod operand;

pub use math::{is_pow2, log2, log2_approx, next_pow2};
pub use operand::{Operand, ToOperand};

/// Start a span + timer, return `(Span, Instant)`.
macro_rules! start_span {
  ($name:expr $(, $($fmt:tt)+)?) => {{
    let span = info_span!($name $(, $($fmt)+)?);
    (span, Instant::now())
  }};
}
pub(crate) use start_span;
