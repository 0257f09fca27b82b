// Copyright (c) The bitmath Authors.
// SPDX-License-Identifier: MIT
// This file is part of the bitmath project.
// See the LICENSE file in the project root for full license information.

//! Reduction of arbitrary numbers into the 32-bit unsigned operand domain.
//!
//! Every input is folded the way a 32-bit bitwise operator folds its
//! argument: truncate toward zero, then keep the low 32 bits of the
//! two's-complement pattern. Nothing is clamped and nothing is rejected.
//! NaN and the infinities become `0`.

use crate::{errors::BitMathError, math};
use core::{fmt, str::FromStr};
use num_traits::Float;

/// A value in `[0, 2^32 - 1]` that the bit primitives operate on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Operand(u32);

impl Operand {
  /// Wraps an already in-range value.
  pub const fn new(v: u32) -> Self {
    Operand(v)
  }

  /// The underlying 32-bit pattern.
  pub const fn get(self) -> u32 {
    self.0
  }

  /// See [`math::next_pow2`].
  pub const fn next_pow2(self) -> u32 {
    math::next_pow2(self.0)
  }

  /// See [`math::log2`].
  pub const fn log2(self) -> u32 {
    math::log2(self.0)
  }

  /// See [`math::log2_approx`]; may differ from [`Operand::log2`] near powers of two.
  pub fn log2_approx(self) -> u32 {
    math::log2_approx(self.0)
  }

  /// See [`math::is_pow2`].
  pub const fn is_power_of_two(self) -> bool {
    math::is_pow2(self.0)
  }
}

impl From<u32> for Operand {
  fn from(v: u32) -> Self {
    Operand(v)
  }
}

impl From<Operand> for u32 {
  fn from(op: Operand) -> Self {
    op.0
  }
}

impl fmt::Display for Operand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

/// Conversion into an [`Operand`] by 32-bit two's-complement truncation.
pub trait ToOperand {
  /// Folds `self` into the operand domain.
  fn to_operand(self) -> Operand;
}

macro_rules! impl_to_operand_int {
  ($($t:ty),* $(,)?) => {
    $(
      impl ToOperand for $t {
        #[inline]
        fn to_operand(self) -> Operand {
          // `as` on integers keeps the low 32 bits of the two's-complement pattern
          Operand(self as u32)
        }
      }
    )*
  };
}

impl_to_operand_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

const MODULUS: f64 = 4_294_967_296.0;

fn truncate_float<F: Float>(x: F) -> Operand {
  // `as u32` on a float saturates, so reduce modulo 2^32 first
  let low = x
    .trunc()
    .to_f64()
    .filter(|t| t.is_finite())
    .map_or(0, |t| t.rem_euclid(MODULUS) as u32);
  Operand(low)
}

impl ToOperand for f32 {
  fn to_operand(self) -> Operand {
    truncate_float(self)
  }
}

impl ToOperand for f64 {
  fn to_operand(self) -> Operand {
    truncate_float(self)
  }
}

const RADIX_PREFIXES: [(&str, u32); 6] = [
  ("0x", 16),
  ("0X", 16),
  ("0b", 2),
  ("0B", 2),
  ("0o", 8),
  ("0O", 8),
];

/// Folds integer digits modulo 2^32, so the width of the text never matters.
fn fold_digits(digits: &str, radix: u32) -> Option<u32> {
  if digits.is_empty() {
    return None;
  }
  digits.chars().try_fold(0u32, |acc, c| {
    Some(acc.wrapping_mul(radix).wrapping_add(c.to_digit(radix)?))
  })
}

/// Parses decimal, `0x`/`0b`/`0o` prefixed, negative, and floating-point text,
/// then truncates it into the operand domain.
impl FromStr for Operand {
  type Err = BitMathError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || BitMathError::InvalidOperand {
      input: s.to_string(),
    };

    let text = s.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if unsigned.starts_with(['+', '-']) {
      return Err(invalid());
    }

    let low = match RADIX_PREFIXES
      .iter()
      .find_map(|(prefix, radix)| unsigned.strip_prefix(*prefix).map(|d| (d, *radix)))
    {
      Some((digits, radix)) => Some(fold_digits(digits, radix).ok_or_else(invalid)?),
      None => fold_digits(unsigned, 10),
    };

    match low {
      Some(low) => Ok(Operand(if negative { low.wrapping_neg() } else { low })),
      // not an integer, so let the float rules truncate it
      None => text
        .parse::<f64>()
        .map(ToOperand::to_operand)
        .map_err(|_| invalid()),
    }
  }
}
