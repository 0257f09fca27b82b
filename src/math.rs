// Copyright (c) The bitmath Authors.
// SPDX-License-Identifier: MIT
// This file is part of the bitmath project.
// See the LICENSE file in the project root for full license information.

//! Power-of-two and base-2 logarithm primitives over `u32`.
//!
//! | Function | `0` maps to | Overflow |
//! |----------|-------------|----------|
//! | [`next_pow2`] | `1` | wraps to `0` above `2^31` |
//! | [`log2`] | `0` | none |
//! | [`log2_approx`] | `0` | none |

use crate::operand::ToOperand;

/// Returns the smallest power of two that is `>= v`.
///
/// `next_pow2(0) == 1`. Any `v > 2^31` has no power of two in range, so the
/// final increment wraps and the result is `0`.
pub const fn next_pow2(v: u32) -> u32 {
  let mut v = v + (v == 0) as u32;
  v -= 1;
  v |= v >> 1;
  v |= v >> 2;
  v |= v >> 4;
  v |= v >> 8;
  v |= v >> 16;
  v.wrapping_add(1)
}

/// Returns `floor(log2(v))`, the index of the highest set bit of `v`.
///
/// Five fixed stages of binary search over the bit position, no branches and
/// no floating point. `log2(0) == 0` even though the logarithm is undefined there.
pub const fn log2(v: u32) -> u32 {
  let mut v = v;

  let mut r = ((v > 0xFFFF) as u32) << 4;
  v >>= r;

  let mut shift = ((v > 0xFF) as u32) << 3;
  v >>= shift;
  r |= shift;

  shift = ((v > 0xF) as u32) << 2;
  v >>= shift;
  r |= shift;

  shift = ((v > 0x3) as u32) << 1;
  v >>= shift;
  r |= shift;

  r | (v >> 1)
}

/// Approximates `floor(log2(v))` through `f64::log2`.
///
/// The float result is truncated toward zero with the same 32-bit rule as
/// [`ToOperand`], so `log2_approx(0) == 0`. Near exact powers of two the
/// float logarithm can round across the integer boundary and disagree with
/// [`log2`] by one. Callers that need the exact bit index must use [`log2`];
/// see [`crate::divergence::scan`] to enumerate the disagreements.
pub fn log2_approx(v: u32) -> u32 {
  f64::from(v).log2().to_operand().get()
}

/// Returns `true` if `v` has exactly one bit set.
pub const fn is_pow2(v: u32) -> bool {
  v != 0 && v & (v - 1) == 0
}
