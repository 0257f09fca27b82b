// Copyright (c) The bitmath Authors.
// SPDX-License-Identifier: MIT
// This file is part of the bitmath project.
// See the LICENSE file in the project root for full license information.

//! Enumeration of operands where [`log2_approx`] disagrees with [`log2`].
//!
//! The float-based logarithm is allowed to round across an integer boundary
//! near exact powers of two. Rather than papering over that, callers can scan
//! a range and get every disagreement back as a [`DivergenceReport`].

use crate::{
  errors::BitMathError,
  math::{log2, log2_approx},
  start_span,
};
use core::fmt;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, info_span};

/// Largest relative distance (as a right shift) from a power of two at which
/// a divergence is still attributed to float rounding at that boundary.
const NEAR_POW2_SHIFT: u32 = 20;

/// One operand where the two logarithms differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Divergence {
  /// The operand
  pub value: u32,
  /// Result of [`log2`]
  pub exact: u32,
  /// Result of [`log2_approx`]
  pub approx: u32,
}

impl Divergence {
  /// Evaluates both logarithms at `value`, returning `None` when they agree.
  pub fn at(value: u32) -> Option<Self> {
    let exact = log2(value);
    let approx = log2_approx(value);
    (exact != approx).then_some(Divergence {
      value,
      exact,
      approx,
    })
  }

  /// Whether `value` lies within `value / 2^20` (at least 1) of a power of two.
  ///
  /// `0` has no highest set bit and is never near a power of two.
  pub fn is_near_power_of_two(&self) -> bool {
    if self.value == 0 {
      return false;
    }
    let v = u64::from(self.value);
    let below = 1u64 << log2(self.value);
    let above = below << 1;
    let distance = (v - below).min(above - v);
    distance <= (v >> NEAR_POW2_SHIFT).max(1)
  }
}

impl fmt::Display for Divergence {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}\texact={}\tapprox={}",
      self.value, self.exact, self.approx
    )
  }
}

/// The outcome of scanning `[start, end]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivergenceReport {
  /// First operand scanned
  pub start: u32,
  /// Last operand scanned (inclusive)
  pub end: u32,
  /// Number of operands evaluated
  pub checked: u64,
  /// Every disagreement, ordered by operand
  pub divergences: Vec<Divergence>,
}

impl DivergenceReport {
  /// True when both logarithms agreed on the whole range.
  pub fn is_clean(&self) -> bool {
    self.divergences.is_empty()
  }
}

/// Compares [`log2_approx`] against [`log2`] on every operand in `[start, end]`.
pub fn scan(start: u32, end: u32) -> Result<DivergenceReport, BitMathError> {
  if start > end {
    return Err(BitMathError::InvalidRange { start, end });
  }

  let (span, t) = start_span!("divergence_scan", start, end);
  let _guard = span.enter();

  // rayon's collect keeps the range order, so no sort is needed
  let divergences: Vec<Divergence> = (start..=end)
    .into_par_iter()
    .filter_map(Divergence::at)
    .collect();

  info!(
    elapsed_ms = t.elapsed().as_millis(),
    divergences = divergences.len(),
    "divergence scan finished"
  );

  Ok(DivergenceReport {
    start,
    end,
    checked: u64::from(end - start) + 1,
    divergences,
  })
}
