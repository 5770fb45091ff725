// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Deterministic synthetic traffic for accuracy experiments and benchmarks.
//!
//! Flow keys come from two distributions:
//!
//! - [`UniformFlows`]: every flow equally likely.
//! - [`ZipfFlows`]: a few heavy flows and a long tail of light ones, the usual
//!   shape of real traffic.
//!
//! Both are seeded, so the same seed replays the same packet stream.

use crate::error::Error;

/// Random number source for workloads.
pub trait RandomSource {
    /// Returns the next random 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a value uniformly distributed in `[0, bound)`; 0 if `bound` is 0.
    fn next_below(&mut self, bound: u64) -> u64 {
        ((self.next_u64() as u128 * bound as u128) >> 64) as u64
    }

    /// Returns a value uniformly distributed in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Xorshift-based random generator.
#[derive(Debug, Clone, Copy)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a new generator using the provided seed.
    pub fn seeded(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }
}

impl RandomSource for XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Single-field keys `(r * 91,)` with `r` uniform in `[0, num_flows]`.
#[derive(Debug, Clone)]
pub struct UniformFlows<R = XorShift64> {
    num_flows: u64,
    rng: R,
}

impl UniformFlows {
    /// Creates a generator over `num_flows + 1` flows.
    pub fn new(num_flows: u64, seed: u64) -> Self {
        Self::with_rng(num_flows, XorShift64::seeded(seed))
    }
}

impl<R: RandomSource> UniformFlows<R> {
    /// Creates a generator drawing from `rng`.
    pub fn with_rng(num_flows: u64, rng: R) -> Self {
        Self { num_flows, rng }
    }
}

impl<R: RandomSource> Iterator for UniformFlows<R> {
    type Item = [u64; 1];

    fn next(&mut self) -> Option<[u64; 1]> {
        let flow = self.rng.next_below(self.num_flows.saturating_add(1));
        Some([flow.wrapping_mul(91)])
    }
}

/// Three-field keys `(r * 521, r, r * 91)` with rank `r` Zipf-distributed.
///
/// `P(r) ∝ r^(-exponent)` for `r` in `[1, max_rank]`, sampled by inverting the
/// cumulative distribution.
#[derive(Debug, Clone)]
pub struct ZipfFlows<R = XorShift64> {
    cdf: Vec<f64>,
    rng: R,
}

impl ZipfFlows {
    /// Creates a generator with the given exponent and number of ranks.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `max_rank` is zero or `exponent` is not a positive finite number.
    pub fn new(exponent: f64, max_rank: u64, seed: u64) -> Result<Self, Error> {
        Self::with_rng(exponent, max_rank, XorShift64::seeded(seed))
    }
}

impl<R: RandomSource> ZipfFlows<R> {
    /// Creates a generator drawing from `rng`.
    ///
    /// # Errors
    ///
    /// See [`ZipfFlows::new`].
    pub fn with_rng(exponent: f64, max_rank: u64, rng: R) -> Result<Self, Error> {
        if max_rank == 0 {
            return Err(Error::config_invalid("max rank must be positive")
                .with_context("max_rank", max_rank));
        }
        if !(exponent.is_finite() && exponent > 0.0) {
            return Err(Error::config_invalid("exponent must be positive and finite")
                .with_context("exponent", exponent));
        }

        let mut cdf = Vec::with_capacity(max_rank as usize);
        let mut total = 0.0;
        for rank in 1..=max_rank {
            total += (rank as f64).powf(-exponent);
            cdf.push(total);
        }
        for weight in &mut cdf {
            *weight /= total;
        }
        Ok(Self { cdf, rng })
    }

    /// Draws the next rank, in `[1, max_rank]`.
    pub fn next_rank(&mut self) -> u64 {
        let u = self.rng.next_f64();
        let index = self.cdf.partition_point(|&c| c <= u);
        index.min(self.cdf.len() - 1) as u64 + 1
    }
}

impl<R: RandomSource> Iterator for ZipfFlows<R> {
    type Item = [u64; 3];

    fn next(&mut self) -> Option<[u64; 3]> {
        let rank = self.next_rank();
        Some([rank.wrapping_mul(521), rank, rank.wrapping_mul(91)])
    }
}

/// Timestamps of a flow whose rate halves midway: one sample every `interval`
/// for the first half, then one every `2 * interval`.
///
/// Timestamps past `u64::MAX` saturate.
///
/// # Examples
///
/// ```
/// use lpfsketch::workload::rate_convergence_timestamps;
///
/// assert_eq!(
///     rate_convergence_timestamps(6, 1_000),
///     vec![0, 1_000, 2_000, 3_000, 5_000, 7_000]
/// );
/// ```
pub fn rate_convergence_timestamps(count: u64, interval: u64) -> Vec<u64> {
    let half = count / 2;
    (0..count)
        .map(|i| interval.saturating_mul(i.saturating_add(i.saturating_sub(half))))
        .collect()
}
