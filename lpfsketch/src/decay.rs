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

//! Low-pass-filter decay arithmetic.
//!
//! A switch LPF cell keeps the timestamp of its last sample and a current value.
//! On each new sample, the value is decayed by the time elapsed since the last
//! sample and combined with the new sample. Two combining rules exist:
//!
//! - [`RateMode`]: `floor(sample + prev * e^(-Δt/τ))`. Every sample adds a fixed
//!   contribution and older contributions fade out, so a stream of fixed-size
//!   samples at a fixed interval settles at `sample / (1 - e^(-Δt/τ))`.
//! - [`SampleMode`]: `floor(prev + (sample - prev) * (1 - e^(-Δt/τ)))`. The value
//!   is an exponentially weighted moving average of the samples themselves.
//!
//! Results are truncated toward zero, like the fixed-point hardware.

use std::fmt::Debug;

/// A decay rule applied to one LPF cell.
pub trait DecayMode: Copy + Debug {
    /// Computes the new cell value from the previous one and a new sample.
    ///
    /// `curr_timestamp` may precede `prev_timestamp`, which happens when flows
    /// sharing a cell have their own clocks. The negative interval then moves
    /// the previous value back to the earlier reference time.
    fn apply(
        &self,
        prev_value: u64,
        curr_sample: u64,
        prev_timestamp: u64,
        curr_timestamp: u64,
        time_constant: u64,
    ) -> u64;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;
}

/// Accumulating rate estimator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RateMode;

/// Exponentially weighted moving average of the samples.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SampleMode;

/// Runtime selection between the two decay rules.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LpfMode {
    /// See [`SampleMode`].
    Sample,
    /// See [`RateMode`].
    #[default]
    Rate,
}

impl DecayMode for RateMode {
    fn apply(
        &self,
        prev_value: u64,
        curr_sample: u64,
        prev_timestamp: u64,
        curr_timestamp: u64,
        time_constant: u64,
    ) -> u64 {
        compute_rate_lpf(
            prev_value,
            curr_sample,
            prev_timestamp,
            curr_timestamp,
            time_constant,
        )
    }

    fn name(&self) -> &'static str {
        "rate"
    }
}

impl DecayMode for SampleMode {
    fn apply(
        &self,
        prev_value: u64,
        curr_sample: u64,
        prev_timestamp: u64,
        curr_timestamp: u64,
        time_constant: u64,
    ) -> u64 {
        compute_sample_lpf(
            prev_value,
            curr_sample,
            prev_timestamp,
            curr_timestamp,
            time_constant,
        )
    }

    fn name(&self) -> &'static str {
        "sample"
    }
}

impl DecayMode for LpfMode {
    fn apply(
        &self,
        prev_value: u64,
        curr_sample: u64,
        prev_timestamp: u64,
        curr_timestamp: u64,
        time_constant: u64,
    ) -> u64 {
        match self {
            LpfMode::Sample => SampleMode.apply(
                prev_value,
                curr_sample,
                prev_timestamp,
                curr_timestamp,
                time_constant,
            ),
            LpfMode::Rate => RateMode.apply(
                prev_value,
                curr_sample,
                prev_timestamp,
                curr_timestamp,
                time_constant,
            ),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LpfMode::Sample => SampleMode.name(),
            LpfMode::Rate => RateMode.name(),
        }
    }
}

/// `e^(-Δt/τ)` with a signed `Δt`, or `None` when no time has elapsed.
///
/// A negative `Δt` gives a factor above one, possibly infinite.
#[inline]
fn decay_factor(prev_timestamp: u64, curr_timestamp: u64, time_constant: u64) -> Option<f64> {
    let elapsed = curr_timestamp as i128 - prev_timestamp as i128;
    if elapsed == 0 {
        return None;
    }
    debug_assert!(time_constant > 0, "time constant must be positive");
    Some((-(elapsed as f64) / time_constant as f64).exp())
}

/// Rate-mode LPF update: `floor(curr_sample + prev_value * e^(-Δt/τ))`.
///
/// At `Δt = 0` nothing decays and the result is the exact saturating sum.
/// A negative `Δt` scales the previous value up by `e^(|Δt|/τ)`. Results past
/// `u64::MAX` saturate.
///
/// # Examples
///
/// ```
/// use lpfsketch::decay::compute_rate_lpf;
///
/// assert_eq!(compute_rate_lpf(0, 100, 0, 0, 16_000), 100);
/// assert_eq!(compute_rate_lpf(100, 100, 0, 0, 16_000), 200);
/// // one time constant later, 100 has decayed to 36.78...
/// assert_eq!(compute_rate_lpf(100, 0, 0, 16_000, 16_000), 36);
/// ```
pub fn compute_rate_lpf(
    prev_value: u64,
    curr_sample: u64,
    prev_timestamp: u64,
    curr_timestamp: u64,
    time_constant: u64,
) -> u64 {
    match decay_factor(prev_timestamp, curr_timestamp, time_constant) {
        None => curr_sample.saturating_add(prev_value),
        Some(decay) => {
            // 0 * inf is NaN
            let carried = if prev_value == 0 {
                0.0
            } else {
                prev_value as f64 * decay
            };
            // float-to-int casts truncate toward zero and saturate
            (curr_sample as f64 + carried) as u64
        }
    }
}

/// Sample-mode LPF update: `floor(prev + (sample - prev) * (1 - e^(-Δt/τ)))`.
///
/// At `Δt = 0` the new sample carries no weight and the previous value is
/// returned unchanged. A negative `Δt` gives the sample a negative weight,
/// pushing the result away from it; results clamp to `[0, u64::MAX]`.
///
/// # Examples
///
/// ```
/// use lpfsketch::decay::compute_sample_lpf;
///
/// assert_eq!(compute_sample_lpf(50, 1_000, 10, 10, 100), 50);
/// // moves toward the sample, from either side
/// assert_eq!(compute_sample_lpf(0, 1_000, 0, 100, 100), 632);
/// assert_eq!(compute_sample_lpf(1_000, 0, 0, 100, 100), 367);
/// ```
pub fn compute_sample_lpf(
    prev_value: u64,
    curr_sample: u64,
    prev_timestamp: u64,
    curr_timestamp: u64,
    time_constant: u64,
) -> u64 {
    match decay_factor(prev_timestamp, curr_timestamp, time_constant) {
        None => prev_value,
        Some(decay) => {
            let prev = prev_value as f64;
            let gap = curr_sample as f64 - prev;
            // 0 * -inf is NaN
            if gap == 0.0 {
                return prev_value;
            }
            (prev + gap * (1.0 - decay)) as u64
        }
    }
}
