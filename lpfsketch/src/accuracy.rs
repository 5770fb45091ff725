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

//! Accuracy of a bounded-memory estimator against the exact register.
//!
//! [`Comparison`] feeds every sample to an [`ExactRegister`] and to the
//! estimator under test, and records each `(ground truth, estimate)` pair in an
//! [`AccuracyReport`].
//!
//! # Usage
//!
//! ```rust
//! use lpfsketch::accuracy::Comparison;
//! use lpfsketch::register::ExactRegister;
//! use lpfsketch::sketch::LpfMinSketch;
//!
//! let exact = ExactRegister::new(5).unwrap();
//! let sketch = LpfMinSketch::builder(5).height(500).build().unwrap();
//! let mut comparison = Comparison::new(exact, sketch);
//!
//! for (timestamp, flow) in [[1u64], [2], [1], [3]].iter().enumerate() {
//!     let (truth, estimate) = comparison.observe(flow, timestamp as u64, 100);
//!     assert!(estimate >= truth);
//! }
//! assert_eq!(comparison.report().count(), 4);
//! assert_eq!(comparison.report().underestimates(), 0);
//! ```

use std::fmt;

use crate::decay::DecayMode;
use crate::decay::RateMode;
use crate::register::ExactRegister;
use crate::register::LpfRegister;

/// Error statistics over `(ground truth, estimate)` pairs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AccuracyReport {
    count: u64,
    absolute_error_sum: u128,
    relative_error_sum: f64,
    relative_count: u64,
    max_overestimate: u64,
    underestimates: u64,
}

impl AccuracyReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one pair.
    pub fn record(&mut self, truth: u64, estimate: u64) {
        self.count += 1;
        let error = truth.abs_diff(estimate);
        self.absolute_error_sum += error as u128;
        if truth > 0 {
            self.relative_error_sum += error as f64 / truth as f64;
            self.relative_count += 1;
        }
        if estimate < truth {
            self.underestimates += 1;
        } else {
            self.max_overestimate = self.max_overestimate.max(estimate - truth);
        }
    }

    /// Returns the number of recorded pairs.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the mean of `|estimate - truth|`, or 0 for an empty report.
    pub fn mean_absolute_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.absolute_error_sum as f64 / self.count as f64
        }
    }

    /// Returns the mean of `|estimate - truth| / truth` over pairs with non-zero
    /// truth, or 0 if there are none.
    pub fn mean_relative_error(&self) -> f64 {
        if self.relative_count == 0 {
            0.0
        } else {
            self.relative_error_sum / self.relative_count as f64
        }
    }

    /// Returns the largest `estimate - truth` seen.
    pub fn max_overestimate(&self) -> u64 {
        self.max_overestimate
    }

    /// Returns how many pairs had `estimate < truth`.
    pub fn underestimates(&self) -> u64 {
        self.underestimates
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pairs={}, mae={:.3}, mre={:.4}, max_over={}, under={}",
            self.count,
            self.mean_absolute_error(),
            self.mean_relative_error(),
            self.max_overestimate,
            self.underestimates
        )
    }
}

/// Runs an estimator side by side with the exact register.
#[derive(Debug, Clone)]
pub struct Comparison<R, M: DecayMode = RateMode> {
    exact: ExactRegister<M>,
    estimator: R,
    report: AccuracyReport,
}

impl<R: LpfRegister, M: DecayMode> Comparison<R, M> {
    /// Pairs the ground-truth register with an estimator.
    ///
    /// Both should share the time constant, decay mode and scale-down factor.
    pub fn new(exact: ExactRegister<M>, estimator: R) -> Self {
        Self {
            exact,
            estimator,
            report: AccuracyReport::new(),
        }
    }

    /// Feeds one sample to both and returns `(ground truth, estimate)`.
    pub fn observe(&mut self, key: &[u64], timestamp: u64, value: u64) -> (u64, u64) {
        let truth = self.exact.update(key, timestamp, value);
        let estimate = self.estimator.update(key, timestamp, value);
        self.report.record(truth, estimate);
        (truth, estimate)
    }

    /// Returns the statistics of every pair observed so far.
    pub fn report(&self) -> &AccuracyReport {
        &self.report
    }

    /// Compares the current value of every flow seen so far, once per flow.
    pub fn snapshot(&self) -> AccuracyReport {
        let mut report = AccuracyReport::new();
        for (key, _) in self.exact.iter() {
            report.record(self.exact.get(key), self.estimator.get(key));
        }
        report
    }

    /// Returns the ground-truth register.
    pub fn exact(&self) -> &ExactRegister<M> {
        &self.exact
    }

    /// Returns the estimator.
    pub fn estimator(&self) -> &R {
        &self.estimator
    }

    /// Resets both registers and the running report.
    pub fn reset(&mut self) {
        self.exact.reset();
        self.estimator.reset();
        self.report = AccuracyReport::new();
    }
}
