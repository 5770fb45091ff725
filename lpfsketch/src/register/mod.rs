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

//! Low-pass-filter registers.
//!
//! A register maps flow keys to LPF cells and keeps each cell's value up to date
//! as samples arrive. Two layouts exist:
//!
//! - [`ExactRegister`]: one cell per distinct key, stored in a hash map. Memory
//!   grows with the number of flows; the values are the ground truth.
//! - [`HashedRegister`]: a fixed array of cells indexed by `hash(key) mod height`.
//!   Flows that collide share a cell, so a key's value can only be inflated by
//!   the other flows' traffic.
//!
//! Both implement [`LpfRegister`], as does
//! [`LpfMinSketch`](crate::sketch::LpfMinSketch).
//!
//! # Usage
//!
//! ```rust
//! use lpfsketch::register::{ExactRegister, LpfRegister};
//!
//! let mut register = ExactRegister::new(16_000).unwrap();
//! assert_eq!(register.update(&[1], 0, 100), 100);
//! assert_eq!(register.update(&[1], 1_000, 100), 193);
//! assert_eq!(register.get(&[1]), 193);
//! assert_eq!(register.get(&[2]), 0);
//! ```

use crate::decay::DecayMode;
use crate::error::Error;

mod exact;
mod hashed;

pub use self::exact::ExactRegister;
pub use self::hashed::HashedRegister;

/// Common interface of every LPF register.
pub trait LpfRegister {
    /// Feeds one sample for `key` and returns the updated, scaled-down value.
    ///
    /// Timestamps are expected to be non-decreasing per key.
    fn update(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64;

    /// Returns the current scaled-down value for `key` without changing it.
    fn get(&self, key: &[u64]) -> u64;

    /// Returns every cell to its initial state, keeping the configuration.
    fn reset(&mut self);
}

/// One LPF cell: the timestamp of the last sample and the current value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LpfCell {
    last_timestamp: u64,
    value: u64,
}

impl LpfCell {
    /// Returns the timestamp of the most recent sample applied.
    pub fn last_timestamp(&self) -> u64 {
        self.last_timestamp
    }

    /// Returns the unscaled value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Applies one sample and returns the new unscaled value.
    ///
    /// The cell always takes the sample's timestamp. A timestamp older than the
    /// cell's, from another flow sharing it, re-expresses the value at that
    /// earlier time.
    #[inline]
    pub(crate) fn apply<M: DecayMode>(
        &mut self,
        mode: &M,
        timestamp: u64,
        sample: u64,
        time_constant: u64,
    ) -> u64 {
        self.value = mode.apply(
            self.value,
            sample,
            self.last_timestamp,
            timestamp,
            time_constant,
        );
        self.last_timestamp = timestamp;
        self.value
    }
}

/// `value / 2^scale_down_factor`, rounded down; shifts of 64 or more give 0.
#[inline]
pub(crate) fn scale_down(value: u64, scale_down_factor: u32) -> u64 {
    value.checked_shr(scale_down_factor).unwrap_or(0)
}

pub(crate) fn check_time_constant(time_constant: u64) -> Result<(), Error> {
    if time_constant == 0 {
        return Err(Error::config_invalid("time constant must be positive")
            .with_context("time_constant", time_constant));
    }
    Ok(())
}

pub(crate) fn check_height(height: usize) -> Result<(), Error> {
    if height == 0 {
        return Err(Error::config_invalid("height must be positive").with_context("height", height));
    }
    Ok(())
}
