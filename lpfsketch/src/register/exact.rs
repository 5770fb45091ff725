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

use std::collections::HashMap;

use crate::decay::DecayMode;
use crate::decay::RateMode;
use crate::error::Error;
use crate::register::LpfCell;
use crate::register::LpfRegister;
use crate::register::check_time_constant;
use crate::register::scale_down;

/// Ground-truth register with one LPF cell per distinct flow key.
///
/// Cells are created on first update and never evicted, so memory grows with
/// the number of distinct keys seen. Bound the key cardinality when using it
/// outside of testing.
#[derive(Debug, Clone)]
pub struct ExactRegister<M: DecayMode = RateMode> {
    cells: HashMap<Box<[u64]>, LpfCell>,
    time_constant: u64,
    scale_down_factor: u32,
    mode: M,
}

impl ExactRegister {
    /// Creates an empty rate-mode register.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `time_constant` is zero.
    pub fn new(time_constant: u64) -> Result<Self, Error> {
        Self::with_mode(time_constant, RateMode)
    }
}

impl<M: DecayMode> ExactRegister<M> {
    /// Creates an empty register using the given decay mode.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `time_constant` is zero.
    pub fn with_mode(time_constant: u64, mode: M) -> Result<Self, Error> {
        check_time_constant(time_constant)?;
        log::debug!(
            "created exact LPF register: time_constant={time_constant}, mode={}",
            mode.name()
        );
        Ok(Self {
            cells: HashMap::new(),
            time_constant,
            scale_down_factor: 0,
            mode,
        })
    }

    /// Sets the right shift applied to every returned value.
    ///
    /// Stored values keep full precision.
    pub fn with_scale_down_factor(mut self, scale_down_factor: u32) -> Self {
        self.scale_down_factor = scale_down_factor;
        self
    }

    /// Returns the time constant.
    pub fn time_constant(&self) -> u64 {
        self.time_constant
    }

    /// Returns the right shift applied on read.
    pub fn scale_down_factor(&self) -> u32 {
        self.scale_down_factor
    }

    /// Returns the decay mode.
    pub fn mode(&self) -> M {
        self.mode
    }

    /// Returns the number of distinct keys seen since creation or the last reset.
    pub fn num_flows(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no key has been updated.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell of `key`, if the key has been seen.
    pub fn cell(&self, key: &[u64]) -> Option<LpfCell> {
        self.cells.get(key).copied()
    }

    /// Iterates over every tracked key and its cell.
    pub fn iter(&self) -> impl Iterator<Item = (&[u64], &LpfCell)> {
        self.cells.iter().map(|(key, cell)| (&**key, cell))
    }

    /// Feeds one sample and returns the updated value, scaled down.
    pub fn update(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64 {
        let updated = match self.cells.get_mut(key) {
            Some(cell) => cell.apply(&self.mode, timestamp, value, self.time_constant),
            None => {
                let mut cell = LpfCell::default();
                let updated = cell.apply(&self.mode, timestamp, value, self.time_constant);
                self.cells.insert(key.into(), cell);
                updated
            }
        };
        scale_down(updated, self.scale_down_factor)
    }

    /// Returns the current value of `key`, scaled down; 0 for unseen keys.
    pub fn get(&self, key: &[u64]) -> u64 {
        let value = self.cells.get(key).map_or(0, LpfCell::value);
        scale_down(value, self.scale_down_factor)
    }

    /// Forgets every key.
    pub fn reset(&mut self) {
        self.cells.clear();
    }
}

impl<M: DecayMode> LpfRegister for ExactRegister<M> {
    fn update(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64 {
        ExactRegister::update(self, key, timestamp, value)
    }

    fn get(&self, key: &[u64]) -> u64 {
        ExactRegister::get(self, key)
    }

    fn reset(&mut self) {
        ExactRegister::reset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decay::SampleMode;
    use crate::error::ErrorKind;

    #[test]
    fn test_zero_time_constant_is_rejected() {
        let err = ExactRegister::new(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context_value("time_constant"), Some("0"));
    }

    #[test]
    fn test_unseen_key_reads_zero() {
        let register = ExactRegister::new(10).unwrap();
        assert_eq!(register.get(&[1, 2, 3]), 0);
        assert!(register.cell(&[1, 2, 3]).is_none());
        assert!(register.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut register = ExactRegister::new(1_000).unwrap();
        register.update(&[1], 0, 100);
        register.update(&[2], 0, 7);
        register.update(&[1, 0], 0, 3);
        assert_eq!(register.get(&[1]), 100);
        assert_eq!(register.get(&[2]), 7);
        assert_eq!(register.get(&[1, 0]), 3);
        assert_eq!(register.num_flows(), 3);
    }

    #[test]
    fn test_get_does_not_decay() {
        let mut register = ExactRegister::new(1_000).unwrap();
        register.update(&[9], 5_000, 100);
        assert_eq!(register.get(&[9]), 100);
        assert_eq!(register.get(&[9]), 100);
        assert_eq!(register.cell(&[9]).unwrap().last_timestamp(), 5_000);
    }

    #[test]
    fn test_scale_down_applies_on_read_only() {
        let mut register = ExactRegister::new(1_000).unwrap().with_scale_down_factor(2);
        assert_eq!(register.update(&[1], 0, 103), 25);
        assert_eq!(register.update(&[1], 0, 103), 51);
        assert_eq!(register.get(&[1]), 51);
        assert_eq!(register.cell(&[1]).unwrap().value(), 206);
    }

    #[test]
    fn test_sample_mode_register() {
        let mut register = ExactRegister::with_mode(100, SampleMode).unwrap();
        assert_eq!(register.update(&[1], 0, 1_000), 0);
        assert_eq!(register.update(&[1], 100, 1_000), 632);
        assert_eq!(register.mode(), SampleMode);
    }

    #[test]
    fn test_reset_forgets_keys() {
        let mut register = ExactRegister::new(1_000).unwrap();
        register.update(&[1], 0, 100);
        register.reset();
        assert!(register.is_empty());
        assert_eq!(register.get(&[1]), 0);
        assert_eq!(register.update(&[1], 10, 5), 5);
    }

    #[test]
    fn test_iter_lists_tracked_keys() {
        let mut register = ExactRegister::new(1_000).unwrap();
        register.update(&[4, 2], 0, 8);
        let tracked: Vec<_> = register.iter().map(|(k, c)| (k.to_vec(), c.value())).collect();
        assert_eq!(tracked, vec![(vec![4, 2], 8)]);
    }
}
