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

use std::fmt;

use crate::decay::DecayMode;
use crate::decay::RateMode;
use crate::error::Error;
use crate::hash::FlowHasher;
use crate::register::LpfCell;
use crate::register::LpfRegister;
use crate::register::check_height;
use crate::register::check_time_constant;
use crate::register::scale_down;

/// Fixed-size register of LPF cells shared by every flow that hashes alike.
///
/// A key uses cell `hash(key) mod height`. Colliding flows add their decayed
/// traffic to the same cell, so on its own the register over-estimates, up to
/// integer truncation. The [`LpfMinSketch`](crate::sketch::LpfMinSketch)
/// combines several of them to keep that bias in check.
///
/// # Examples
///
/// ```
/// use lpfsketch::hash::Crc16;
/// use lpfsketch::register::HashedRegister;
///
/// let mut register = HashedRegister::new(16_000, 1024, Crc16::new(0x8005)).unwrap();
/// register.update(&[10, 20], 0, 100);
/// assert!(register.get(&[10, 20]) >= 100);
/// ```
#[derive(Clone)]
pub struct HashedRegister<H, M = RateMode> {
    cells: Vec<LpfCell>,
    hasher: H,
    time_constant: u64,
    scale_down_factor: u32,
    mode: M,
}

impl<H: FlowHasher> HashedRegister<H> {
    /// Creates a rate-mode register with `height` cells.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `time_constant` or `height` is zero.
    pub fn new(time_constant: u64, height: usize, hasher: H) -> Result<Self, Error> {
        Self::with_mode(time_constant, height, hasher, RateMode)
    }
}

impl<H: FlowHasher, M: DecayMode> HashedRegister<H, M> {
    /// Creates a register with `height` cells using the given decay mode.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `time_constant` or `height` is zero.
    pub fn with_mode(time_constant: u64, height: usize, hasher: H, mode: M) -> Result<Self, Error> {
        check_time_constant(time_constant)?;
        check_height(height)?;
        log::debug!(
            "created hashed LPF register: time_constant={time_constant}, height={height}, mode={}",
            mode.name()
        );
        Ok(Self {
            cells: vec![LpfCell::default(); height],
            hasher,
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

    /// Returns the number of cells.
    pub fn height(&self) -> usize {
        self.cells.len()
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

    /// Returns the hash function.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the index of the cell `key` maps to.
    pub fn index_of(&self, key: &[u64]) -> usize {
        (self.hasher.hash_flow(key) % self.cells.len() as u64) as usize
    }

    /// Returns the cell `key` maps to.
    pub fn cell(&self, key: &[u64]) -> LpfCell {
        self.cells[self.index_of(key)]
    }

    /// Returns all cells in index order.
    pub fn cells(&self) -> &[LpfCell] {
        &self.cells
    }

    /// Feeds one sample and returns the updated value of the shared cell, scaled
    /// down.
    pub fn update(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64 {
        scale_down(self.update_unscaled(key, timestamp, value), self.scale_down_factor)
    }

    /// Returns the current value of the cell `key` maps to, scaled down.
    pub fn get(&self, key: &[u64]) -> u64 {
        scale_down(self.cell(key).value(), self.scale_down_factor)
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells.fill(LpfCell::default());
    }

    pub(crate) fn update_unscaled(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64 {
        let index = self.index_of(key);
        self.cells[index].apply(&self.mode, timestamp, value, self.time_constant)
    }
}

impl<H: FlowHasher, M: DecayMode> LpfRegister for HashedRegister<H, M> {
    fn update(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64 {
        HashedRegister::update(self, key, timestamp, value)
    }

    fn get(&self, key: &[u64]) -> u64 {
        HashedRegister::get(self, key)
    }

    fn reset(&mut self) {
        HashedRegister::reset(self)
    }
}

impl<H, M: fmt::Debug> fmt::Debug for HashedRegister<H, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedRegister")
            .field("height", &self.cells.len())
            .field("time_constant", &self.time_constant)
            .field("scale_down_factor", &self.scale_down_factor)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
