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
use crate::hash::Crc16;
use crate::hash::FlowHasher;
use crate::register::HashedRegister;
use crate::register::LpfCell;
use crate::register::LpfRegister;
use crate::register::scale_down;
use crate::sketch::LpfMinSketchBuilder;

/// Count-min sketch of LPF cells.
///
/// Use [`LpfMinSketch::builder`] to configure one, or [`LpfMinSketch::new`] for
/// the defaults.
#[derive(Clone)]
pub struct LpfMinSketch<H = Crc16, M = RateMode> {
    rows: Vec<HashedRegister<H, M>>,
    height: usize,
    time_constant: u64,
    scale_down_factor: u32,
}

impl LpfMinSketch {
    /// Returns a builder with the default width, height and CRC-16 family.
    pub fn builder(time_constant: u64) -> LpfMinSketchBuilder {
        LpfMinSketchBuilder::new(time_constant)
    }

    /// Creates a sketch with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `time_constant` is zero.
    pub fn new(time_constant: u64) -> Result<Self, Error> {
        Self::builder(time_constant).build()
    }
}

impl<H: FlowHasher, M: DecayMode> LpfMinSketch<H, M> {
    pub(super) fn from_rows(
        rows: Vec<HashedRegister<H, M>>,
        height: usize,
        time_constant: u64,
        scale_down_factor: u32,
    ) -> Self {
        debug_assert!(!rows.is_empty());
        Self {
            rows,
            height,
            time_constant,
            scale_down_factor,
        }
    }

    /// Returns the number of rows.
    pub fn width(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of cells per row.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the time constant shared by all rows.
    pub fn time_constant(&self) -> u64 {
        self.time_constant
    }

    /// Returns the right shift applied to combined results.
    pub fn scale_down_factor(&self) -> u32 {
        self.scale_down_factor
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[HashedRegister<H, M>] {
        &self.rows
    }

    /// Returns the memory held by the cells, in bytes.
    pub fn size_bytes(&self) -> usize {
        self.rows.len() * self.height * size_of::<LpfCell>()
    }

    /// Feeds one sample to every row and returns the minimum of the updated
    /// cells, scaled down.
    pub fn update(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64 {
        let mut estimate = u64::MAX;
        for row in &mut self.rows {
            estimate = estimate.min(row.update_unscaled(key, timestamp, value));
        }
        scale_down(estimate, self.scale_down_factor)
    }

    /// Returns the minimum over the rows of the cell `key` maps to, scaled down.
    pub fn get(&self, key: &[u64]) -> u64 {
        let estimate = self
            .rows
            .iter()
            .map(|row| row.cell(key).value())
            .min()
            .unwrap_or(0);
        scale_down(estimate, self.scale_down_factor)
    }

    /// Returns the unscaled value of the cell `key` maps to in each row.
    pub fn row_estimates(&self, key: &[u64]) -> Vec<u64> {
        self.rows.iter().map(|row| row.cell(key).value()).collect()
    }

    /// Clears every row.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.reset();
        }
    }
}

impl<H: FlowHasher, M: DecayMode> LpfRegister for LpfMinSketch<H, M> {
    fn update(&mut self, key: &[u64], timestamp: u64, value: u64) -> u64 {
        LpfMinSketch::update(self, key, timestamp, value)
    }

    fn get(&self, key: &[u64]) -> u64 {
        LpfMinSketch::get(self, key)
    }

    fn reset(&mut self) {
        LpfMinSketch::reset(self)
    }
}

impl<H, M: fmt::Debug> fmt::Debug for LpfMinSketch<H, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LpfMinSketch")
            .field("width", &self.rows.len())
            .field("height", &self.height)
            .field("time_constant", &self.time_constant)
            .field("scale_down_factor", &self.scale_down_factor)
            .finish_non_exhaustive()
    }
}
