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

use crate::decay::DecayMode;
use crate::decay::RateMode;
use crate::error::Error;
use crate::hash::Crc16Family;
use crate::hash::HashFamily;
use crate::register::HashedRegister;
use crate::register::check_height;
use crate::register::check_time_constant;
use crate::sketch::LpfMinSketch;

/// Default number of rows.
pub const DEFAULT_WIDTH: usize = 3;

/// Default number of cells per row.
pub const DEFAULT_HEIGHT: usize = 65_536;

/// Builder for [`LpfMinSketch`].
///
/// # Examples
///
/// ```
/// use lpfsketch::decay::SampleMode;
/// use lpfsketch::hash::Crc16Family;
/// use lpfsketch::sketch::LpfMinSketchBuilder;
///
/// let sketch = LpfMinSketchBuilder::new(16_000)
///     .width(4)
///     .height(1 << 12)
///     .scale_down_factor(2)
///     .hash_family(Crc16Family::new(0x1021))
///     .decay_mode(SampleMode)
///     .build()
///     .unwrap();
///
/// assert_eq!(sketch.width(), 4);
/// assert_eq!(sketch.rows()[0].hasher().polynomial(), 0x1021);
/// ```
#[derive(Debug, Clone)]
pub struct LpfMinSketchBuilder<F = Crc16Family, M = RateMode> {
    time_constant: u64,
    width: usize,
    height: usize,
    scale_down_factor: u32,
    family: F,
    mode: M,
}

impl LpfMinSketchBuilder {
    /// Creates a builder with the default width, height, CRC-16 family and rate
    /// mode.
    pub fn new(time_constant: u64) -> Self {
        Self {
            time_constant,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale_down_factor: 0,
            family: Crc16Family::default(),
            mode: RateMode,
        }
    }
}

impl<F, M> LpfMinSketchBuilder<F, M> {
    /// Sets the number of rows.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the number of cells per row.
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Sets the right shift applied to the combined minimum on read.
    pub fn scale_down_factor(mut self, scale_down_factor: u32) -> Self {
        self.scale_down_factor = scale_down_factor;
        self
    }

    /// Sets the family the row hash functions are derived from.
    pub fn hash_family<G: HashFamily>(self, family: G) -> LpfMinSketchBuilder<G, M> {
        LpfMinSketchBuilder {
            time_constant: self.time_constant,
            width: self.width,
            height: self.height,
            scale_down_factor: self.scale_down_factor,
            family,
            mode: self.mode,
        }
    }

    /// Sets the decay rule of every cell.
    pub fn decay_mode<N: DecayMode>(self, mode: N) -> LpfMinSketchBuilder<F, N> {
        LpfMinSketchBuilder {
            time_constant: self.time_constant,
            width: self.width,
            height: self.height,
            scale_down_factor: self.scale_down_factor,
            family: self.family,
            mode,
        }
    }
}

impl<F: HashFamily, M: DecayMode> LpfMinSketchBuilder<F, M> {
    /// Builds the sketch, deriving one hash function per row.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if the time constant, width or height is zero.
    pub fn build(self) -> Result<LpfMinSketch<F::Hasher, M>, Error> {
        check_time_constant(self.time_constant)?;
        check_height(self.height)?;
        if self.width == 0 {
            return Err(Error::config_invalid("width must be positive").with_context("width", 0));
        }

        let rows = (0..self.width)
            .map(|row| {
                HashedRegister::with_mode(
                    self.time_constant,
                    self.height,
                    self.family.make_hash(row),
                    self.mode,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "built LPF-min sketch: width={}, height={}, time_constant={}, scale_down_factor={}, mode={}",
            self.width,
            self.height,
            self.time_constant,
            self.scale_down_factor,
            self.mode.name()
        );
        Ok(LpfMinSketch::from_rows(
            rows,
            self.height,
            self.time_constant,
            self.scale_down_factor,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decay::LpfMode;
    use crate::error::ErrorKind;
    use crate::hash::Murmur3Family;

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = LpfMinSketchBuilder::new(0).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context_value("time_constant"), Some("0"));

        let err = LpfMinSketchBuilder::new(10).width(0).build().unwrap_err();
        assert_eq!(err.context_value("width"), Some("0"));

        let err = LpfMinSketchBuilder::new(10).height(0).build().unwrap_err();
        assert_eq!(err.context_value("height"), Some("0"));
    }

    #[test]
    fn test_settings_reach_the_sketch() {
        let sketch = LpfMinSketchBuilder::new(77)
            .width(5)
            .height(100)
            .scale_down_factor(3)
            .hash_family(Murmur3Family::new(11))
            .decay_mode(LpfMode::Sample)
            .build()
            .unwrap();
        assert_eq!(sketch.width(), 5);
        assert_eq!(sketch.height(), 100);
        assert_eq!(sketch.time_constant(), 77);
        assert_eq!(sketch.scale_down_factor(), 3);
        for (i, row) in sketch.rows().iter().enumerate() {
            assert_eq!(row.height(), 100);
            assert_eq!(row.mode(), LpfMode::Sample);
            assert_eq!(row.hasher().seed(), 11 + i as u32);
            assert_eq!(row.scale_down_factor(), 0);
        }
    }
}
