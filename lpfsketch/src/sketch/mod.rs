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

//! LPF-min sketch: a count-min sketch whose counters are LPF cells.
//!
//! The sketch keeps `width` rows of `height` LPF cells. Every row hashes flow keys
//! with its own function. An update feeds the same sample to the key's cell in
//! every row; a query returns the minimum over the rows.
//!
//! A row's cell holds the key's own decayed traffic plus whatever colliding flows
//! added, so up to integer truncation no row under-estimates the key at the
//! moment it is updated. Taking the minimum keeps that bound while discarding
//! most of the collision noise, as long as the number of active flows stays well
//! below `height`. More rows raise the confidence at a linear memory cost.
//!
//! Cells are floored on every update. Once colliding traffic has been folded
//! into a cell, the key's share was truncated at different points than in an
//! exact register, so an estimate can come out a unit or so below the exact
//! value. A `get` long after the key's last update reads a cell that other
//! flows may have decayed further in the meantime, and can fall below the
//! exact value by more.
//!
//! # Usage
//!
//! ```rust
//! use lpfsketch::sketch::LpfMinSketch;
//!
//! let mut sketch = LpfMinSketch::builder(16_000)
//!     .width(3)
//!     .height(4096)
//!     .build()
//!     .unwrap();
//!
//! let flow = [0x0a00_0001, 0x0a00_0002, 443];
//! for i in 0..10 {
//!     sketch.update(&flow, i * 1_000, 1_500);
//! }
//! assert!(sketch.get(&flow) >= 1_500);
//! assert_eq!(sketch.get(&[1, 2, 3]), 0);
//! ```
//!
//! # Choosing hash functions
//!
//! Rows use CRC-16 with a per-row polynomial by default. Any
//! [`HashFamily`](crate::hash::HashFamily) can be plugged in:
//!
//! ```rust
//! use lpfsketch::hash::Murmur3Family;
//! use lpfsketch::sketch::LpfMinSketch;
//!
//! let sketch = LpfMinSketch::builder(5)
//!     .hash_family(Murmur3Family::new(7))
//!     .height(500)
//!     .build()
//!     .unwrap();
//! assert_eq!(sketch.width(), 3);
//! ```

mod builder;
mod min_sketch;

pub use self::builder::DEFAULT_HEIGHT;
pub use self::builder::DEFAULT_WIDTH;
pub use self::builder::LpfMinSketchBuilder;
pub use self::min_sketch::LpfMinSketch;
