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

//! Per-flow rate estimation with low-pass-filter (LPF) cells.
//!
//! Programmable switches estimate traffic rates with LPF cells: each cell keeps
//! the timestamp of its last sample and a value that decays exponentially with
//! the time elapsed between samples. This crate is a software reference model of
//! that arithmetic, plus an approximation that fits in bounded memory:
//!
//! - [`decay`]: the rate-mode and sample-mode LPF recurrences.
//! - [`register::ExactRegister`]: one cell per flow, the ground truth.
//! - [`register::HashedRegister`]: a fixed array of cells shared by colliding flows.
//! - [`sketch::LpfMinSketch`]: several hashed registers combined by minimum, a
//!   count-min sketch whose counters decay.
//!
//! ```rust
//! use lpfsketch::register::ExactRegister;
//! use lpfsketch::sketch::LpfMinSketch;
//!
//! // 16 µs time constant, timestamps in nanoseconds
//! let mut exact = ExactRegister::new(16_000).unwrap();
//! let mut sketch = LpfMinSketch::new(16_000).unwrap();
//!
//! let flow = [0x0a00_0001, 0x0a00_0002, 17, 5353];
//! for i in 0..100 {
//!     let truth = exact.update(&flow, i * 1_000, 100);
//!     let estimate = sketch.update(&flow, i * 1_000, 100);
//!     // a lone flow has its cells to itself
//!     assert_eq!(estimate, truth);
//! }
//! ```
//!
//! The crate is single-threaded: `update` takes `&mut self`. Wrap a register in
//! a lock to share it between producers.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod accuracy;
pub mod decay;
pub mod error;
pub mod hash;
pub mod register;
pub mod sketch;
pub mod workload;
