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

//! Logging setup and the accuracy run shared by the demo binaries.

#![allow(dead_code)]

use env_logger::Env;
use lpfsketch::accuracy::Comparison;
use lpfsketch::error::Error;
use lpfsketch::register::ExactRegister;
use lpfsketch::sketch::LpfMinSketch;

pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Streams `flows` through an exact register and an LPF-min sketch and logs how
/// far the sketch strays from the ground truth.
pub fn run_accuracy<K, I>(
    label: &str,
    time_constant: u64,
    height: usize,
    packet_size: u64,
    flows: I,
) -> Result<(), Error>
where
    K: AsRef<[u64]>,
    I: IntoIterator<Item = K>,
{
    let sketch = LpfMinSketch::builder(time_constant).height(height).build()?;
    log::info!(
        "{label}: sketch with {} rows and {} cols, time constant {time_constant}",
        sketch.width(),
        sketch.height()
    );
    let mut comparison = Comparison::new(ExactRegister::new(time_constant)?, sketch);
    for (timestamp, key) in flows.into_iter().enumerate() {
        comparison.observe(key.as_ref(), timestamp as u64, packet_size);
    }

    log::info!("{label}: per packet {}", comparison.report());
    log::info!("{label}: per flow   {}", comparison.snapshot());
    log::info!("{label}: {} distinct flows", comparison.exact().num_flows());
    Ok(())
}
