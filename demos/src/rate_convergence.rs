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

//! Feeds one flow that sends a packet every millisecond for half the run and
//! every two milliseconds afterwards; the rate estimate settles, then halves.

mod common;

use lpfsketch::error::Error;
use lpfsketch::register::ExactRegister;
use lpfsketch::workload::rate_convergence_timestamps;

fn main() -> Result<(), Error> {
    common::init_logger();

    // timestamps in microseconds, averaged over 16 ms
    let time_constant = 16_000;
    let packet_size = 100;
    let packet_count = 100;
    let mut register = ExactRegister::new(time_constant)?;

    for (i, timestamp) in rate_convergence_timestamps(packet_count, 1_000)
        .into_iter()
        .enumerate()
    {
        let estimate = register.update(&[1], timestamp, packet_size);
        println!("{i:>4} {timestamp:>8} {estimate:>6}");
    }

    let expected = |interval: f64| {
        packet_size as f64 / (1.0 - (-interval / time_constant as f64).exp())
    };
    log::info!(
        "steady states: {:.1} at 1 packet/ms, {:.1} at 1 packet/2ms",
        expected(1_000.0),
        expected(2_000.0)
    );
    Ok(())
}
