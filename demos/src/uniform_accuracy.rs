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

//! One million packets spread uniformly over ten thousand flows through a
//! 3x5000 LPF-min sketch.

mod common;

use lpfsketch::error::Error;
use lpfsketch::workload::RandomSource;
use lpfsketch::workload::UniformFlows;
use lpfsketch::workload::XorShift64;

fn main() -> Result<(), Error> {
    common::init_logger();

    let mut rng = XorShift64::seeded(0x12345678);
    let packet_size = 20 + rng.next_below(181);
    let flows = UniformFlows::with_rng(10_000, rng);
    common::run_accuracy("uniform", 5, 5_000, packet_size, flows.take(1_000_000))
}
