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

//! One million packets from a Zipfian flow distribution through a 3x500
//! LPF-min sketch.

mod common;

use lpfsketch::error::Error;
use lpfsketch::workload::ZipfFlows;

fn main() -> Result<(), Error> {
    common::init_logger();

    let flows = ZipfFlows::new(1.2, 1_000_000, 0x12345678)?;
    common::run_accuracy("zipf(1.2)", 5, 500, 100, flows.take(1_000_000))
}
