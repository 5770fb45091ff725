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

#![allow(dead_code)]

pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A hash family that maps key `(k, ..)` to `k` in every row. Injective over
/// keys whose first components are distinct.
pub fn injective_family() -> impl Fn(usize) -> fn(&[u64]) -> u64 {
    |_row| first_component as fn(&[u64]) -> u64
}

fn first_component(key: &[u64]) -> u64 {
    key[0]
}
