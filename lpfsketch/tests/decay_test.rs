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

mod common;

use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::gt;
use googletest::prelude::near;
use lpfsketch::decay::DecayMode;
use lpfsketch::decay::LpfMode;
use lpfsketch::decay::RateMode;
use lpfsketch::decay::SampleMode;
use lpfsketch::decay::compute_rate_lpf;
use lpfsketch::register::ExactRegister;

#[test]
fn test_same_timestamp_updates_accumulate() {
    common::init_test_logger();
    let mut register = ExactRegister::new(16_000).unwrap();
    let once = register.update(&[1], 5_000, 100);
    let twice = register.update(&[1], 5_000, 100);
    assert_that!(once, eq(100u64));
    assert_that!(twice, gt(once));
    assert_that!(twice, eq(200u64));
}

#[test]
fn test_rate_mode_converges_to_steady_state() {
    common::init_test_logger();
    let time_constant = 16_000;
    let interval = 1_000;
    let sample = 100;
    let steady_state = sample as f64 / (1.0 - (-(interval as f64) / time_constant as f64).exp());

    let mut register = ExactRegister::new(time_constant).unwrap();
    let mut history = vec![];
    for i in 0..1_000u64 {
        history.push(register.update(&[1], i * interval, sample));
    }

    // truncation on every step holds the fixed point slightly below the real limit
    let last = *history.last().unwrap();
    assert_that!(last as f64, near(steady_state, 20.0));
    assert!(last as f64 <= steady_state);
    assert!(history[history.len() - 100..].iter().all(|&v| v == last));
    assert!(history.windows(2).take(200).all(|w| w[0] <= w[1]));
}

#[test]
fn test_rate_halves_when_interval_doubles() {
    let time_constant = 16_000;
    let mut register = ExactRegister::new(time_constant).unwrap();
    let timestamps = lpfsketch::workload::rate_convergence_timestamps(400, 1_000);
    let outputs: Vec<u64> = timestamps
        .iter()
        .map(|&t| register.update(&[1], t, 100))
        .collect();

    let fast = outputs[199] as f64;
    let slow = outputs[399] as f64;
    let expect_fast = 100.0 / (1.0 - (-1_000.0f64 / 16_000.0).exp());
    let expect_slow = 100.0 / (1.0 - (-2_000.0f64 / 16_000.0).exp());
    assert_that!(fast, near(expect_fast, 20.0));
    assert_that!(slow, near(expect_slow, 10.0));
    assert_that!(fast / slow, near(1.94, 0.05));
}

#[test]
fn test_sample_mode_tracks_level_changes() {
    let mut register = ExactRegister::with_mode(50, SampleMode).unwrap();
    for i in 1..=100u64 {
        register.update(&[1], i * 10, 800);
    }
    let high = register.get(&[1]);
    for i in 101..=200u64 {
        register.update(&[1], i * 10, 200);
    }
    let low = register.get(&[1]);
    assert!(high <= 800 && high >= 790, "high level {high}");
    assert!(low >= 200 && low <= 210, "low level {low}");
}

#[test]
fn test_modes_agree_through_enum() {
    let cases = [
        (0, 100, 0, 0, 10),
        (500, 100, 0, 7, 10),
        (500, 1_000, 3, 3_000, 1_000),
        (u64::MAX / 2, 1, 0, 1, 1),
    ];
    for (prev, sample, prev_ts, curr_ts, tau) in cases {
        assert_eq!(
            LpfMode::Rate.apply(prev, sample, prev_ts, curr_ts, tau),
            RateMode.apply(prev, sample, prev_ts, curr_ts, tau)
        );
        assert_eq!(
            LpfMode::Sample.apply(prev, sample, prev_ts, curr_ts, tau),
            SampleMode.apply(prev, sample, prev_ts, curr_ts, tau)
        );
    }
}

#[test]
fn test_rate_mode_truncates_toward_zero() {
    // 10 * e^(-1) = 3.67...
    assert_eq!(compute_rate_lpf(10, 0, 0, 100, 100), 3);
    // 1 * e^(-1) + 0 = 0.36...
    assert_eq!(compute_rate_lpf(1, 0, 0, 100, 100), 0);
}
