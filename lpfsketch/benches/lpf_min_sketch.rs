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

use std::hint::black_box;

use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use lpfsketch::hash::Crc16Family;
use lpfsketch::hash::FlowHasher;
use lpfsketch::hash::HashFamily;
use lpfsketch::hash::Murmur3Family;
use lpfsketch::register::ExactRegister;
use lpfsketch::sketch::LpfMinSketch;
use lpfsketch::workload::ZipfFlows;

fn packets(count: usize) -> Vec<[u64; 3]> {
    ZipfFlows::new(1.2, 100_000, 42)
        .map(|flows| flows.take(count).collect())
        .unwrap_or_default()
}

fn bench_hashes(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");
    group.throughput(Throughput::Elements(1));
    let key = [0x0a00_0001, 0x0a00_0002, 443];

    let crc = Crc16Family::default().make_hash(0);
    group.bench_function("crc16", |b| b.iter(|| crc.hash_flow(black_box(&key))));

    let murmur = Murmur3Family::default().make_hash(0);
    group.bench_function("murmur3", |b| b.iter(|| murmur.hash_flow(black_box(&key))));

    group.finish();
}

fn bench_registers(c: &mut Criterion) {
    let stream = packets(10_000);
    let mut group = c.benchmark_group("update");
    group.throughput(Throughput::Elements(stream.len() as u64));

    group.bench_function("exact", |b| {
        b.iter(|| {
            let mut register = ExactRegister::new(16_000).unwrap();
            for (i, key) in stream.iter().enumerate() {
                black_box(register.update(key, i as u64 * 100, 1_500));
            }
        })
    });

    for width in [1, 3, 5] {
        let mut sketch = LpfMinSketch::builder(16_000)
            .width(width)
            .height(4_096)
            .build()
            .unwrap();
        group.bench_function(format!("lpf_min_w{width}"), |b| {
            b.iter(|| {
                for (i, key) in stream.iter().enumerate() {
                    black_box(sketch.update(key, i as u64 * 100, 1_500));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hashes, bench_registers);
criterion_main!(benches);
