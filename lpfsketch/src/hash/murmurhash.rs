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

use crate::hash::FlowHasher;
use crate::hash::HashFamily;
use crate::hash::for_each_word;

/// Default seed of the MurmurHash3 family.
pub const DEFAULT_MURMUR_SEED: u32 = 9001;

/// MurmurHash3 x64/128 over the big-endian key words; keeps the low 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3 {
    seed: u32,
}

impl Murmur3 {
    /// Creates a hasher with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl FlowHasher for Murmur3 {
    fn hash_flow(&self, key: &[u64]) -> u64 {
        let mut bytes = Vec::with_capacity(key.len() * 8);
        for_each_word(key, |word| bytes.extend_from_slice(word));
        let (lo, _) = mur3::murmurhash3_x64_128(&bytes, self.seed);
        lo
    }
}

/// MurmurHash3 functions seeded `base + row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3Family {
    base_seed: u32,
}

impl Default for Murmur3Family {
    fn default() -> Self {
        Self::new(DEFAULT_MURMUR_SEED)
    }
}

impl Murmur3Family {
    /// Creates a family around `base_seed`.
    pub fn new(base_seed: u32) -> Self {
        Self { base_seed }
    }

    /// Returns the seed used by `row`.
    pub fn seed_for_row(&self, row: usize) -> u32 {
        self.base_seed.wrapping_add(row as u32)
    }
}

impl HashFamily for Murmur3Family {
    type Hasher = Murmur3;

    fn make_hash(&self, row: usize) -> Murmur3 {
        Murmur3::new(self.seed_for_row(row))
    }
}
