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

//! Hash functions over flow keys.
//!
//! A flow key is an ordered tuple of integers, passed around as `&[u64]`. Hashes
//! see the key as a sequence of 8-byte big-endian words, the way the fields would
//! appear on the wire.
//!
//! A [`HashFamily`] derives one [`FlowHasher`] per sketch row. Rows must use
//! different functions so that two flows colliding in one row are unlikely to
//! collide in another.
//!
//! # Usage
//!
//! ```rust
//! use lpfsketch::hash::{Crc16Family, FlowHasher, HashFamily};
//!
//! let family = Crc16Family::default();
//! let row0 = family.make_hash(0);
//! let row1 = family.make_hash(1);
//!
//! let key = [0x0a00_0001, 0x0a00_0002, 6];
//! assert_eq!(row0.hash_flow(&key), family.make_hash(0).hash_flow(&key));
//! assert_ne!(row0.polynomial(), row1.polynomial());
//! ```
//!
//! Closures are hashers too, which is handy for injective test hashes:
//!
//! ```rust
//! use lpfsketch::hash::{FlowHasher, HashFamily};
//!
//! let family = |_row: usize| |key: &[u64]| key[0];
//! assert_eq!(family.make_hash(2).hash_flow(&[17, 4]), 17);
//! ```

use byteorder::BigEndian;
use byteorder::ByteOrder;

mod crc16;
mod murmurhash;

pub use self::crc16::CRC16_DEFAULT_POLY;
pub use self::crc16::CRC16_ROW_STRIDE;
pub use self::crc16::Crc16;
pub use self::crc16::Crc16Family;
pub use self::murmurhash::DEFAULT_MURMUR_SEED;
pub use self::murmurhash::Murmur3;
pub use self::murmurhash::Murmur3Family;

/// A deterministic, total hash over flow keys.
pub trait FlowHasher {
    /// Hashes `key`. Equal keys always produce equal hashes.
    fn hash_flow(&self, key: &[u64]) -> u64;
}

impl<F> FlowHasher for F
where
    F: Fn(&[u64]) -> u64,
{
    fn hash_flow(&self, key: &[u64]) -> u64 {
        self(key)
    }
}

/// Derives a distinct [`FlowHasher`] for each sketch row.
pub trait HashFamily {
    /// The hasher produced for each row.
    type Hasher: FlowHasher;

    /// Builds the hash function for `row`. Must be a pure function of `row`.
    fn make_hash(&self, row: usize) -> Self::Hasher;
}

impl<F, H> HashFamily for F
where
    F: Fn(usize) -> H,
    H: FlowHasher,
{
    type Hasher = H;

    fn make_hash(&self, row: usize) -> H {
        self(row)
    }
}

/// Feeds each key component to `f` as an 8-byte big-endian word.
#[inline]
fn for_each_word(key: &[u64], mut f: impl FnMut(&[u8])) {
    let mut word = [0u8; 8];
    for &component in key {
        BigEndian::write_u64(&mut word, component);
        f(&word);
    }
}
