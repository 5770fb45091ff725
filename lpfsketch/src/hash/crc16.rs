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

use std::fmt;

use crate::hash::FlowHasher;
use crate::hash::HashFamily;
use crate::hash::for_each_word;

/// Base polynomial of the CRC-16 family (x^16 + x^15 + x^2 + 1).
pub const CRC16_DEFAULT_POLY: u16 = 0x8005;

/// Offset added to the base polynomial for each successive row.
pub const CRC16_ROW_STRIDE: u16 = 0x111;

/// Table-driven CRC-16, MSB first, zero init, no reflection, no final xor.
///
/// This is the checksum a switch pipeline computes over header fields, with the
/// polynomial as the only parameter. The lookup table is built once, when the
/// hasher is created.
#[derive(Clone)]
pub struct Crc16 {
    polynomial: u16,
    table: Box<[u16; 256]>,
}

impl Crc16 {
    /// Creates a CRC-16 with the given polynomial (implicit x^16 term).
    pub fn new(polynomial: u16) -> Self {
        let mut table = Box::new([0u16; 256]);
        for (i, entry) in table.iter_mut().enumerate() {
            let mut crc = (i as u16) << 8;
            for _ in 0..8 {
                crc = if crc & 0x8000 != 0 {
                    (crc << 1) ^ polynomial
                } else {
                    crc << 1
                };
            }
            *entry = crc;
        }
        Self { polynomial, table }
    }

    /// Returns the generator polynomial.
    pub fn polynomial(&self) -> u16 {
        self.polynomial
    }

    /// Computes the checksum of a byte string.
    pub fn checksum(&self, bytes: &[u8]) -> u16 {
        self.update(0, bytes)
    }

    #[inline]
    fn update(&self, mut crc: u16, bytes: &[u8]) -> u16 {
        for &byte in bytes {
            let index = ((crc >> 8) as u8 ^ byte) as usize;
            crc = (crc << 8) ^ self.table[index];
        }
        crc
    }
}

impl fmt::Debug for Crc16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crc16")
            .field("polynomial", &format_args!("{:#06x}", self.polynomial))
            .finish()
    }
}

impl FlowHasher for Crc16 {
    fn hash_flow(&self, key: &[u64]) -> u64 {
        let mut crc = 0;
        for_each_word(key, |word| crc = self.update(crc, word));
        crc as u64
    }
}

/// CRC-16 functions whose polynomials step away from a common base.
///
/// Row `i` uses `(base + 0x111 * i) | 1` (16-bit wrapping). The low bit is
/// forced so the x^0 term is always present; without it every checksum would
/// share a constant bit and only half of a power-of-two row would be reachable.
///
/// # Examples
///
/// ```
/// use lpfsketch::hash::{Crc16Family, HashFamily};
///
/// let family = Crc16Family::default();
/// assert_eq!(family.make_hash(0).polynomial(), 0x8005);
/// assert_eq!(family.make_hash(1).polynomial(), 0x8117);
/// assert_eq!(family.make_hash(2).polynomial(), 0x8227);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16Family {
    base_polynomial: u16,
}

impl Default for Crc16Family {
    fn default() -> Self {
        Self::new(CRC16_DEFAULT_POLY)
    }
}

impl Crc16Family {
    /// Creates a family around `base_polynomial`.
    pub fn new(base_polynomial: u16) -> Self {
        Self { base_polynomial }
    }

    /// Returns the base polynomial.
    pub fn base_polynomial(&self) -> u16 {
        self.base_polynomial
    }

    /// Returns the polynomial used by `row`.
    pub fn polynomial_for_row(&self, row: usize) -> u16 {
        let offset = CRC16_ROW_STRIDE.wrapping_mul(row as u16);
        self.base_polynomial.wrapping_add(offset) | 1
    }
}

impl HashFamily for Crc16Family {
    type Hasher = Crc16;

    fn make_hash(&self, row: usize) -> Crc16 {
        Crc16::new(self.polynomial_for_row(row))
    }
}
