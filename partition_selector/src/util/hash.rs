/*
 * Copyright 2024 Thaddeus Treloar
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::{fmt::Display, str::FromStr};

use murmur2::{murmur2, KAFKA_SEED};

const POSITIVE_MASK: u32 = 0x7fffffff;

/// Hash functions available for routing keyed records.
///
/// `Murmur2` matches the Java client's default partitioner, so keyed
/// records land on the same partition whichever client produced them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyHasher {
    #[default]
    Murmur2,
    Crc32,
}

#[derive(Debug, thiserror::Error)]
#[error("KeyHasherError::UnknownHasher: '{0}', expected one of 'murmur2', 'crc32'")]
pub struct UnknownKeyHasher(pub String);

impl KeyHasher {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Murmur2 => "murmur2",
            Self::Crc32 => "crc32",
        }
    }

    /// Raw, non-negative hash of the key. Stable across calls and processes.
    pub fn hash(&self, key_bytes: &[u8]) -> u32 {
        match self {
            Self::Murmur2 => murmur2(key_bytes, KAFKA_SEED) & POSITIVE_MASK,
            Self::Crc32 => crc32fast::hash(key_bytes),
        }
    }

    /// Reduces the key hash into `[0, partition_count)`.
    ///
    /// Callers must guard against a zero partition count.
    pub fn partition_for_key(&self, key_bytes: &[u8], partition_count: usize) -> i64 {
        debug_assert!(partition_count > 0, "partition_count must be positive");

        let reduced = u64::from(self.hash(key_bytes)) % partition_count as u64;

        // hash is a u32, so the remainder always fits.
        reduced as i64
    }
}

impl FromStr for KeyHasher {
    type Err = UnknownKeyHasher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "murmur2" => Ok(Self::Murmur2),
            "crc32" => Ok(Self::Crc32),
            _ => Err(UnknownKeyHasher(s.to_owned())),
        }
    }
}

impl Display for KeyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
