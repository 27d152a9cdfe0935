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

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;

/// Per-topic round robin counters.
///
/// Each topic owns an unbounded counter that is reduced modulo the
/// partition count at read time, so a topic whose partition count changes
/// between calls never needs resetting. Entries live in a sharded map and
/// are advanced with a single atomic add, so topics on different shards
/// never contend and callers on the same topic never observe the same value.
#[derive(Debug, Default)]
pub struct RoundRobinCursors {
    inner: DashMap<String, AtomicU64>,
}

impl RoundRobinCursors {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the current counter value for `topic` and advances it by one.
    pub fn advance(&self, topic: &str) -> u64 {
        // Fast path only takes a read lock on the shard.
        if let Some(cursor) = self.inner.get(topic) {
            return cursor.fetch_add(1, Ordering::Relaxed);
        }

        let cursor = self.inner.entry(topic.to_owned()).or_insert_with(|| {
            debug!("Creating round robin cursor for topic: {}", topic);
            AtomicU64::new(0)
        });

        cursor.fetch_add(1, Ordering::Relaxed)
    }

    /// Reads and advances the cursor for `topic`, reduced into `[0, partition_count)`.
    pub fn next_index(&self, topic: &str, partition_count: usize) -> usize {
        debug_assert!(partition_count > 0, "partition_count must be positive");

        (self.advance(topic) % partition_count as u64) as usize
    }

    /// Next counter value for `topic` without advancing it.
    pub fn position(&self, topic: &str) -> Option<u64> {
        self.inner
            .get(topic)
            .map(|cursor| cursor.load(Ordering::Relaxed))
    }

    pub fn topics(&self) -> Vec<String> {
        self.inner.iter().map(|entry| entry.key().to_owned()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
