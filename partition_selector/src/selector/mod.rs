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

use tracing::{trace, warn};

use crate::{config::SelectorConfig, types::Partition, util::hash::KeyHasher};

pub use self::{cursor::RoundRobinCursors, error::PartitionSelectionError};

pub mod cursor;
pub mod error;

/// Strategy used for a single selection, decided by whether a key was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'k> {
    RoundRobin,
    KeyHash(&'k [u8]),
}

impl<'k> From<Option<&'k [u8]>> for Selection<'k> {
    fn from(key: Option<&'k [u8]>) -> Self {
        match key {
            Some(key_bytes) => Selection::KeyHash(key_bytes),
            None => Selection::RoundRobin,
        }
    }
}

impl<'k> From<Option<&'k str>> for Selection<'k> {
    fn from(key: Option<&'k str>) -> Self {
        Selection::from(key.map(str::as_bytes))
    }
}

/// Picks the partition of a topic that an outgoing record is routed to.
///
/// Implementations are shared between producer threads, so selection
/// takes `&self` and must be safe to call concurrently.
pub trait PartitionSelector: Send + Sync {
    fn select_bytes<'p>(
        &self,
        topic: &str,
        key: Option<&[u8]>,
        partitions: &'p [Partition],
    ) -> Result<&'p Partition, PartitionSelectionError>;

    fn select<'p>(
        &self,
        topic: &str,
        key: Option<&str>,
        partitions: &'p [Partition],
    ) -> Result<&'p Partition, PartitionSelectionError> {
        self.select_bytes(topic, key.map(str::as_bytes), partitions)
    }
}

/// Round robins unkeyed records per topic and hashes keyed records onto
/// the partition with the matching id.
///
/// Keyed selection assumes partition ids form the dense range
/// `[0, partitions.len())`. A hash landing outside the supplied ids is
/// returned as [`PartitionSelectionError::InvalidPartitionSelected`] rather
/// than redirected, as redirecting would break per key ordering.
#[derive(Debug, Default)]
pub struct DefaultPartitionSelector {
    key_hasher: KeyHasher,
    cursors: RoundRobinCursors,
}

impl DefaultPartitionSelector {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_key_hasher(key_hasher: KeyHasher) -> Self {
        Self {
            key_hasher,
            ..Default::default()
        }
    }

    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::with_key_hasher(config.key_hasher())
    }

    pub fn key_hasher(&self) -> KeyHasher {
        self.key_hasher
    }

    pub fn cursors(&self) -> &RoundRobinCursors {
        &self.cursors
    }

    fn select_round_robin<'p>(&self, topic: &str, partitions: &'p [Partition]) -> &'p Partition {
        let index = self.cursors.next_index(topic, partitions.len());

        trace!("Round robin selected index {} of {} for topic: {}", index, partitions.len(), topic);

        &partitions[index]
    }

    fn select_by_key<'p>(
        &self,
        topic: &str,
        key_bytes: &[u8],
        partitions: &'p [Partition],
    ) -> Result<&'p Partition, PartitionSelectionError> {
        let partition_id = self
            .key_hasher
            .partition_for_key(key_bytes, partitions.len());

        match partitions
            .iter()
            .find(|partition| i64::from(partition.partition_id()) == partition_id)
        {
            Some(partition) => {
                trace!("Key hash selected partition {} for topic: {}", partition_id, topic);

                Ok(partition)
            }
            None => {
                warn!(
                    "Key hashed to partition {} for topic: {}, which is missing from the {} supplied partitions",
                    partition_id,
                    topic,
                    partitions.len()
                );

                Err(PartitionSelectionError::InvalidPartitionSelected {
                    topic: topic.to_owned(),
                    partition_id,
                    partition_count: partitions.len(),
                })
            }
        }
    }
}

impl PartitionSelector for DefaultPartitionSelector {
    fn select_bytes<'p>(
        &self,
        topic: &str,
        key: Option<&[u8]>,
        partitions: &'p [Partition],
    ) -> Result<&'p Partition, PartitionSelectionError> {
        if partitions.is_empty() {
            warn!("No partitions supplied for topic: {}", topic);

            return Err(PartitionSelectionError::NoPartitionsAvailable {
                topic: topic.to_owned(),
            });
        }

        match Selection::from(key) {
            Selection::RoundRobin => Ok(self.select_round_robin(topic, partitions)),
            Selection::KeyHash(key_bytes) => self.select_by_key(topic, key_bytes, partitions),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{types::Partition, util::hash::KeyHasher};

    use super::{DefaultPartitionSelector, PartitionSelectionError, PartitionSelector, Selection};

    fn two_partitions() -> Vec<Partition> {
        vec![Partition::new(0, 0), Partition::new(1, 1)]
    }

    #[test]
    fn test_round_robin_rolls_over() {
        let selector = DefaultPartitionSelector::new();
        let partitions = two_partitions();

        let first = selector.select("test", None, &partitions).unwrap();
        let second = selector.select("test", None, &partitions).unwrap();
        let third = selector.select("test", None, &partitions).unwrap();

        assert_eq!(first.partition_id(), 0);
        assert_eq!(second.partition_id(), 1);
        assert_eq!(third.partition_id(), 0);
    }

    #[test]
    fn test_round_robin_selects_by_position() {
        let selector = DefaultPartitionSelector::new();
        let partitions = vec![Partition::new(7, 5), Partition::new(8, 2)];

        assert_eq!(selector.select("test", None, &partitions).unwrap(), &partitions[0]);
        assert_eq!(selector.select("test", None, &partitions).unwrap(), &partitions[1]);
    }

    #[test]
    fn test_round_robin_handles_concurrent_roll_over() {
        let selector = DefaultPartitionSelector::new();
        let partitions = two_partitions();
        let (sender, receiver) = crossbeam::channel::unbounded();

        crossbeam::scope(|scope| {
            for _ in 0..100 {
                let sender = sender.clone();
                let selector = &selector;
                let partitions = &partitions;

                scope.spawn(move |_| {
                    let selected = selector.select("test", None, partitions).unwrap();
                    sender.send(selected.partition_id()).unwrap();
                });
            }
        })
        .unwrap();

        drop(sender);

        let selected: Vec<i32> = receiver.iter().collect();

        assert_eq!(selected.len(), 100);
        assert_eq!(selected.iter().filter(|id| **id == 0).count(), 50);
        assert_eq!(selected.iter().filter(|id| **id == 1).count(), 50);
    }

    #[test]
    fn test_round_robin_tracks_each_topic_separately() {
        let selector = DefaultPartitionSelector::new();
        let partitions = two_partitions();

        let a1 = selector.select("a", None, &partitions).unwrap();
        let b1 = selector.select("b", None, &partitions).unwrap();
        let a2 = selector.select("a", None, &partitions).unwrap();
        let b2 = selector.select("b", None, &partitions).unwrap();

        assert_eq!(a1.partition_id(), 0);
        assert_eq!(a2.partition_id(), 1);

        assert_eq!(b1.partition_id(), 0);
        assert_eq!(b2.partition_id(), 1);
    }

    #[test]
    fn test_round_robin_survives_partition_count_change() {
        let selector = DefaultPartitionSelector::new();
        let two = two_partitions();
        let three = vec![Partition::new(0, 0), Partition::new(1, 1), Partition::new(2, 2)];

        assert_eq!(selector.select("test", None, &two).unwrap().partition_id(), 0);
        assert_eq!(selector.select("test", None, &two).unwrap().partition_id(), 1);
        assert_eq!(selector.select("test", None, &three).unwrap().partition_id(), 2);
        assert_eq!(selector.select("test", None, &three).unwrap().partition_id(), 0);
    }

    #[test]
    fn test_key_hash_selects_each_partition() {
        let selector = DefaultPartitionSelector::new();
        let partitions = two_partitions();

        let first = selector.select("test", Some("0"), &partitions).unwrap();
        let second = selector.select("test", Some("1"), &partitions).unwrap();

        assert_eq!(first.partition_id(), 0);
        assert_eq!(second.partition_id(), 1);
    }

    #[test]
    fn test_key_hash_is_stable_across_selectors() {
        let partitions = two_partitions();

        for _ in 0..10 {
            let selector = DefaultPartitionSelector::new();

            assert_eq!(selector.select("test", Some("0"), &partitions).unwrap().partition_id(), 0);
            assert_eq!(selector.select("test", Some("1"), &partitions).unwrap().partition_id(), 1);
        }
    }

    #[test]
    fn test_key_hash_does_not_touch_cursors() {
        let selector = DefaultPartitionSelector::new();
        let partitions = two_partitions();

        let first = selector.select("test", Some("customer-42"), &partitions).unwrap();

        for _ in 0..20 {
            assert_eq!(selector.select("test", Some("customer-42"), &partitions).unwrap(), first);
        }

        assert!(selector.cursors().is_empty());
        assert_eq!(selector.select("test", None, &partitions).unwrap().partition_id(), 0);
    }

    #[test]
    fn test_key_hash_errors_when_partition_id_missing() {
        let selector = DefaultPartitionSelector::new();
        let partitions = vec![Partition::new(0, 0), Partition::new(1, 999)];

        let error = selector.select("test", Some("1"), &partitions).unwrap_err();

        assert_eq!(
            error,
            PartitionSelectionError::InvalidPartitionSelected {
                topic: "test".to_owned(),
                partition_id: 1,
                partition_count: 2,
            }
        );
        assert_eq!(error.topic(), "test");
    }

    #[test]
    fn test_empty_partitions_rejected_without_advancing() {
        let selector = DefaultPartitionSelector::new();

        let round_robin = selector.select("test", None, &[]).unwrap_err();
        let keyed = selector.select("test", Some("0"), &[]).unwrap_err();

        assert_eq!(
            round_robin,
            PartitionSelectionError::NoPartitionsAvailable { topic: "test".to_owned() }
        );
        assert_eq!(keyed, round_robin);
        assert_eq!(selector.cursors().position("test"), None);
    }

    #[test]
    fn test_crc32_hasher_routes_by_crc() {
        let selector = DefaultPartitionSelector::with_key_hasher(KeyHasher::Crc32);
        let partitions = two_partitions();

        // crc32("21") is even, crc32("0") is odd.
        assert_eq!(selector.select("test", Some("21"), &partitions).unwrap().partition_id(), 0);
        assert_eq!(selector.select("test", Some("0"), &partitions).unwrap().partition_id(), 1);
    }

    #[test]
    fn test_byte_keys_match_string_keys() {
        let selector = DefaultPartitionSelector::new();
        let partitions = vec![Partition::new(0, 0), Partition::new(0, 1), Partition::new(0, 2)];

        let by_str = selector.select("test", Some("foobar"), &partitions).unwrap();
        let by_bytes = selector
            .select_bytes("test", Some(b"foobar".as_slice()), &partitions)
            .unwrap();

        assert_eq!(by_str, by_bytes);
    }

    #[test]
    fn test_selection_resolved_from_key_presence() {
        assert_eq!(Selection::from(None::<&str>), Selection::RoundRobin);
        assert_eq!(Selection::from(Some("k")), Selection::KeyHash(b"k".as_slice()));
    }
}
