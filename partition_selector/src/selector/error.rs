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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionSelectionError {
    #[error(
        "PartitionSelectionError::InvalidPartitionSelected: key hashed to partition {} for topic '{}', but it is not among the {} supplied partitions",
        partition_id, topic, partition_count
    )]
    InvalidPartitionSelected {
        topic: String,
        partition_id: i64,
        partition_count: usize,
    },
    #[error("PartitionSelectionError::NoPartitionsAvailable: no partitions supplied for topic '{}'", topic)]
    NoPartitionsAvailable {
        topic: String,
    },
}

impl PartitionSelectionError {
    pub fn topic(&self) -> &str {
        match self {
            Self::InvalidPartitionSelected { topic, .. } => topic,
            Self::NoPartitionsAvailable { topic } => topic,
        }
    }
}
