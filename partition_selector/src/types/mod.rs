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

use std::fmt::Display;

/// A partition of a topic as known to the producer at selection time.
///
/// The leader id is carried for the caller's benefit and is never
/// interpreted by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Partition {
    leader_id: i32,
    partition_id: i32,
}

impl Partition {
    pub fn new(leader_id: i32, partition_id: i32) -> Self {
        Self {
            leader_id,
            partition_id,
        }
    }

    pub fn leader_id(&self) -> i32 {
        self.leader_id
    }

    pub fn partition_id(&self) -> i32 {
        self.partition_id
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Partition {{ leader_id: {}, partition_id: {} }}",
            self.leader_id, self.partition_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;

    #[test]
    fn test_partition_deserialises_from_metadata_json() {
        let raw = r#"[{"leader_id":0,"partition_id":0},{"leader_id":3,"partition_id":1}]"#;

        let partitions: Vec<Partition> = serde_json::from_str(raw).unwrap();

        assert_eq!(partitions, vec![Partition::new(0, 0), Partition::new(3, 1)]);
        assert_eq!(partitions[1].leader_id(), 3);
        assert_eq!(partitions[1].partition_id(), 1);
    }
}
