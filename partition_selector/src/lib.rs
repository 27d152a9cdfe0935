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

//! Partition selection for producers.
//!
//! Records without a key are spread round robin over a topic's partitions,
//! with one cursor per topic. Records with a key are hashed onto the
//! partition whose id matches, so every record sharing a key keeps its order.
//!
//! ```
//! use partition_selector::{DefaultPartitionSelector, Partition, PartitionSelector};
//!
//! let selector = DefaultPartitionSelector::new();
//! let partitions = vec![Partition::new(0, 0), Partition::new(1, 1)];
//!
//! let unkeyed = selector.select("orders", None, &partitions).unwrap();
//! assert_eq!(unkeyed.partition_id(), 0);
//!
//! let keyed = selector.select("orders", Some("1"), &partitions).unwrap();
//! assert_eq!(keyed.partition_id(), 1);
//! ```

pub mod config;
pub mod init;
pub mod selector;
pub mod types;
pub mod util;

pub use config::SelectorConfig;
pub use selector::{
    DefaultPartitionSelector, PartitionSelectionError, PartitionSelector, RoundRobinCursors,
    Selection,
};
pub use types::Partition;
pub use util::hash::KeyHasher;
