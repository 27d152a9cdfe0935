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

use std::env;
use std::fs::File;

use partition_selector::config::builder::SelectorConfigBuilder;
use partition_selector::init::init_json_tracing;
use partition_selector::{DefaultPartitionSelector, Partition, PartitionSelectionError, PartitionSelector};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

fn main() -> Result<(), anyhow::Error> {
    init_json_tracing(LevelFilter::INFO)?;

    // Optional path to a JSON config, e.g. {"key.hasher": "crc32"}
    let config = match env::args().nth(1) {
        Some(path) => SelectorConfigBuilder::from_reader(File::open(path)?)?.build()?,
        None => SelectorConfigBuilder::new().build()?,
    };

    info!("Routing keys with hasher: {}", config.key_hasher());

    let selector = DefaultPartitionSelector::from_config(&config);

    let partitions: Vec<Partition> = serde_json::from_str(
        r#"[
            {"leader_id": 0, "partition_id": 0},
            {"leader_id": 1, "partition_id": 1},
            {"leader_id": 2, "partition_id": 2}
        ]"#,
    )?;

    for customer in ["alice", "bob", "carol", "alice", "dave", "bob"] {
        let partition = selector.select("customers", Some(customer), &partitions)?;

        info!("Key: {} routed to {}", customer, partition);
    }

    // Partition ids that are not the dense range [0, n) cannot be hashed onto.
    let sparse = vec![Partition::new(0, 0), Partition::new(1, 999)];

    match selector.select("customers", Some("1"), &sparse) {
        Err(PartitionSelectionError::InvalidPartitionSelected { partition_id, .. }) => {
            error!("Key could not be routed, partition {} missing from metadata", partition_id)
        }
        other => info!("Sparse partitions selected: {:?}", other),
    }

    Ok(())
}
