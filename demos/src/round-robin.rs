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

use std::collections::HashMap;

use partition_selector::init::init_tracing;
use partition_selector::{DefaultPartitionSelector, Partition, PartitionSelector};
use tracing::info;
use tracing::level_filters::LevelFilter;

const PRODUCER_THREADS: usize = 8;
const RECORDS_PER_THREAD: usize = 1000;

fn main() -> Result<(), anyhow::Error> {
    init_tracing(LevelFilter::DEBUG)?;

    let selector = DefaultPartitionSelector::new();

    let partitions: Vec<Partition> = (0..3).map(|id| Partition::new(id % 2, id)).collect();

    let (sender, receiver) = crossbeam::channel::unbounded();

    crossbeam::scope(|scope| {
        let producers: Vec<_> = (0..PRODUCER_THREADS)
            .map(|producer| {
                let sender = sender.clone();
                let selector = &selector;
                let partitions = &partitions;

                scope.spawn(move |_| -> Result<(), anyhow::Error> {
                    let topic = if producer % 2 == 0 { "orders" } else { "payments" };

                    for _ in 0..RECORDS_PER_THREAD {
                        let partition = selector.select(topic, None, partitions)?;
                        sender.send((topic, partition.partition_id()))?;
                    }

                    Ok(())
                })
            })
            .collect();

        producers.into_iter().try_for_each(|producer| {
            producer
                .join()
                .map_err(|_| anyhow::anyhow!("Producer thread panicked"))?
        })
    })
    .map_err(|_| anyhow::anyhow!("Producer scope panicked"))??;

    drop(sender);

    let mut counts: HashMap<(&str, i32), usize> = HashMap::new();

    for selected in receiver.iter() {
        *counts.entry(selected).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort();

    for ((topic, partition_id), count) in counts {
        info!("Topic: {}, partition: {}, records: {}", topic, partition_id, count);
    }

    for topic in selector.cursors().topics() {
        info!("Cursor for topic: {} at {:?}", topic, selector.cursors().position(&topic));
    }

    Ok(())
}
