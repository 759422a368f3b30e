// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use community_partitions::clustering::Clustering;
use community_partitions::community::{community_centers, top_k_by_quality};
use community_partitions::network::prelude::*;
use community_partitions::{Algorithm, PartitionConfig, PartitionResult};

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufWriter;
use std::time::Instant;

const COMMUNITIES_TO_REPORT: usize = 10;

pub fn partition(
    source_edges: &str,
    output_path: &str,
    separator: &str,
    source_index: usize,
    target_index: usize,
    weight_index: Option<usize>,
    relation_index: Option<usize>,
    seed: Option<u64>,
    algorithm: Algorithm,
    config: &PartitionConfig,
    skip_first_line: bool,
) -> Result<(), Box<dyn Error>> {
    let start_instant: Instant = Instant::now();
    let labeled_network: LabeledNetwork = match relation_index {
        Some(relation_index) => LabeledNetwork::load_relations_from(
            source_edges,
            separator,
            source_index,
            relation_index,
            target_index,
            skip_first_line,
        )?,
        None => LabeledNetwork::load_from(
            source_edges,
            separator,
            source_index,
            target_index,
            weight_index,
            skip_first_line,
        )?,
    };
    let network: &Network = labeled_network.network();
    println!(
        "Loaded {} nodes and {} edges",
        network.num_nodes(),
        network.num_edges()
    );

    let loaded_file_instant: Instant = Instant::now();

    let mut rng: XorShiftRng = match seed {
        Some(seed) => {
            println!("Using {} for PRNG seed", seed);
            XorShiftRng::seed_from_u64(seed)
        }
        None => XorShiftRng::from_entropy(),
    };

    let result: PartitionResult = algorithm.partition(network, config, &mut rng)?;
    let partition_completion_instant: Instant = Instant::now();

    println!(
        "Found {} communities with {}, largest has {} nodes",
        result.num_communities(),
        algorithm.name(),
        result.largest_community_size()
    );
    println!("Total quality (modularity): {:?}", result.total_quality());
    let centers: Vec<Option<usize>> = community_centers(network, &result.communities);
    for community in top_k_by_quality(&result, COMMUNITIES_TO_REPORT) {
        let center: &str = match centers[community] {
            Some(center) => labeled_network.label_for(center),
            None => "",
        };
        println!(
            "Community {}: {} nodes around {}, quality {:?}",
            community,
            result.communities[community].len(),
            center,
            result.quality[community]
        );
    }

    println!("Output to {}", output_path);
    let clustering: Clustering =
        Clustering::from_communities(&result.communities, network.num_nodes())?;
    let mut output_file: BufWriter<File> = BufWriter::new(File::create(output_path)?);
    for item in &clustering {
        writeln!(
            output_file,
            "{},{}",
            labeled_network.label_for(item.node_id),
            item.cluster
        )?;
    }
    output_file.flush()?;

    let file_writer_instant: Instant = Instant::now();
    println!(
        "Time to load file: {:?}",
        loaded_file_instant.duration_since(start_instant)
    );
    println!(
        "Time to run {}: {:?}",
        algorithm.name(),
        partition_completion_instant.duration_since(loaded_file_instant)
    );
    println!(
        "Time to output: {:?}",
        file_writer_instant.duration_since(partition_completion_instant)
    );
    println!(
        "Total time: {:?}",
        file_writer_instant.duration_since(start_instant)
    );
    return Ok(());
}
