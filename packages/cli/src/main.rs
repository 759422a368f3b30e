// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use clap::{Arg, ArgAction, Command};
use community_partitions::PartitionConfig;
use std::convert::TryFrom;

mod args;
mod partition;

use crate::args::*;

fn main() {
    let matches = Command::new("community_cli")
        .version("0.1.0")
        .author("Dwayne Pryce <dwpryce@microsoft.com>")
        .about("Partitions a provided edge list into size-capped communities and outputs the results")
        .arg(
            Arg::new(SOURCE_EDGES)
                .help("The edge list that defines the graph's connections")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new(OUTPUT)
                .help("The output for the communities detected")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new(SEPARATOR)
                .short('s')
                .help("The character to split the edge list on")
                .action(ArgAction::Set)
                .default_value("\t"),
        )
        .arg(
            Arg::new(SOURCE_INDEX)
                .action(ArgAction::Set)
                .help("0-based index of source column from edge file")
                .long("source_index")
                .default_value("0"),
        )
        .arg(
            Arg::new(TARGET_INDEX)
                .action(ArgAction::Set)
                .help("0-based index of target column from edge file")
                .long("target_index")
                .default_value("1"),
        )
        .arg(
            Arg::new(WEIGHT_INDEX)
                .action(ArgAction::Set)
                .help("0-based index of weight column from edge file; every edge weighs 1 without it")
                .long("weight_index"),
        )
        .arg(
            Arg::new(RELATION_INDEX)
                .action(ArgAction::Set)
                .help("0-based index of a relation column; lines are then read as unweighted relation triples and the weight index is ignored")
                .long("relation_index"),
        )
        .arg(
            Arg::new(SEED)
                .action(ArgAction::Set)
                .help("A seed value to start the PRNG")
                .long("seed"),
        )
        .arg(
            Arg::new(ALGORITHM)
                .action(ArgAction::Set)
                .help("The partitioner to run")
                .short('a')
                .value_parser(["louvain", "girvan_newman", "spectral", "hierarchical", "random"])
                .default_value("louvain"),
        )
        .arg(
            Arg::new(MAX_COMMUNITY_SIZE)
                .action(ArgAction::Set)
                .help("The largest number of nodes a community may hold")
                .short('m')
                .required(true),
        )
        .arg(
            Arg::new(ITERATIONS)
                .action(ArgAction::Set)
                .help("Upper bound on the levels, splits or assignment rounds the partitioner runs")
                .short('i')
                .default_value("100"),
        )
        .arg(
            Arg::new(DELTA)
                .action(ArgAction::Set)
                .help("Stop early once the mean squared deviation of community sizes from the cap falls below this")
                .long("delta")
                .default_value("1E-4"),
        )
        .arg(
            Arg::new(METRIC)
                .action(ArgAction::Set)
                .help("Node similarity used by the hierarchical partitioner")
                .long("metric")
                .value_parser(["cosine", "euclidean"])
                .default_value("cosine"),
        )
        .arg(
            Arg::new(LINKAGE)
                .action(ArgAction::Set)
                .help("Community similarity used by the hierarchical partitioner")
                .long("linkage")
                .value_parser(["single", "complete", "mean"])
                .default_value("single"),
        )
        .arg(
            Arg::new(HAS_HEADER)
                .help("Flag must be added if the source file contains a header line")
                .long("has_header")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    match CliArgs::try_from(matches) {
        Ok(cli_args) => {
            let config: PartitionConfig = PartitionConfig::new(cli_args.max_community_size)
                .with_max_iterations(cli_args.iterations)
                .with_delta(cli_args.delta);
            let outcome = partition::partition(
                &cli_args.source_edges,
                &cli_args.output_path,
                &cli_args.separator,
                cli_args.source_index,
                cli_args.target_index,
                cli_args.weight_index,
                cli_args.relation_index,
                cli_args.seed,
                cli_args.algorithm,
                &config,
                cli_args.skip_first_line,
            );
            if let Err(err) = outcome {
                println!("An error occurred when partitioning: {}", err);
            }
        }
        Err(err) => println!("{:?}", err),
    }
}
