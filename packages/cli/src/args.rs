// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use clap::ArgMatches;
use community_partitions::partitioners::{Linkage, SimilarityMetric};
use community_partitions::Algorithm;
use std::convert::TryFrom;
use std::num::{ParseFloatError, ParseIntError};

pub const SOURCE_EDGES: &str = "EDGE_LIST_FILE";
pub const OUTPUT: &str = "OUTPUT_PATH";
pub const SEPARATOR: &str = "separator";
pub const SOURCE_INDEX: &str = "source_index";
pub const TARGET_INDEX: &str = "target_index";
pub const WEIGHT_INDEX: &str = "weight_index";
pub const RELATION_INDEX: &str = "relation_index";
pub const SEED: &str = "seed";
pub const ALGORITHM: &str = "algorithm";
pub const MAX_COMMUNITY_SIZE: &str = "max_community_size";
pub const ITERATIONS: &str = "iterations";
pub const DELTA: &str = "delta";
pub const METRIC: &str = "metric";
pub const LINKAGE: &str = "linkage";
pub const HAS_HEADER: &str = "has_header";

pub struct CliArgs {
    pub source_edges: String,
    pub output_path: String,
    pub separator: String,
    pub source_index: usize,
    pub target_index: usize,
    pub weight_index: Option<usize>,
    pub relation_index: Option<usize>,
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub max_community_size: usize,
    pub iterations: usize,
    pub delta: f64,
    pub skip_first_line: bool,
}

fn required<'a>(
    matches: &'a ArgMatches,
    id: &str,
) -> Result<&'a str, ParseCliError> {
    return matches
        .get_one::<String>(id)
        .map(|value| value.as_str())
        .ok_or(ParseCliError::RequiredValueError);
}

impl TryFrom<ArgMatches> for CliArgs {
    type Error = ParseCliError;

    fn try_from(matches: ArgMatches) -> Result<Self, Self::Error> {
        let source_edges: &str = required(&matches, SOURCE_EDGES)?;
        let output: &str = required(&matches, OUTPUT)?;
        let separator: &str = required(&matches, SEPARATOR)?;
        let source_index: usize = required(&matches, SOURCE_INDEX)?.parse()?;
        let target_index: usize = required(&matches, TARGET_INDEX)?.parse()?;
        let weight_index: Option<usize> = match matches.get_one::<String>(WEIGHT_INDEX) {
            Some(value) => Some(value.parse()?),
            None => None,
        };
        let relation_index: Option<usize> = match matches.get_one::<String>(RELATION_INDEX) {
            Some(value) => Some(value.parse()?),
            None => None,
        };
        let seed: Option<u64> = match matches.get_one::<String>(SEED) {
            Some(value) => Some(value.parse()?),
            None => None,
        };
        let max_community_size: usize = required(&matches, MAX_COMMUNITY_SIZE)?.parse()?;
        let iterations: usize = required(&matches, ITERATIONS)?.parse()?;
        let delta: f64 = required(&matches, DELTA)?.parse()?;

        let algorithm_name: &str = required(&matches, ALGORITHM)?;
        let algorithm: Algorithm = if algorithm_name == "hierarchical" {
            let metric: SimilarityMetric = required(&matches, METRIC)?
                .parse()
                .map_err(|_| ParseCliError::InvalidMetricError)?;
            let linkage: Linkage = required(&matches, LINKAGE)?
                .parse()
                .map_err(|_| ParseCliError::InvalidLinkageError)?;
            Algorithm::Hierarchical { metric, linkage }
        } else {
            algorithm_name
                .parse()
                .map_err(|_| ParseCliError::InvalidAlgorithmError)?
        };

        let skip_first_line: bool = matches.get_flag(HAS_HEADER);
        let cli_args: CliArgs = CliArgs {
            source_edges: source_edges.into(),
            output_path: output.into(),
            separator: separator.into(),
            source_index,
            target_index,
            weight_index,
            relation_index,
            seed,
            algorithm,
            max_community_size,
            iterations,
            delta,
            skip_first_line,
        };
        return Ok(cli_args);
    }
}

#[derive(Debug)]
pub enum ParseCliError {
    RequiredValueError,
    NotANumber,
    InvalidAlgorithmError,
    InvalidMetricError,
    InvalidLinkageError,
}

impl From<ParseFloatError> for ParseCliError {
    fn from(_: ParseFloatError) -> Self {
        return ParseCliError::NotANumber;
    }
}

impl From<ParseIntError> for ParseCliError {
    fn from(_: ParseIntError) -> Self {
        return ParseCliError::NotANumber;
    }
}
