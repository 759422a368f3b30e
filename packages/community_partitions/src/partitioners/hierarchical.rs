// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use nalgebra::DMatrix;
use rayon::prelude::*;
use std::str::FromStr;

use crate::config::PartitionConfig;
use crate::errors::CoreError;
use crate::history::PartitionResult;
use crate::log;
use crate::network::Network;
use crate::progress_meter;
use crate::quality::ModularityMatrix;

/// How similar two nodes are, judged from their rows of the adjacency matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimilarityMetric {
    Cosine,
    /// `1 / ||A_i - A_j||`; nodes with identical rows are infinitely similar.
    InverseEuclidean,
}

/// How the similarity of two communities follows from the similarities of their members.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Linkage {
    /// The least similar pair of members.
    Single,
    /// The most similar pair of members.
    Complete,
    /// The mean over all pairs of members.
    Mean,
}

impl FromStr for SimilarityMetric {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        return match name.to_lowercase().as_str() {
            "cosine" => Ok(SimilarityMetric::Cosine),
            "euclidean" | "inverse_euclidean" => Ok(SimilarityMetric::InverseEuclidean),
            _ => Err(CoreError::ParameterRangeError),
        };
    }
}

impl FromStr for Linkage {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        return match name.to_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "mean" => Ok(Linkage::Mean),
            _ => Err(CoreError::ParameterRangeError),
        };
    }
}

fn node_similarity(
    weights: &DMatrix<f64>,
    metric: SimilarityMetric,
    source: usize,
    target: usize,
) -> f64 {
    let source_row = weights.row(source);
    let target_row = weights.row(target);
    return match metric {
        SimilarityMetric::Cosine => {
            let norms: f64 = source_row.norm() * target_row.norm();
            if norms == 0_f64 {
                0_f64
            } else {
                source_row.dot(&target_row) / norms
            }
        }
        SimilarityMetric::InverseEuclidean => 1_f64 / (&source_row - &target_row).norm(),
    };
}

/// Pairwise node similarity with a zero diagonal. Rows are computed in parallel.
pub fn node_similarity_matrix(
    network: &Network,
    metric: SimilarityMetric,
) -> DMatrix<f64> {
    let num_nodes: usize = network.num_nodes();
    let weights: &DMatrix<f64> = network.weights();
    let rows: Vec<Vec<f64>> = (0..num_nodes)
        .into_par_iter()
        .map(|source| {
            (0..num_nodes)
                .map(|target| {
                    if source == target {
                        0_f64
                    } else {
                        node_similarity(weights, metric, source, target)
                    }
                })
                .collect()
        })
        .collect();
    return DMatrix::from_fn(num_nodes, num_nodes, |i, j| rows[i][j]);
}

/// The off-diagonal pair with the largest similarity, the first in row-major order on ties,
/// returned as `(smaller, larger)`.
fn find_best_merge(similarities: &DMatrix<f64>) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..similarities.nrows() {
        for j in 0..similarities.ncols() {
            if i == j {
                continue;
            }
            let similarity: f64 = similarities[(i, j)];
            let replaces: bool = match best {
                Some((_, _, best_similarity)) => similarity > best_similarity,
                None => true,
            };
            if replaces {
                best = Some((i, j, similarity));
            }
        }
    }
    return best.map(|(i, j, _)| (i.min(j), i.max(j)));
}

fn linkage_similarity(
    node_similarities: &DMatrix<f64>,
    linkage: Linkage,
    community: &[usize],
    other: &[usize],
) -> f64 {
    let pairs = community
        .iter()
        .flat_map(|u| other.iter().map(move |v| node_similarities[(*u, *v)]));
    return match linkage {
        Linkage::Single => pairs.fold(f64::INFINITY, f64::min),
        Linkage::Complete => pairs.fold(f64::NEG_INFINITY, f64::max),
        Linkage::Mean => {
            let count: usize = community.len() * other.len();
            pairs.sum::<f64>() / count.max(1) as f64
        }
    };
}

/// Merges the most similar pair of communities and refreshes the merged community's row and
/// column of `community_similarities`.
fn merge_communities(
    communities: &mut Vec<Vec<usize>>,
    community_similarities: DMatrix<f64>,
    node_similarities: &DMatrix<f64>,
    linkage: Linkage,
    merge: (usize, usize),
) -> DMatrix<f64> {
    let (kept, absorbed) = merge;
    let absorbed_members: Vec<usize> = communities.remove(absorbed);
    communities[kept].extend(absorbed_members);
    communities[kept].sort_unstable();

    let mut community_similarities: DMatrix<f64> = community_similarities
        .remove_row(absorbed)
        .remove_column(absorbed);
    for other in 0..communities.len() {
        if other == kept {
            continue;
        }
        let similarity: f64 =
            linkage_similarity(node_similarities, linkage, &communities[kept], &communities[other]);
        community_similarities[(kept, other)] = similarity;
        community_similarities[(other, kept)] = similarity;
    }
    return community_similarities;
}

/// Agglomerative clustering: every node starts alone, and the two most similar communities are
/// merged until `floor(N / m) + 1` communities remain. The result is scored with modularity.
pub fn hierarchical(
    network: &Network,
    config: &PartitionConfig,
    metric: SimilarityMetric,
    linkage: Linkage,
) -> Result<PartitionResult, CoreError> {
    let num_nodes: usize = network.num_nodes();
    let target: usize = config.target_community_count(num_nodes);
    log!(
        "Running agglomerative clustering ({:?} similarity, {:?} linkage) into {} communities over a network with {} nodes",
        metric,
        linkage,
        target,
        num_nodes
    );
    let modularity: ModularityMatrix = ModularityMatrix::for_network(network);
    let node_similarities: DMatrix<f64> = node_similarity_matrix(network, metric);
    let mut community_similarities: DMatrix<f64> = node_similarities.clone();
    let mut communities: Vec<Vec<usize>> = (0..num_nodes).map(|node| vec![node]).collect();

    while communities.len() > target {
        progress_meter!(
            "{}% of the merges complete",
            num_nodes - communities.len(),
            num_nodes - target
        );
        let merge: (usize, usize) = match find_best_merge(&community_similarities) {
            Some(merge) => merge,
            None => break,
        };
        let mut merged: Vec<Vec<usize>> = communities.clone();
        let merged_similarities: DMatrix<f64> = merge_communities(
            &mut merged,
            community_similarities.clone(),
            &node_similarities,
            linkage,
            merge,
        );
        let covered: usize = merged.iter().map(|community| community.len()).sum();
        if covered < num_nodes {
            log!("Merge would lose nodes, stopping with {} communities", communities.len());
            break;
        }
        communities = merged;
        community_similarities = merged_similarities;
    }

    return Ok(PartitionResult::scored(communities, &modularity));
}
