// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use nalgebra::{DMatrix, RowDVector, SymmetricEigen};
use rand::seq::index;
use rand::Rng;

use crate::clustering::Clustering;
use crate::config::PartitionConfig;
use crate::errors::CoreError;
use crate::history::{History, PartitionResult};
use crate::log;
use crate::network::Network;
use crate::quality::ModularityMatrix;

/// The Laplacian's eigenvectors for the 2nd through `dimensions + 1`th smallest eigenvalues,
/// one column each. Equal eigenvalues keep the order the decomposition produced them in.
pub fn spectral_embedding(
    laplacian: DMatrix<f64>,
    dimensions: usize,
) -> DMatrix<f64> {
    let num_nodes: usize = laplacian.nrows();
    let eigen = SymmetricEigen::new(laplacian);
    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|a, b| {
        eigen.eigenvalues[*a]
            .partial_cmp(&eigen.eigenvalues[*b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let columns: Vec<usize> = order.into_iter().skip(1).take(dimensions).collect();
    let mut embedding: DMatrix<f64> = DMatrix::zeros(num_nodes, columns.len());
    for (column, eigenvector) in columns.iter().enumerate() {
        embedding.set_column(column, &eigen.eigenvectors.column(*eigenvector));
    }
    return embedding;
}

/// Cosine similarity, 0 when either vector has no length.
pub fn cosine_similarity(
    a: &RowDVector<f64>,
    b: &RowDVector<f64>,
) -> f64 {
    let norms: f64 = a.norm() * b.norm();
    return if norms == 0_f64 { 0_f64 } else { a.dot(b) / norms };
}

fn centroids(
    embedding: &DMatrix<f64>,
    communities: &[Vec<usize>],
) -> Vec<RowDVector<f64>> {
    return communities
        .iter()
        .map(|community| {
            let mut centroid: RowDVector<f64> = RowDVector::zeros(embedding.ncols());
            for node in community {
                centroid += embedding.row(*node);
            }
            centroid / community.len().max(1) as f64
        })
        .collect();
}

/// Assigns every node to the centroid it is most similar to. Scanning the centroids in order, a
/// centroid at least as similar as the best so far takes over, so the last of several equally
/// similar centroids wins. Centroids nobody chose are dropped.
fn update_assignments(
    embedding: &DMatrix<f64>,
    centroids: &[RowDVector<f64>],
) -> Vec<Vec<usize>> {
    let mut communities: Vec<Vec<usize>> = vec![Vec::new(); centroids.len()];
    for node in 0..embedding.nrows() {
        let row: RowDVector<f64> = embedding.row(node).into_owned();
        let mut best_similarity: f64 = -1_f64;
        let mut best_community: usize = 0;
        for (community, centroid) in centroids.iter().enumerate() {
            let similarity: f64 = cosine_similarity(&row, centroid);
            if similarity < best_similarity {
                continue;
            }
            best_similarity = similarity;
            best_community = community;
        }
        communities[best_community].push(node);
    }
    communities.retain(|community| !community.is_empty());
    return communities;
}

/// Runs the assignment rounds from the seed nodes, recording every assignment. Returns the
/// history with the number of rounds run, at most `max_iterations`.
fn assignment_history(
    embedding: &DMatrix<f64>,
    seeds: Vec<usize>,
    config: &PartitionConfig,
) -> Result<(History, usize), CoreError> {
    let num_nodes: usize = embedding.nrows();
    let mut communities: Vec<Vec<usize>> = seeds.into_iter().map(|seed| vec![seed]).collect();
    let mut history: History = History::new();

    let mut rounds: usize = 0;
    while rounds < config.max_iterations {
        let updated: Vec<Vec<usize>> =
            update_assignments(embedding, &centroids(embedding, &communities));
        let clustering: Clustering = Clustering::from_communities(&updated, num_nodes)?;
        let sizes: Vec<usize> = clustering.community_sizes();
        history.push(clustering);
        rounds += 1;
        if updated == communities || config.has_converged(&sizes) {
            log!(
                "Assignments settled after {} rounds into {} communities",
                rounds,
                updated.len()
            );
            break;
        }
        communities = updated;
    }
    return Ok((history, rounds));
}

/// Embeds the nodes with the low eigenvectors of the graph Laplacian, then clusters the
/// embedding k-means style on cosine similarity, starting from `floor(N / m) + 1` randomly
/// sampled seed nodes. Every assignment is recorded and the best one under the size cap is
/// returned.
pub fn spectral<T>(
    network: &Network,
    config: &PartitionConfig,
    rng: &mut T,
) -> Result<PartitionResult, CoreError>
where
    T: Rng,
{
    let num_nodes: usize = network.num_nodes();
    let k: usize = config.target_community_count(num_nodes).min(num_nodes);
    log!(
        "Running spectral clustering into {} communities over a network with {} nodes and {} edges",
        k,
        num_nodes,
        network.num_edges()
    );
    let modularity: ModularityMatrix = ModularityMatrix::for_network(network);
    let embedding: DMatrix<f64> = spectral_embedding(network.laplacian(), k.saturating_sub(1));
    let seeds: Vec<usize> = index::sample(rng, num_nodes, k).into_vec();
    let (history, _rounds) = assignment_history(&embedding, seeds, config)?;
    return history.select(config.max_community_size, &modularity);
}
