// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use nalgebra::DMatrix;

use crate::clustering::Clustering;
use crate::network::Network;

/// `M[i,j] = A[i,j] - k_i * k_j / 2m`, computed once per network and then used to score any
/// partition of the same node set.
#[derive(Clone, Debug, PartialEq)]
pub struct ModularityMatrix {
    matrix: DMatrix<f64>,
}

impl ModularityMatrix {
    pub fn for_network(network: &Network) -> ModularityMatrix {
        let num_nodes: usize = network.num_nodes();
        let node_weights: &[f64] = network.node_weights();
        let double_total_edge_weight: f64 = 2_f64 * network.total_edge_weight();
        if double_total_edge_weight == 0_f64 {
            return ModularityMatrix {
                matrix: DMatrix::zeros(num_nodes, num_nodes),
            };
        }
        let matrix: DMatrix<f64> = DMatrix::from_fn(num_nodes, num_nodes, |i, j| {
            network.weight(i, j) - node_weights[i] * node_weights[j] / double_total_edge_weight
        });
        return ModularityMatrix { matrix };
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        return &self.matrix;
    }

    pub fn num_nodes(&self) -> usize {
        return self.matrix.nrows();
    }

    /// Sum of `M` restricted to the given nodes on both axes.
    pub fn community_score(
        &self,
        community: &[usize],
    ) -> f64 {
        let mut score: f64 = 0_f64;
        for i in community {
            for j in community {
                score += self.matrix[(*i, *j)];
            }
        }
        return score;
    }

    /// Per-community scores, in the order the communities are given.
    pub fn score(
        &self,
        communities: &[Vec<usize>],
    ) -> Vec<f64> {
        return communities
            .iter()
            .map(|community| self.community_score(community))
            .collect();
    }

    pub fn total(
        &self,
        communities: &[Vec<usize>],
    ) -> f64 {
        return self.score(communities).iter().sum();
    }

    /// Per-cluster scores indexed by cluster id; empty cluster ids score 0.
    pub fn score_clustering(
        &self,
        clustering: &Clustering,
    ) -> Vec<f64> {
        return self.score(&clustering.nodes_per_cluster());
    }
}

pub fn modularity_matrix(network: &Network) -> ModularityMatrix {
    return ModularityMatrix::for_network(network);
}
