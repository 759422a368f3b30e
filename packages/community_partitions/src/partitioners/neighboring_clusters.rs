// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::slice::Iter;

/// Sparse set of the clusters adjacent to one node, along with the total edge weight from the
/// node into each of them. Clusters are kept in the order they were first seen, and the weights
/// use NaN to mark clusters that have not been seen since the last reset.
pub struct NeighboringClusters {
    neighboring_clusters: Vec<usize>,
    neighbor_edge_weights_within_cluster: Vec<f64>,
    current_cluster: Option<usize>,
}

impl NeighboringClusters {
    pub fn with_capacity(length: usize) -> NeighboringClusters {
        return NeighboringClusters {
            neighboring_clusters: Vec::with_capacity(length),
            neighbor_edge_weights_within_cluster: vec![f64::NAN; length],
            current_cluster: None,
        };
    }

    /// Forgets the previous node's neighborhood and starts collecting for a node that currently
    /// lives in `current_cluster`.
    pub fn reset_for_current_cluster(
        &mut self,
        current_cluster: usize,
    ) {
        if let Some(previous_cluster) = self.current_cluster {
            self.neighbor_edge_weights_within_cluster[previous_cluster] = f64::NAN;
        }
        for cluster in &self.neighboring_clusters {
            self.neighbor_edge_weights_within_cluster[*cluster] = f64::NAN;
        }
        self.neighboring_clusters.clear();
        self.current_cluster = Some(current_cluster);
    }

    pub fn increase_cluster_weight(
        &mut self,
        cluster: usize,
        edge_weight: f64,
    ) {
        if self.neighbor_edge_weights_within_cluster[cluster].is_nan() {
            self.neighboring_clusters.push(cluster);
            self.neighbor_edge_weights_within_cluster[cluster] = 0_f64;
        }
        self.neighbor_edge_weights_within_cluster[cluster] += edge_weight;
    }

    /// The current cluster has weight 0 when none of the node's neighbors are in it.
    pub fn freeze(&mut self) {
        if let Some(current_cluster) = self.current_cluster {
            if self.neighbor_edge_weights_within_cluster[current_cluster].is_nan() {
                self.neighbor_edge_weights_within_cluster[current_cluster] = 0_f64;
            }
        }
    }

    pub fn cluster_weight(
        &self,
        cluster: usize,
    ) -> f64 {
        return self.neighbor_edge_weights_within_cluster[cluster];
    }

    pub fn iter(&self) -> Iter<usize> {
        return self.neighboring_clusters.iter();
    }
}
