// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

/// Contribution of a node to a cluster's modularity: the weight of its edges into the cluster
/// minus the expected weight `k_i * K_C / 2m`. Differences of two of these, doubled, give the
/// modularity change of moving the node between the clusters.
pub fn calculate(
    cluster_edge_weights: f64,
    node_weight: f64,
    cluster_weight: f64,
    resolution: f64,
) -> f64 {
    return cluster_edge_weights - (node_weight * cluster_weight * resolution);
}

/// `1 / 2m`; an edgeless network scales every expectation to 0.
pub fn modularity_resolution(total_edge_weight: f64) -> f64 {
    return if total_edge_weight > 0_f64 {
        1_f64 / (2_f64 * total_edge_weight)
    } else {
        0_f64
    };
}

/// Modularity change of moving a node out of the cluster it was evaluated against with
/// `current` and into the one evaluated with `candidate`.
pub fn gain(
    current: f64,
    candidate: f64,
) -> f64 {
    return 2_f64 * (candidate - current);
}
