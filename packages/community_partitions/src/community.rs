// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use crate::history::PartitionResult;
use crate::network::Network;

/// The member of each community with the largest degree; the first such member on ties.
/// An empty community has no center and is reported as `None`.
pub fn community_centers(
    network: &Network,
    communities: &[Vec<usize>],
) -> Vec<Option<usize>> {
    let node_weights: &[f64] = network.node_weights();
    return communities
        .iter()
        .map(|community| {
            let mut center: Option<usize> = None;
            for node in community {
                center = match center {
                    Some(current) if node_weights[current] >= node_weights[*node] => Some(current),
                    _ => Some(*node),
                };
            }
            center
        })
        .collect();
}

/// Number of edges with one endpoint in each community. Several relations between the same
/// two nodes have already collapsed into one edge, so they count once; the count is the same
/// from either side.
pub fn connection_count(
    network: &Network,
    community: &[usize],
    other: &[usize],
) -> usize {
    let mut connections: usize = 0;
    for source in community {
        for target in other {
            if source != target && network.weight(*source, *target) != 0_f64 {
                connections += 1;
            }
        }
    }
    return connections;
}

/// Indices of the communities sharing more than `minimum_connections` edges with the
/// community at index `center`, in ascending index order.
pub fn neighbor_communities(
    network: &Network,
    communities: &[Vec<usize>],
    center: usize,
    minimum_connections: usize,
) -> Vec<usize> {
    let center_community: &[usize] = match communities.get(center) {
        Some(community) => community,
        None => return Vec::new(),
    };
    return communities
        .iter()
        .enumerate()
        .filter(|(index, community)| {
            *index != center
                && connection_count(network, center_community, community) > minimum_connections
        })
        .map(|(index, _community)| index)
        .collect();
}

/// Indices of the `k` best scored communities, highest quality first. Equal scores keep their
/// original order.
pub fn top_k_by_quality(
    result: &PartitionResult,
    k: usize,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..result.quality.len()).collect();
    indices.sort_by(|a, b| {
        result.quality[*b]
            .partial_cmp(&result.quality[*a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(k);
    return indices;
}
