// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use super::edge_betweenness::{Edge, EdgeSet};
use crate::clustering::Clustering;
use crate::config::PartitionConfig;
use crate::errors::CoreError;
use crate::history::{History, PartitionResult};
use crate::log;
use crate::network::Network;
use crate::quality::ModularityMatrix;

fn components_clustering(edges: &EdgeSet) -> Clustering {
    let components: Vec<usize> = edges.components();
    let next_cluster_id: usize = components.iter().max().map(|largest| largest + 1).unwrap_or(0);
    return Clustering::as_defined(components, next_cluster_id);
}

/// Removes the most central edge, recomputing centrality after every removal, until the number
/// of connected components grows or no edges remain. Returns the number of edges removed.
fn prune_edges(edges: &mut EdgeSet) -> usize {
    let initial_components: usize = edges.num_components();
    let mut removed: usize = 0;
    while edges.num_components() <= initial_components {
        let most_central: Edge = match edges.most_central_edge() {
            Some(edge) => edge,
            None => break,
        };
        edges.remove(most_central);
        removed += 1;
    }
    return removed;
}

/// Records the components after every split, starting from the components of the untouched
/// network. Returns the history with the number of splits made, at most `max_iterations`.
fn split_history(
    network: &Network,
    config: &PartitionConfig,
) -> (History, usize) {
    let mut edges: EdgeSet =
        EdgeSet::from_weights(network.num_nodes(), |source, target| network.weight(source, target));
    let mut history: History = History::new();
    let mut current: Clustering = components_clustering(&edges);
    history.push(current.clone());

    let mut splits: usize = 0;
    while splits < config.max_iterations {
        if config.has_converged(&current.community_sizes()) {
            log!("Size deviation below {} after {} splits", config.delta, splits);
            break;
        }
        if edges.is_empty() {
            log!("No edges left to remove after {} splits", splits);
            break;
        }
        prune_edges(&mut edges);
        current = components_clustering(&edges);
        splits += 1;
        log!(
            "Split {} left {} edges in {} components",
            splits,
            edges.num_edges(),
            current.next_cluster_id()
        );
        history.push(current.clone());
    }
    return (history, splits);
}

/// Divisive partitioning: the network's connected components are split further by repeatedly
/// cutting the edge with the highest betweenness. Each split is recorded, and the recorded
/// partition under the size cap whose sizes are closest to `max_community_size` is returned.
pub fn girvan_newman(
    network: &Network,
    config: &PartitionConfig,
) -> Result<PartitionResult, CoreError> {
    log!(
        "Running Girvan-Newman with a maximum community size of {} over a network with {} nodes and {} edges",
        config.max_community_size,
        network.num_nodes(),
        network.num_edges()
    );
    let modularity: ModularityMatrix = ModularityMatrix::for_network(network);
    let (history, _splits) = split_history(network, config);
    return history.select(config.max_community_size, &modularity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_edges_splits_once() {
        let network: Network =
            Network::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)])
                .unwrap();
        let mut edges: EdgeSet =
            EdgeSet::from_weights(6, |source, target| network.weight(source, target));
        assert_eq!(1, prune_edges(&mut edges));
        assert_eq!(vec![0, 0, 0, 1, 1, 1], edges.components());
    }

    #[test]
    fn test_two_triangles() {
        let network: Network =
            Network::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)])
                .unwrap();
        let result: PartitionResult = girvan_newman(&network, &PartitionConfig::new(3)).unwrap();
        assert_eq!(vec![vec![0, 1, 2], vec![3, 4, 5]], result.communities);
        assert!((result.total_quality() - 5_f64).abs() < 1e-12);
    }

    #[test]
    fn test_splits_are_bounded() {
        let num_nodes: usize = 30;
        let edges: Vec<(usize, usize)> = (0..num_nodes)
            .map(|node| (node, (node + 1) % num_nodes))
            .collect();
        let network: Network = Network::from_edges(num_nodes, &edges).unwrap();
        let config: PartitionConfig = PartitionConfig::new(4).with_max_iterations(5);
        let (history, splits) = split_history(&network, &config);
        assert_eq!(5, splits);
        assert!(history.len() <= 1 + splits);
        assert!(history.len() > 1);

        let (history, splits) = split_history(&network, &PartitionConfig::new(4));
        assert!(splits <= 100);
        assert!(history.len() <= 1 + splits);
    }

    #[test]
    fn test_ring_respects_cap() {
        let network: Network =
            Network::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]).unwrap();
        let result: PartitionResult = girvan_newman(&network, &PartitionConfig::new(3)).unwrap();
        assert!(result.largest_community_size() <= 3);
        let mut nodes: Vec<usize> = result.communities.concat();
        nodes.sort();
        assert_eq!((0..6).collect::<Vec<usize>>(), nodes);
    }
}
