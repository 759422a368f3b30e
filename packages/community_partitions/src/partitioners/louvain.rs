// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use super::local_move::local_move;
use crate::clustering::Clustering;
use crate::config::PartitionConfig;
use crate::errors::CoreError;
use crate::history::{History, PartitionResult};
use crate::log;
use crate::network::Network;
use crate::quality::ModularityMatrix;

/// One coarsening level: the working network, and the mapping from every original node to the
/// node of the working network that contains it.
pub struct Level {
    network: Network,
    mapping: Clustering,
}

impl Level {
    pub fn initial(network: Network) -> Level {
        let mapping: Clustering = Clustering::as_self_clusters(network.num_nodes());
        return Level { network, mapping };
    }

    pub fn network(&self) -> &Network {
        return &self.network;
    }

    pub fn mapping(&self) -> &Clustering {
        return &self.mapping;
    }

    /// Original node ids of every working node, indexed by working node id.
    pub fn members(&self) -> Vec<Vec<usize>> {
        return self.mapping.nodes_per_cluster();
    }

    /// Number of original nodes inside each working node.
    pub fn node_sizes(&self) -> Vec<usize> {
        return self.mapping.num_nodes_per_cluster();
    }

    /// Lifts a clustering of the working nodes to the original nodes.
    pub fn original_clustering(
        &self,
        clustering: &Clustering,
    ) -> Clustering {
        let mut original: Clustering = self.mapping.clone();
        original.merge_clustering(clustering);
        return original;
    }

    /// Contracts every cluster of a compacted working clustering into one working node of the
    /// next level.
    pub fn coarsen(
        &self,
        clustering: &Clustering,
    ) -> Result<Level, CoreError> {
        let network: Network = self.network.induce_clustering_network(clustering)?;
        let mapping: Clustering = self.original_clustering(clustering);
        return Ok(Level { network, mapping });
    }
}

/// Runs the levels of the size-capped Louvain search, recording every partition passed through.
/// Returns the history with the number of levels run, at most `max_iterations`.
fn level_history(
    network: &Network,
    config: &PartitionConfig,
) -> Result<(History, usize), CoreError> {
    let mut history: History = History::new();
    let mut level: Level = Level::initial(network.clone());
    history.push(level.mapping().clone());

    let mut levels: usize = 0;
    while levels < config.max_iterations {
        let community_sizes: Vec<usize> = level.node_sizes();
        if level.network().num_nodes() <= 1 || config.has_converged(&community_sizes) {
            log!(
                "Stopping after {} levels with {} communities",
                levels,
                community_sizes.len()
            );
            break;
        }

        let mut clustering: Clustering = Clustering::as_self_clusters(level.network().num_nodes());
        let (mut moved, _passes) =
            local_move(&level, &mut clustering, config, false, &mut history)?;
        if !moved {
            let (forced, _passes) = local_move(&level, &mut clustering, config, true, &mut history)?;
            moved = forced;
        }
        levels += 1;
        if !moved {
            log!(
                "Level {} could not move any node, stopping with {} communities",
                levels,
                community_sizes.len()
            );
            break;
        }

        clustering.remove_empty_clusters();
        history.push(level.original_clustering(&clustering));
        level = level.coarsen(&clustering)?;
        log!(
            "Level {} aggregated into a network with {} nodes and {} edges",
            levels,
            level.network().num_nodes(),
            level.network().num_edges()
        );
    }
    return Ok((history, levels));
}

/// Size-capped Louvain: local moving of nodes between clusters, followed by aggregation of the
/// network on the resulting clusters, repeated on the aggregate network.
///
/// Each level starts from every working node in its own cluster. When a normal local move pass
/// cannot move anything, a force merge is attempted, which also accepts moves that leave
/// modularity unchanged. The search stops when the whole network is one community, when the
/// community sizes are within `delta` of `max_community_size`, after `max_iterations` levels, or
/// when a level moves nothing at all.
///
/// Every partition passed through, from the initial singletons to the end of the last level, is
/// recorded and the best one under the size cap is returned.
pub fn louvain(
    network: &Network,
    config: &PartitionConfig,
) -> Result<PartitionResult, CoreError> {
    log!(
        "Running size-capped Louvain with a maximum community size of {} for up to {} levels over a network with {} nodes and {} edges with a total edge weight of {}",
        config.max_community_size,
        config.max_iterations,
        network.num_nodes(),
        network.num_edges(),
        network.total_edge_weight()
    );
    let modularity: ModularityMatrix = ModularityMatrix::for_network(network);
    let (history, _levels) = level_history(network, config)?;
    return history.select(config.max_community_size, &modularity);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Network {
        return Network::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]).unwrap();
    }

    #[test]
    fn test_coarsen_round_trip() {
        let network: Network = ring();
        let level: Level = Level::initial(network.clone());
        let clustering: Clustering = Clustering::as_defined(vec![0, 0, 1, 1, 2, 2], 3);
        let coarse: Level = level.coarsen(&clustering).unwrap();
        assert_eq!(3, coarse.network().num_nodes());
        assert_eq!(vec![vec![0, 1], vec![2, 3], vec![4, 5]], coarse.members());
        assert_eq!(vec![2, 2, 2], coarse.node_sizes());
        assert_eq!(
            network.total_edge_weight(),
            coarse.network().total_edge_weight()
        );

        // the coarse network scores its singletons exactly as the original scores the pairs
        let fine: f64 = ModularityMatrix::for_network(&network).total(&coarse.members());
        let singletons: Vec<Vec<usize>> = vec![vec![0], vec![1], vec![2]];
        let coarse_total: f64 = ModularityMatrix::for_network(coarse.network()).total(&singletons);
        assert!((fine - coarse_total).abs() < 1e-12);

        let second: Level = coarse
            .coarsen(&Clustering::as_defined(vec![0, 0, 1], 2))
            .unwrap();
        assert_eq!(vec![vec![0, 1, 2, 3], vec![4, 5]], second.members());
        assert_eq!(
            Clustering::as_defined(vec![0, 0, 0, 0, 1, 1], 2),
            second.original_clustering(&Clustering::as_self_clusters(2))
        );
    }

    #[test]
    fn test_ring_pairs_under_cap() {
        let result: PartitionResult = louvain(&ring(), &PartitionConfig::new(3)).unwrap();
        assert_eq!(vec![vec![0, 1], vec![2, 3], vec![4, 5]], result.communities);
        assert!(result.total_quality() > 0_f64);
    }

    #[test]
    fn test_levels_are_bounded() {
        let num_nodes: usize = 30;
        let edges: Vec<(usize, usize)> = (0..num_nodes)
            .map(|node| (node, (node + 1) % num_nodes))
            .collect();
        let network: Network = Network::from_edges(num_nodes, &edges).unwrap();
        let max_iterations: usize = 5;
        let config: PartitionConfig = PartitionConfig::new(4).with_max_iterations(max_iterations);
        let (history, levels) = level_history(&network, &config).unwrap();
        assert!(levels >= 1 && levels <= max_iterations);
        // the initial singletons, then per level two local move phases of at most
        // `max_iterations` passes with one entry per node each, and the aggregated partition
        let worst_case: usize = 1 + levels * (2 * max_iterations * num_nodes + 1);
        assert!(history.len() <= worst_case);
    }

    #[test]
    fn test_two_triangles_split_in_halves() {
        let network: Network =
            Network::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)])
                .unwrap();
        let result: PartitionResult = louvain(&network, &PartitionConfig::new(3)).unwrap();
        assert_eq!(vec![vec![0, 1, 2], vec![3, 4, 5]], result.communities);
        assert!((result.total_quality() - 5_f64).abs() < 1e-12);
    }
}
