// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use super::louvain::Level;
use super::neighboring_clusters::NeighboringClusters;
use super::quality_value_increment;
use crate::clustering::Clustering;
use crate::config::PartitionConfig;
use crate::errors::CoreError;
use crate::history::History;
use crate::log;
use crate::network::Network;
use crate::progress_meter;

/// Gains within this distance of 0 count as 0.
pub const GAIN_TOLERANCE: f64 = 1e-12;

/// Repeatedly sweeps the nodes of the level's network in ascending order, moving each one into
/// the neighboring cluster that most increases modularity without letting any cluster grow past
/// `max_community_size` original nodes. Every committed move is recorded in `history`, mapped
/// back to the original nodes.
///
/// With `force_merge`, a node also moves when the best qualifying candidate does not change
/// modularity at all: the first candidate whose gain is non-negative is taken, and a later one
/// only replaces it with a strictly larger gain.
///
/// Returns whether any node moved, and the number of passes made, at most `max_iterations`.
pub fn local_move(
    level: &Level,
    clustering: &mut Clustering,
    config: &PartitionConfig,
    force_merge: bool,
    history: &mut History,
) -> Result<(bool, usize), CoreError> {
    let network: &Network = level.network();
    let num_nodes: usize = network.num_nodes();
    log!(
        "Local move{} starting over a network with {} nodes and {} edges",
        if force_merge { " (force merge)" } else { "" },
        num_nodes,
        network.num_edges()
    );
    if num_nodes <= 1 {
        return Ok((false, 0));
    }

    let node_sizes: Vec<usize> = level.node_sizes();
    let resolution: f64 = quality_value_increment::modularity_resolution(network.total_edge_weight());
    let (mut cluster_weights, mut cluster_sizes) =
        weights_and_sizes_per_cluster(network, clustering, &node_sizes)?;
    let mut neighboring_clusters: NeighboringClusters =
        NeighboringClusters::with_capacity(cluster_weights.len());
    let mut improved: bool = false;

    let mut passes: usize = 0;
    while passes < config.max_iterations {
        let live_sizes: Vec<usize> = cluster_sizes
            .iter()
            .cloned()
            .filter(|size| *size > 0)
            .collect();
        if config.has_converged(&live_sizes) {
            log!("Size deviation below {} after {} passes", config.delta, passes);
            break;
        }
        let mut moved: bool = false;
        for current_node in 0..num_nodes {
            progress_meter!("{}% of the pass complete", current_node, num_nodes);
            let current_cluster: usize = clustering.cluster_at(current_node)?;
            let current_node_weight: f64 = network.node_weight_at(current_node)?;
            let current_node_size: usize = node_sizes[current_node];

            // leave the current cluster while candidates are evaluated
            cluster_weights[current_cluster] -= current_node_weight;
            cluster_sizes[current_cluster] -= current_node_size;

            identify_neighboring_clusters(
                network,
                clustering,
                current_node,
                current_cluster,
                &mut neighboring_clusters,
            )?;

            let best_cluster: usize = best_cluster_for(
                current_cluster,
                current_node_weight,
                current_node_size,
                resolution,
                config.max_community_size,
                force_merge,
                &neighboring_clusters,
                &cluster_weights,
                &cluster_sizes,
            );

            cluster_weights[best_cluster] += current_node_weight;
            cluster_sizes[best_cluster] += current_node_size;

            if best_cluster != current_cluster {
                clustering.update_cluster_at(current_node, best_cluster)?;
                history.push(level.original_clustering(clustering));
                moved = true;
            }
        }
        passes += 1;
        improved |= moved;
        if !moved {
            break;
        }
    }
    return Ok((improved, passes));
}

fn weights_and_sizes_per_cluster(
    network: &Network,
    clustering: &Clustering,
    node_sizes: &[usize],
) -> Result<(Vec<f64>, Vec<usize>), CoreError> {
    let cluster_count: usize = clustering.next_cluster_id().max(network.num_nodes());
    let mut cluster_weights: Vec<f64> = vec![0_f64; cluster_count];
    let mut cluster_sizes: Vec<usize> = vec![0; cluster_count];
    for node in 0..network.num_nodes() {
        let cluster: usize = clustering.cluster_at(node)?;
        cluster_weights[cluster] += network.node_weight_at(node)?;
        cluster_sizes[cluster] += node_sizes[node];
    }
    return Ok((cluster_weights, cluster_sizes));
}

fn identify_neighboring_clusters(
    network: &Network,
    clustering: &Clustering,
    current_node: usize,
    current_cluster: usize,
    neighboring_clusters: &mut NeighboringClusters,
) -> Result<(), CoreError> {
    neighboring_clusters.reset_for_current_cluster(current_cluster);
    for (neighbor, edge_weight) in network.neighbors_for(current_node) {
        let neighbor_cluster: usize = clustering.cluster_at(neighbor)?;
        neighboring_clusters.increase_cluster_weight(neighbor_cluster, edge_weight);
    }
    neighboring_clusters.freeze();
    return Ok(());
}

#[allow(clippy::too_many_arguments)]
fn best_cluster_for(
    current_cluster: usize,
    current_node_weight: f64,
    current_node_size: usize,
    resolution: f64,
    max_community_size: usize,
    force_merge: bool,
    neighboring_clusters: &NeighboringClusters,
    cluster_weights: &[f64],
    cluster_sizes: &[usize],
) -> usize {
    let stay_value: f64 = quality_value_increment::calculate(
        neighboring_clusters.cluster_weight(current_cluster),
        current_node_weight,
        cluster_weights[current_cluster],
        resolution,
    );
    let mut best: Option<(usize, f64)> = None;

    for test_cluster in neighboring_clusters.iter() {
        let test_cluster: usize = *test_cluster;
        if test_cluster == current_cluster
            || cluster_sizes[test_cluster] + current_node_size > max_community_size
        {
            continue;
        }
        let gain: f64 = quality_value_increment::gain(
            stay_value,
            quality_value_increment::calculate(
                neighboring_clusters.cluster_weight(test_cluster),
                current_node_weight,
                cluster_weights[test_cluster],
                resolution,
            ),
        );
        let accepted: bool = match best {
            Some((_, best_gain)) => gain > best_gain,
            None if force_merge => gain >= -GAIN_TOLERANCE,
            None => gain > GAIN_TOLERANCE,
        };
        if accepted {
            best = Some((test_cluster, gain));
        }
    }
    return match best {
        Some((cluster, _)) => cluster,
        None => current_cluster,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn two_triangles() -> Network {
        return Network::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)])
            .unwrap();
    }

    #[test]
    fn test_local_move_finds_triangles() {
        let level: Level = Level::initial(two_triangles());
        let mut clustering: Clustering = Clustering::as_self_clusters(6);
        let mut history: History = History::new();
        let config: PartitionConfig = PartitionConfig::new(3);
        let (improved, passes) =
            local_move(&level, &mut clustering, &config, false, &mut history).unwrap();
        assert!(improved);
        assert!(passes <= config.max_iterations);
        assert_eq!(
            vec![vec![0, 1, 2], vec![3, 4, 5]],
            clustering.into_communities()
        );
        assert!(history.len() > 1);
    }

    #[test]
    fn test_passes_are_bounded() {
        let num_nodes: usize = 30;
        let edges: Vec<(usize, usize)> = (0..num_nodes)
            .map(|node| (node, (node + 1) % num_nodes))
            .collect();
        let level: Level = Level::initial(Network::from_edges(num_nodes, &edges).unwrap());
        let config: PartitionConfig = PartitionConfig::new(4).with_max_iterations(5);
        for force_merge in &[false, true] {
            let mut clustering: Clustering = Clustering::as_self_clusters(num_nodes);
            let mut history: History = History::new();
            let (_improved, passes) =
                local_move(&level, &mut clustering, &config, *force_merge, &mut history).unwrap();
            assert!(passes >= 1 && passes <= 5);
            // at most one entry per node per pass
            assert!(history.len() <= passes * num_nodes);
        }
    }

    #[test]
    fn test_local_move_respects_cap() {
        let level: Level = Level::initial(two_triangles());
        let mut clustering: Clustering = Clustering::as_self_clusters(6);
        let mut history: History = History::new();
        let config: PartitionConfig = PartitionConfig::new(2);
        local_move(&level, &mut clustering, &config, false, &mut history).unwrap();
        for community in clustering.into_communities() {
            assert!(community.len() <= 2);
        }
    }

    #[test]
    fn test_force_merge_accepts_zero_gain() {
        // two super-nodes whose merge leaves modularity unchanged
        let network: Network = Network::new(DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]));
        let level: Level = Level::initial(network);
        let config: PartitionConfig = PartitionConfig::new(2);

        let mut clustering: Clustering = Clustering::as_self_clusters(2);
        let mut history: History = History::new();
        assert_eq!(
            (false, 1),
            local_move(&level, &mut clustering, &config, false, &mut history).unwrap()
        );
        assert_eq!(Clustering::as_self_clusters(2), clustering);

        let (improved, _passes) =
            local_move(&level, &mut clustering, &config, true, &mut history).unwrap();
        assert!(improved);
        assert_eq!(vec![vec![0, 1]], clustering.into_communities());
    }

    #[test]
    fn test_best_cluster_for_tie_keeps_first_seen() {
        let mut neighboring_clusters: NeighboringClusters = NeighboringClusters::with_capacity(3);
        neighboring_clusters.reset_for_current_cluster(0);
        neighboring_clusters.increase_cluster_weight(2, 1.0);
        neighboring_clusters.increase_cluster_weight(1, 1.0);
        neighboring_clusters.freeze();
        let cluster_weights: Vec<f64> = vec![0.0, 2.0, 2.0];
        let cluster_sizes: Vec<usize> = vec![0, 1, 1];
        let best: usize = best_cluster_for(
            0,
            2.0,
            1,
            1_f64 / 12_f64,
            3,
            false,
            &neighboring_clusters,
            &cluster_weights,
            &cluster_sizes,
        );
        assert_eq!(2, best);

        let capped: usize = best_cluster_for(
            0,
            2.0,
            1,
            1_f64 / 12_f64,
            1,
            false,
            &neighboring_clusters,
            &cluster_weights,
            &cluster_sizes,
        );
        assert_eq!(0, capped);
    }
}
