// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use super::errors::CoreError;
use super::safe_vectors::SafeVectors;
use std::ops::Index;

pub struct ClusterItem {
    pub node_id: usize,
    pub cluster: usize,
}

/// A mapping from node to community id.
///
/// `next_cluster_id` is only guaranteed to equal the number of communities after
/// `remove_empty_clusters` has been called; the partitioners move nodes around freely and leave
/// holes in the id space until they compact.
///
/// The same structure doubles as the index-remapping table between coarsening levels: a
/// Clustering over the original nodes whose "clusters" are the super-nodes of a coarse network.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    next_cluster_id: usize,
    node_to_cluster_mapping: Vec<usize>,
}

impl Clustering {
    /// Creates a Clustering with every node in its own cluster.
    pub fn as_self_clusters(num_nodes: usize) -> Clustering {
        let mut identity_mapping: Vec<usize> = Vec::with_capacity(num_nodes);
        identity_mapping.extend(0..num_nodes);
        return Clustering {
            next_cluster_id: num_nodes,
            node_to_cluster_mapping: identity_mapping,
        };
    }

    /// Creates a clustering (with ZERO sanity checking) of the values stored in Clustering.
    /// Use responsibly.
    pub fn as_defined(
        node_to_cluster_mapping: Vec<usize>,
        next_cluster_id: usize,
    ) -> Clustering {
        return Clustering {
            next_cluster_id,
            node_to_cluster_mapping,
        };
    }

    /// Builds a compacted clustering from a list of communities. Nodes not mentioned by any
    /// community, or mentioned by more than one, make this fail.
    pub fn from_communities(
        communities: &[Vec<usize>],
        num_nodes: usize,
    ) -> Result<Clustering, CoreError> {
        let mut mapping: Vec<Option<usize>> = vec![None; num_nodes];
        for (cluster, members) in communities.iter().enumerate() {
            for node in members {
                match mapping.get_mut(*node) {
                    Some(slot) if slot.is_none() => *slot = Some(cluster),
                    _ => return Err(CoreError::ClusterIndexingError),
                }
            }
        }
        let node_to_cluster_mapping: Vec<usize> = mapping
            .into_iter()
            .map(|cluster| cluster.ok_or(CoreError::ClusterIndexingError))
            .collect::<Result<Vec<usize>, CoreError>>()?;
        let mut clustering: Clustering = Clustering {
            next_cluster_id: communities.len(),
            node_to_cluster_mapping,
        };
        clustering.remove_empty_clusters();
        return Ok(clustering);
    }

    pub fn num_nodes(&self) -> usize {
        return self.node_to_cluster_mapping.len();
    }

    pub fn next_cluster_id(&self) -> usize {
        return self.next_cluster_id;
    }

    pub fn cluster_at(
        &self,
        node: usize,
    ) -> Result<usize, CoreError> {
        return self
            .node_to_cluster_mapping
            .get_or_err(node, CoreError::ClusterIndexingError);
    }

    pub fn update_cluster_at(
        &mut self,
        node: usize,
        cluster: usize,
    ) -> Result<(), CoreError> {
        return if self.node_to_cluster_mapping.is_safe_access(node) {
            self.node_to_cluster_mapping[node] = cluster;
            self.next_cluster_id = self.next_cluster_id.max(cluster + 1);
            Ok(())
        } else {
            Err(CoreError::ClusterIndexingError)
        };
    }

    /// Node count per cluster id; index is the cluster id.
    pub fn num_nodes_per_cluster(&self) -> Vec<usize> {
        let mut nodes_per_cluster: Vec<usize> = vec![0; self.next_cluster_id];
        for cluster in &self.node_to_cluster_mapping {
            nodes_per_cluster[*cluster] += 1;
        }
        return nodes_per_cluster;
    }

    /// Generates a vector containing every node id for every cluster id. The outer vector index
    /// corresponds to the cluster id, and the values in the inner vectors are ascending node ids.
    pub fn nodes_per_cluster(&self) -> Vec<Vec<usize>> {
        let number_nodes_per_cluster: Vec<usize> = self.num_nodes_per_cluster();
        let mut nodes_per_cluster: Vec<Vec<usize>> = Vec::with_capacity(self.next_cluster_id);
        for count in number_nodes_per_cluster {
            nodes_per_cluster.push(Vec::with_capacity(count));
        }
        for (node_id, cluster) in self.node_to_cluster_mapping.iter().enumerate() {
            nodes_per_cluster[*cluster].push(node_id);
        }
        return nodes_per_cluster;
    }

    /// Sizes of the non-empty clusters, in cluster id order.
    pub fn community_sizes(&self) -> Vec<usize> {
        return self
            .num_nodes_per_cluster()
            .into_iter()
            .filter(|size| *size > 0)
            .collect();
    }

    /// Number of non-empty clusters.
    pub fn num_communities(&self) -> usize {
        return self.community_sizes().len();
    }

    /// This method compacts the Clustering, removing empty clusters and applying new cluster IDs
    /// to all the clusters that came out afterward, so as to guarantee that:
    /// - Our clustering starts at 0
    /// - Our clustering has no empty clusters
    /// - Our clustering number scheme is continuous
    ///
    /// Relative order of the surviving cluster ids is preserved.
    pub fn remove_empty_clusters(&mut self) {
        let mut non_empty_clusters: Vec<bool> = vec![false; self.next_cluster_id];

        for cluster in &self.node_to_cluster_mapping {
            non_empty_clusters[*cluster] = true;
        }

        let mut new_index: usize = 0;
        let mut new_cluster_lookup: Vec<usize> = vec![0; self.next_cluster_id];

        for (cluster, non_empty) in non_empty_clusters.iter().enumerate() {
            if *non_empty {
                new_cluster_lookup[cluster] = new_index;
                new_index += 1;
            }
        }

        self.next_cluster_id = new_index;

        for cluster in self.node_to_cluster_mapping.iter_mut() {
            *cluster = new_cluster_lookup[*cluster];
        }
    }

    /// Composes this clustering with `other`, which maps *our clusters* to new clusters; so
    /// `other.num_nodes()` must equal our `next_cluster_id`. Used both to push a coarse network's
    /// clustering down to the original nodes and to advance the level mapping after coarsening.
    pub fn merge_clustering(
        &mut self,
        other: &Clustering,
    ) {
        for cluster in self.node_to_cluster_mapping.iter_mut() {
            *cluster = other.node_to_cluster_mapping[*cluster];
        }
        self.next_cluster_id = other.next_cluster_id;
    }

    /// Consumes the clustering and returns its communities after compaction.
    pub fn into_communities(mut self) -> Vec<Vec<usize>> {
        self.remove_empty_clusters();
        return self.nodes_per_cluster();
    }
}

pub struct ClusterIterator<'a> {
    cluster_ref: &'a Clustering,
    next_node_id: usize,
}

impl<'a> Iterator for ClusterIterator<'a> {
    type Item = ClusterItem;

    fn next(&mut self) -> Option<Self::Item> {
        return if self.next_node_id == self.cluster_ref.node_to_cluster_mapping.len() {
            None
        } else {
            let item = ClusterItem {
                node_id: self.next_node_id,
                cluster: self.cluster_ref[self.next_node_id],
            };
            self.next_node_id += 1;
            Some(item)
        };
    }
}

impl<'a> IntoIterator for &'a Clustering {
    type Item = ClusterItem;
    type IntoIter = ClusterIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        return ClusterIterator {
            cluster_ref: self,
            next_node_id: 0,
        };
    }
}

impl Index<usize> for Clustering {
    type Output = usize;

    fn index(
        &self,
        index: usize,
    ) -> &Self::Output {
        &self.node_to_cluster_mapping[index]
    }
}
