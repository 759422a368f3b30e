// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use nalgebra::DMatrix;

use super::super::clustering::Clustering;
use super::super::errors::{CoreError, NetworkError};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A dense, undirected, weighted network over node ids `0..num_nodes`.
///
/// Networks built from caller data never carry self-loops; the diagonal is zeroed on
/// construction. The only networks with diagonal weight are the coarse networks produced by
/// `induce_clustering_network`, where the diagonal holds the internal weight of a super-node.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    weights: DMatrix<f64>,
    node_weights: Vec<f64>,
}

impl Network {
    /// Validates and wraps a caller supplied adjacency matrix.
    pub fn from_dense(mut weights: DMatrix<f64>) -> Result<Network, NetworkError> {
        if weights.nrows() != weights.ncols() {
            return Err(NetworkError::NonSquareMatrixError);
        }
        let num_nodes: usize = weights.nrows();
        for i in 0..num_nodes {
            for j in 0..num_nodes {
                let weight: f64 = weights[(i, j)];
                if !weight.is_finite() || weight < 0_f64 {
                    return Err(NetworkError::InvalidWeightError);
                }
                if (weight - weights[(j, i)]).abs() > SYMMETRY_TOLERANCE {
                    return Err(NetworkError::AsymmetricMatrixError);
                }
            }
        }
        weights.fill_diagonal(0_f64);
        return Ok(Network::new(weights));
    }

    /// Row-major convenience constructor over `from_dense`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Network, NetworkError> {
        let num_nodes: usize = rows.len();
        if rows.iter().any(|row| row.len() != num_nodes) {
            return Err(NetworkError::NonSquareMatrixError);
        }
        let weights: DMatrix<f64> =
            DMatrix::from_fn(num_nodes, num_nodes, |i, j| rows[i][j]);
        return Network::from_dense(weights);
    }

    /// Builds an unweighted network from undirected edge pairs over `num_nodes` nodes.
    pub fn from_edges(
        num_nodes: usize,
        edges: &[(usize, usize)],
    ) -> Result<Network, NetworkError> {
        let mut weights: DMatrix<f64> = DMatrix::zeros(num_nodes, num_nodes);
        for (source, target) in edges {
            let endpoint: usize = (*source).max(*target);
            if endpoint >= num_nodes {
                return Err(NetworkError::EdgeEndpointError(endpoint, num_nodes));
            }
            weights[(*source, *target)] = 1_f64;
            weights[(*target, *source)] = 1_f64;
        }
        return Network::from_dense(weights);
    }

    /// Unchecked constructor; node weights (degrees) are the row sums, diagonal included.
    pub(crate) fn new(weights: DMatrix<f64>) -> Network {
        let node_weights: Vec<f64> = weights.row_iter().map(|row| row.sum()).collect();
        return Network {
            weights,
            node_weights,
        };
    }

    pub fn num_nodes(&self) -> usize {
        return self.weights.nrows();
    }

    /// Number of undirected edges between distinct nodes.
    pub fn num_edges(&self) -> usize {
        let mut edges: usize = 0;
        for i in 0..self.num_nodes() {
            for j in (i + 1)..self.num_nodes() {
                if self.weights[(i, j)] != 0_f64 {
                    edges += 1;
                }
            }
        }
        return edges;
    }

    pub fn weights(&self) -> &DMatrix<f64> {
        return &self.weights;
    }

    pub fn weight(
        &self,
        source: usize,
        target: usize,
    ) -> f64 {
        return self.weights[(source, target)];
    }

    /// Degree of a node: the row sum, self-loop weight included.
    pub fn node_weight_at(
        &self,
        node: usize,
    ) -> Result<f64, CoreError> {
        return self
            .node_weights
            .get(node)
            .cloned()
            .ok_or(CoreError::InternalNetworkIndexingError);
    }

    pub fn node_weights(&self) -> &[f64] {
        return &self.node_weights;
    }

    /// Half of the total weight of the matrix, i.e. `m` in the modularity formula.
    pub fn total_edge_weight(&self) -> f64 {
        return self.node_weights.iter().sum::<f64>() / 2_f64;
    }

    pub fn total_self_links_edge_weight(&self) -> f64 {
        return self.weights.diagonal().sum();
    }

    /// Neighbors of `node` in ascending id order with their edge weight, skipping the node
    /// itself and zero weights.
    pub fn neighbors_for(
        &self,
        node: usize,
    ) -> impl Iterator<Item = (usize, f64)> + '_ {
        return self
            .weights
            .row(node)
            .iter()
            .cloned()
            .enumerate()
            .filter(move |(neighbor, weight)| *neighbor != node && *weight != 0_f64)
            .collect::<Vec<(usize, f64)>>()
            .into_iter();
    }

    /// Unnormalized graph Laplacian `D - A`; self-loops do not contribute.
    pub fn laplacian(&self) -> DMatrix<f64> {
        let num_nodes: usize = self.num_nodes();
        let mut adjacency: DMatrix<f64> = self.weights.clone();
        adjacency.fill_diagonal(0_f64);
        let degrees: Vec<f64> = adjacency.row_iter().map(|row| row.sum()).collect();
        return DMatrix::from_fn(num_nodes, num_nodes, |i, j| {
            if i == j {
                degrees[i]
            } else {
                -adjacency[(i, j)]
            }
        });
    }

    /// Contracts every cluster into a single node. Edge weights between clusters are summed, and
    /// every internal ordered pair (diagonal included) of a cluster is summed into the new node's
    /// self-loop, so that each coarse node's degree equals the sum of its members' degrees and
    /// modularity is preserved across levels.
    ///
    /// The clustering must be compacted (see `Clustering::remove_empty_clusters`).
    pub fn induce_clustering_network(
        &self,
        clustering: &Clustering,
    ) -> Result<Network, CoreError> {
        if clustering.num_nodes() != self.num_nodes() {
            return Err(CoreError::ClusterIndexingError);
        }
        let cluster_count: usize = clustering.next_cluster_id();
        let mut induced: DMatrix<f64> = DMatrix::zeros(cluster_count, cluster_count);
        for i in 0..self.num_nodes() {
            let cluster_i: usize = clustering.cluster_at(i)?;
            for j in 0..self.num_nodes() {
                let weight: f64 = self.weights[(i, j)];
                if weight != 0_f64 {
                    induced[(cluster_i, clustering.cluster_at(j)?)] += weight;
                }
            }
        }
        return Ok(Network::new(induced));
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn make_fast_network() -> Network {
        // jon 0, nick 1, dwayne 2, carolyn 3, amber 4, chris 5, david 6, nathan 7
        let mut weights: DMatrix<f64> = DMatrix::zeros(8, 8);
        let edges: Vec<(usize, usize, f64)> = vec![
            (0, 1, 10.0),
            (2, 1, 2.0),
            (3, 1, 5.0),
            (3, 4, 1.0),
            (5, 6, 8.0),
            (5, 7, 12.0),
            (5, 4, 4.0),
        ];
        for (source, target, weight) in edges {
            weights[(source, target)] = weight;
            weights[(target, source)] = weight;
        }
        return Network::from_dense(weights).unwrap();
    }

    #[test]
    fn test_from_dense_validation() {
        let asymmetric: DMatrix<f64> = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]);
        assert!(matches!(
            Network::from_dense(asymmetric),
            Err(NetworkError::AsymmetricMatrixError)
        ));
        let negative: DMatrix<f64> = DMatrix::from_row_slice(2, 2, &[0.0, -1.0, -1.0, 0.0]);
        assert!(matches!(
            Network::from_dense(negative),
            Err(NetworkError::InvalidWeightError)
        ));
        assert!(matches!(
            Network::from_rows(&[vec![0.0, 1.0], vec![1.0]]),
            Err(NetworkError::NonSquareMatrixError)
        ));
        assert!(matches!(
            Network::from_edges(3, &[(0, 1), (1, 3)]),
            Err(NetworkError::EdgeEndpointError(3, 3))
        ));
    }

    #[test]
    fn test_self_loops_are_dropped() {
        let network: Network =
            Network::from_rows(&[vec![5.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(0_f64, network.weight(0, 0));
        assert_eq!(vec![1.0, 1.0], network.node_weights().to_vec());
        assert_eq!(1_f64, network.total_edge_weight());
        assert_eq!(1, network.num_edges());
    }

    #[test]
    fn test_neighbors_for() {
        let network: Network = make_fast_network();
        let neighbors: Vec<(usize, f64)> = network.neighbors_for(1).collect();
        assert_eq!(vec![(0, 10.0), (2, 2.0), (3, 5.0)], neighbors);
        assert_eq!(17_f64, network.node_weight_at(1).unwrap());
        assert!(network.node_weight_at(8).is_err());
    }

    #[test]
    fn test_laplacian_rows_sum_to_zero() {
        let network: Network = make_fast_network();
        let laplacian: DMatrix<f64> = network.laplacian();
        for row in laplacian.row_iter() {
            assert!(row.sum().abs() < 1e-12);
        }
        assert_eq!(24_f64, laplacian[(5, 5)]);
        assert_eq!(-8_f64, laplacian[(5, 6)]);
    }

    #[test]
    fn test_induce_clustering_network() {
        let fast_network: Network = make_fast_network();
        let clustering: Clustering = Clustering::as_defined(vec![0, 0, 1, 0, 2, 2, 2, 2], 3);
        let induced: Network = fast_network.induce_clustering_network(&clustering).unwrap();
        assert_eq!(3, induced.num_nodes());

        // jon-nick and nick-carolyn are internal to cluster 0, counted once in each direction
        assert_eq!(30_f64, induced.weight(0, 0));
        assert_eq!(2_f64, induced.weight(0, 1));
        assert_eq!(1_f64, induced.weight(0, 2));
        assert_eq!(0_f64, induced.weight(1, 1));
        assert_eq!(0_f64, induced.weight(1, 2));
        assert_eq!(48_f64, induced.weight(2, 2));

        // coarse degrees are the sums of member degrees
        assert_eq!(vec![33.0, 2.0, 49.0], induced.node_weights().to_vec());
        assert_eq!(
            fast_network.total_edge_weight(),
            induced.total_edge_weight()
        );
        assert_eq!(78_f64, induced.total_self_links_edge_weight());
    }

    #[test]
    fn test_induce_rejects_mismatched_clustering() {
        let fast_network: Network = make_fast_network();
        let clustering: Clustering = Clustering::as_self_clusters(3);
        assert_eq!(
            Err(CoreError::ClusterIndexingError),
            fast_network.induce_clustering_network(&clustering)
        );
    }
}
