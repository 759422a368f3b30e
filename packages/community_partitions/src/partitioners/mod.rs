// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use rand::Rng;
use std::str::FromStr;

use crate::config::PartitionConfig;
use crate::errors::CoreError;
use crate::history::PartitionResult;
use crate::log;
use crate::network::Network;

pub use self::girvan_newman::girvan_newman;
pub use self::hierarchical::{hierarchical, node_similarity_matrix, Linkage, SimilarityMetric};
pub use self::local_move::GAIN_TOLERANCE;
pub use self::louvain::{louvain, Level};
pub use self::random::random;
pub use self::spectral::spectral;

mod edge_betweenness;
mod girvan_newman;
mod hierarchical;
mod local_move;
mod louvain;
mod neighboring_clusters;
mod quality_value_increment;
mod random;
mod spectral;

/// The available partitioners, all run through `Algorithm::partition`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Algorithm {
    /// Size-capped Louvain: local moves and aggregation.
    LocalMove,
    /// Girvan-Newman: cutting the edges of highest betweenness.
    Divisive,
    /// Laplacian embedding clustered on cosine similarity to centroids.
    Spectral,
    /// Agglomerative merging of the most similar communities.
    Hierarchical {
        metric: SimilarityMetric,
        linkage: Linkage,
    },
    /// Random groups; a baseline, unscored.
    Random,
}

impl Algorithm {
    /// Partitions `network` into communities of at most `config.max_community_size` nodes.
    ///
    /// Small cases are answered without running the algorithm:
    /// - an empty network has no communities
    /// - a single node is one community scored 0
    /// - a cap of 1 puts every node alone, scored 0
    /// - a cap of at least the node count puts every node together, scored 0
    ///
    /// The random number generator is used by the spectral and random partitioners only.
    pub fn partition<T>(
        &self,
        network: &Network,
        config: &PartitionConfig,
        rng: &mut T,
    ) -> Result<PartitionResult, CoreError>
    where
        T: Rng,
    {
        config.validate()?;
        let num_nodes: usize = network.num_nodes();
        if num_nodes == 0 {
            return Ok(PartitionResult::empty());
        } else if num_nodes == 1 {
            return Ok(PartitionResult::unscored(vec![vec![0]]));
        } else if config.max_community_size == 1 {
            return Ok(PartitionResult::unscored(
                (0..num_nodes).map(|node| vec![node]).collect(),
            ));
        } else if config.max_community_size >= num_nodes {
            return Ok(PartitionResult::unscored(vec![(0..num_nodes).collect()]));
        }

        log!(
            "Partitioning {} nodes with {:?} into communities of at most {} nodes",
            num_nodes,
            self,
            config.max_community_size
        );
        return match self {
            Algorithm::LocalMove => louvain(network, config),
            Algorithm::Divisive => girvan_newman(network, config),
            Algorithm::Spectral => spectral(network, config, rng),
            Algorithm::Hierarchical { metric, linkage } => {
                hierarchical(network, config, *metric, *linkage)
            }
            Algorithm::Random => Ok(random(num_nodes, config, rng)),
        };
    }

    pub fn name(&self) -> &'static str {
        return match self {
            Algorithm::LocalMove => "louvain",
            Algorithm::Divisive => "girvan_newman",
            Algorithm::Spectral => "spectral",
            Algorithm::Hierarchical { .. } => "hierarchical",
            Algorithm::Random => "random",
        };
    }
}

/// Parses the partitioner names used on the command line. `hierarchical` uses cosine
/// similarity with single linkage; use `Algorithm::Hierarchical` directly for the others.
impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        return match name.to_lowercase().as_str() {
            "louvain" | "local_move" => Ok(Algorithm::LocalMove),
            "girvan_newman" | "divisive" => Ok(Algorithm::Divisive),
            "spectral" => Ok(Algorithm::Spectral),
            "hierarchical" => Ok(Algorithm::Hierarchical {
                metric: SimilarityMetric::Cosine,
                linkage: Linkage::Single,
            }),
            "random" => Ok(Algorithm::Random),
            _ => Err(CoreError::ParameterRangeError),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    const ALGORITHMS: [Algorithm; 5] = [
        Algorithm::LocalMove,
        Algorithm::Divisive,
        Algorithm::Spectral,
        Algorithm::Hierarchical {
            metric: SimilarityMetric::Cosine,
            linkage: Linkage::Single,
        },
        Algorithm::Random,
    ];

    fn square() -> Network {
        return Network::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Ok(Algorithm::LocalMove), "Louvain".parse());
        assert_eq!(Ok(Algorithm::Divisive), "divisive".parse());
        assert_eq!(Ok(Algorithm::Random), "random".parse());
        for algorithm in ALGORITHMS.iter() {
            assert_eq!(Ok(*algorithm), algorithm.name().parse());
        }
        assert_eq!(
            Err(CoreError::ParameterRangeError),
            "walktrap".parse::<Algorithm>()
        );
    }

    #[test]
    fn test_degenerate_cases() {
        let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(1234);
        let network: Network = square();
        for algorithm in ALGORITHMS.iter() {
            let singletons: PartitionResult = algorithm
                .partition(&network, &PartitionConfig::new(1), &mut rng)
                .unwrap();
            assert_eq!(vec![vec![0], vec![1], vec![2], vec![3]], singletons.communities);
            assert_eq!(vec![0_f64; 4], singletons.quality);

            let everything: PartitionResult = algorithm
                .partition(&network, &PartitionConfig::new(10), &mut rng)
                .unwrap();
            assert_eq!(vec![vec![0, 1, 2, 3]], everything.communities);
            assert_eq!(vec![0_f64], everything.quality);

            let empty: PartitionResult = algorithm
                .partition(&Network::from_edges(0, &[]).unwrap(), &PartitionConfig::new(3), &mut rng)
                .unwrap();
            assert_eq!(PartitionResult::empty(), empty);

            let single: PartitionResult = algorithm
                .partition(&Network::from_edges(1, &[]).unwrap(), &PartitionConfig::new(3), &mut rng)
                .unwrap();
            assert_eq!(vec![vec![0]], single.communities);
            assert_eq!(vec![0_f64], single.quality);
        }
    }

    #[test]
    fn test_invalid_config() {
        let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(1234);
        assert_eq!(
            Err(CoreError::ParameterRangeError),
            Algorithm::LocalMove.partition(&square(), &PartitionConfig::new(0), &mut rng)
        );
    }
}
