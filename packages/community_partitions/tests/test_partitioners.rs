// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use community_partitions::clustering::Clustering;
use community_partitions::community::{community_centers, top_k_by_quality};
use community_partitions::network::prelude::*;
use community_partitions::partitioners::{Level, Linkage, SimilarityMetric};
use community_partitions::quality::ModularityMatrix;
use community_partitions::{Algorithm, PartitionConfig, PartitionResult};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

const ALGORITHMS: [Algorithm; 7] = [
    Algorithm::LocalMove,
    Algorithm::Divisive,
    Algorithm::Spectral,
    Algorithm::Hierarchical {
        metric: SimilarityMetric::Cosine,
        linkage: Linkage::Single,
    },
    Algorithm::Hierarchical {
        metric: SimilarityMetric::InverseEuclidean,
        linkage: Linkage::Complete,
    },
    Algorithm::Hierarchical {
        metric: SimilarityMetric::Cosine,
        linkage: Linkage::Mean,
    },
    Algorithm::Random,
];

fn ring(num_nodes: usize) -> Network {
    let edges: Vec<(usize, usize)> = (0..num_nodes)
        .map(|node| (node, (node + 1) % num_nodes))
        .collect();
    return Network::from_edges(num_nodes, &edges).unwrap();
}

fn assert_valid_partition(
    result: &PartitionResult,
    num_nodes: usize,
) {
    assert_eq!(result.communities.len(), result.quality.len());
    let mut seen: Vec<bool> = vec![false; num_nodes];
    for community in &result.communities {
        assert!(!community.is_empty(), "empty community in {:?}", result.communities);
        for node in community {
            assert!(!seen[*node], "node {} appears twice in {:?}", node, result.communities);
            seen[*node] = true;
        }
    }
    assert!(
        seen.iter().all(|covered| *covered),
        "not every node was assigned in {:?}",
        result.communities
    );
}

fn is_contiguous_on_ring(
    community: &[usize],
    num_nodes: usize,
) -> bool {
    let breaks: usize = community
        .iter()
        .filter(|node| !community.contains(&((**node + 1) % num_nodes)))
        .count();
    return breaks == 1;
}

#[test]
fn test_ring_local_move() {
    let network: Network = ring(6);
    let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(1234);
    let result: PartitionResult = Algorithm::LocalMove
        .partition(&network, &PartitionConfig::new(3), &mut rng)
        .unwrap();
    assert_valid_partition(&result, 6);
    assert!(result.largest_community_size() <= 3);
    assert!(result.total_quality() > 0_f64);
    for community in &result.communities {
        assert!(
            is_contiguous_on_ring(community, 6),
            "{:?} is not a contiguous arc",
            community
        );
    }
}

#[test]
fn test_ring_random_baseline() {
    let network: Network = ring(6);
    let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(1234);
    let result: PartitionResult = Algorithm::Random
        .partition(&network, &PartitionConfig::new(3), &mut rng)
        .unwrap();
    assert_valid_partition(&result, 6);
    assert!(result.largest_community_size() <= 3);
    assert!(result.quality.iter().all(|quality| *quality == 0_f64));
}

#[test]
fn test_barbell_halves() {
    let network: Network =
        Network::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)]).unwrap();
    let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(1234);
    for algorithm in &[Algorithm::LocalMove, Algorithm::Divisive] {
        let result: PartitionResult = algorithm
            .partition(&network, &PartitionConfig::new(3), &mut rng)
            .unwrap();
        assert_eq!(vec![vec![0, 1, 2], vec![3, 4, 5]], result.communities);
        let centers: Vec<Option<usize>> = community_centers(&network, &result.communities);
        assert_eq!(vec![Some(2), Some(3)], centers);
        assert_eq!(2, top_k_by_quality(&result, 5).len());
    }
}

#[test]
fn test_terminates_with_few_iterations() {
    let network: Network = ring(30);
    let config: PartitionConfig = PartitionConfig::new(4).with_max_iterations(5);
    let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(1234);
    for algorithm in ALGORITHMS.iter() {
        let result: PartitionResult = algorithm.partition(&network, &config, &mut rng).unwrap();
        assert_valid_partition(&result, 30);
    }
}

#[test]
fn test_modularity_is_deterministic() {
    let labeled: LabeledNetwork =
        LabeledNetwork::load_from("tests/simple_org_graph.csv", ",", 0, 1, Some(2), false)
            .unwrap();
    let network: &Network = labeled.network();
    let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(1234);
    let result: PartitionResult = Algorithm::LocalMove
        .partition(network, &PartitionConfig::new(3), &mut rng)
        .unwrap();
    let modularity: ModularityMatrix = ModularityMatrix::for_network(network);
    assert_eq!(modularity.score(&result.communities), result.quality);
    assert_eq!(
        modularity.score(&result.communities),
        ModularityMatrix::for_network(network).score(&result.communities)
    );
}

#[test]
fn test_coarsening_round_trip() {
    let network: Network = ring(8);
    let level: Level = Level::initial(network.clone());
    let clustering: Clustering = Clustering::as_defined(vec![0, 0, 1, 1, 1, 2, 2, 0], 3);
    let coarse: Level = level.coarsen(&clustering).unwrap();
    assert_eq!(
        vec![vec![0, 1, 7], vec![2, 3, 4], vec![5, 6]],
        coarse.members()
    );
    let fine_total: f64 = ModularityMatrix::for_network(&network).total(&coarse.members());
    let coarse_total: f64 = ModularityMatrix::for_network(coarse.network())
        .total(&[vec![0], vec![1], vec![2]]);
    assert!((fine_total - coarse_total).abs() < 1e-12);
}

fn arbitrary_network() -> impl Strategy<Value = Network> {
    return (2usize..12)
        .prop_flat_map(|num_nodes| {
            (
                Just(num_nodes),
                prop::collection::vec((0..num_nodes, 0..num_nodes), 0..30),
            )
        })
        .prop_map(|(num_nodes, edges)| Network::from_edges(num_nodes, &edges).unwrap());
}

proptest! {
    #[test]
    fn prop_every_algorithm_partitions(
        network in arbitrary_network(),
        max_community_size in 1usize..6,
        seed in 0u64..1000,
    ) {
        let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(seed);
        let config: PartitionConfig = PartitionConfig::new(max_community_size);
        for algorithm in ALGORITHMS.iter() {
            let result: PartitionResult = algorithm.partition(&network, &config, &mut rng).unwrap();
            assert_valid_partition(&result, network.num_nodes());
        }
    }

    #[test]
    fn prop_capped_algorithms_respect_cap(
        network in arbitrary_network(),
        max_community_size in 1usize..6,
        seed in 0u64..1000,
    ) {
        let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(seed);
        let config: PartitionConfig = PartitionConfig::new(max_community_size);
        for algorithm in &[Algorithm::LocalMove, Algorithm::Divisive, Algorithm::Random] {
            let result: PartitionResult = algorithm.partition(&network, &config, &mut rng).unwrap();
            prop_assert!(result.largest_community_size() <= max_community_size);
        }
    }
}
