// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use rand::Rng;

use crate::config::PartitionConfig;
use crate::history::PartitionResult;
use crate::log;
use crate::random_vector::random_permutation;

/// Baseline partitioner: shuffles the nodes and deals them into `floor(N / m) + 1` groups of
/// near equal size. The first `N mod k` groups take one extra node, which keeps every group at
/// or below `max_community_size`. Groups are not scored.
pub fn random<T>(
    num_nodes: usize,
    config: &PartitionConfig,
    rng: &mut T,
) -> PartitionResult
where
    T: Rng,
{
    let num_groups: usize = config.target_community_count(num_nodes).min(num_nodes.max(1));
    log!("Dealing {} nodes into {} random groups", num_nodes, num_groups);
    let permutation: Vec<usize> = random_permutation(num_nodes, rng);
    let base_size: usize = num_nodes / num_groups;
    let remainder: usize = num_nodes % num_groups;

    let mut communities: Vec<Vec<usize>> = Vec::with_capacity(num_groups);
    let mut start: usize = 0;
    for group in 0..num_groups {
        let size: usize = base_size + if group < remainder { 1 } else { 0 };
        let mut community: Vec<usize> = permutation[start..start + size].to_vec();
        community.sort_unstable();
        start += size;
        if !community.is_empty() {
            communities.push(community);
        }
    }
    return PartitionResult::unscored(communities);
}
