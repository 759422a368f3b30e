// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use crate::errors::CoreError;

pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_DELTA: f64 = 1e-4;

/// Options shared by every partitioner.
///
/// max_community_size: the hard cap `m` on community size. Must be at least 1.
/// max_iterations: upper bound on the outer loop of each partitioner (levels for the local-move
///   partitioner, splits for the divisive partitioner, assignment rounds for spectral). The
///   local-move partitioner also bounds each local move phase by the same number of passes.
///   Must be at least 1.
/// delta: convergence threshold on the size-deviation loss. A partition whose loss falls below
///   delta ends the search early. Must be finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionConfig {
    pub max_community_size: usize,
    pub max_iterations: usize,
    pub delta: f64,
}

impl PartitionConfig {
    pub fn new(max_community_size: usize) -> PartitionConfig {
        return PartitionConfig {
            max_community_size,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            delta: DEFAULT_DELTA,
        };
    }

    pub fn with_max_iterations(
        mut self,
        max_iterations: usize,
    ) -> PartitionConfig {
        self.max_iterations = max_iterations;
        return self;
    }

    pub fn with_delta(
        mut self,
        delta: f64,
    ) -> PartitionConfig {
        self.delta = delta;
        return self;
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        return if self.max_community_size == 0
            || self.max_iterations == 0
            || !self.delta.is_finite()
            || self.delta < 0_f64
        {
            Err(CoreError::ParameterRangeError)
        } else {
            Ok(())
        };
    }

    /// The community count the fixed-k partitioners aim for: `floor(N / m) + 1`.
    pub fn target_community_count(
        &self,
        num_nodes: usize,
    ) -> usize {
        return num_nodes / self.max_community_size + 1;
    }

    pub fn has_converged(
        &self,
        community_sizes: &[usize],
    ) -> bool {
        return size_deviation_loss(community_sizes, self.max_community_size) < self.delta;
    }
}

/// Mean squared deviation of community sizes from `max_community_size`. An empty set of
/// communities has no deviation.
pub fn size_deviation_loss(
    community_sizes: &[usize],
    max_community_size: usize,
) -> f64 {
    if community_sizes.is_empty() {
        return 0_f64;
    }
    let target: f64 = max_community_size as f64;
    let total: f64 = community_sizes
        .iter()
        .map(|size| (*size as f64 - target).powi(2))
        .sum::<f64>();
    return total / community_sizes.len() as f64;
}
