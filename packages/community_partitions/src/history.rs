// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use crate::clustering::Clustering;
use crate::config::size_deviation_loss;
use crate::errors::CoreError;
#[allow(unused_imports)]
use crate::log;
use crate::quality::ModularityMatrix;
use std::slice::Iter;

/// The partition a partitioner settled on, with one quality score per community.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionResult {
    pub communities: Vec<Vec<usize>>,
    pub quality: Vec<f64>,
}

impl PartitionResult {
    pub fn new(
        communities: Vec<Vec<usize>>,
        quality: Vec<f64>,
    ) -> PartitionResult {
        return PartitionResult {
            communities,
            quality,
        };
    }

    pub fn empty() -> PartitionResult {
        return PartitionResult::new(Vec::new(), Vec::new());
    }

    /// Every community scored with 0, as returned by the degenerate cases and the random
    /// baseline.
    pub fn unscored(communities: Vec<Vec<usize>>) -> PartitionResult {
        let quality: Vec<f64> = vec![0_f64; communities.len()];
        return PartitionResult::new(communities, quality);
    }

    pub fn scored(
        communities: Vec<Vec<usize>>,
        modularity: &ModularityMatrix,
    ) -> PartitionResult {
        let quality: Vec<f64> = modularity.score(&communities);
        return PartitionResult::new(communities, quality);
    }

    pub fn total_quality(&self) -> f64 {
        return self.quality.iter().sum();
    }

    pub fn num_communities(&self) -> usize {
        return self.communities.len();
    }

    pub fn largest_community_size(&self) -> usize {
        return self
            .communities
            .iter()
            .map(|community| community.len())
            .max()
            .unwrap_or(0);
    }
}

/// Append-only record of the partitions a partitioner passed through, over the original nodes.
pub struct History {
    entries: Vec<Clustering>,
}

impl History {
    pub fn new() -> History {
        return History {
            entries: Vec::new(),
        };
    }

    /// Records a snapshot, compacted. A snapshot identical to the previous one is not recorded
    /// twice.
    pub fn push(
        &mut self,
        mut clustering: Clustering,
    ) {
        clustering.remove_empty_clusters();
        if self.entries.last() != Some(&clustering) {
            self.entries.push(clustering);
        }
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    pub fn last(&self) -> Option<&Clustering> {
        return self.entries.last();
    }

    pub fn iter(&self) -> Iter<Clustering> {
        return self.entries.iter();
    }

    /// Picks the entry whose largest community does not exceed `max_community_size` and whose
    /// size-deviation loss is smallest, the earliest one on ties.
    ///
    /// When every entry breaks the cap, the entry with the smallest largest community wins
    /// instead, then the smallest loss, then the earliest.
    pub fn select(
        &self,
        max_community_size: usize,
        modularity: &ModularityMatrix,
    ) -> Result<PartitionResult, CoreError> {
        if self.entries.is_empty() {
            return Err(CoreError::EmptyHistoryError);
        }
        let mut best_conforming: Option<(usize, f64)> = None;
        let mut best_fallback: Option<(usize, usize, f64)> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            let sizes: Vec<usize> = entry.community_sizes();
            let largest: usize = sizes.iter().cloned().max().unwrap_or(0);
            let loss: f64 = size_deviation_loss(&sizes, max_community_size);
            if largest <= max_community_size {
                let improves: bool = match best_conforming {
                    Some((_, best_loss)) => loss < best_loss,
                    None => true,
                };
                if improves {
                    best_conforming = Some((index, loss));
                }
            }
            let improves_fallback: bool = match best_fallback {
                Some((_, best_largest, best_loss)) => {
                    largest < best_largest || (largest == best_largest && loss < best_loss)
                }
                None => true,
            };
            if improves_fallback {
                best_fallback = Some((index, largest, loss));
            }
        }
        let selected: usize = match (best_conforming, best_fallback) {
            (Some((index, _loss)), _) => index,
            (None, Some((index, _largest, _loss))) => {
                log!(
                    "No partition kept every community at or below {}; falling back to history entry {} of {}",
                    max_community_size,
                    index,
                    self.entries.len()
                );
                index
            }
            (None, None) => return Err(CoreError::EmptyHistoryError),
        };
        let communities: Vec<Vec<usize>> = self.entries[selected].clone().into_communities();
        return Ok(PartitionResult::scored(communities, modularity));
    }
}
