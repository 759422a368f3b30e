// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use std::collections::{BTreeSet, VecDeque};

/// An undirected edge, always stored as `(smaller, larger)`.
pub type Edge = (usize, usize);

/// The unweighted structure the divisive partitioner cuts edges from.
pub struct EdgeSet {
    adjacency: Vec<BTreeSet<usize>>,
}

impl EdgeSet {
    /// Every non-zero off-diagonal entry of `weights` becomes an edge.
    pub fn from_weights<F>(
        num_nodes: usize,
        weight: F,
    ) -> EdgeSet
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); num_nodes];
        for source in 0..num_nodes {
            for target in (source + 1)..num_nodes {
                if weight(source, target) != 0_f64 {
                    adjacency[source].insert(target);
                    adjacency[target].insert(source);
                }
            }
        }
        return EdgeSet { adjacency };
    }

    pub fn num_nodes(&self) -> usize {
        return self.adjacency.len();
    }

    pub fn num_edges(&self) -> usize {
        return self.adjacency.iter().map(|neighbors| neighbors.len()).sum::<usize>() / 2;
    }

    pub fn is_empty(&self) -> bool {
        return self.adjacency.iter().all(|neighbors| neighbors.is_empty());
    }

    pub fn remove(
        &mut self,
        edge: Edge,
    ) {
        let (source, target) = edge;
        self.adjacency[source].remove(&target);
        self.adjacency[target].remove(&source);
    }

    /// Connected components as a node to component mapping, numbering components by their
    /// lowest node.
    pub fn components(&self) -> Vec<usize> {
        let num_nodes: usize = self.num_nodes();
        let mut component: Vec<Option<usize>> = vec![None; num_nodes];
        let mut next_component: usize = 0;
        let mut queue: VecDeque<usize> = VecDeque::new();
        for start in 0..num_nodes {
            if component[start].is_some() {
                continue;
            }
            component[start] = Some(next_component);
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                for neighbor in &self.adjacency[node] {
                    if component[*neighbor].is_none() {
                        component[*neighbor] = Some(next_component);
                        queue.push_back(*neighbor);
                    }
                }
            }
            next_component += 1;
        }
        return component
            .into_iter()
            .map(|component| component.unwrap_or(0))
            .collect();
    }

    pub fn num_components(&self) -> usize {
        return self
            .components()
            .into_iter()
            .max()
            .map(|largest| largest + 1)
            .unwrap_or(0);
    }

    /// Brandes' algorithm over unweighted shortest paths, accumulated for both directions of
    /// every source/target pair and normalized by `n(n - 1)`. The per-source scratch space lives
    /// in a bump arena that is reset between sources.
    pub fn edge_betweenness(&self) -> Vec<(Edge, f64)> {
        let num_nodes: usize = self.num_nodes();
        let mut edges: Vec<Edge> = Vec::with_capacity(self.num_edges());
        for (source, neighbors) in self.adjacency.iter().enumerate() {
            for target in neighbors.range((source + 1)..) {
                edges.push((source, *target));
            }
        }
        let mut betweenness: Vec<f64> = vec![0_f64; edges.len()];
        let edge_index = |source: usize, target: usize| -> Option<usize> {
            let key: Edge = (source.min(target), source.max(target));
            return edges.binary_search(&key).ok();
        };

        let mut arena: Bump = Bump::new();
        for source in 0..num_nodes {
            arena.reset();
            let mut stack: BumpVec<usize> = BumpVec::with_capacity_in(num_nodes, &arena);
            let mut predecessors: BumpVec<BumpVec<usize>> =
                BumpVec::with_capacity_in(num_nodes, &arena);
            for _ in 0..num_nodes {
                predecessors.push(BumpVec::new_in(&arena));
            }
            let mut sigma: BumpVec<f64> = bumpalo::vec![in &arena; 0_f64; num_nodes];
            let mut distance: BumpVec<i64> = bumpalo::vec![in &arena; -1; num_nodes];
            let mut dependency: BumpVec<f64> = bumpalo::vec![in &arena; 0_f64; num_nodes];
            let mut queue: VecDeque<usize> = VecDeque::new();

            sigma[source] = 1_f64;
            distance[source] = 0;
            queue.push_back(source);
            while let Some(node) = queue.pop_front() {
                stack.push(node);
                for neighbor in &self.adjacency[node] {
                    let neighbor: usize = *neighbor;
                    if distance[neighbor] < 0 {
                        distance[neighbor] = distance[node] + 1;
                        queue.push_back(neighbor);
                    }
                    if distance[neighbor] == distance[node] + 1 {
                        sigma[neighbor] += sigma[node];
                        predecessors[neighbor].push(node);
                    }
                }
            }

            while let Some(node) = stack.pop() {
                for predecessor in predecessors[node].iter() {
                    let share: f64 = sigma[*predecessor] / sigma[node] * (1_f64 + dependency[node]);
                    if let Some(index) = edge_index(*predecessor, node) {
                        betweenness[index] += share;
                    }
                    dependency[*predecessor] += share;
                }
            }
        }

        let scale: f64 = if num_nodes > 1 {
            1_f64 / (num_nodes * (num_nodes - 1)) as f64
        } else {
            0_f64
        };
        return edges
            .iter()
            .cloned()
            .zip(betweenness.into_iter().map(|value| value * scale))
            .collect();
    }

    /// The edge with the highest betweenness, the lexicographically first on ties.
    pub fn most_central_edge(&self) -> Option<Edge> {
        let mut best: Option<(Edge, f64)> = None;
        for (edge, centrality) in self.edge_betweenness() {
            let replaces: bool = match best {
                Some((_, best_centrality)) => centrality > best_centrality,
                None => true,
            };
            if replaces {
                best = Some((edge, centrality));
            }
        }
        return best.map(|(edge, _)| edge);
    }
}
