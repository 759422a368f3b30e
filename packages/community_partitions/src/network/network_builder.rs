// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use super::identifier::Identifier;
use super::labeled_network::LabeledNetwork;
use super::network::Network;
use crate::errors::NetworkError;
#[allow(unused_imports)]
use crate::log;

use nalgebra::DMatrix;
use std::boxed::Box;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};

type EdgeWeightResolver = Box<fn(f64, f64) -> f64>;

/// Relation triples describe connectivity only; any number of relations in either direction
/// between two entities collapses to a single unit edge.
fn union_edge_weight_resolver(
    _existing_weight: f64,
    _edge_weight: f64,
) -> f64 {
    return 1_f64;
}

fn sum_edge_weight_resolver(
    existing_weight: f64,
    edge_weight: f64,
) -> f64 {
    return existing_weight + edge_weight;
}

/// Accumulates labeled edges or relation triples and produces a symmetric adjacency matrix.
///
/// Edges are stored under their undirected key `(min, max)`, so a relation `a -> b` and a
/// relation `b -> a` describe the same edge. Self-loops are dropped, but their endpoint still
/// becomes a node.
pub struct NetworkBuilder {
    identifier: Identifier<String>,
    edges: HashMap<(usize, usize), f64>,
    relations: HashMap<(usize, usize), Vec<String>>,
    edge_weight_resolver: EdgeWeightResolver,
}

impl NetworkBuilder {
    /// 0/1 adjacency by union of directions, for relation triples.
    pub fn for_relations() -> NetworkBuilder {
        return NetworkBuilder::builder(Box::new(union_edge_weight_resolver));
    }

    /// Weighted adjacency; repeated edges sum their weights.
    pub fn for_weights() -> NetworkBuilder {
        return NetworkBuilder::builder(Box::new(sum_edge_weight_resolver));
    }

    fn builder(edge_weight_resolver: EdgeWeightResolver) -> NetworkBuilder {
        return NetworkBuilder {
            identifier: Identifier::new(),
            edges: HashMap::new(),
            relations: HashMap::new(),
            edge_weight_resolver,
        };
    }

    pub fn num_nodes(&self) -> usize {
        return self.identifier.len();
    }

    fn add_undirected_edge(
        mut self,
        source_index: usize,
        target_index: usize,
        weight: f64,
    ) -> NetworkBuilder {
        if source_index != target_index {
            let key: (usize, usize) = (
                source_index.min(target_index),
                source_index.max(target_index),
            );
            let resolver: fn(f64, f64) -> f64 = *self.edge_weight_resolver;
            let edge_weight: &mut f64 = self.edges.entry(key).or_insert(0_f64);
            *edge_weight = resolver(*edge_weight, weight);
        }
        return self;
    }

    pub fn add_edge(
        mut self,
        source: String,
        target: String,
        weight: f64,
    ) -> NetworkBuilder {
        let source_index: usize = self.identifier.identify(source);
        let target_index: usize = self.identifier.identify(target);
        return self.add_undirected_edge(source_index, target_index, weight);
    }

    pub fn add_edge_into(
        self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> NetworkBuilder {
        return self.add_edge(source.into(), target.into(), weight);
    }

    /// Adds a directed relation triple `(source, relation, target)`. The adjacency ignores the
    /// direction; the relation labels are kept so that both directions can be reported.
    pub fn add_relation(
        mut self,
        source: &str,
        relation: &str,
        target: &str,
    ) -> NetworkBuilder {
        let source_index: usize = self.identifier.identify(source.into());
        let target_index: usize = self.identifier.identify(target.into());
        if source_index != target_index {
            let key: (usize, usize) = (
                source_index.min(target_index),
                source_index.max(target_index),
            );
            let labels: &mut Vec<String> = self.relations.entry(key).or_insert_with(Vec::new);
            if !labels.iter().any(|label| label == relation) {
                labels.push(relation.into());
            }
        }
        return self.add_undirected_edge(source_index, target_index, 1_f64);
    }

    pub fn from(
        mut self,
        edges: Vec<(String, String, f64)>,
    ) -> NetworkBuilder {
        log!("Adding {} edges to the network builder", edges.len());
        for (source, target, weight) in edges {
            self = self.add_edge(source, target, weight);
        }
        return self;
    }

    /// Reads one edge per line. With a `relation_index`, the column at that index names the
    /// relation of the edge and the line is added as a relation triple, ignoring any weight.
    #[allow(clippy::too_many_arguments)]
    pub fn load_from_file(
        mut self,
        path: &str,
        separator: &str,
        source_index: usize,
        target_index: usize,
        weight_index: Option<usize>,
        relation_index: Option<usize>,
        skip_first_line: bool,
    ) -> Result<NetworkBuilder, NetworkError> {
        let minimum_required_length: usize = source_index
            .max(target_index)
            .max(weight_index.unwrap_or(target_index))
            .max(relation_index.unwrap_or(target_index))
            + 1;
        let mut reader: BufReader<File> = BufReader::new(File::open(path)?);
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut edges_read: usize = 0;
        for (line_number, line) in contents.lines().enumerate() {
            if !line.is_empty() && !(skip_first_line && line_number == 0) {
                let splits: Vec<&str> = line.split(separator).collect();
                if splits.len() < minimum_required_length {
                    return Err(NetworkError::EdgeFileFormatError);
                }
                let source: &str = splits[source_index];
                let target: &str = splits[target_index];
                let weight: f64 = match weight_index {
                    Some(weight_index) => splits[weight_index]
                        .trim()
                        .parse::<f64>()
                        .map_err(|_err| NetworkError::EdgeFileFormatError)?,
                    None => 1_f64,
                };
                if !weight.is_finite() || weight < 0_f64 {
                    return Err(NetworkError::InvalidWeightError);
                }
                self = match relation_index {
                    Some(relation_index) => {
                        self.add_relation(source, splits[relation_index].trim(), target)
                    }
                    None => self.add_edge_into(source, target, weight),
                };
                edges_read += 1;
            }
        }
        if edges_read == 0 {
            return Err(NetworkError::EmptyEdgeFileError);
        }
        log!("Loaded {} edges from {}", edges_read, path);
        return Ok(self);
    }

    pub fn get_edge_weight(
        &self,
        source: &str,
        target: &str,
    ) -> Option<f64> {
        let source_index: usize = self.identifier.id_for(source)?;
        let target_index: usize = self.identifier.id_for(target)?;
        let key: (usize, usize) = (
            source_index.min(target_index),
            source_index.max(target_index),
        );
        return self.edges.get(&key).cloned();
    }

    pub fn build(self) -> LabeledNetwork {
        let (label_to_id, id_to_label) = self.identifier.finish();
        let num_nodes: usize = id_to_label.len();
        let mut weights: DMatrix<f64> = DMatrix::zeros(num_nodes, num_nodes);
        for ((source, target), weight) in &self.edges {
            weights[(*source, *target)] = *weight;
            weights[(*target, *source)] = *weight;
        }
        let relations: HashMap<(usize, usize), String> = self
            .relations
            .into_iter()
            .map(|(key, labels)| (key, labels.join("/")))
            .collect();
        return LabeledNetwork::new(Network::new(weights), label_to_id, id_to_label, relations);
    }
}
