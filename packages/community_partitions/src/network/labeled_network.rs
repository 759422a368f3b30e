// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use super::network::Network;
use super::network_builder::NetworkBuilder;
use crate::errors::NetworkError;
use std::collections::HashMap;

/// A Network along with the labels its node ids were assigned from, and the relation labels
/// of the edges when it was built from relation triples.
pub struct LabeledNetwork {
    network: Network,
    label_to_id: HashMap<String, usize>,
    id_to_label: Vec<String>,
    relations: HashMap<(usize, usize), String>,
}

impl LabeledNetwork {
    pub(crate) fn new(
        network: Network,
        label_to_id: HashMap<String, usize>,
        id_to_label: Vec<String>,
        relations: HashMap<(usize, usize), String>,
    ) -> LabeledNetwork {
        return LabeledNetwork {
            network,
            label_to_id,
            id_to_label,
            relations,
        };
    }

    pub fn load_from(
        path: &str,
        separator: &str,
        source_index: usize,
        target_index: usize,
        weight_index: Option<usize>,
        skip_first_line: bool,
    ) -> Result<LabeledNetwork, NetworkError> {
        let builder: NetworkBuilder = NetworkBuilder::for_weights().load_from_file(
            path,
            separator,
            source_index,
            target_index,
            weight_index,
            None,
            skip_first_line,
        )?;
        return Ok(builder.build());
    }

    /// Loads relation triples: every line names a source, a relation and a target. Edges are
    /// unweighted and the relation names are kept for `relation_between`.
    pub fn load_relations_from(
        path: &str,
        separator: &str,
        source_index: usize,
        relation_index: usize,
        target_index: usize,
        skip_first_line: bool,
    ) -> Result<LabeledNetwork, NetworkError> {
        let builder: NetworkBuilder = NetworkBuilder::for_relations().load_from_file(
            path,
            separator,
            source_index,
            target_index,
            None,
            Some(relation_index),
            skip_first_line,
        )?;
        return Ok(builder.build());
    }

    pub fn network(&self) -> &Network {
        return &self.network;
    }

    pub fn num_nodes(&self) -> usize {
        return self.id_to_label.len();
    }

    pub fn label_for(
        &self,
        id: usize,
    ) -> &str {
        return &self.id_to_label[id];
    }

    pub fn id_for(
        &self,
        label: &str,
    ) -> Option<usize> {
        return self.label_to_id.get(label).cloned();
    }

    /// Relation labels between two nodes, in either direction; distinct labels are joined
    /// with `/`.
    pub fn relation_between(
        &self,
        source: usize,
        target: usize,
    ) -> Option<&str> {
        return self
            .relations
            .get(&(source.min(target), source.max(target)))
            .map(|label| label.as_str());
    }
}
