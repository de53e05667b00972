//! Name-keyed adjacency lists.

use std::collections::{BTreeMap, BTreeSet};

/// Station name to its sorted, deduplicated neighbour names.
pub type AdjacencyList = BTreeMap<String, Vec<String>>;

/// Accumulates undirected connections between station names.
///
/// Neighbour sets are deduplicated as they are built and come out sorted,
/// so the same connections always produce identical output regardless of
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyBuilder {
    nodes: BTreeMap<String, BTreeSet<String>>,
}

impl AdjacencyBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect two names in both directions.
    ///
    /// Stations that share a name are one node: connecting a name to
    /// itself adds the node without a self-neighbour.
    pub fn connect(&mut self, a: &str, b: &str) {
        if a == b {
            self.nodes.entry(a.to_string()).or_default();
            return;
        }
        self.nodes
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.nodes
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Add each name to the other's neighbours, but only for names that
    /// are already nodes. Never creates a node.
    pub fn extend_existing(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        if let Some(neighbours) = self.nodes.get_mut(a) {
            neighbours.insert(b.to_string());
        }
        if let Some(neighbours) = self.nodes.get_mut(b) {
            neighbours.insert(a.to_string());
        }
    }

    /// Returns true if `name` is a node.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finish building.
    pub fn build(self) -> AdjacencyList {
        self.nodes
            .into_iter()
            .map(|(name, set)| (name, set.into_iter().collect()))
            .collect()
    }
}

/// Number of distinct undirected connections in `graph`.
pub fn count_connections(graph: &AdjacencyList) -> usize {
    graph.values().map(Vec::len).sum::<usize>() / 2
}
