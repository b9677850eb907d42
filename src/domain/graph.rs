//! Inheritance graph for `extends` cycle detection
//!
//! Models the `extends` relation over all mapping-valued top-level keys
//! and walks it per starting node to report cycles. Uses petgraph for
//! graph storage and the cheap acyclicity pre-check.

use std::collections::{HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde_yaml::Mapping;

use super::checks::extends_parents;
use super::diagnostic::Diagnostic;
use super::document::key_str;

/// The directed `extends` graph of a document.
///
/// Nodes are mapping-valued top-level keys (jobs and hidden templates
/// alike); an edge A -> B means A extends B. Edges to unknown parents are
/// not represented: a walk simply stops there, and the reference checker
/// reports the dangling name.
#[derive(Debug, Default)]
pub struct InheritanceGraph {
    /// The underlying directed graph
    graph: DiGraph<String, ()>,

    /// Map from key name to node index
    node_map: HashMap<String, NodeIndex>,
}

impl InheritanceGraph {
    /// Builds the graph from a parsed document.
    pub fn from_document(doc: &Mapping) -> Self {
        let mut graph = Self::default();

        // First pass: add all nodes
        for (key, value) in doc {
            if let (Some(name), Some(_)) = (key_str(key), value.as_mapping()) {
                graph.add_node(name);
            }
        }

        // Second pass: add all edges
        for (key, value) in doc {
            let (Some(name), Some(def)) = (key_str(key), value.as_mapping()) else {
                continue;
            };
            for parent in extends_parents(def) {
                graph.add_edge(name, parent);
            }
        }

        graph
    }

    fn add_node(&mut self, name: &str) {
        if !self.node_map.contains_key(name) {
            let idx = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), idx);
        }
    }

    /// Adds `child` -> `parent` if both are known nodes.
    fn add_edge(&mut self, child: &str, parent: &str) {
        if let (Some(&child_idx), Some(&parent_idx)) =
            (self.node_map.get(child), self.node_map.get(parent))
        {
            self.graph.add_edge(child_idx, parent_idx, ());
        }
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Returns true if the graph contains the named node.
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Walks the graph from every node and collects each cycle found, as
    /// the path of names visited by the walk that discovered it.
    ///
    /// Every outgoing edge is followed, so sequence-valued `extends`
    /// participates. The same cycle surfaces once per reachable framing;
    /// callers deduplicate.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut found = Vec::new();
        if !is_cyclic_directed(&self.graph) {
            return found;
        }

        for start in self.graph.node_indices() {
            let mut path = Vec::new();
            let mut done = HashSet::new();
            self.walk(start, &mut path, &mut done, &mut found);
        }

        found
    }

    fn walk(
        &self,
        node: NodeIndex,
        path: &mut Vec<NodeIndex>,
        done: &mut HashSet<NodeIndex>,
        found: &mut Vec<Vec<String>>,
    ) {
        if path.contains(&node) {
            // Back-edge: the walk revisited a node on its own stack.
            let mut names: Vec<String> = path.iter().map(|&idx| self.graph[idx].clone()).collect();
            names.push(self.graph[node].clone());
            found.push(names);
            return;
        }
        if done.contains(&node) {
            return;
        }

        path.push(node);
        // petgraph iterates neighbors most-recently-added first; restore
        // declaration order so walks are deterministic.
        let mut parents: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        parents.reverse();
        for parent in parents {
            self.walk(parent, path, done, found);
        }
        path.pop();
        done.insert(node);
    }
}

/// Reports cycles in the `extends` inheritance graph.
///
/// One diagnostic per distinct message: the same cycle discovered from
/// several starting points collapses, keeping first-discovery order.
pub fn check_circular_extends(doc: &Mapping) -> Vec<Diagnostic> {
    let graph = InheritanceGraph::from_document(doc);

    let mut seen = HashSet::new();
    let mut diagnostics = Vec::new();
    for path in graph.cycles() {
        let diagnostic = Diagnostic::CircularExtends { path };
        if seen.insert(diagnostic.to_string()) {
            diagnostics.push(diagnostic);
        }
    }

    diagnostics
}
