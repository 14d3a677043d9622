//! DisplayGraph: the node/edge view of a single reflection

use crate::form::{LinkType, Reflection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position of a node inside [`DisplayGraph::nodes`]
pub type NodeIndex = usize;

/// What an edge encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "link_type")]
pub enum EdgeTag {
    /// Main desire to sub-desire, classified by the user
    Link(LinkType),
    /// Sub-desire to its outcome
    Neutral,
}

impl EdgeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeTag::Link(link_type) => link_type.as_str(),
            EdgeTag::Neutral => "neutral",
        }
    }
}

/// A node labelled by the literal text it stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub label: String,
}

/// A directed edge between two node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub tag: EdgeTag,
}

/// Directed graph derived from a reflection for display only
///
/// Nodes are deduplicated by label: two answers with identical text share a
/// node. Edges are kept as given, so a reflection always yields six of them
/// even when labels collide.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(skip)]
    index: HashMap<String, NodeIndex>,
}

impl DisplayGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the three-branch tree: main → sub-desire → outcome
    ///
    /// Nodes are inserted as main, then each sub-desire followed by its
    /// outcome; the layout seed relies on this order being stable.
    pub fn from_reflection(reflection: &Reflection) -> Self {
        let mut graph = Self::new();
        let root = graph.add_node(&reflection.main_desire);

        for entry in &reflection.entries {
            let sub = graph.add_node(&entry.sub_desire);
            let outcome = graph.add_node(&entry.outcome);
            graph.add_edge(root, sub, EdgeTag::Link(entry.link_type));
            graph.add_edge(sub, outcome, EdgeTag::Neutral);
        }

        graph
    }

    /// Insert a node, or return the existing one with the same label
    pub fn add_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(GraphNode {
            label: label.to_string(),
        });
        self.index.insert(label.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, tag: EdgeTag) {
        self.edges.push(GraphEdge { source, target, tag });
    }

    pub fn find(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving the given node, in insertion order
    pub fn edges_from(&self, idx: NodeIndex) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.source == idx)
    }

    /// Undirected adjacency, ignoring self-loops
    pub(crate) fn adjacency(&self) -> Vec<Vec<bool>> {
        let n = self.nodes.len();
        let mut adjacency = vec![vec![false; n]; n];
        for edge in &self.edges {
            if edge.source != edge.target {
                adjacency[edge.source][edge.target] = true;
                adjacency[edge.target][edge.source] = true;
            }
        }
        adjacency
    }
}
