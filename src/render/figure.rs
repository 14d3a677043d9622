//! Backend-independent figure model

use super::color::Color;
use crate::form::LinkType;
use crate::graph::{DisplayGraph, EdgeTag, Layout, Point};
use serde::Serialize;

/// Marker diameter for every node
pub const NODE_SIZE: f64 = 20.0;

/// Marker fill for every node
pub const NODE_COLOR: Color = Color::SkyBlue;

/// Drawing options independent of the output format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: Option<String>,
    pub legend: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }
}

/// A straight line between two laid-out nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub tag: EdgeTag,
}

/// A labeled point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMarker {
    pub at: Point,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Color,
}

/// Everything needed to draw one reflection tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: Option<String>,
    pub edges: Vec<EdgeSegment>,
    pub nodes: Vec<NodeMarker>,
    pub legend: Option<Vec<LegendEntry>>,
}

impl Figure {
    /// Map a graph and its layout onto visual primitives
    ///
    /// Edges come first so they are drawn beneath the nodes. Nodes or edges
    /// without a position in `layout` are skipped.
    pub fn build(graph: &DisplayGraph, layout: &Layout, options: &RenderOptions) -> Self {
        let edges = graph
            .edges
            .iter()
            .filter_map(|edge| {
                Some(EdgeSegment {
                    from: layout.position(edge.source)?,
                    to: layout.position(edge.target)?,
                    color: Color::for_edge(edge.tag),
                    tag: edge.tag,
                })
            })
            .collect();

        let nodes = graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| {
                Some(NodeMarker {
                    at: layout.position(idx)?,
                    label: node.label.clone(),
                })
            })
            .collect();

        Self {
            title: options.title.clone(),
            edges,
            nodes,
            legend: options.legend.then(Self::legend_entries),
        }
    }

    /// Legend for the three link categories; neutral edges are not listed.
    pub fn legend_entries() -> Vec<LegendEntry> {
        LinkType::ALL
            .into_iter()
            .map(|lt| LegendEntry {
                label: lt.as_str(),
                color: Color::for_link(lt),
            })
            .collect()
    }
}
