//! Display graph construction and layout

mod display;
mod layout;


pub use display::{DisplayGraph, EdgeTag, GraphEdge, GraphNode, NodeIndex};
pub use layout::{spring_layout, Layout, LayoutConfig, Point, DEFAULT_SEED};
