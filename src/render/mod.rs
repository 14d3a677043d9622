//! Rendering of a laid-out display graph
//!
//! [`Figure::build`] turns a graph and its layout into plain visual
//! primitives (colored segments, labeled points, an optional legend);
//! [`render_svg`] writes a figure out as a static SVG document.

mod color;
mod figure;
mod svg;

pub use color::Color;
pub use figure::{EdgeSegment, Figure, LegendEntry, NodeMarker, RenderOptions, NODE_COLOR, NODE_SIZE};
pub use svg::{render_svg, RenderError, SvgOptions};
