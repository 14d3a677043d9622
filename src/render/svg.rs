//! Static SVG output

use super::figure::{Figure, NODE_COLOR, NODE_SIZE};
use crate::graph::Point;
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to format SVG: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Canvas geometry, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Room kept around the outermost nodes for markers and labels
    pub padding: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 500.0,
            margin_top: 40.0,
            margin_bottom: 20.0,
            margin_left: 5.0,
            margin_right: 5.0,
            padding: 60.0,
        }
    }
}

impl SvgOptions {
    /// Map layout coordinates in `[-1, 1]` onto the canvas (y grows upwards)
    fn project(&self, p: Point) -> (f64, f64) {
        let left = self.margin_left + self.padding;
        let right = self.width - self.margin_right - self.padding;
        let top = self.margin_top + self.padding;
        let bottom = self.height - self.margin_bottom - self.padding;
        let x = left + (p.x + 1.0) / 2.0 * (right - left);
        let y = bottom - (p.y + 1.0) / 2.0 * (bottom - top);
        (x, y)
    }
}

/// Render a figure as a standalone SVG document
pub fn render_svg(figure: &Figure, options: &SvgOptions) -> Result<String, RenderError> {
    let mut svg = String::new();
    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-family="Inter, system-ui, sans-serif">"#,
        options.width, options.height, options.width, options.height
    )?;
    writeln!(svg, r#"  <rect width="100%" height="100%" fill="white" />"#)?;

    if let Some(title) = &figure.title {
        writeln!(
            svg,
            r#"  <text class="title" x="{:.1}" y="{:.1}" font-size="20" text-anchor="middle">{}</text>"#,
            options.width / 2.0,
            options.margin_top / 2.0 + 7.0,
            escape_xml(title)
        )?;
    }

    svg.push_str("  <g class=\"edges\">\n");
    for edge in &figure.edges {
        let (x0, y0) = options.project(edge.from);
        let (x1, y1) = options.project(edge.to);
        writeln!(
            svg,
            r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="2" data-tag="{}" />"#,
            x0,
            y0,
            x1,
            y1,
            edge.color,
            edge.tag.as_str()
        )?;
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"nodes\">\n");
    for node in &figure.nodes {
        let (x, y) = options.project(node.at);
        let label = escape_xml(&node.label);
        writeln!(svg, "    <g class=\"node\">")?;
        writeln!(
            svg,
            r##"      <circle cx="{:.2}" cy="{:.2}" r="{:.1}" fill="{}" stroke="#2d3748" stroke-width="2"><title>{}</title></circle>"##,
            x,
            y,
            NODE_SIZE / 2.0,
            NODE_COLOR,
            label
        )?;
        writeln!(
            svg,
            r#"      <text x="{:.2}" y="{:.2}" font-size="12" text-anchor="middle">{}</text>"#,
            x,
            y - NODE_SIZE / 2.0 - 6.0,
            label
        )?;
        writeln!(svg, "    </g>")?;
    }
    svg.push_str("  </g>\n");

    if let Some(legend) = &figure.legend {
        let x = options.width - options.margin_right - 110.0;
        let mut y = options.margin_top + 10.0;
        svg.push_str("  <g class=\"legend\">\n");
        for entry in legend {
            writeln!(
                svg,
                r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="3" />"#,
                x,
                y,
                x + 24.0,
                y,
                entry.color
            )?;
            writeln!(
                svg,
                r#"    <text x="{:.1}" y="{:.1}" font-size="12" dominant-baseline="middle">{}</text>"#,
                x + 32.0,
                y,
                escape_xml(entry.label)
            )?;
            y += 20.0;
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{LinkType, Reflection, SubEntry};
    use crate::graph::{spring_layout, DisplayGraph, LayoutConfig};
    use crate::render::RenderOptions;

    fn svg_for(reflection: &Reflection, options: &RenderOptions) -> String {
        let graph = DisplayGraph::from_reflection(reflection);
        let layout = spring_layout(&graph, &LayoutConfig::default());
        let figure = Figure::build(&graph, &layout, options);
        render_svg(&figure, &SvgOptions::default()).unwrap()
    }

    fn reflection() -> Reflection {
        Reflection::new(
            "Alice",
            "Freedom",
            [
                SubEntry::new("Travel", "Adventure", LinkType::Real),
                SubEntry::new("Quit job", "Less stress", LinkType::Spurious),
                SubEntry::new("Savings", "Security", LinkType::Unclear),
            ],
        )
    }

    #[test]
    fn draws_every_edge_and_node() {
        let svg = svg_for(&reflection(), &RenderOptions::new());
        assert_eq!(svg.matches("<line ").count(), 6);
        assert_eq!(svg.matches("<circle ").count(), 7);
        assert_eq!(svg.matches(r#"stroke="gray""#).count(), 3);
        assert_eq!(svg.matches(r#"stroke="green""#).count(), 1);
        assert_eq!(svg.matches(r#"stroke="red""#).count(), 1);
        assert_eq!(svg.matches(r#"stroke="orange""#).count(), 1);
        assert!(svg.contains(r#"fill="skyblue""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn legend_adds_three_entries() {
        let svg = svg_for(&reflection(), &RenderOptions::new().with_legend(true));
        assert!(svg.contains("class=\"legend\""));
        assert_eq!(svg.matches("<line ").count(), 9);
        assert!(!svg.contains(">neutral<"));
    }

    #[test]
    fn labels_are_escaped() {
        let mut r = reflection();
        r.main_desire = "Peace & <quiet>".into();
        let svg = svg_for(&r, &RenderOptions::new().with_title("Tree for \"Al\""));
        assert!(svg.contains("Peace &amp; &lt;quiet&gt;"));
        assert!(svg.contains("Tree for &quot;Al&quot;"));
        assert!(!svg.contains("<quiet>"));
    }

    #[test]
    fn projection_keeps_nodes_on_canvas() {
        let options = SvgOptions::default();
        for (x, y) in [(-1.0, -1.0), (1.0, 1.0), (0.0, 0.0)] {
            let (px, py) = options.project(Point::new(x, y));
            assert!(px > 0.0 && px < options.width);
            assert!(py > 0.0 && py < options.height);
        }
        let (_, top) = options.project(Point::new(0.0, 1.0));
        let (_, bottom) = options.project(Point::new(0.0, -1.0));
        assert!(top < bottom);
    }
}
