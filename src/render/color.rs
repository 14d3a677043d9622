//! Fixed color encoding for edges and nodes

use crate::form::LinkType;
use crate::graph::EdgeTag;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Orange,
    Gray,
    SkyBlue,
}

impl Color {
    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Gray => "gray",
            Color::SkyBlue => "skyblue",
        }
    }

    pub fn for_link(link_type: LinkType) -> Self {
        match link_type {
            LinkType::Real => Color::Green,
            LinkType::Spurious => Color::Red,
            LinkType::Unclear => Color::Orange,
        }
    }

    pub fn for_edge(tag: EdgeTag) -> Self {
        match tag {
            EdgeTag::Link(link_type) => Self::for_link(link_type),
            EdgeTag::Neutral => Color::Gray,
        }
    }

    /// Look up a color by textual tag; anything unrecognized is gray.
    pub fn for_tag(tag: &str) -> Self {
        tag.parse::<LinkType>()
            .map(Self::for_link)
            .unwrap_or(Color::Gray)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_types_map_to_fixed_colors() {
        assert_eq!(Color::for_edge(EdgeTag::Link(LinkType::Real)), Color::Green);
        assert_eq!(Color::for_edge(EdgeTag::Link(LinkType::Spurious)), Color::Red);
        assert_eq!(Color::for_edge(EdgeTag::Link(LinkType::Unclear)), Color::Orange);
        assert_eq!(Color::for_edge(EdgeTag::Neutral), Color::Gray);
    }

    #[test]
    fn unknown_tags_fall_back_to_gray() {
        assert_eq!(Color::for_tag("Real"), Color::Green);
        assert_eq!(Color::for_tag("gray"), Color::Gray);
        assert_eq!(Color::for_tag("neutral"), Color::Gray);
        assert_eq!(Color::for_tag("Maybe"), Color::Gray);
        assert_eq!(Color::for_tag(""), Color::Gray);
    }

    #[test]
    fn tag_strings_agree_with_edge_tags() {
        for tag in [
            EdgeTag::Link(LinkType::Real),
            EdgeTag::Link(LinkType::Spurious),
            EdgeTag::Link(LinkType::Unclear),
            EdgeTag::Neutral,
        ] {
            assert_eq!(Color::for_tag(tag.as_str()), Color::for_edge(tag));
        }
    }
}
