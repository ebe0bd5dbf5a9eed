//! Layout providers: named style dictionaries for the graph, its groups,
//! vertices and each relation kind's edges.
//!
//! A provider either has a dictionary for a key or it does not. Missing
//! dictionaries are configuration errors and surface as
//! [`ErrorKind::StyleMissing`](nsviz_error::ErrorKind::StyleMissing) the first
//! time they are required, never as a silently empty style.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use nsviz_error::{Error, Result};

use crate::style::Style;

/// Every style dictionary a layout can provide.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    IntoStaticStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StyleKey {
    Graph,
    Group,
    Vertex,
    VertexUnsupported,
    VertexNamespacedString,
    Edge,
    EdgeImplement,
    EdgeExtend,
    EdgeTraitUse,
    EdgeUnsupported,
    EdgeNamespacedString,
}

impl StyleKey {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Source of style dictionaries for one build.
pub trait Layout {
    /// The dictionary for `key`, if this layout defines one.
    fn style(&self, key: StyleKey) -> Option<&Style>;

    /// The dictionary for `key`, or a `StyleMissing` error.
    fn require(&self, key: StyleKey) -> Result<&Style> {
        self.style(key)
            .ok_or_else(|| Error::style_missing(key.as_str()).with_operation("layout::require"))
    }

    fn graph(&self) -> Result<&Style> {
        self.require(StyleKey::Graph)
    }

    fn group(&self) -> Result<&Style> {
        self.require(StyleKey::Group)
    }

    fn vertex(&self) -> Result<&Style> {
        self.require(StyleKey::Vertex)
    }

    fn vertex_unsupported(&self) -> Result<&Style> {
        self.require(StyleKey::VertexUnsupported)
    }

    fn vertex_namespaced_string(&self) -> Result<&Style> {
        self.require(StyleKey::VertexNamespacedString)
    }

    fn edge(&self) -> Result<&Style> {
        self.require(StyleKey::Edge)
    }

    fn edge_implement(&self) -> Result<&Style> {
        self.require(StyleKey::EdgeImplement)
    }

    fn edge_extend(&self) -> Result<&Style> {
        self.require(StyleKey::EdgeExtend)
    }

    fn edge_trait_use(&self) -> Result<&Style> {
        self.require(StyleKey::EdgeTraitUse)
    }

    fn edge_unsupported(&self) -> Result<&Style> {
        self.require(StyleKey::EdgeUnsupported)
    }

    fn edge_namespaced_string(&self) -> Result<&Style> {
        self.require(StyleKey::EdgeNamespacedString)
    }
}

static EMPTY_STYLE: Style = Style::new();

/// Layout defining every key with an empty dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLayout;

impl Layout for NullLayout {
    fn style(&self, _key: StyleKey) -> Option<&Style> {
        Some(&EMPTY_STYLE)
    }
}

/// A table of style dictionaries keyed by [`StyleKey`].
///
/// Deserializes from a map such as a TOML table:
///
/// ```toml
/// [vertex]
/// shape = "box"
/// [edge_extend]
/// arrowhead = "empty"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet(BTreeMap<StyleKey, Style>);

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: StyleKey, style: Style) -> Self {
        self.insert(key, style);
        self
    }

    pub fn insert(&mut self, key: StyleKey, style: Style) -> Option<Style> {
        self.0.insert(key, style)
    }

    /// Keys this sheet does not define.
    pub fn missing_keys(&self) -> Vec<StyleKey> {
        StyleKey::iter().filter(|key| !self.0.contains_key(key)).collect()
    }

    /// Every key present, with empty dictionaries.
    pub fn empty() -> Self {
        StyleKey::iter().map(|key| (key, Style::new())).collect()
    }

    /// Boxes and coloured edges, blind-spot vertices highlighted.
    pub fn standard() -> Self {
        Self::new()
            .with(
                StyleKey::Graph,
                Style::from_iter([
                    ("rankdir", "TB"),
                    ("ranksep", "0.8"),
                    ("nodesep", "0.4"),
                    ("splines", "true"),
                    ("fontname", "Helvetica"),
                ]),
            )
            .with(
                StyleKey::Group,
                Style::from_iter([
                    ("style", "rounded,filled"),
                    ("fillcolor", "#f7f7f7"),
                    ("color", "#bbbbbb"),
                    ("fontname", "Helvetica"),
                ]),
            )
            .with(
                StyleKey::Vertex,
                Style::from_iter([
                    ("shape", "box"),
                    ("style", "rounded,filled"),
                    ("fillcolor", "#f0f0f0"),
                    ("fontname", "Helvetica"),
                ]),
            )
            .with(
                StyleKey::VertexUnsupported,
                Style::from_iter([("fillcolor", "#f8d7da"), ("color", "#c0392b")]),
            )
            .with(
                StyleKey::VertexNamespacedString,
                Style::from_iter([("fillcolor", "#fff3cd"), ("color", "#b7950b")]),
            )
            .with(
                StyleKey::Edge,
                Style::from_iter([("color", "#888888"), ("arrowsize", "0.7")]),
            )
            .with(
                StyleKey::EdgeImplement,
                Style::from_iter([
                    ("color", "#2e86c1"),
                    ("style", "dashed"),
                    ("arrowhead", "empty"),
                ]),
            )
            .with(
                StyleKey::EdgeExtend,
                Style::from_iter([("color", "#1e8449"), ("arrowhead", "empty")]),
            )
            .with(
                StyleKey::EdgeTraitUse,
                Style::from_iter([("color", "#7d3c98"), ("style", "dotted")]),
            )
            .with(
                StyleKey::EdgeUnsupported,
                Style::from_iter([("color", "#c0392b"), ("style", "dashed")]),
            )
            .with(
                StyleKey::EdgeNamespacedString,
                Style::from_iter([("color", "#b7950b"), ("style", "dotted")]),
            )
    }

    /// Compact profile for large graphs: merged edges, plain arrows.
    pub fn aggregation() -> Self {
        let plain_edge = Style::from_iter([("color", "#999999"), ("arrowsize", "0.5")]);
        Self::new()
            .with(
                StyleKey::Graph,
                Style::from_iter([
                    ("rankdir", "LR"),
                    ("concentrate", "true"),
                    ("overlap", "false"),
                    ("ranksep", "1.2"),
                ]),
            )
            .with(
                StyleKey::Group,
                Style::from_iter([("style", "dashed"), ("color", "#cccccc")]),
            )
            .with(
                StyleKey::Vertex,
                Style::from_iter([("shape", "folder"), ("fontsize", "9")]),
            )
            .with(
                StyleKey::VertexUnsupported,
                Style::new().with("color", "#c0392b"),
            )
            .with(
                StyleKey::VertexNamespacedString,
                Style::new().with("color", "#b7950b"),
            )
            .with(StyleKey::Edge, plain_edge.clone())
            .with(StyleKey::EdgeImplement, plain_edge.clone())
            .with(StyleKey::EdgeExtend, plain_edge.clone())
            .with(StyleKey::EdgeTraitUse, plain_edge)
            .with(
                StyleKey::EdgeUnsupported,
                Style::from_iter([("color", "#c0392b"), ("arrowsize", "0.5")]),
            )
            .with(
                StyleKey::EdgeNamespacedString,
                Style::from_iter([("color", "#b7950b"), ("arrowsize", "0.5")]),
            )
    }
}

impl FromIterator<(StyleKey, Style)> for StyleSheet {
    fn from_iter<T: IntoIterator<Item = (StyleKey, Style)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Layout for StyleSheet {
    fn style(&self, key: StyleKey) -> Option<&Style> {
        self.0.get(&key)
    }
}

impl<L: Layout + ?Sized> Layout for Box<L> {
    fn style(&self, key: StyleKey) -> Option<&Style> {
        (**self).style(key)
    }
}

/// Named built-in layouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LayoutProfile {
    /// Every dictionary empty: the renderer's defaults apply.
    None,
    #[default]
    Standard,
    Aggregation,
}

impl LayoutProfile {
    pub fn parse(value: &str) -> Result<Self> {
        LayoutProfile::from_str(value).map_err(|_| {
            Error::config_invalid(format!(
                "unknown layout '{}', expected 'none', 'standard' or 'aggregation'",
                value
            ))
            .with_operation("layout::parse")
            .with_context("layout", value)
        })
    }

    pub fn style_sheet(self) -> StyleSheet {
        match self {
            LayoutProfile::None => StyleSheet::empty(),
            LayoutProfile::Standard => StyleSheet::standard(),
            LayoutProfile::Aggregation => StyleSheet::aggregation(),
        }
    }
}
