//! # nsviz-core
//!
//! Turns per-type analysis records into a deduplicated, styled and grouped
//! dependency graph between fully-qualified names.
//!
//! ```text
//! AST ──(extraction, external)──> AnalysisCollection
//!                                      │
//!                                   Builder ── Layout (style dictionaries)
//!                                   │     │
//!                               Graph   GroupGenerator
//!                                   │     │
//!                                   GraphViz ──> rendering backend
//! ```
//!
//! The unsupported-construct collector sits on the extraction side: it is a
//! [`Visitor`] that records constructs the analysis cannot resolve (such as
//! `eval`) onto an [`Adt`], so they show up as synthetic edges in the graph.

pub mod adt;
pub mod analysis;
pub mod builder;
pub mod filter;
pub mod graph;
pub mod graphviz;
pub mod group;
pub mod layout;
pub mod name;
pub mod relation;
pub mod style;
pub mod unsupported;
pub mod visit;

pub use adt::{Adt, Meta};
pub use analysis::{Analysis, AnalysisCollection};
pub use builder::Builder;
pub use filter::{NameFilter, NameFilterConfig, NodeNameFilter, PassThrough};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexEntry, VertexId};
pub use graphviz::GraphViz;
pub use group::{GroupGenerator, GroupId};
pub use layout::{Layout, LayoutProfile, NullLayout, StyleKey, StyleSheet};
pub use name::{Attributes, Name};
pub use relation::{BuildMode, RelationKind};
pub use style::Style;
pub use unsupported::{UnsupportedCollector, UnsupportedConstruct};
pub use visit::{Node, SyntaxNode, Visitor, traverse};

pub use nsviz_error::{Error, ErrorKind, Result};
