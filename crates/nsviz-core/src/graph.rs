use std::collections::HashMap;

use nsviz_error::{Error, Result};

use crate::group::GroupId;
use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Position in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Position in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A graph vertex, one per distinct fully-qualified name.
///
/// The group is fixed when the vertex is created.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    name: String,
    group: Option<GroupId>,
    layout: Style,
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn layout(&self) -> &Style {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: Style) {
        self.layout = layout;
    }

    pub fn merge_layout(&mut self, layout: &Style) {
        self.layout.merge(layout);
    }
}

/// A directed edge, one per ordered vertex pair.
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    layout: Style,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    pub fn layout(&self) -> &Style {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: Style) {
        self.layout = layout;
    }
}

/// Result of [`Graph::create_vertex_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexEntry {
    Existing(VertexId),
    Created(VertexId),
}

impl VertexEntry {
    pub fn id(self) -> VertexId {
        match self {
            VertexEntry::Existing(id) | VertexEntry::Created(id) => id,
        }
    }

    pub fn is_created(self) -> bool {
        matches!(self, VertexEntry::Created(_))
    }
}

/// Vertex and edge tables with dedup-safe creation.
///
/// Vertices and edges are kept in creation order, which is also the order the
/// renderer emits them in.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    layout: Style,
    vertices: Vec<Vertex>,
    vertex_index: HashMap<String, VertexId>,
    edges: Vec<Edge>,
    edge_index: HashMap<(VertexId, VertexId), EdgeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_layout(&mut self, layout: Style) {
        self.layout = layout;
    }

    pub fn layout(&self) -> &Style {
        &self.layout
    }

    /// Return the vertex for `fqn`, creating an ungrouped one if needed.
    pub fn create_vertex(&mut self, fqn: &str) -> VertexId {
        self.create_vertex_with(fqn, || None).id()
    }

    /// Return the vertex for `fqn`, creating it if needed.
    ///
    /// `group` is only called when the vertex is created.
    pub fn create_vertex_with<F>(&mut self, fqn: &str, group: F) -> VertexEntry
    where
        F: FnOnce() -> Option<GroupId>,
    {
        if let Some(&id) = self.vertex_index.get(fqn) {
            return VertexEntry::Existing(id);
        }

        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            name: fqn.to_string(),
            group: group(),
            layout: Style::new(),
        });
        self.vertex_index.insert(fqn.to_string(), id);
        VertexEntry::Created(id)
    }

    pub fn find_vertex(&self, fqn: &str) -> Option<VertexId> {
        self.vertex_index.get(fqn).copied()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.index())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_exists(&self, from: VertexId, to: VertexId) -> bool {
        self.edge_index.contains_key(&(from, to))
    }

    /// Create the edge `from -> to`.
    ///
    /// Callers check [`Graph::edge_exists`] first; creating an existing pair is
    /// an `EdgeExists` error.
    pub fn create_edge(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId> {
        let (Some(source), Some(target)) = (self.vertex(from), self.vertex(to)) else {
            let missing = if self.vertex(from).is_none() { from } else { to };
            return Err(Error::vertex_not_found(missing.index().to_string())
                .with_operation("graph::create_edge"));
        };

        if self.edge_exists(from, to) {
            return Err(Error::edge_exists(source.name(), target.name())
                .with_operation("graph::create_edge"));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            id,
            from,
            to,
            layout: Style::new(),
        });
        self.edge_index.insert((from, to), id);
        Ok(id)
    }

    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.edge_index.get(&(from, to)).copied()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edges of `from`, in creation order.
    pub fn edges_from(&self, from: VertexId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.from == from)
    }
}
