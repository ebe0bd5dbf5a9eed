//! DOT rendering for nsviz dependency graphs.
//!
//! Groups become `cluster_<id>` subgraphs carrying the group layout; ungrouped
//! vertices stay at the top level. Vertices are labelled with their
//! fully-qualified name unless their layout sets a `label`.

mod dot;

use std::collections::BTreeMap;

use nsviz_core::{GraphViz, GroupId, Vertex};

pub use dot::{DotBuilder, escape_label, sanitize_id};

/// Render `graph_viz` as a DOT digraph.
#[tracing::instrument(skip_all)]
pub fn render(graph_viz: &GraphViz) -> String {
    let graph = graph_viz.graph();
    let mut dot = DotBuilder::new("G");
    dot.attrs(graph.layout());

    let mut grouped: BTreeMap<GroupId, Vec<&Vertex>> = BTreeMap::new();
    let mut ungrouped = Vec::new();
    for vertex in graph.vertices() {
        match vertex.group() {
            Some(group) => grouped.entry(group).or_default().push(vertex),
            None => ungrouped.push(vertex),
        }
    }

    for (group, vertices) in &grouped {
        let label = graph_viz.group_label(*group).unwrap_or_default();
        dot.blank().start_cluster(&group.to_string(), label);
        dot.attrs(graph_viz.group_layout());
        for vertex in vertices {
            write_vertex(&mut dot, vertex);
        }
        dot.end_cluster();
    }

    if !ungrouped.is_empty() {
        dot.blank();
        for vertex in ungrouped {
            write_vertex(&mut dot, vertex);
        }
    }

    if graph.edge_count() > 0 {
        dot.blank();
        for edge in graph.edges() {
            dot.edge_with_attrs(
                &vertex_id(edge.from().index()),
                &vertex_id(edge.to().index()),
                edge.layout().iter(),
            );
        }
    }

    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        clusters = grouped.len(),
        "rendered dot"
    );
    dot.build()
}

fn vertex_id(id: usize) -> String {
    format!("v{id}")
}

fn write_vertex(dot: &mut DotBuilder, vertex: &Vertex) {
    let layout = vertex.layout();
    let label = (!layout.contains_key("label")).then_some(("label", vertex.name()));
    dot.node_full(
        &vertex_id(vertex.id().index()),
        label.into_iter().chain(layout.iter()),
    );
}
