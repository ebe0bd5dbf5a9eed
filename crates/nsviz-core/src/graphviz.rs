use std::collections::BTreeMap;

use crate::graph::Graph;
use crate::group::GroupId;
use crate::style::Style;

/// Hand-off to the rendering backend: the graph plus its group table and
/// group-level style.
#[derive(Debug, Clone, Default)]
pub struct GraphViz {
    graph: Graph,
    groups: BTreeMap<GroupId, String>,
    group_layout: Style,
}

impl GraphViz {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn set_groups(&mut self, groups: BTreeMap<GroupId, String>) {
        self.groups = groups;
    }

    pub fn groups(&self) -> &BTreeMap<GroupId, String> {
        &self.groups
    }

    pub fn group_label(&self, id: GroupId) -> Option<&str> {
        self.groups.get(&id).map(String::as_str)
    }

    pub fn set_group_layout(&mut self, layout: Style) {
        self.group_layout = layout;
    }

    pub fn group_layout(&self) -> &Style {
        &self.group_layout
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}
