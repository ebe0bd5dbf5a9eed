//! Dependency graph construction.
//!
//! The builder walks every record of an [`AnalysisCollection`] and turns the
//! relation lists selected by its [`BuildMode`] into vertices and edges:
//!
//! - one vertex per fully-qualified name, grouped and base-styled on creation
//! - one edge per ordered (declared, dependency) pair, styled by the relation
//!   kind that created it; later encounters of the pair leave it untouched
//! - no edge from a type to its own name
//!
//! Every style dictionary the mode needs is resolved before the graph is
//! touched, so a misconfigured layout fails the build without side effects.

use tracing::{debug, trace};

use nsviz_error::{Error, Result};

use crate::adt::Adt;
use crate::analysis::AnalysisCollection;
use crate::graph::{Graph, VertexId};
use crate::graphviz::GraphViz;
use crate::group::GroupGenerator;
use crate::layout::{Layout, NullLayout, StyleKey};
use crate::name::Name;
use crate::relation::{Accessor, BuildMode, RelationKind};
use crate::style::{GROUP_ATTRIBUTE, Style};

pub struct Builder {
    graph_viz: GraphViz,
    group_generator: GroupGenerator,
    layout: Box<dyn Layout>,
    mode: BuildMode,
    collection: AnalysisCollection,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(GraphViz::default(), GroupGenerator::default())
    }
}

impl Builder {
    pub fn new(graph_viz: GraphViz, group_generator: GroupGenerator) -> Self {
        Self {
            graph_viz,
            group_generator,
            layout: Box::new(NullLayout),
            mode: BuildMode::default(),
            collection: AnalysisCollection::default(),
        }
    }

    /// Replace the default (empty) layout.
    pub fn set_layout<L: Layout + 'static>(&mut self, layout: L) -> &mut Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn set_group_length(&mut self, group_length: usize) -> &mut Self {
        self.group_generator.set_group_length(group_length);
        self
    }

    pub fn set_call_mode(&mut self) -> &mut Self {
        self.mode = BuildMode::Call;
        self
    }

    pub fn set_mode(&mut self, mode: BuildMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn set_analysis_collection(&mut self, collection: AnalysisCollection) -> &mut Self {
        self.collection = collection;
        self
    }

    pub fn analysis_collection(&self) -> &AnalysisCollection {
        &self.collection
    }

    /// Build the graph.
    ///
    /// Calling this again replays the construction against the same graph:
    /// existing vertices and edges are reused, graph and group layouts are
    /// set again.
    #[tracing::instrument(skip_all, fields(mode = %self.mode))]
    pub fn create(&mut self) -> Result<&mut Self> {
        let Self {
            graph_viz,
            group_generator,
            layout,
            mode,
            collection,
        } = &mut *self;

        let resolved = ResolvedLayout::resolve(&**layout, *mode)
            .map_err(|err| err.with_operation("builder::create"))?;

        graph_viz.graph_mut().set_layout(resolved.graph.clone());

        let mut records = 0usize;
        {
            let mut assembler = Assembler {
                graph: graph_viz.graph_mut(),
                groups: group_generator,
                layout: &resolved,
            };
            for adt in collection.adts() {
                assembler
                    .add_record(adt)
                    .map_err(|err| err.with_operation("builder::create"))?;
                records += 1;
            }
        }

        // Pushed after the walk so the table holds groups first seen in this run.
        graph_viz.set_groups(group_generator.get_groups());
        graph_viz.set_group_layout(resolved.group.clone());

        debug!(
            records,
            vertices = graph_viz.graph().vertex_count(),
            edges = graph_viz.graph().edge_count(),
            groups = graph_viz.groups().len(),
            "dependency graph built"
        );
        Ok(self)
    }

    pub fn graph_viz(&self) -> &GraphViz {
        &self.graph_viz
    }

    pub fn group_generator(&self) -> &GroupGenerator {
        &self.group_generator
    }

    pub fn into_graph_viz(self) -> GraphViz {
        self.graph_viz
    }
}

struct ResolvedRelation<'l> {
    kind: RelationKind,
    accessor: Accessor,
    vertex: Option<&'l Style>,
    edge: &'l Style,
}

/// The style dictionaries one build needs, looked up once.
struct ResolvedLayout<'l> {
    graph: &'l Style,
    group: &'l Style,
    vertex: &'l Style,
    relations: Vec<ResolvedRelation<'l>>,
}

impl<'l> ResolvedLayout<'l> {
    fn resolve(layout: &'l dyn Layout, mode: BuildMode) -> Result<Self> {
        let relations = mode
            .relations()
            .iter()
            .map(|&(kind, accessor)| -> Result<ResolvedRelation<'l>> {
                let vertex = kind
                    .vertex_style_key()
                    .map(|key| layout.require(key))
                    .transpose()?;
                Ok(ResolvedRelation {
                    kind,
                    accessor,
                    vertex,
                    edge: layout.require(kind.edge_style_key())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            graph: layout.require(StyleKey::Graph)?,
            group: layout.require(StyleKey::Group)?,
            vertex: layout.require(StyleKey::Vertex)?,
            relations,
        })
    }
}

struct Assembler<'a, 'l> {
    graph: &'a mut Graph,
    groups: &'a mut GroupGenerator,
    layout: &'a ResolvedLayout<'l>,
}

impl Assembler<'_, '_> {
    fn add_record(&mut self, adt: &Adt) -> Result<()> {
        let layout = self.layout;
        let declared = adt.declared_namespace();
        let root = self.resolve_vertex(declared)?;
        trace!(declared = %declared, "adding record");

        for relation in &layout.relations {
            for name in (relation.accessor)(adt) {
                self.add_dependency(root, declared, name, relation)?;
            }
        }
        Ok(())
    }

    fn add_dependency(
        &mut self,
        root: VertexId,
        declared: &Name,
        name: &Name,
        relation: &ResolvedRelation<'_>,
    ) -> Result<()> {
        let target = self.resolve_vertex(name)?;
        if let Some(style) = relation.vertex {
            self.graph
                .vertex_mut(target)
                .ok_or_else(|| Error::vertex_not_found(name.fully_qualified()))?
                .merge_layout(style);
        }

        if name == declared {
            trace!(name = %name, "self reference skipped");
            return Ok(());
        }

        if self.graph.edge_exists(root, target) {
            trace!(from = %declared, to = %name, kind = %relation.kind, "edge already present");
            return Ok(());
        }

        let edge = self.graph.create_edge(root, target)?;
        if let Some(edge) = self.graph.edge_mut(edge) {
            edge.set_layout(relation.edge.clone());
        }
        trace!(from = %declared, to = %name, kind = %relation.kind, "edge created");
        Ok(())
    }

    /// Vertex for `name`; grouped and base-styled only when created here.
    fn resolve_vertex(&mut self, name: &Name) -> Result<VertexId> {
        let groups = &mut *self.groups;
        let entry = self
            .graph
            .create_vertex_with(name.fully_qualified(), || groups.get_id_for(name));
        let id = entry.id();

        if entry.is_created() {
            let vertex = self
                .graph
                .vertex_mut(id)
                .ok_or_else(|| Error::vertex_not_found(name.fully_qualified()))?;
            let group_style = match vertex.group() {
                Some(group) => Style::new().with(GROUP_ATTRIBUTE, group.to_string()),
                None => Style::new(),
            };
            vertex.set_layout(Style::merged([self.layout.vertex, &group_style]));
        }
        Ok(id)
    }
}
