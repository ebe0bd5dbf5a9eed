//! Core processing pipeline: load analysis → build graph → render DOT.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use tracing::info;

use nsviz_core::{AnalysisCollection, Builder, GraphViz};
use nsviz_error::{Error, Result};

use crate::config::Settings;

/// Input path that reads the analysis from stdin.
pub const STDIN_INPUT: &str = "-";

pub fn load_collection(path: &Path) -> Result<AnalysisCollection> {
    let source = if path == Path::new(STDIN_INPUT) {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|err| Error::from(err).with_operation("pipeline::load_collection"))?;
        source
    } else {
        std::fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("pipeline::load_collection")
                .with_context("path", path.display().to_string())
        })?
    };

    AnalysisCollection::from_json_str(&source).map_err(|err| {
        err.with_operation("pipeline::load_collection")
            .with_context("path", path.display().to_string())
    })
}

pub fn build_graph(settings: &Settings, collection: AnalysisCollection) -> Result<GraphViz> {
    let mut builder = Builder::default();
    builder
        .set_layout(settings.layout.clone())
        .set_mode(settings.mode)
        .set_group_length(settings.group_length)
        .set_analysis_collection(collection);
    builder.create()?;
    Ok(builder.into_graph_viz())
}

/// Run every phase and return the DOT text.
pub fn run_pipeline(settings: &Settings) -> Result<String> {
    let load_start = Instant::now();
    let collection = load_collection(&settings.input)?;
    info!(
        analyses = collection.len(),
        secs = load_start.elapsed().as_secs_f64(),
        "analysis loaded"
    );

    let build_start = Instant::now();
    let graph_viz = build_graph(settings, collection)?;
    info!(
        vertices = graph_viz.graph().vertex_count(),
        edges = graph_viz.graph().edge_count(),
        secs = build_start.elapsed().as_secs_f64(),
        "graph built"
    );

    let render_start = Instant::now();
    let dot = nsviz_dot::render(&graph_viz);
    info!(secs = render_start.elapsed().as_secs_f64(), "graph rendered");
    Ok(dot)
}
