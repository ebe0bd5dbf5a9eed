//! nsviz command-line interface.
//!
pub mod config;
pub mod pipeline;

pub use config::{DEFAULT_CONFIG_FILE, FileConfig, LayoutChoice, Overrides, Settings};
pub use pipeline::{build_graph, load_collection, run_pipeline};
