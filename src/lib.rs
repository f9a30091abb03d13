//! Song emotion similarity graph - shared modules for the CLI and tests.

pub mod aggregate;
pub mod config;
pub mod edges;
pub mod error;
pub mod input;
pub mod models;
pub mod nodes;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod safety;
pub mod schema;
pub mod sentiment;
pub mod similarity;

pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use models::{Edge, GraphStats, LineRecord, Node, SongFeatureVector, SongGraph};
pub use pipeline::build_graph;
