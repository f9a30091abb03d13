//! In-memory graph build: line records in, nodes and edges out.
//!
//! Phases mirror the CLI output: aggregate songs, build nodes, compute the
//! similarity matrix, select edges. Each phase takes immutable input and
//! returns a fresh table.

use std::time::Instant;

use crate::aggregate::{aggregate_songs, count_artists};
use crate::config::GraphConfig;
use crate::edges::select_edges;
use crate::error::Result;
use crate::models::{EmotionVector, GraphStats, LineRecord, SongGraph};
use crate::nodes::build_nodes;
use crate::progress::Phase;
use crate::similarity::cosine_similarity_matrix;

/// Build the song graph for `records`.
///
/// Zero records give an empty graph; a single song gives one node and no
/// edges. Output is deterministic for a given input and threshold.
pub fn build_graph(records: &[LineRecord], config: &GraphConfig) -> Result<(SongGraph, GraphStats)> {
    let start = Instant::now();

    let phase = Phase::start("Phase 2: Aggregating songs");
    let songs = aggregate_songs(records);
    let artists = count_artists(&songs);
    phase.finish(format!("Phase 2: {} lines -> {} songs by {} artists", records.len(), songs.len(), artists));

    let nodes = build_nodes(&songs)?;

    let phase = Phase::start("Phase 3: Computing similarity matrix");
    let vectors: Vec<EmotionVector> = songs.iter().map(|s| s.emotion_means).collect();
    let sim = cosine_similarity_matrix(&vectors);
    phase.finish(format!("Phase 3: {}x{} similarity matrix", sim.len(), sim.len()));

    let phase = Phase::start("Phase 4: Selecting edges");
    let selection = select_edges(&sim, &songs, config.threshold)?;
    phase.finish(format!(
        "Phase 4: {} edges from {} cross-artist pairs (threshold {})",
        selection.edges.len(),
        selection.cross_artist_pairs,
        config.threshold
    ));

    let weights = selection.edges.iter().map(|e| e.weight);
    let stats = GraphStats {
        input_rows: records.len(),
        songs: songs.len(),
        artists,
        cross_artist_pairs: selection.cross_artist_pairs,
        edges: selection.edges.len(),
        threshold: config.threshold,
        min_edge_weight: weights.clone().reduce(f64::min),
        max_edge_weight: weights.reduce(f64::max),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };

    Ok((
        SongGraph {
            nodes,
            edges: selection.edges,
        },
        stats,
    ))
}
