use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use lyric_emotion_graph::config::{GraphConfig, DEFAULT_THRESHOLD};
use lyric_emotion_graph::progress::{self, format_duration, Phase};
use lyric_emotion_graph::{build_graph, input, output, safety};

#[derive(Parser)]
#[command(name = "lyric-emotion-graph")]
#[command(about = "Build a cross-artist song similarity graph from per-line lyric emotion scores")]
struct Args {
    /// Per-line annotations CSV (artist, title, label, score, *_score emotions)
    input: PathBuf,

    #[arg(long, default_value = "song_nodes_emotion_space.csv")]
    nodes: PathBuf,

    #[arg(long, default_value = "song_edges_emotion_similarity.csv")]
    edges: PathBuf,

    /// Minimum cosine similarity (inclusive) for an edge
    #[arg(long, env = "EMOTION_GRAPH_THRESHOLD", default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    threshold: f64,

    #[arg(long, default_value = "0")]
    workers: usize,

    /// Hide progress bars and log progress lines instead
    #[arg(long)]
    log_only: bool,

    /// Write run statistics as JSON
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    progress::set_log_only(args.log_only);

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    safety::validate_graph_outputs(&args.input, &args.nodes, &args.edges)?;

    let config = GraphConfig::new(args.threshold);
    if !config.threshold_in_range() {
        warn!(
            "Threshold {} is outside [-1, 1]; the edge set will be empty or include every cross-artist pair",
            config.threshold
        );
    }

    let start = Instant::now();

    info!("Reading annotated lines: {:?}", args.input);
    let records = input::read_line_records(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let (graph, mut stats) = build_graph(&records, &config).context("Failed to build song graph")?;
    if graph.nodes.is_empty() {
        warn!("No songs found in {:?}; writing empty tables", args.input);
    }

    let phase = Phase::start("Phase 5: Writing output");
    output::write_nodes(&args.nodes, &graph.nodes)
        .with_context(|| format!("Failed to write nodes to {}", args.nodes.display()))?;
    output::write_edges(&args.edges, &graph.edges)
        .with_context(|| format!("Failed to write edges to {}", args.edges.display()))?;
    phase.finish(format!(
        "Phase 5: Wrote {} nodes and {} edges",
        graph.nodes.len(),
        graph.edges.len()
    ));

    stats.elapsed_seconds = start.elapsed().as_secs_f64();
    stats.log_phase("final");
    if let Some(ref path) = args.stats {
        stats
            .write_to_file(path)
            .with_context(|| format!("Failed to write stats to {}", path.display()))?;
        info!("Wrote stats to: {:?}", path);
    }

    println!("\n{:=<60}", "");
    println!("Graph build complete!");
    println!("  Songs: {} ({} artists)", stats.songs, stats.artists);
    println!(
        "  Edges: {} of {} cross-artist pairs ({:.2}%)",
        stats.edges,
        stats.cross_artist_pairs,
        stats.edge_rate()
    );
    println!("  Nodes written to: {}", args.nodes.display());
    println!("  Edges written to: {}", args.edges.display());
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    Ok(())
}
