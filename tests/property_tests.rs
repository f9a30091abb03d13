//! Property-based tests using proptest

use proptest::prelude::*;
use lyric_emotion_graph::models::{EmotionVector, SentimentLabel};
use lyric_emotion_graph::similarity::cosine_similarity_matrix;
use lyric_emotion_graph::{build_graph, GraphConfig, LineRecord};
use std::collections::{HashMap, HashSet};

const TOLERANCE: f64 = 1e-9;

fn emotion_vector() -> impl Strategy<Value = EmotionVector> {
    prop::array::uniform7(prop_oneof![Just(0.0), 0.0f64..=1.0])
}

fn line_record() -> impl Strategy<Value = LineRecord> {
    (0usize..3, 0usize..4, any::<bool>(), 0.0f64..=1.0, emotion_vector()).prop_map(
        |(artist, title, positive, score, emotions)| LineRecord {
            artist: format!("artist {}", artist),
            title: format!("title {}", title),
            label: if positive {
                SentimentLabel::Positive
            } else {
                SentimentLabel::Negative
            },
            score,
            emotions,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_similarity_symmetric_and_bounded(vectors in prop::collection::vec(emotion_vector(), 0..12)) {
        let sim = cosine_similarity_matrix(&vectors);
        prop_assert_eq!(sim.len(), vectors.len());
        for i in 0..vectors.len() {
            for j in 0..vectors.len() {
                let v = sim.get(i, j);
                prop_assert_eq!(v, sim.get(j, i));
                prop_assert!(v >= -1.0 - TOLERANCE && v <= 1.0 + TOLERANCE, "sim[{}][{}] = {}", i, j, v);
            }
            let is_zero = vectors[i].iter().all(|x| *x == 0.0);
            if !is_zero {
                prop_assert!((sim.get(i, i) - 1.0).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn test_edges_cross_artist_unique_and_thresholded(
        records in prop::collection::vec(line_record(), 0..40),
        threshold in -1.0f64..=1.0
    ) {
        let (graph, stats) = build_graph(&records, &GraphConfig::new(threshold)).unwrap();

        let artist_of: HashMap<&str, &str> = graph
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.artist.as_str()))
            .collect();
        prop_assert_eq!(artist_of.len(), graph.nodes.len());

        let mut seen = HashSet::new();
        for edge in &graph.edges {
            prop_assert_ne!(&edge.source, &edge.target);
            prop_assert_ne!(artist_of[edge.source.as_str()], artist_of[edge.target.as_str()]);
            prop_assert!(edge.weight >= threshold);
            let key = if edge.source < edge.target {
                (edge.source.clone(), edge.target.clone())
            } else {
                (edge.target.clone(), edge.source.clone())
            };
            prop_assert!(seen.insert(key), "duplicate pair {} / {}", edge.source, edge.target);
        }
        prop_assert!(stats.edges <= stats.cross_artist_pairs);
    }

    #[test]
    fn test_build_is_deterministic(records in prop::collection::vec(line_record(), 0..30)) {
        let config = GraphConfig::new(0.9);
        let first = build_graph(&records, &config).unwrap().0;
        let second = build_graph(&records, &config).unwrap().0;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_worker_count_does_not_change_graph(records in prop::collection::vec(line_record(), 0..40)) {
        let config = GraphConfig::new(0.8);
        let build_with = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| build_graph(&records, &config))
                .unwrap()
                .0
        };
        prop_assert_eq!(build_with(1), build_with(8));
    }

    #[test]
    fn test_node_means_match_lines(records in prop::collection::vec(line_record(), 1..30)) {
        let (graph, _) = build_graph(&records, &GraphConfig::default()).unwrap();
        for node in &graph.nodes {
            let lines: Vec<&LineRecord> = records
                .iter()
                .filter(|r| r.artist == node.artist && r.title == node.label)
                .collect();
            prop_assert!(!lines.is_empty());
            let n = lines.len() as f64;
            let joy = lines.iter().map(|r| r.emotions[3]).sum::<f64>() / n;
            prop_assert!((node.joy_score - joy).abs() < TOLERANCE);
        }
    }
}
