//! Edge selection from the similarity matrix.
//!
//! Only pairs of songs by different artists are eligible. Each unordered pair
//! is visited once as (i, j) with i < j, and kept when its similarity is at
//! least the threshold.

use rayon::prelude::*;

use crate::error::{GraphError, Result};
use crate::models::{Edge, SongFeatureVector};
use crate::similarity::SimilarityMatrix;

/// Edges in (i, j) order plus the number of cross-artist pairs examined.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeSelection {
    pub edges: Vec<Edge>,
    pub cross_artist_pairs: usize,
}

/// Filter the matrix down to thresholded cross-artist edges.
///
/// `sim` must be the matrix computed over `songs` in the same order. The
/// comparison is inclusive, and thresholds outside [-1, 1] are not special
/// cased. Rows are scanned in parallel and concatenated in row order, so
/// output order is ascending i, then ascending j.
pub fn select_edges(sim: &SimilarityMatrix, songs: &[SongFeatureVector], threshold: f64) -> Result<EdgeSelection> {
    if sim.len() != songs.len() {
        return Err(GraphError::integrity(
            "edge selection",
            format!(
                "similarity matrix covers {} songs but {} were given",
                sim.len(),
                songs.len()
            ),
        ));
    }

    let ids: Vec<String> = songs.iter().map(|s| s.node_id()).collect();

    let rows: Vec<(Vec<Edge>, usize)> = (0..songs.len())
        .into_par_iter()
        .map(|i| {
            let mut edges = Vec::new();
            let mut pairs = 0;
            for j in (i + 1)..songs.len() {
                if songs[i].artist == songs[j].artist {
                    continue;
                }
                pairs += 1;
                let weight = sim.get(i, j);
                if weight >= threshold {
                    edges.push(Edge {
                        source: ids[i].clone(),
                        target: ids[j].clone(),
                        weight,
                    });
                }
            }
            (edges, pairs)
        })
        .collect();

    let mut selection = EdgeSelection::default();
    for (edges, pairs) in rows {
        selection.edges.extend(edges);
        selection.cross_artist_pairs += pairs;
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmotionVector;
    use crate::similarity::cosine_similarity_matrix;

    fn song(artist: &str, title: &str, emotion_means: EmotionVector) -> SongFeatureVector {
        SongFeatureVector {
            artist: artist.to_string(),
            title: title.to_string(),
            emotion_means,
            avg_sentiment_score: 0.0,
            line_count: 1,
        }
    }

    fn select(songs: &[SongFeatureVector], threshold: f64) -> EdgeSelection {
        let vectors: Vec<EmotionVector> = songs.iter().map(|s| s.emotion_means).collect();
        let sim = cosine_similarity_matrix(&vectors);
        select_edges(&sim, songs, threshold).unwrap()
    }

    const ANGER: EmotionVector = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    const JOY: EmotionVector = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];

    #[test]
    fn test_same_artist_pairs_skipped() {
        let songs = [song("A", "one", ANGER), song("A", "two", ANGER), song("B", "three", ANGER)];
        let selection = select(&songs, 0.99);
        assert_eq!(selection.cross_artist_pairs, 2);
        assert_eq!(
            selection.edges,
            vec![
                Edge {
                    source: "A - one".to_string(),
                    target: "B - three".to_string(),
                    weight: 1.0,
                },
                Edge {
                    source: "A - two".to_string(),
                    target: "B - three".to_string(),
                    weight: 1.0,
                },
            ]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let songs = [song("A", "one", ANGER), song("B", "two", JOY)];
        let selection = select(&songs, 0.0);
        assert_eq!(selection.edges.len(), 1);
        assert_eq!(selection.edges[0].weight, 0.0);
        assert!(select(&songs, 1e-12).edges.is_empty());
    }

    #[test]
    fn test_out_of_range_thresholds() {
        let songs = [
            song("A", "one", ANGER),
            song("B", "two", JOY),
            song("C", "three", [0.5, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0]),
        ];
        assert!(select(&songs, 1.01).edges.is_empty());
        let all = select(&songs, -1.01);
        assert_eq!(all.edges.len(), 3);
        assert_eq!(all.cross_artist_pairs, 3);
    }

    #[test]
    fn test_order_is_row_then_column() {
        let songs = [
            song("A", "a", ANGER),
            song("B", "b", ANGER),
            song("C", "c", ANGER),
            song("D", "d", ANGER),
        ];
        let pairs: Vec<(String, String)> = select(&songs, 0.5)
            .edges
            .into_iter()
            .map(|e| (e.source, e.target))
            .collect();
        let expected: Vec<(String, String)> = [
            ("A - a", "B - b"),
            ("A - a", "C - c"),
            ("A - a", "D - d"),
            ("B - b", "C - c"),
            ("B - b", "D - d"),
            ("C - c", "D - d"),
        ]
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_zero_vector_song_only_joins_at_nonpositive_threshold() {
        let songs = [song("A", "silent", [0.0; 7]), song("B", "loud", ANGER)];
        assert!(select(&songs, 0.5).edges.is_empty());
        let edges = select(&songs, 0.0).edges;
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 0.0);
    }

    #[test]
    fn test_single_and_empty() {
        assert!(select(&[song("A", "one", ANGER)], -2.0).edges.is_empty());
        assert_eq!(select(&[], 0.0), EdgeSelection::default());
    }

    #[test]
    fn test_mismatched_matrix_rejected() {
        let sim = cosine_similarity_matrix(&[ANGER]);
        let songs = [song("A", "one", ANGER), song("B", "two", ANGER)];
        assert!(select_edges(&sim, &songs, 0.0).is_err());
    }
}
