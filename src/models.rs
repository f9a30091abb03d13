//! Core data models for the emotion similarity graph.
//!
//! This module contains the typed line records read from the annotation
//! file, the per-song aggregates, and the node/edge rows written out for
//! graph tools.

use serde::Serialize;
use std::str::FromStr;

// ============================================================================
// Emotions
// ============================================================================

/// Number of emotion dimensions carried by every line and song.
pub const EMOTION_COUNT: usize = 7;

/// Emotion scores in the fixed order anger, disgust, fear, joy, neutral,
/// sadness, surprise. Every vector in a run shares this order.
pub type EmotionVector = [f64; EMOTION_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Neutral,
    Sadness,
    Surprise,
}

impl Emotion {
    /// All emotions in vector order.
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Neutral,
        Emotion::Sadness,
        Emotion::Surprise,
    ];

    /// Column name used in both the input and the nodes table.
    pub fn column(self) -> &'static str {
        match self {
            Emotion::Anger => "anger_score",
            Emotion::Disgust => "disgust_score",
            Emotion::Fear => "fear_score",
            Emotion::Joy => "joy_score",
            Emotion::Neutral => "neutral_score",
            Emotion::Sadness => "sadness_score",
            Emotion::Surprise => "surprise_score",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Line-level input
// ============================================================================

/// Sentiment tag attached to a lyric line by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl FromStr for SentimentLabel {
    type Err = String;

    /// Exact, case-sensitive match. Anything else is rejected rather than
    /// treated as negative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSITIVE" => Ok(SentimentLabel::Positive),
            "NEGATIVE" => Ok(SentimentLabel::Negative),
            other => Err(format!(
                "unrecognized sentiment label '{}' (expected POSITIVE or NEGATIVE)",
                other
            )),
        }
    }
}

/// One annotated lyric line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineRecord {
    pub artist: String,
    pub title: String,
    pub label: SentimentLabel,
    pub score: f64, // sentiment confidence, 0-1
    pub emotions: EmotionVector,
}

// ============================================================================
// Song-level aggregates
// ============================================================================

/// Averaged emotional profile of one (artist, title).
#[derive(Clone, Debug, PartialEq)]
pub struct SongFeatureVector {
    pub artist: String,
    pub title: String,
    pub emotion_means: EmotionVector,
    pub avg_sentiment_score: f64,
    pub line_count: usize,
}

impl SongFeatureVector {
    /// Node id shared by the nodes and edges tables.
    pub fn node_id(&self) -> String {
        node_id(&self.artist, &self.title)
    }
}

pub fn node_id(artist: &str, title: &str) -> String {
    format!("{} - {}", artist, title)
}

// ============================================================================
// Output Models
// ============================================================================

/// Row of the nodes table. Field order is the column order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub artist: String,
    pub avg_sentiment_score: f64,
    pub anger_score: f64,
    pub disgust_score: f64,
    pub fear_score: f64,
    pub joy_score: f64,
    pub neutral_score: f64,
    pub sadness_score: f64,
    pub surprise_score: f64,
}

impl From<&SongFeatureVector> for Node {
    fn from(song: &SongFeatureVector) -> Self {
        let [anger, disgust, fear, joy, neutral, sadness, surprise] = song.emotion_means;
        Node {
            id: song.node_id(),
            label: song.title.clone(),
            artist: song.artist.clone(),
            avg_sentiment_score: song.avg_sentiment_score,
            anger_score: anger,
            disgust_score: disgust,
            fear_score: fear,
            joy_score: joy,
            neutral_score: neutral,
            sadness_score: sadness,
            surprise_score: surprise,
        }
    }
}

/// Row of the edges table: an unordered cross-artist song pair.
/// `source` is the song that comes first in vector order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Nodes and edges of one run, in output order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

// ============================================================================
// Statistics (Instrumentation)
// ============================================================================

/// Summary of one graph build.
#[derive(Default, Debug, Clone, Serialize)]
pub struct GraphStats {
    pub input_rows: usize,
    pub songs: usize,
    pub artists: usize,

    // Pairs left after the cross-artist constraint, before thresholding
    pub cross_artist_pairs: usize,
    pub edges: usize,
    pub threshold: f64,
    pub min_edge_weight: Option<f64>,
    pub max_edge_weight: Option<f64>,

    // Timing
    pub elapsed_seconds: f64,
}

impl GraphStats {
    /// Share of cross-artist pairs that became edges, as a percentage
    pub fn edge_rate(&self) -> f64 {
        if self.cross_artist_pairs == 0 {
            0.0
        } else {
            100.0 * self.edges as f64 / self.cross_artist_pairs as f64
        }
    }

    /// Log stats in JSON format
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            tracing::info!("[STATS:{}]\n{}", phase, json);
        }
    }

    /// Write stats to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_columns_in_vector_order() {
        let columns: Vec<&str> = Emotion::ALL.iter().map(|e| e.column()).collect();
        assert_eq!(
            columns,
            vec![
                "anger_score",
                "disgust_score",
                "fear_score",
                "joy_score",
                "neutral_score",
                "sadness_score",
                "surprise_score",
            ]
        );
        for (i, emotion) in Emotion::ALL.iter().enumerate() {
            assert_eq!(emotion.index(), i);
        }
    }

    #[test]
    fn test_sentiment_label_exact_match() {
        assert_eq!("POSITIVE".parse(), Ok(SentimentLabel::Positive));
        assert_eq!("NEGATIVE".parse(), Ok(SentimentLabel::Negative));
        assert!("positive".parse::<SentimentLabel>().is_err());
        assert!("NEUTRAL".parse::<SentimentLabel>().is_err());
        assert!(" POSITIVE".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn test_node_from_song_flattens_emotions() {
        let song = SongFeatureVector {
            artist: "Drake".to_string(),
            title: "Started From the Bottom".to_string(),
            emotion_means: [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
            avg_sentiment_score: -0.25,
            line_count: 3,
        };
        let node = Node::from(&song);
        assert_eq!(node.id, "Drake - Started From the Bottom");
        assert_eq!(node.label, "Started From the Bottom");
        assert_eq!(node.artist, "Drake");
        assert_eq!(node.avg_sentiment_score, -0.25);
        assert_eq!(node.anger_score, 0.1);
        assert_eq!(node.joy_score, 0.4);
        assert_eq!(node.surprise_score, 0.7);
    }

    #[test]
    fn test_edge_rate() {
        let mut stats = GraphStats::default();
        assert_eq!(stats.edge_rate(), 0.0);
        stats.cross_artist_pairs = 8;
        stats.edges = 2;
        assert_eq!(stats.edge_rate(), 25.0);
    }

    #[test]
    fn test_stats_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let stats = GraphStats {
            input_rows: 12,
            songs: 3,
            artists: 2,
            cross_artist_pairs: 2,
            edges: 0,
            threshold: 0.99,
            ..Default::default()
        };
        stats.write_to_file(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["input_rows"], 12);
        assert_eq!(json["songs"], 3);
        assert_eq!(json["cross_artist_pairs"], 2);
        assert_eq!(json["threshold"], 0.99);
        assert!(json["min_edge_weight"].is_null());
        assert!(json["max_edge_weight"].is_null());
    }
}
