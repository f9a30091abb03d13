//! Collapse line records into one feature vector per song.

use rustc_hash::FxHashMap;

use crate::models::{EmotionVector, LineRecord, SongFeatureVector, EMOTION_COUNT};
use crate::sentiment::signed_sentiment;

/// Running sums for one (artist, title) group.
#[derive(Default)]
struct SongAccumulator {
    emotion_sums: EmotionVector,
    sentiment_sum: f64,
    lines: usize,
}

impl SongAccumulator {
    fn add(&mut self, record: &LineRecord) {
        for (sum, value) in self.emotion_sums.iter_mut().zip(record.emotions.iter()) {
            *sum += value;
        }
        self.sentiment_sum += signed_sentiment(record.label, record.score);
        self.lines += 1;
    }

    fn finish(self, artist: String, title: String) -> SongFeatureVector {
        let n = self.lines as f64;
        let mut emotion_means = [0.0; EMOTION_COUNT];
        for (mean, sum) in emotion_means.iter_mut().zip(self.emotion_sums.iter()) {
            *mean = sum / n;
        }
        SongFeatureVector {
            artist,
            title,
            emotion_means,
            avg_sentiment_score: self.sentiment_sum / n,
            line_count: self.lines,
        }
    }
}

/// Group records by exact (artist, title) and average each group.
///
/// Keys are compared byte-for-byte: no trimming, no case folding. Songs are
/// returned sorted by (artist, title), which fixes the vector order used by
/// the similarity matrix and the edge table.
pub fn aggregate_songs(records: &[LineRecord]) -> Vec<SongFeatureVector> {
    let mut groups: FxHashMap<(&str, &str), SongAccumulator> = FxHashMap::default();
    for record in records {
        groups
            .entry((record.artist.as_str(), record.title.as_str()))
            .or_default()
            .add(record);
    }

    let mut songs: Vec<SongFeatureVector> = groups
        .into_iter()
        .map(|((artist, title), acc)| acc.finish(artist.to_string(), title.to_string()))
        .collect();
    songs.sort_by(|a, b| (&a.artist, &a.title).cmp(&(&b.artist, &b.title)));
    songs
}

/// Number of distinct artists among the songs.
pub fn count_artists(songs: &[SongFeatureVector]) -> usize {
    let mut artists: Vec<&str> = songs.iter().map(|s| s.artist.as_str()).collect();
    artists.sort_unstable();
    artists.dedup();
    artists.len()
}
