//! Signed sentiment for a single line.

use crate::models::SentimentLabel;

/// Positive lines contribute `+score`, negative lines `-score`.
pub fn signed_sentiment(label: SentimentLabel, score: f64) -> f64 {
    match label {
        SentimentLabel::Positive => score,
        SentimentLabel::Negative => -score,
    }
}
