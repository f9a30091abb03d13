//! Graph build configuration.

/// Default minimum similarity for an edge. Emotion vectors have only seven
/// dimensions, so most song pairs score high; useful graphs need a
/// threshold near the top of the range.
pub const DEFAULT_THRESHOLD: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    /// Minimum cosine similarity (inclusive) for an edge.
    pub threshold: f64,
}

impl GraphConfig {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Whether the threshold lies in the range cosine similarity can reach.
    /// Outside it the edge set is trivially empty or complete.
    pub fn threshold_in_range(&self) -> bool {
        (-1.0..=1.0).contains(&self.threshold)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
