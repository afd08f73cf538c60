//! Tunable limits of the statistics pipeline.

/// Knobs for `calculate_statistics`. The defaults produce the standard
/// summary: five most/least popular tracks and the ten top genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    /// Length of `most_popular_tracks` and `least_popular_tracks`.
    pub ranking_size: usize,
    /// Length of `genre_analysis.top_genres`.
    pub top_genres: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            ranking_size: 5,
            top_genres: 10,
        }
    }
}
