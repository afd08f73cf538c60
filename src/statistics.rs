//! Pipeline assembly: raw playlist export in, `StatisticsResult` out.
//!
//! Stages:
//! 1. Record filter (removed and local entries dropped, empty set is fatal)
//! 2. Scalar aggregates
//! 3. Popularity and release-year histograms
//! 4. Popularity ranking
//! 5. Feature moments and correlations
//! 6. Genre analysis
//!
//! Stages 2-6 only share the filtered track set and the feature list; none
//! reads another's output.

use crate::aggregate::{release_years, summarize};
use crate::config::StatsOptions;
use crate::distribution::{popularity_distribution, release_year_distribution};
use crate::error::Result;
use crate::features::{advanced_statistics, feature_averages};
use crate::filter::valid_tracks;
use crate::genres::analyze_genres;
use crate::models::{PlaylistExport, StatisticsResult};
use crate::ranking::rank_by_popularity;

/// Compute the statistical summary of one playlist.
///
/// Pure and synchronous: no I/O, no shared state, so independent exports
/// can be processed in parallel. The only error is
/// [`StatsError::EmptyPlaylist`](crate::error::StatsError::EmptyPlaylist);
/// malformed individual values are skipped in the aggregate they affect.
pub fn calculate_statistics(
    export: &PlaylistExport,
    options: &StatsOptions,
) -> Result<StatisticsResult> {
    let tracks = valid_tracks(&export.items)?;

    let years = release_years(&tracks);
    let scalars = summarize(&tracks, &years);
    let ranking = rank_by_popularity(&tracks, options.ranking_size);

    log::debug!(
        "[STATS] {} tracks, {} with a release year, {} feature slots, {} artists",
        tracks.len(),
        years.len(),
        export.audio_features.len(),
        export.artists.len()
    );

    Ok(StatisticsResult {
        num_tracks: tracks.len(),
        average_popularity: scalars.average_popularity,
        total_duration_minutes: scalars.total_duration_minutes,
        average_release_year: scalars.average_release_year,
        unique_artists_count: scalars.unique_artists_count,
        explicit_tracks_count: scalars.explicit_tracks_count,
        popularity_distribution: popularity_distribution(&tracks),
        release_year_distribution: release_year_distribution(&years),
        most_popular_tracks: ranking.most_popular,
        least_popular_tracks: ranking.least_popular,
        followers: export.followers,
        feature_averages: feature_averages(&export.audio_features),
        advanced_statistics: advanced_statistics(&export.audio_features),
        genre_analysis: analyze_genres(&export.artists, options.top_genres),
    })
}
