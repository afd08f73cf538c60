//! Scalar aggregates over the valid track set.
//!
//! Release years are parsed once by [`release_years`] and shared with the
//! year histogram, so both agree on which tracks have a usable year.

use rustc_hash::FxHashSet;

use crate::error::{Result, StatsError};
use crate::models::Track;

/// Sums, averages and counts over the valid tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarAggregates {
    pub average_popularity: f64,
    pub total_duration_minutes: f64,
    pub average_release_year: f64,
    pub unique_artists_count: usize,
    pub explicit_tracks_count: usize,
}

/// Year of a track's release: the text before the first `-` of the album
/// release date, parsed as an integer.
pub fn parse_release_year(track: &Track) -> Result<i32> {
    let date = &track.album.release_date;
    let year = date.split('-').next().unwrap_or_default().trim();
    year.parse::<i32>().map_err(|_| StatsError::MalformedRecord {
        track: track.name.clone(),
        field: "release_date",
        value: date.clone(),
    })
}

/// Parsed years of all tracks with a well-formed release date.
///
/// Malformed dates are logged and skipped; the track still counts everywhere
/// else.
pub fn release_years(tracks: &[&Track]) -> Vec<i32> {
    tracks
        .iter()
        .filter_map(|track| match parse_release_year(track) {
            Ok(year) => Some(year),
            Err(err) => {
                log::warn!("[AGGREGATE] skipping release year: {}", err);
                None
            }
        })
        .collect()
}

/// Compute the scalar aggregates. `tracks` must be non-empty (guaranteed by
/// the record filter).
pub fn summarize(tracks: &[&Track], years: &[i32]) -> ScalarAggregates {
    let n = tracks.len().max(1) as f64;

    let popularity_sum: u64 = tracks.iter().map(|t| u64::from(t.popularity)).sum();
    let duration_ms_sum: u64 = tracks.iter().map(|t| t.duration_ms).sum();

    let average_release_year = if years.is_empty() {
        0.0
    } else {
        years.iter().map(|&y| f64::from(y)).sum::<f64>() / years.len() as f64
    };

    ScalarAggregates {
        average_popularity: popularity_sum as f64 / n,
        total_duration_minutes: duration_ms_sum as f64 / 60_000.0,
        average_release_year,
        unique_artists_count: unique_artists(tracks),
        explicit_tracks_count: tracks.iter().filter(|t| t.explicit).count(),
    }
}

/// Number of distinct artist ids credited across all tracks. Credits
/// without an id are not counted.
pub fn unique_artists(tracks: &[&Track]) -> usize {
    let ids: FxHashSet<&str> = tracks
        .iter()
        .flat_map(|t| t.artists.iter())
        .filter_map(|a| a.id.as_deref())
        .collect();
    ids.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Album, ArtistRef};

    fn track(name: &str, popularity: u32, duration_ms: u64, date: &str) -> Track {
        Track {
            name: name.to_string(),
            popularity,
            duration_ms,
            album: Album {
                release_date: date.to_string(),
            },
            ..Default::default()
        }
    }

    fn credits(ids: &[&str]) -> Vec<ArtistRef> {
        ids.iter()
            .map(|id| ArtistRef {
                id: Some(id.to_string()),
            })
            .collect()
    }

    #[test]
    fn test_parse_release_year_precisions() {
        assert_eq!(parse_release_year(&track("a", 0, 0, "1999-04-01")).unwrap(), 1999);
        assert_eq!(parse_release_year(&track("a", 0, 0, "2004-06")).unwrap(), 2004);
        assert_eq!(parse_release_year(&track("a", 0, 0, "1970")).unwrap(), 1970);
    }

    #[test]
    fn test_parse_release_year_malformed() {
        for date in ["", "unknown", "-01-01", "19x9-01-01"] {
            let err = parse_release_year(&track("bad", 0, 0, date)).unwrap_err();
            assert!(matches!(
                err,
                StatsError::MalformedRecord {
                    field: "release_date",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_summarize_basic() {
        let a = Track {
            explicit: true,
            artists: credits(&["x", "y"]),
            ..track("a", 10, 120_000, "2000-01-01")
        };
        let b = Track {
            artists: credits(&["y", "z"]),
            ..track("b", 30, 60_000, "2010")
        };
        let tracks = vec![&a, &b];
        let years = release_years(&tracks);
        let summary = summarize(&tracks, &years);

        assert_eq!(summary.average_popularity, 20.0);
        assert_eq!(summary.total_duration_minutes, 3.0);
        assert_eq!(summary.average_release_year, 2005.0);
        assert_eq!(summary.unique_artists_count, 3);
        assert_eq!(summary.explicit_tracks_count, 1);
    }

    #[test]
    fn test_malformed_year_excluded_from_year_mean_only() {
        let a = track("a", 40, 60_000, "1990-05-05");
        let b = track("b", 60, 60_000, "not a date");
        let tracks = vec![&a, &b];
        let years = release_years(&tracks);
        assert_eq!(years, vec![1990]);

        let summary = summarize(&tracks, &years);
        assert_eq!(summary.average_release_year, 1990.0);
        assert_eq!(summary.average_popularity, 50.0);
        assert_eq!(summary.total_duration_minutes, 2.0);
    }

    #[test]
    fn test_no_parseable_year_yields_zero() {
        let a = track("a", 40, 0, "");
        let tracks = vec![&a];
        let summary = summarize(&tracks, &release_years(&tracks));
        assert_eq!(summary.average_release_year, 0.0);
    }

    #[test]
    fn test_unique_artists_skips_missing_ids() {
        let a = Track {
            artists: vec![ArtistRef { id: None }, ArtistRef { id: None }],
            ..track("a", 0, 0, "2000")
        };
        let b = Track {
            artists: credits(&["x"]),
            ..track("b", 0, 0, "2000")
        };
        assert_eq!(unique_artists(&[&a, &b]), 1);
    }
}
