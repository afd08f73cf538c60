//! Most/least popular track selection.

use crate::models::{RankedTrack, Track};

/// Top and bottom of the popularity ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct PopularityRanking {
    pub most_popular: Vec<RankedTrack>,
    pub least_popular: Vec<RankedTrack>,
}

/// Rank tracks by popularity, highest first. Equal popularity keeps playlist
/// order (stable sort), so the output is deterministic.
///
/// `most_popular` is the head of the ranking; `least_popular` is its tail
/// read backwards, least popular first. With fewer than `size` tracks both
/// lists hold every track.
pub fn rank_by_popularity(tracks: &[&Track], size: usize) -> PopularityRanking {
    let mut sorted: Vec<&Track> = tracks.to_vec();
    sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity));

    let most_popular = sorted.iter().take(size).map(|t| ranked(t)).collect();
    let least_popular = sorted.iter().rev().take(size).map(|t| ranked(t)).collect();

    PopularityRanking {
        most_popular,
        least_popular,
    }
}

fn ranked(track: &Track) -> RankedTrack {
    (track.name.clone(), track.popularity)
}
