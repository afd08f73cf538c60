//! Genre composition of a playlist's artists.

use rustc_hash::FxHashMap;

use crate::models::{Artist, GenreAnalysis, GenreCount, OrderedMap};

/// Occurrence count per genre tag, in first-encountered order.
///
/// Artists are expected to be deduplicated by the caller; an artist listed
/// twice contributes its genres twice.
pub fn count_genres(artists: &[Artist]) -> Vec<GenreCount> {
    // genre tag -> position in `counts`
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<GenreCount> = Vec::new();

    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        match index.get(genre.as_str()) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(genre.as_str(), counts.len());
                counts.push((genre.clone(), 1));
            }
        }
    }
    counts
}

/// Rank genres, measure diversity and build the normalized distribution.
///
/// `top_genres` is stable on first-encountered order among equal counts.
/// Both ratios divide by the total number of tag occurrences, or by 1 when
/// there are none.
pub fn analyze_genres(artists: &[Artist], top_n: usize) -> GenreAnalysis {
    let counts = count_genres(artists);
    let occurrences: usize = counts.iter().map(|(_, c)| c).sum();
    let total = occurrences.max(1) as f64;

    let mut genre_distribution = OrderedMap::with_capacity(counts.len());
    for (genre, count) in &counts {
        genre_distribution.push(genre.clone(), *count as f64 / total);
    }

    let genre_diversity = counts.len() as f64 / total;

    let mut top_genres = counts;
    top_genres.sort_by(|a, b| b.1.cmp(&a.1));
    top_genres.truncate(top_n);

    log::debug!(
        "[GENRES] {} distinct genres over {} tag occurrences",
        genre_distribution.len(),
        occurrences
    );

    GenreAnalysis {
        top_genres,
        genre_diversity,
        genre_distribution,
    }
}
