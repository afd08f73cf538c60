//! Fixed-bucket histograms for popularity and release year.
//!
//! Buckets are right-inclusive: a value lands in the first bucket whose upper
//! bound it does not exceed. The first and last buckets are catch-alls, so
//! every value is counted exactly once. Labels keep the interval notation the
//! display layer expects.

use crate::models::{OrderedMap, Track};

pub const POPULARITY_BUCKETS: [&str; 5] = [
    "(-0.001, 20.0]",
    "(20.0, 40.0]",
    "(40.0, 60.0]",
    "(60.0, 80.0]",
    "(80.0, 100.0]",
];

pub const RELEASE_YEAR_BUCKETS: [&str; 6] = [
    "(1969.999, 1980.0]",
    "(1980.0, 1990.0]",
    "(1990.0, 2000.0]",
    "(2000.0, 2010.0]",
    "(2010.0, 2020.0]",
    "(2020.0, 2030.0]",
];

/// Index into `POPULARITY_BUCKETS`.
pub fn popularity_bucket(popularity: u32) -> usize {
    match popularity {
        0..=20 => 0,
        21..=40 => 1,
        41..=60 => 2,
        61..=80 => 3,
        _ => 4,
    }
}

/// Index into `RELEASE_YEAR_BUCKETS`.
pub fn release_year_bucket(year: i32) -> usize {
    match year {
        i32::MIN..=1980 => 0,
        1981..=1990 => 1,
        1991..=2000 => 2,
        2001..=2010 => 3,
        2011..=2020 => 4,
        _ => 5,
    }
}

pub fn popularity_distribution(tracks: &[&Track]) -> OrderedMap<usize> {
    histogram(
        &POPULARITY_BUCKETS,
        tracks.iter().map(|t| popularity_bucket(t.popularity)),
    )
}

/// Histogram of already-parsed years; tracks with a malformed date are absent
/// from `years` and therefore from every bucket.
pub fn release_year_distribution(years: &[i32]) -> OrderedMap<usize> {
    histogram(
        &RELEASE_YEAR_BUCKETS,
        years.iter().map(|&y| release_year_bucket(y)),
    )
}

/// Count bucket hits; every label is present, zero-filled, in bucket order.
fn histogram(labels: &[&str], hits: impl Iterator<Item = usize>) -> OrderedMap<usize> {
    let mut counts = vec![0usize; labels.len()];
    for bucket in hits {
        counts[bucket] += 1;
    }

    let mut distribution = OrderedMap::with_capacity(labels.len());
    for (label, count) in labels.iter().zip(counts) {
        distribution.push(*label, count);
    }
    distribution
}
