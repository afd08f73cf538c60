//! Record filter: establishes the working track set.

use crate::error::{Result, StatsError};
use crate::models::{PlaylistItem, Track};

/// Keep entries with a present, non-local track, in playlist order.
///
/// Fails with `EmptyPlaylist` when nothing survives. Every downstream
/// division by the track count relies on this guard.
pub fn valid_tracks(items: &[PlaylistItem]) -> Result<Vec<&Track>> {
    let tracks: Vec<&Track> = items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .filter(|track| !track.is_local)
        .collect();

    log::debug!(
        "[FILTER] {} of {} playlist entries are valid tracks",
        tracks.len(),
        items.len()
    );

    if tracks.is_empty() {
        return Err(StatsError::EmptyPlaylist);
    }
    Ok(tracks)
}
