//! Playlist URL handling.

use once_cell::sync::Lazy;
use regex::Regex;

static PLAYLIST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"playlist/([a-zA-Z0-9]+)").unwrap());

/// Extract the playlist id from a share URL or URI path,
/// e.g. `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc`.
pub fn playlist_id_from_url(url: &str) -> Option<&str> {
    PLAYLIST_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
