//! Error types for the statistics pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    /// Nothing left after dropping removed and local entries. Fatal: no
    /// partial result is produced.
    #[error("no valid tracks found in playlist")]
    EmptyPlaylist,

    /// One field of one record could not be parsed. Never escapes
    /// `calculate_statistics`; the value is skipped in the aggregate it feeds.
    #[error("malformed {field} {value:?} on track {track:?}")]
    MalformedRecord {
        track: String,
        field: &'static str,
        value: String,
    },
}
