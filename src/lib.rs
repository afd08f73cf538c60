//! Playlist statistics library.
//!
//! Turns already-fetched playlist records (tracks, audio features, artists)
//! into a `StatisticsResult`: central tendencies, histograms, higher moments,
//! pairwise feature correlations and genre composition. No network, no
//! persistence: `statistics::calculate_statistics` is a pure function.

pub mod aggregate;
pub mod config;
pub mod distribution;
pub mod error;
pub mod features;
pub mod filter;
pub mod genres;
pub mod models;
pub mod playlist;
pub mod progress;
pub mod ranking;
pub mod safety;
pub mod statistics;

pub use config::StatsOptions;
pub use error::{Result, StatsError};
pub use models::{PlaylistExport, StatisticsResult};
pub use statistics::calculate_statistics;
