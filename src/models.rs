//! Core data models for playlist statistics.
//!
//! Input records mirror the shape of the catalog API payloads handed over by
//! the fetch layer. Every field the API may omit or null out is an `Option`
//! or carries a serde default, so a missing field is an explicit branch and
//! never a silent zero in the middle of a computation.
//!
//! Output records form the `StatisticsResult` tree serialized for export.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Input Models
// ============================================================================

/// Everything the fetch layer collected for one playlist.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaylistExport {
    /// Share URL of the playlist, used only to name batch outputs.
    #[serde(default)]
    pub playlist_url: Option<String>,
    /// Playlist-level follower total, passed through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: u64,
    /// Raw playlist entries in playlist order, including removed and local ones.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<PlaylistItem>,
    /// One slot per valid track id sent to the feature endpoint; `None` = no features.
    #[serde(default, deserialize_with = "null_as_default")]
    pub audio_features: Vec<Option<AudioFeatures>>,
    /// Artists credited on the valid tracks, already deduplicated by id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<Artist>,
}

/// Playlist entry. `track` is null when the catalog entry was removed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

/// Catalog track. Local files arrive with most fields nulled out, so every
/// field reads `null` the same as a missing key.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: u32, // 0-100
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_ms: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album: Album,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explicit: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_local: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Album {
    /// "YYYY", "YYYY-MM" or "YYYY-MM-DD" depending on release date precision.
    /// Empty when the API sent none, which fails year parsing.
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
}

/// Artist credit on a track. Local files may carry credits without an id.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
}

/// Audio features for one track. Values are conventionally in [0, 1] but are
/// not validated here.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AudioFeatures {
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub acousticness: Option<f64>,
    #[serde(default)]
    pub instrumentalness: Option<f64>,
    #[serde(default)]
    pub liveness: Option<f64>,
    #[serde(default)]
    pub speechiness: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    /// Null for artists the catalog has no genre data for.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
}

/// Reads an explicit `null` as the type's default. Pair with
/// `#[serde(default)]` so a missing key behaves the same.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Feature Dimensions
// ============================================================================

/// The seven audio-feature dimensions, in canonical order.
///
/// The order matters: correlation keys are `a_b` with `a` before `b` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureDimension {
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Instrumentalness,
    Liveness,
    Speechiness,
}

impl FeatureDimension {
    pub const ALL: [FeatureDimension; 7] = [
        FeatureDimension::Danceability,
        FeatureDimension::Energy,
        FeatureDimension::Valence,
        FeatureDimension::Acousticness,
        FeatureDimension::Instrumentalness,
        FeatureDimension::Liveness,
        FeatureDimension::Speechiness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FeatureDimension::Danceability => "danceability",
            FeatureDimension::Energy => "energy",
            FeatureDimension::Valence => "valence",
            FeatureDimension::Acousticness => "acousticness",
            FeatureDimension::Instrumentalness => "instrumentalness",
            FeatureDimension::Liveness => "liveness",
            FeatureDimension::Speechiness => "speechiness",
        }
    }

    /// Defined value of this dimension, or `None` when missing or non-finite.
    pub fn value_of(self, features: &AudioFeatures) -> Option<f64> {
        let value = match self {
            FeatureDimension::Danceability => features.danceability,
            FeatureDimension::Energy => features.energy,
            FeatureDimension::Valence => features.valence,
            FeatureDimension::Acousticness => features.acousticness,
            FeatureDimension::Instrumentalness => features.instrumentalness,
            FeatureDimension::Liveness => features.liveness,
            FeatureDimension::Speechiness => features.speechiness,
        };
        value.filter(|v| v.is_finite())
    }
}

// ============================================================================
// Ordered Map
// ============================================================================

/// Label -> value map that keeps insertion order and serializes as a JSON
/// object in that order. Histogram bucket order and correlation pair order
/// are part of the output contract, so a hash map or `BTreeMap` won't do.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry. Callers guarantee labels are unique.
    pub fn push(&mut self, label: impl Into<String>, value: V) {
        self.entries.push((label.into(), value));
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Output Models
// ============================================================================

/// `(track name, popularity)`, serialized as a two-element array.
pub type RankedTrack = (String, u32);

/// `(genre tag, occurrence count)`, serialized as a two-element array.
pub type GenreCount = (String, usize);

/// Statistical summary of one playlist.
///
/// Built once per `calculate_statistics` call and never mutated afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct StatisticsResult {
    pub num_tracks: usize,
    pub average_popularity: f64,
    pub total_duration_minutes: f64,
    pub average_release_year: f64,
    pub unique_artists_count: usize,
    pub explicit_tracks_count: usize,
    pub popularity_distribution: OrderedMap<usize>,
    pub release_year_distribution: OrderedMap<usize>,
    pub most_popular_tracks: Vec<RankedTrack>,
    pub least_popular_tracks: Vec<RankedTrack>,
    pub followers: u64,
    #[serde(flatten)]
    pub feature_averages: FeatureAverages,
    pub advanced_statistics: AdvancedStatistics,
    pub genre_analysis: GenreAnalysis,
}

/// Flat per-dimension averages over all present feature vectors, where a
/// missing dimension counts as 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FeatureAverages {
    pub average_danceability: f64,
    pub average_energy: f64,
    pub average_valence: f64,
    pub average_acousticness: f64,
    pub average_instrumentalness: f64,
    pub average_liveness: f64,
    pub average_speechiness: f64,
}

impl FeatureAverages {
    pub fn get(&self, dimension: FeatureDimension) -> f64 {
        match dimension {
            FeatureDimension::Danceability => self.average_danceability,
            FeatureDimension::Energy => self.average_energy,
            FeatureDimension::Valence => self.average_valence,
            FeatureDimension::Acousticness => self.average_acousticness,
            FeatureDimension::Instrumentalness => self.average_instrumentalness,
            FeatureDimension::Liveness => self.average_liveness,
            FeatureDimension::Speechiness => self.average_speechiness,
        }
    }
}

/// Moment statistics of one feature dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FeatureStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdvancedStatistics {
    pub danceability: FeatureStats,
    pub energy: FeatureStats,
    pub valence: FeatureStats,
    pub acousticness: FeatureStats,
    pub instrumentalness: FeatureStats,
    pub liveness: FeatureStats,
    pub speechiness: FeatureStats,
    /// Pearson correlation per unordered dimension pair, keyed `a_b`.
    pub correlations: OrderedMap<f64>,
}

impl AdvancedStatistics {
    pub fn get(&self, dimension: FeatureDimension) -> &FeatureStats {
        match dimension {
            FeatureDimension::Danceability => &self.danceability,
            FeatureDimension::Energy => &self.energy,
            FeatureDimension::Valence => &self.valence,
            FeatureDimension::Acousticness => &self.acousticness,
            FeatureDimension::Instrumentalness => &self.instrumentalness,
            FeatureDimension::Liveness => &self.liveness,
            FeatureDimension::Speechiness => &self.speechiness,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GenreAnalysis {
    pub top_genres: Vec<GenreCount>,
    pub genre_diversity: f64,
    pub genre_distribution: OrderedMap<f64>,
}
