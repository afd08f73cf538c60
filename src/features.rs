//! Audio-feature statistics: per-dimension moments and pairwise correlations.
//!
//! Missing data is handled per dimension. An absent feature vector drops out
//! of every dimension; a present vector that lacks one value drops out of
//! that dimension only. Correlations use pairwise-complete observations,
//! filtered independently for each pair.

use crate::models::{
    AdvancedStatistics, AudioFeatures, FeatureAverages, FeatureDimension, FeatureStats,
    OrderedMap,
};

// ============================================================================
// Per-dimension Values
// ============================================================================

/// Defined values of one dimension across all present feature vectors.
pub fn dimension_values(
    features: &[Option<AudioFeatures>],
    dimension: FeatureDimension,
) -> Vec<f64> {
    features
        .iter()
        .flatten()
        .filter_map(|f| dimension.value_of(f))
        .collect()
}

/// Observations where both dimensions are defined, as parallel vectors.
pub fn paired_values(
    features: &[Option<AudioFeatures>],
    a: FeatureDimension,
    b: FeatureDimension,
) -> (Vec<f64>, Vec<f64>) {
    features
        .iter()
        .flatten()
        .filter_map(|f| Some((a.value_of(f)?, b.value_of(f)?)))
        .unzip()
}

// ============================================================================
// Moments
// ============================================================================

/// Mean, median, population std dev, skewness and excess kurtosis.
///
/// The median is the element at index `len / 2` of the sorted values (the
/// upper middle for even counts), not the average of the two middle values.
/// An empty input yields all zeros; a constant input has zero std dev,
/// skewness and kurtosis.
pub fn feature_stats(values: &[f64]) -> FeatureStats {
    if values.is_empty() {
        return FeatureStats::default();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = sorted[sorted.len() / 2];

    // Identical values must give exactly zero spread; summing them can leave
    // rounding noise in the deviations.
    if sorted[0] == sorted[sorted.len() - 1] {
        return FeatureStats {
            mean,
            median,
            ..Default::default()
        };
    }

    // Moments of deviations scaled into [-1, 1]. Raw fourth powers overflow
    // for large magnitudes, and skewness and kurtosis don't depend on scale.
    let scale = values
        .iter()
        .map(|&x| (x - mean).abs())
        .fold(0.0, f64::max);
    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for &x in values {
        let u = (x - mean) / scale;
        let u2 = u * u;
        m2 += u2;
        m3 += u2 * u;
        m4 += u2 * u2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    let std_dev = scale * m2.sqrt();
    if std_dev == 0.0 || !std_dev.is_finite() {
        return FeatureStats {
            mean,
            median,
            ..Default::default()
        };
    }

    FeatureStats {
        mean,
        median,
        std_dev,
        skewness: finite_or_zero(m3 / (m2 * m2.sqrt())),
        kurtosis: finite_or_zero(m4 / (m2 * m2) - 3.0),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ============================================================================
// Correlation
// ============================================================================

/// Pearson correlation of two equally long samples:
/// `(nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`.
///
/// Returns 0 for empty input, a constant sample, or a zero denominator.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let len = x.len().min(y.len());
    if len == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..len], &y[..len]);
    if is_constant(x) || is_constant(y) {
        return 0.0;
    }

    let n = len as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        sum_x += a;
        sum_y += b;
        sum_xy += a * b;
        sum_x2 += a * a;
        sum_y2 += b * b;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    // Also catches a slightly negative product from rounding (sqrt -> NaN)
    if denominator.is_nan() || denominator <= 0.0 || denominator.is_infinite() {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Correlation for each of the 21 unordered dimension pairs, keyed `a_b` in
/// canonical dimension order.
pub fn correlations(features: &[Option<AudioFeatures>]) -> OrderedMap<f64> {
    let dims = FeatureDimension::ALL;
    let mut result = OrderedMap::with_capacity(dims.len() * (dims.len() - 1) / 2);

    for (i, &a) in dims.iter().enumerate() {
        for &b in &dims[i + 1..] {
            let (x, y) = paired_values(features, a, b);
            result.push(format!("{}_{}", a.name(), b.name()), pearson(&x, &y));
        }
    }
    result
}

// ============================================================================
// Assembly
// ============================================================================

pub fn advanced_statistics(features: &[Option<AudioFeatures>]) -> AdvancedStatistics {
    let stats = |dimension| feature_stats(&dimension_values(features, dimension));

    AdvancedStatistics {
        danceability: stats(FeatureDimension::Danceability),
        energy: stats(FeatureDimension::Energy),
        valence: stats(FeatureDimension::Valence),
        acousticness: stats(FeatureDimension::Acousticness),
        instrumentalness: stats(FeatureDimension::Instrumentalness),
        liveness: stats(FeatureDimension::Liveness),
        speechiness: stats(FeatureDimension::Speechiness),
        correlations: correlations(features),
    }
}

/// Flat averages over present vectors; a missing value contributes 0 but the
/// vector still counts in the denominator.
pub fn feature_averages(features: &[Option<AudioFeatures>]) -> FeatureAverages {
    let present: Vec<&AudioFeatures> = features.iter().flatten().collect();
    if present.is_empty() {
        return FeatureAverages::default();
    }
    let n = present.len() as f64;
    let average = |dimension: FeatureDimension| {
        present
            .iter()
            .map(|f| dimension.value_of(f).unwrap_or(0.0))
            .sum::<f64>()
            / n
    };

    FeatureAverages {
        average_danceability: average(FeatureDimension::Danceability),
        average_energy: average(FeatureDimension::Energy),
        average_valence: average(FeatureDimension::Valence),
        average_acousticness: average(FeatureDimension::Acousticness),
        average_instrumentalness: average(FeatureDimension::Instrumentalness),
        average_liveness: average(FeatureDimension::Liveness),
        average_speechiness: average(FeatureDimension::Speechiness),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn dance_energy(values: &[(Option<f64>, Option<f64>)]) -> Vec<Option<AudioFeatures>> {
        values
            .iter()
            .map(|&(danceability, energy)| {
                Some(AudioFeatures {
                    danceability,
                    energy,
                    ..Default::default()
                })
            })
            .collect()
    }

    #[test]
    fn test_four_values() {
        let stats = feature_stats(&[0.2, 0.4, 0.6, 0.8]);
        assert_close(stats.mean, 0.5);
        // Upper-middle element, not (0.4 + 0.6) / 2
        assert_eq!(stats.median, 0.6);
        assert_close(stats.std_dev, 0.05f64.sqrt());
        assert_close(stats.skewness, 0.0);
        // Uniform 4-point grid: m4 = 0.0041, var^2 = 0.0025
        assert_close(stats.kurtosis, 0.0041 / 0.0025 - 3.0);
    }

    #[test]
    fn test_median_odd_count_unsorted_input() {
        let stats = feature_stats(&[0.9, 0.1, 0.5]);
        assert_eq!(stats.median, 0.5);
    }

    #[test]
    fn test_skewed_sample() {
        // Deviations from mean 1: -1, -1, -1, 3 -> m2 = 3, m3 = 6
        let stats = feature_stats(&[0.0, 0.0, 0.0, 4.0]);
        assert_close(stats.mean, 1.0);
        assert_close(stats.std_dev, 3.0f64.sqrt());
        assert_close(stats.skewness, 6.0 / 3.0f64.powf(1.5));
        assert!(stats.skewness > 0.0);
    }

    #[test]
    fn test_huge_magnitudes_stay_finite() {
        let stats = feature_stats(&[1e80, -1e80, 3e80]);
        assert!(stats.std_dev.is_finite());
        assert!((stats.std_dev / 1e80 - 2.0 * (2.0f64 / 3.0).sqrt()).abs() < 1e-9);
        // Deviations are 0, -2e80 and 2e80: symmetric, m4 / var^2 = 1.5
        assert_close(stats.skewness, 0.0);
        assert_close(stats.kurtosis, -1.5);
    }

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(feature_stats(&[]), FeatureStats::default());
    }

    #[test]
    fn test_constant_values_have_zero_moments() {
        let stats = feature_stats(&[0.3, 0.3, 0.3, 0.3, 0.3]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
        assert_eq!(stats.median, 0.3);

        let single = feature_stats(&[0.7]);
        assert_eq!(single.mean, 0.7);
        assert_eq!(single.std_dev, 0.0);
        assert_eq!(single.kurtosis, 0.0);
    }

    #[test]
    fn test_missing_values_are_skipped_per_dimension() {
        let mut features = dance_energy(&[
            (Some(0.2), Some(0.9)),
            (None, Some(0.5)),
            (Some(0.4), None),
        ]);
        features.push(None);

        assert_eq!(
            dimension_values(&features, FeatureDimension::Danceability),
            vec![0.2, 0.4]
        );
        assert_eq!(
            dimension_values(&features, FeatureDimension::Energy),
            vec![0.9, 0.5]
        );
        assert!(dimension_values(&features, FeatureDimension::Valence).is_empty());

        let (x, y) = paired_values(
            &features,
            FeatureDimension::Danceability,
            FeatureDimension::Energy,
        );
        assert_eq!(x, vec![0.2]);
        assert_eq!(y, vec![0.9]);
    }

    #[test]
    fn test_pearson_perfect_and_inverse() {
        let x = [0.1, 0.2, 0.3, 0.4];
        let y = [0.2, 0.4, 0.6, 0.8];
        let z = [0.8, 0.6, 0.4, 0.2];
        assert_close(pearson(&x, &y), 1.0);
        assert_close(pearson(&x, &z), -1.0);
        assert_close(pearson(&x, &x), 1.0);
    }

    #[test]
    fn test_pearson_is_symmetric() {
        let x = [0.12, 0.55, 0.31, 0.97, 0.44];
        let y = [0.80, 0.21, 0.66, 0.05, 0.49];
        assert_eq!(pearson(&x, &y), pearson(&y, &x));
    }

    #[test]
    fn test_pearson_degenerate_cases() {
        assert_eq!(pearson(&[], &[]), 0.0);
        assert_eq!(pearson(&[0.5], &[0.7]), 0.0);
        assert_eq!(pearson(&[0.3, 0.3, 0.3], &[0.1, 0.5, 0.9]), 0.0);
    }

    #[test]
    fn test_correlations_cover_all_pairs_in_order() {
        let features = dance_energy(&[
            (Some(0.1), Some(0.3)),
            (Some(0.2), Some(0.5)),
            (Some(0.3), Some(0.7)),
        ]);
        let corr = correlations(&features);

        assert_eq!(corr.len(), 21);
        let labels: Vec<&str> = corr.labels().collect();
        assert_eq!(labels[0], "danceability_energy");
        assert_eq!(labels[5], "danceability_speechiness");
        assert_eq!(labels[6], "energy_valence");
        assert_eq!(labels[20], "liveness_speechiness");

        assert_close(*corr.get("danceability_energy").unwrap(), 1.0);
        // No valence values anywhere -> no pairs -> 0
        assert_eq!(corr.get("danceability_valence"), Some(&0.0));
        assert!(corr.values().all(|v| v.is_finite()));
    }

    #[test]
    fn test_correlation_pairs_filtered_independently() {
        // Energy is missing on the third vector; the danceability/valence pair
        // must still see all three observations.
        let features = vec![
            Some(AudioFeatures {
                danceability: Some(0.1),
                energy: Some(0.9),
                valence: Some(0.2),
                ..Default::default()
            }),
            Some(AudioFeatures {
                danceability: Some(0.2),
                energy: Some(0.1),
                valence: Some(0.4),
                ..Default::default()
            }),
            Some(AudioFeatures {
                danceability: Some(0.9),
                energy: None,
                valence: Some(0.1),
                ..Default::default()
            }),
        ];
        let corr = correlations(&features);

        let expected_dv = pearson(&[0.1, 0.2, 0.9], &[0.2, 0.4, 0.1]);
        assert_close(*corr.get("danceability_valence").unwrap(), expected_dv);
        assert_close(*corr.get("danceability_energy").unwrap(), -1.0);
    }

    #[test]
    fn test_feature_averages_count_missing_as_zero() {
        let mut features = dance_energy(&[(Some(0.6), Some(0.4)), (None, Some(0.8))]);
        features.push(None);

        let averages = feature_averages(&features);
        assert_close(averages.average_danceability, 0.3);
        assert_close(averages.average_energy, 0.6);
        assert_eq!(averages.average_valence, 0.0);

        let advanced = advanced_statistics(&features);
        assert_close(advanced.danceability.mean, 0.6);
        assert_close(advanced.get(FeatureDimension::Energy).mean, 0.6);
    }

    #[test]
    fn test_no_features_at_all() {
        let advanced = advanced_statistics(&[None, None]);
        for dim in FeatureDimension::ALL {
            assert_eq!(*advanced.get(dim), FeatureStats::default());
        }
        assert!(advanced.correlations.values().all(|&v| v == 0.0));
        assert_eq!(feature_averages(&[]), FeatureAverages::default());
    }
}
