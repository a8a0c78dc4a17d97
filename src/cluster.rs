//! Greedy grouping of sampled colors into count-weighted clusters.

use crate::{
    color::{distance_squared, luma},
    sample::SampledColor,
};
use alloc::vec::Vec;
use core::cmp::Reverse;
use palette::Srgb;

/// The default similarity threshold in euclidean RGB distance units.
pub const DEFAULT_THRESHOLD: f32 = 100.0;

/// Colors with a perceived luminance below this value count as near-black.
const DARK_LUMA: f32 = 20.0;

/// Colors with a perceived luminance above this value count as near-white.
const LIGHT_LUMA: f32 = 235.0;

/// A group of similar sampled colors, represented by their count-weighted
/// average color.
///
/// The average is kept as rounded 8-bit components and updated in place as
/// samples are merged in; the cluster owns its accumulated state exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCluster {
    /// The running count-weighted average color, rounded per channel.
    color: Srgb<u8>,
    /// The total count of all merged samples.
    count: u32,
}

impl ColorCluster {
    /// Create a cluster holding a single sample.
    #[inline]
    const fn new(sample: SampledColor) -> Self {
        Self { color: sample.color, count: sample.count }
    }

    /// Returns the count-weighted average color of the cluster.
    #[inline]
    pub const fn color(&self) -> Srgb<u8> {
        self.color
    }

    /// Returns the total occurrence count accumulated in the cluster.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Whether `color` belongs in this cluster under the given `threshold`.
    ///
    /// Near-black pairs and near-white pairs are compared by luminance gap
    /// against `threshold / 2`; every other pair is compared by euclidean RGB
    /// distance against `threshold`.
    fn is_similar(&self, color: Srgb<u8>, threshold: f32) -> bool {
        let cluster_luma = luma(self.color);
        let color_luma = luma(color);

        let both_dark = cluster_luma < DARK_LUMA && color_luma < DARK_LUMA;
        let both_light = cluster_luma > LIGHT_LUMA && color_luma > LIGHT_LUMA;
        if both_dark || both_light {
            (cluster_luma - color_luma).abs() < threshold / 2.0
        } else {
            #[allow(clippy::cast_precision_loss)] // at most 3 * 255^2, exact in f32
            let distance = distance_squared(self.color, color) as f32;
            distance < threshold * threshold
        }
    }

    /// Fold `sample` into the cluster, updating the count-weighted average.
    fn absorb(&mut self, sample: SampledColor) {
        let Srgb { red, green, blue, .. } = sample.color;
        self.color = Srgb::new(
            weighted_round(self.color.red, self.count, red, sample.count),
            weighted_round(self.color.green, self.count, green, sample.count),
            weighted_round(self.color.blue, self.count, blue, sample.count),
        );
        self.count += sample.count;
    }
}

/// Count-weighted average of two channel values, rounded half-up.
///
/// Computed in integer arithmetic so results match `round((a * an + b * bn) /
/// (an + bn))` exactly, with no float drift.
fn weighted_round(a: u8, a_count: u32, b: u8, b_count: u32) -> u8 {
    let numerator = u64::from(a) * u64::from(a_count) + u64::from(b) * u64::from(b_count);
    let denominator = u64::from(a_count) + u64::from(b_count);
    #[allow(clippy::cast_possible_truncation)] // a weighted average of u8 values fits in a u8
    {
        ((2 * numerator + denominator) / (2 * denominator)) as u8
    }
}

/// Group `samples` into clusters of similar colors, greedily and in a single
/// pass.
///
/// Each sample is merged into the **first** existing cluster it is similar to,
/// scanning clusters in insertion order; only when no cluster matches is a new
/// one appended. First match wins over best match, so the result depends on
/// the input order. Given the same sample sequence and threshold the result
/// is always identical.
///
/// The returned clusters are sorted by descending count; ties keep insertion
/// order.
#[must_use]
pub fn cluster_colors(samples: &[SampledColor], threshold: f32) -> Vec<ColorCluster> {
    let mut clusters: Vec<ColorCluster> = Vec::new();

    for &sample in samples {
        let similar = clusters
            .iter_mut()
            .find(|cluster| cluster.is_similar(sample.color, threshold));
        match similar {
            Some(cluster) => cluster.absorb(sample),
            None => clusters.push(ColorCluster::new(sample)),
        }
    }

    clusters.sort_by_key(|cluster| Reverse(cluster.count));
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn sample(color: Srgb<u8>, count: u32) -> SampledColor {
        SampledColor { color, count }
    }

    #[test]
    fn distant_colors_stay_in_separate_clusters() {
        // Red and blue are about 360 distance units apart.
        let samples = [sample(rgb(255, 0, 0), 2), sample(rgb(0, 0, 255), 2)];
        let clusters = cluster_colors(&samples, DEFAULT_THRESHOLD);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].color(), rgb(255, 0, 0));
        assert_eq!(clusters[1].color(), rgb(0, 0, 255));
    }

    #[test]
    fn the_first_similar_cluster_wins_over_the_nearest() {
        // (50, 50, 50) is within the threshold of both clusters and closer to
        // the second, but merges into the first.
        let samples = [
            sample(rgb(0, 0, 0), 1),
            sample(rgb(90, 90, 90), 1),
            sample(rgb(50, 50, 50), 1),
        ];
        let clusters = cluster_colors(&samples, DEFAULT_THRESHOLD);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], ColorCluster { color: rgb(25, 25, 25), count: 2 });
        assert_eq!(clusters[1], ColorCluster { color: rgb(90, 90, 90), count: 1 });
    }

    #[test]
    fn merging_uses_a_count_weighted_average_rounded_half_up() {
        // (10 * 1 + 11 * 1) / 2 = 10.5, which rounds up to 11.
        let samples = [sample(rgb(10, 10, 10), 1), sample(rgb(11, 11, 11), 1)];
        let clusters = cluster_colors(&samples, DEFAULT_THRESHOLD);
        assert_eq!(clusters, [ColorCluster { color: rgb(11, 11, 11), count: 2 }]);

        // (10 * 1 + 13 * 2) / 3 = 12 exactly.
        let samples = [sample(rgb(10, 10, 10), 1), sample(rgb(13, 13, 13), 2)];
        let clusters = cluster_colors(&samples, DEFAULT_THRESHOLD);
        assert_eq!(clusters, [ColorCluster { color: rgb(12, 12, 12), count: 3 }]);
    }

    #[test]
    fn near_black_pairs_compare_by_luminance_gap() {
        // Both colors are near-black with a luminance gap under threshold / 2,
        // but their euclidean distance of about 44.7 is over the threshold.
        let samples = [sample(rgb(20, 0, 0), 1), sample(rgb(0, 0, 40), 1)];
        let clusters = cluster_colors(&samples, 20.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count(), 2);

        // The same hues scaled out of the near-black band fall back to
        // euclidean distance and stay apart.
        let samples = [sample(rgb(120, 0, 0), 1), sample(rgb(0, 0, 240), 1)];
        let clusters = cluster_colors(&samples, 20.0);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn clusters_are_sorted_by_count_descending() {
        let samples = [
            sample(rgb(200, 0, 0), 1),
            sample(rgb(0, 200, 0), 5),
            sample(rgb(0, 0, 200), 3),
        ];
        let clusters = cluster_colors(&samples, DEFAULT_THRESHOLD);

        let counts: Vec<u32> = clusters.iter().map(ColorCluster::count).collect();
        assert_eq!(counts, [5, 3, 1]);
    }

    #[test]
    fn clustering_is_deterministic() {
        let samples: Vec<SampledColor> = (0u32..64)
            .map(|i| {
                #[allow(clippy::cast_possible_truncation)]
                let i = (i * 4) as u8;
                sample(rgb(i, 255 - i, i / 2), u32::from(i % 7) + 1)
            })
            .collect();

        let first = cluster_colors(&samples, DEFAULT_THRESHOLD);
        let second = cluster_colors(&samples, DEFAULT_THRESHOLD);
        assert_eq!(first, second);
    }
}
