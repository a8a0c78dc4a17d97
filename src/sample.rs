//! Subsample an image's pixels into a multiset of observed colors.

use crate::ImageRef;
use alloc::vec::Vec;
use core::num::NonZeroU32;
use hashbrown::hash_map::{Entry, HashMap};
use palette::Srgb;

/// The default sampling stride: every 20th pixel is observed.
pub const DEFAULT_STRIDE: NonZeroU32 = NonZeroU32::new(20).unwrap();

/// A color observed while sampling an image, along with how often it was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledColor {
    /// The observed color, alpha ignored.
    pub color: Srgb<u8>,
    /// The number of sampled pixels with this color. Always at least 1.
    pub count: u32,
}

/// Sample every `stride`-th pixel of `image` and count occurrences per
/// distinct color.
///
/// Pixels are visited at indices `0, stride, 2 * stride, ...` over the
/// flattened row-major pixel sequence, so `ceil(num_pixels / stride)` pixels
/// are visited in total and the first pixel is always one of them. The alpha
/// channel is ignored.
///
/// Each distinct color appears exactly once in the output, in the order it
/// was first seen. Clustering is order-dependent, so this order matters:
/// sampling the same image with the same stride always yields the same
/// sequence.
#[must_use]
pub fn sample_colors(image: ImageRef<'_>, stride: NonZeroU32) -> Vec<SampledColor> {
    let mut samples: Vec<SampledColor> = Vec::new();
    let mut indices: HashMap<[u8; 3], usize> = HashMap::new();

    for pixel in image.as_slice().iter().step_by(stride.get() as usize) {
        let color = pixel.color;
        match indices.entry([color.red, color.green, color.blue]) {
            Entry::Occupied(entry) => samples[*entry.get()].count += 1,
            Entry::Vacant(entry) => {
                entry.insert(samples.len());
                samples.push(SampledColor { color, count: 1 });
            }
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use alloc::vec;

    fn stride(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn counts_sum_to_the_number_of_visited_pixels() {
        // 10 pixels at stride 3 visits indices 0, 3, 6, and 9.
        let image = image(10, 1, vec![opaque(1, 2, 3); 10]);
        let samples = sample_colors(image.as_ref(), stride(3));

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0], SampledColor { color: rgb(1, 2, 3), count: 4 });
    }

    #[test]
    fn first_pixel_is_sampled_when_the_buffer_is_shorter_than_the_stride() {
        let image = image(2, 1, vec![opaque(9, 9, 9), opaque(1, 1, 1)]);
        let samples = sample_colors(image.as_ref(), stride(100));

        assert_eq!(samples, vec![SampledColor { color: rgb(9, 9, 9), count: 1 }]);
    }

    #[test]
    fn distinct_colors_are_reported_once_in_first_seen_order() {
        let pixels = vec![
            opaque(0, 0, 255),
            opaque(255, 0, 0),
            opaque(0, 0, 255),
            opaque(255, 0, 0),
            opaque(255, 0, 0),
        ];
        let image = image(5, 1, pixels);
        let samples = sample_colors(image.as_ref(), stride(1));

        assert_eq!(
            samples,
            vec![
                SampledColor { color: rgb(0, 0, 255), count: 2 },
                SampledColor { color: rgb(255, 0, 0), count: 3 },
            ]
        );
    }

    #[test]
    fn alpha_does_not_split_colors() {
        let pixels = vec![
            palette::Srgba::new(5u8, 5, 5, 0),
            palette::Srgba::new(5u8, 5, 5, 255),
        ];
        let image = image(2, 1, pixels);
        let samples = sample_colors(image.as_ref(), stride(1));

        assert_eq!(samples, vec![SampledColor { color: rgb(5, 5, 5), count: 2 }]);
    }
}
