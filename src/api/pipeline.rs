use crate::{
    EmptyPalette, ImageBuf, ImageRef, Palette, PaletteSize,
    cluster::{ColorCluster, DEFAULT_THRESHOLD, cluster_colors},
    color::luma,
    color_map,
    sample::{DEFAULT_STRIDE, sample_colors},
};
use core::num::NonZeroU32;

/// A builder tying the pipeline stages together: sample, cluster, order, and
/// recolor.
///
/// # Examples
///
/// First, specify any options you want:
///
/// ```
/// # use core::num::NonZeroU32;
/// # fn main() -> Result<(), palettize::PaletteSizeFromIntError> {
/// use palettize::{PaletteSize, Pipeline};
///
/// let pipeline = Pipeline::new()
///     .sample_stride(NonZeroU32::new(10).unwrap())
///     .threshold(80.0)
///     .palette_size(4u16.try_into()?);
/// # Ok(())
/// # }
/// ```
///
/// Then build a palette from an image, optionally edit its entries, and
/// recolor:
///
/// ```
/// # use core::num::NonZeroU32;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use palettize::{ImageBuf, Pipeline};
///
/// let image = ImageBuf::from_raw(1, 2, vec![200, 0, 0, 255, 0, 0, 200, 255])?;
/// let pipeline = Pipeline::new().sample_stride(NonZeroU32::MIN);
///
/// let mut palette = pipeline.build_palette(image.as_ref());
/// palette.set_modified(0, palettize::color::parse_hex("#FFFFFF")?)?;
///
/// let recolored = pipeline.recolor(image.as_ref(), &palette)?;
/// assert_eq!(recolored.dimensions(), image.dimensions());
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    /// The pixel stride used when sampling colors.
    stride: NonZeroU32,
    /// The similarity threshold used when clustering, in euclidean RGB
    /// distance units.
    threshold: f32,
    /// The maximum number of palette entries.
    size: PaletteSize,
    #[cfg(feature = "threads")]
    /// Whether or not to recolor in parallel.
    parallel: bool,
}

impl Pipeline {
    /// Create a new [`Pipeline`] with default options: a sampling stride of
    /// 20, a clustering threshold of 100, and a palette size of 6.
    pub const fn new() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            threshold: DEFAULT_THRESHOLD,
            size: PaletteSize::DEFAULT,
            #[cfg(feature = "threads")]
            parallel: false,
        }
    }

    /// Sets the sampling stride: every `stride`-th pixel of the input image
    /// is observed when building a palette.
    ///
    /// The default stride is [`DEFAULT_STRIDE`], which is 20.
    #[inline]
    pub const fn sample_stride(mut self, stride: NonZeroU32) -> Self {
        self.stride = stride;
        self
    }

    /// Sets the clustering similarity threshold in euclidean RGB distance
    /// units.
    ///
    /// Larger values merge more aggressively and tend to produce fewer,
    /// broader palette entries.
    ///
    /// The default threshold is [`DEFAULT_THRESHOLD`], which is 100.
    #[inline]
    pub const fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the maximum number of palette entries.
    ///
    /// The default size is [`PaletteSize::DEFAULT`], which is 6.
    #[inline]
    pub const fn palette_size(mut self, size: PaletteSize) -> Self {
        self.size = size;
        self
    }

    #[cfg(feature = "threads")]
    /// Sets whether or not to recolor in parallel across multiple threads.
    ///
    /// Use a [`rayon::ThreadPool`] to specify the number of threads if
    /// necessary. Parallel recoloring produces exactly the same output as the
    /// serial path.
    ///
    /// The default value is `false`.
    #[inline]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build a [`Palette`] describing the representative colors of `image`.
    ///
    /// Samples the image, clusters the samples, orders the clusters by
    /// descending perceived brightness (ties keep the count-descending
    /// order), and keeps at most the configured number of entries. Every
    /// entry starts with `modified` equal to `original`.
    ///
    /// The returned palette always has at least one entry, since a valid
    /// image has at least one pixel. Building is deterministic: the same
    /// image and options always produce the same palette.
    pub fn build_palette(&self, image: ImageRef<'_>) -> Palette {
        let samples = sample_colors(image, self.stride);
        let mut clusters = cluster_colors(&samples, self.threshold);
        clusters.sort_by(|a, b| luma(b.color()).total_cmp(&luma(a.color())));
        clusters.truncate(self.size.as_usize());
        Palette::from_colors(clusters.iter().map(ColorCluster::color))
    }

    /// Recolor `image` using `palette`, replacing every pixel's RGB with the
    /// `modified` color of its nearest entry.
    ///
    /// See [`color_map::recolor`] for the exact semantics. With the `threads`
    /// cargo feature and [`parallel`](Self::parallel) enabled, pixels are
    /// remapped across rayon's thread pool instead.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyPalette`] if `palette` has no entries.
    pub fn recolor(&self, image: ImageRef<'_>, palette: &Palette) -> Result<ImageBuf, EmptyPalette> {
        #[cfg(feature = "threads")]
        if self.parallel {
            return color_map::recolor_par(image, palette);
        }

        color_map::recolor(image, palette)
    }
}

impl Default for Pipeline {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
