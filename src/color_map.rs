//! Map every pixel of an image to the replacement color of its nearest
//! palette entry.

use crate::{EmptyPalette, ImageBuf, ImageRef, Palette, PaletteEntry, color::distance_squared};
use palette::{Srgb, Srgba};

/// Find the index of the entry whose `original` color is nearest to `color`
/// according to euclidean distance.
///
/// Entries are scanned in palette order and only a strictly smaller distance
/// replaces the current best, so the first of several exactly tied entries
/// wins.
pub(crate) fn nearest_entry(entries: &[PaletteEntry], color: Srgb<u8>) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (index, entry) in entries.iter().enumerate() {
        let distance = distance_squared(color, entry.original());
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

/// Replace one pixel's color with its nearest entry's replacement color,
/// keeping the alpha channel.
#[inline]
fn remap_pixel(entries: &[PaletteEntry], pixel: Srgba<u8>) -> Srgba<u8> {
    let modified = entries[nearest_entry(entries, pixel.color)].modified();
    Srgba::new(modified.red, modified.green, modified.blue, pixel.alpha)
}

/// Recolor `image` by replacing every pixel's RGB with the `modified` color
/// of the palette entry whose `original` color is nearest, copying alpha
/// unchanged.
///
/// The output is a freshly allocated buffer of the same dimensions; `image`
/// is not modified. Runs in `O(width * height * palette len)` with a plain
/// linear scan per pixel.
///
/// Recoloring is idempotent: if every pixel already equals the `original`
/// color of some entry and no entry has been edited, the output equals the
/// input exactly.
///
/// # Errors
///
/// Returns [`EmptyPalette`] if `palette` has no entries.
pub fn recolor(image: ImageRef<'_>, palette: &Palette) -> Result<ImageBuf, EmptyPalette> {
    let entries = non_empty_entries(palette)?;
    let (width, height) = image.dimensions();
    let pixels = image
        .as_slice()
        .iter()
        .map(|&pixel| remap_pixel(entries, pixel))
        .collect();
    Ok(ImageBuf::new_unchecked(width, height, pixels))
}

/// Parallel variant of [`recolor`] that remaps pixels across rayon's thread
/// pool. Produces exactly the same output.
///
/// # Errors
///
/// Returns [`EmptyPalette`] if `palette` has no entries.
#[cfg(feature = "threads")]
pub fn recolor_par(image: ImageRef<'_>, palette: &Palette) -> Result<ImageBuf, EmptyPalette> {
    use rayon::prelude::*;

    let entries = non_empty_entries(palette)?;
    let (width, height) = image.dimensions();
    let pixels = image
        .as_slice()
        .par_iter()
        .map(|&pixel| remap_pixel(entries, pixel))
        .collect();
    Ok(ImageBuf::new_unchecked(width, height, pixels))
}

fn non_empty_entries(palette: &Palette) -> Result<&[PaletteEntry], EmptyPalette> {
    if palette.is_empty() {
        Err(EmptyPalette(()))
    } else {
        Ok(palette.entries())
    }
}
