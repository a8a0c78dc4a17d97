//! Color helpers shared by the pipeline stages: perceived luminance, squared
//! RGB distance, and the `#RRGGBB` codec.

use crate::InvalidColorFormat;
use alloc::{format, string::String};
use core::ops::Range;
use palette::Srgb;

/// Compute the perceived luminance of `color` on a `0.0..=255.0` scale.
///
/// Uses the Rec. 601 weights `0.299 r + 0.587 g + 0.114 b`, matching the
/// weights used for palette brightness ordering.
#[must_use]
#[inline]
pub fn luma(color: Srgb<u8>) -> f32 {
    0.299 * f32::from(color.red) + 0.587 * f32::from(color.green) + 0.114 * f32::from(color.blue)
}

/// Compute the squared euclidean RGB distance between two colors.
///
/// The maximum possible value is `3 * 255^2`, so comparisons against a
/// distance threshold `t` can be done exactly as `distance_squared < t * t`.
#[must_use]
#[inline]
pub const fn distance_squared(a: Srgb<u8>, b: Srgb<u8>) -> u32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Format `color` as its canonical hex representation: `#` followed by six
/// uppercase hex digits.
///
/// # Examples
///
/// ```
/// # use palettize::color::format_hex;
/// # use palette::Srgb;
/// assert_eq!(format_hex(Srgb::new(161, 178, 195)), "#A1B2C3");
/// ```
#[must_use]
#[inline]
pub fn format_hex(color: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Parse a color of exactly the form `#RRGGBB` (hex digits of either case).
///
/// Any other shape is rejected: three digit shorthand, a missing `#`,
/// surrounding whitespace, or non-hex digits.
///
/// # Examples
///
/// ```
/// # use palettize::color::parse_hex;
/// # use palette::Srgb;
/// assert_eq!(parse_hex("#A1B2C3"), Ok(Srgb::new(161, 178, 195)));
/// assert!(parse_hex("A1B2C3").is_err());
/// ```
///
/// # Errors
///
/// Returns [`InvalidColorFormat`] if `hex` is not of the form `#RRGGBB`.
pub fn parse_hex(hex: &str) -> Result<Srgb<u8>, InvalidColorFormat> {
    let digits = hex.strip_prefix('#').ok_or(InvalidColorFormat(()))?;
    if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(InvalidColorFormat(()));
    }
    // All digits are ASCII hex at this point, so slicing and parsing cannot fail.
    let channel =
        |range: Range<usize>| u8::from_str_radix(&digits[range], 16).unwrap_or_default();
    Ok(Srgb::new(channel(0..2), channel(2..4), channel(4..6)))
}
