use core::{error::Error, fmt};

/// The error returned when an RGBA pixel buffer does not describe a valid image.
///
/// A buffer is valid when both dimensions are nonzero, the byte length is a
/// multiple of 4, `width * height` does not overflow a `u32`, and the byte
/// length equals `width * height * 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBuffer {
    /// The provided image width.
    pub(crate) width: u32,
    /// The provided image height.
    pub(crate) height: u32,
    /// The length of the buffer in bytes.
    pub(crate) length: usize,
}

impl fmt::Display for InvalidBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { width, height, length } = *self;
        if length % 4 != 0 {
            write!(
                f,
                "buffer length of {length} bytes is not a multiple of 4 bytes per RGBA pixel"
            )
        } else if width == 0 || height == 0 {
            write!(f, "image dimensions of ({width}, {height}) contain a zero")
        } else if width.checked_mul(height).is_none() {
            write!(
                f,
                "image dimensions of ({width}, {height}) are above the supported number of pixels"
            )
        } else {
            write!(
                f,
                "image dimensions of ({width}, {height}) do not match the buffer length of {length} bytes"
            )
        }
    }
}

impl Error for InvalidBuffer {}

/// The error returned when parsing a string that is not of the form `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidColorFormat(pub(crate) ());

impl fmt::Display for InvalidColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid color string, expected the form `#RRGGBB`")
    }
}

impl Error for InvalidColorFormat {}

/// The error returned when editing a [`Palette`](crate::Palette) entry at an
/// index that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    /// The requested entry index.
    pub(crate) index: usize,
    /// The number of entries in the palette.
    pub(crate) len: usize,
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { index, len } = *self;
        write!(f, "palette index {index} is out of range for a palette of {len} entries")
    }
}

impl Error for IndexOutOfRange {}

/// The error returned when recoloring with a [`Palette`](crate::Palette) that
/// has no entries.
///
/// A nearest-entry lookup over zero entries has no defined result, so
/// recoloring fails instead of producing garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPalette(pub(crate) ());

impl fmt::Display for EmptyPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cannot recolor with an empty palette")
    }
}

impl Error for EmptyPalette {}
