//! Extract a small representative color palette from an image, remap its
//! entries, and recolor every pixel to its nearest palette color.
//!
//! The pipeline has four stages, each a pure function over immutable inputs:
//!
//! 1. [`sample`]: subsample the pixel buffer into a multiset of observed
//!    colors with occurrence counts.
//! 2. [`cluster`]: greedily merge perceptually similar samples into
//!    count-weighted groups.
//! 3. Palette construction: rank the groups by perceived brightness and keep
//!    at most [`PaletteSize`] entries, each an `(original, modified)` pair.
//! 4. [`color_map`]: replace every pixel with the `modified` color of its
//!    nearest palette entry.
//!
//! The [`Pipeline`] builder ties the stages together:
//!
//! ```
//! # use core::num::NonZeroU32;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use palettize::{ImageBuf, Pipeline, color::parse_hex};
//!
//! // A 2x2 image: two red pixels over two blue pixels.
//! let bytes = vec![
//!     255, 0, 0, 255, 255, 0, 0, 255, //
//!     0, 0, 255, 255, 0, 0, 255, 255, //
//! ];
//! let image = ImageBuf::from_raw(2, 2, bytes)?;
//!
//! let pipeline = Pipeline::new().sample_stride(NonZeroU32::MIN);
//! let mut palette = pipeline.build_palette(image.as_ref());
//! assert_eq!(palette.len(), 2);
//!
//! // Remap the brightest entry (red) to green and re-render.
//! palette.set_modified(0, parse_hex("#00FF00")?)?;
//! let recolored = pipeline.recolor(image.as_ref(), &palette)?;
//! assert_eq!(&recolored.into_raw()[..4], &[0, 255, 0, 255]);
//! # Ok(())
//! # }
//! ```
//!
//! Images enter the crate as RGBA pixel buffers ([`ImageBuf`], [`ImageRef`]),
//! either from raw bytes or, with the `image` cargo feature, from an
//! `image::RgbaImage`. Decoding, encoding, and any background-removal
//! preprocessing are the caller's concern.
//!
//! # Cargo features
//!
//! - `std` (default): implies nothing beyond `palette/std`; the crate itself
//!   is `no_std` compatible with `alloc`.
//! - `threads`: parallel recoloring via `rayon`, see `Pipeline::parallel`.
//! - `image`: conversions to and from `image::RgbaImage`.
//! - `native-bin`: the `palettize` command line binary.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic, clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

mod api;
mod types;

pub mod cluster;
pub mod color;
pub mod color_map;
pub mod deps;
pub mod sample;

pub use api::*;
pub use types::*;
