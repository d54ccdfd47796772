//! A library for restricting images to a fixed color palette.
//!
//! `palettefy` matches each pixel to the perceptually closest palette color by comparing colors
//! in the CIELAB color space, and can optionally apply Floyd–Steinberg dithering to better
//! preserve the gradients of the original image.
//! This is useful for retro-style rendering, low bit depth displays, and stylized image export.
//!
//! # Features
//! To reduce dependencies and compile times, `palettefy` has several `cargo` features
//! that can be turned off or on:
//! - `pipelines`: exposes a builder struct that serves as the high-level API.
//! - `threads`: exposes a parallel version of nearest color remapping via [`rayon`].
//! - `image`: enables integration with the [`image`] crate.
//!
//! # High-Level API
//! To get started with the high-level API, see [`ImagePipeline`].
//! Here is an example that dithers an image to the original Game Boy palette:
//! ```no_run
//! # use palettefy::{ImagePipeline, parse::parse_palette};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("some image")?.into_rgb8();
//! let palette = parse_palette("#0f380f, #306230, #8bac0f, #9bbc0f")?;
//!
//! let quantized = ImagePipeline::new(&img, &palette)
//!     .dither(true)
//!     .quantized_rgbimage_par();
//! # Ok(())
//! # }
//! ```
//!
//! # Low-Level API
//! [`quantize`] and [`quantize_into`] work with any [`PixelSource`] and [`PixelSink`],
//! while [`palettefy`] accepts an unchecked palette slice and a numeric dither mode code.
//! [`PaletteIndex`] and [`Lab`] expose the nearest color search and the color conversion.
//!
//! Note that some of the options and functions above require certain features to be enabled.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod dither;
mod lab;
mod palette_index;
mod pixels;
mod quantize;
mod types;

#[cfg(feature = "pipelines")]
mod api;

pub mod parse;

pub use dither::{DitherMode, FloydSteinberg};
pub use lab::{linearize, Lab};
pub use palette_index::PaletteIndex;
pub use pixels::*;
pub use quantize::*;
pub use types::*;

#[cfg(feature = "pipelines")]
pub use api::*;
