//! # hdrview-color
//!
//! The algorithmic core of the display pipeline: everything between decoded
//! YCbCr samples and transfer-encoded output pixels, implemented on the
//! CPU. The WGSL program in `hdrview-render` mirrors this chain stage for
//! stage; this crate is the oracle the shader output is compared against,
//! and the software fallback when no GPU adapter exists.
//!
//! Stages, in order:
//!
//! 1. [`ycbcr`] - video-range normalization and the BT.2020
//!    non-constant-luminance matrix
//! 2. `hdrview-transfer` - inverse HLG decode to scene-linear light
//! 3. [`tonemap`] - luminance compression toward the SDR reference peak
//! 4. [`pipeline`] - gamut transform and per-target forward encode
//!
//! # Usage
//!
//! ```rust
//! use hdrview_color::pipeline::render_pixel;
//! use hdrview_core::ColorSpaceTag;
//!
//! // Black stays black in every target space.
//! let rgb = render_pixel(0.0, 0.5, 0.5, ColorSpaceTag::Srgb);
//! assert_eq!(rgb, [0.0, 0.0, 0.0]);
//! ```

#![warn(missing_docs)]

pub mod pipeline;
pub mod tonemap;
pub mod ycbcr;

pub use pipeline::{render_frame, render_pixel};
