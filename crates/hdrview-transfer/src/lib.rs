//! # hdrview-transfer
//!
//! The three transfer functions the display pipeline needs.
//!
//! | Module | Standard | Role here |
//! |--------|----------|-----------|
//! | [`srgb`] | IEC 61966-2-1 | Forward encode for sRGB and Display P3 targets |
//! | [`hlg`] | ITU-R BT.2100 | Source decode and HLG-target passthrough check |
//! | [`pq`] | SMPTE ST 2084 | Forward encode for the PQ target |
//!
//! All functions are scalar `f32 -> f32`; the CPU pipeline and the WGSL
//! shader mirror each other, and this crate is the reference the shader is
//! tested against.
//!
//! # Usage
//!
//! ```rust
//! use hdrview_transfer::{hlg, srgb};
//!
//! // HLG signal 0.5 decodes to scene-linear 1/12
//! let linear = hlg::oetf_inv(0.5);
//! assert!((linear - 1.0 / 12.0).abs() < 1e-6);
//!
//! let encoded = srgb::oetf(0.214);
//! assert!((encoded - 0.5).abs() < 0.01);
//! ```
//!
//! # Used By
//!
//! - `hdrview-color` - CPU reference pipeline
//! - `hdrview-render` - constants cross-checked against the WGSL source

#![warn(missing_docs)]

pub mod hlg;
pub mod pq;
pub mod srgb;

pub use hlg::{oetf as hlg_oetf, oetf_inv as hlg_oetf_inv};
pub use pq::oetf as pq_oetf;
pub use srgb::{eotf as srgb_eotf, oetf as srgb_oetf};
