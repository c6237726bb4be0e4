//! # hdrview-core
//!
//! Core types for the HDR display pipeline.
//!
//! This crate holds the decoded-frame data model and the description of a
//! rendering target, shared by the CPU reference pipeline and the wgpu
//! renderer:
//!
//! - [`PlaneBuffer`] - one Y/U/V (or interleaved UV) sample grid with stride
//! - [`Frame`] - a decoded frame in planar or semi-planar layout
//! - [`TargetSpec`] - requested output bit depth, component type and color space
//! - [`Error`] - invariant violations of the above
//!
//! # Usage
//!
//! ```rust
//! use hdrview_core::{ColorSpaceTag, Frame, PlaneBuffer, TargetSpec};
//!
//! let y = PlaneBuffer::from_u8(4, 4, &[128; 16]).unwrap();
//! let u = PlaneBuffer::from_u8(2, 2, &[128; 4]).unwrap();
//! let v = PlaneBuffer::from_u8(2, 2, &[128; 4]).unwrap();
//! let frame = Frame::planar(y, u, v).unwrap();
//!
//! let target = TargetSpec::for_tag(ColorSpaceTag::Bt2020Pq);
//! assert_eq!(target.channel_bits, 10);
//! assert_eq!(frame.width(), 4);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error derive
//! - [`half`] - f16 plane construction
//!
//! # Used By
//!
//! - `hdrview-color` - CPU reference pipeline
//! - `hdrview-render` - wgpu presenter

#![warn(missing_docs)]

mod error;
mod frame;
mod plane;
mod target;

pub use error::{Error, Result};
pub use frame::{Frame, SourceKind};
pub use plane::{BitDepth, PlaneBuffer};
pub use target::{ColorSpaceTag, ComponentType, TargetSpec};
