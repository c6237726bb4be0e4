//! Error types for frame and target validation.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Invariant violations in the frame data model.
#[derive(Debug, Error)]
pub enum Error {
    /// Row stride is smaller than one row of samples.
    #[error("row stride {row_stride} too small for {width} samples of {bytes_per_sample} bytes")]
    StrideTooSmall {
        /// Offending stride in bytes.
        row_stride: usize,
        /// Plane width in samples.
        width: u32,
        /// Bytes per sample for the plane's bit depth.
        bytes_per_sample: usize,
    },

    /// Backing buffer does not cover `row_stride * height` bytes.
    #[error("buffer of {actual} bytes shorter than required {required}")]
    BufferTooShort {
        /// Bytes required by the plane geometry.
        required: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// Plane dimensions are inconsistent with the frame layout.
    #[error("{plane} plane is {got_w}x{got_h}, expected {want_w}x{want_h}")]
    PlaneMismatch {
        /// Plane name ("U", "V", "UV").
        plane: &'static str,
        /// Actual width.
        got_w: u32,
        /// Actual height.
        got_h: u32,
        /// Expected width.
        want_w: u32,
        /// Expected height.
        want_h: u32,
    },

    /// Plane bit depths do not form a supported frame layout.
    #[error("unsupported plane depth combination: {0}")]
    UnsupportedLayout(&'static str),

    /// Floating-point targets must be 16-bit and vice versa.
    #[error("component type {component:?} invalid for {channel_bits}-bit channels")]
    InvalidTargetSpec {
        /// Requested channel bits.
        channel_bits: u8,
        /// Requested component type, as debug text.
        component: &'static str,
    },
}
