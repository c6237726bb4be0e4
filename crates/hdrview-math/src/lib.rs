//! # hdrview-math
//!
//! Math primitives for the HDR display pipeline.
//!
//! - [`Mat3`] - 3x3 matrices for gamut transforms (RGB↔XYZ)
//! - [`Vec3`] - 3-component vectors for RGB/XYZ triplets
//!
//! # Convention
//!
//! Matrices are stored **row-major** and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use hdrview_math::{Mat3, Vec3};
//!
//! let bt2020_to_xyz = Mat3::from_rows([
//!     [0.636958, 0.144617, 0.168881],
//!     [0.262700, 0.677998, 0.059302],
//!     [0.000000, 0.028073, 1.060985],
//! ]);
//!
//! let rgb = Vec3::new(1.0, 1.0, 1.0);
//! let xyz = bt2020_to_xyz * rgb;
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - SIMD math interop
//!
//! # Used By
//!
//! - `hdrview-primaries` - RGB/XYZ matrix generation
//! - `hdrview-color` - Full transform chain

#![warn(missing_docs)]

mod mat3;
mod vec3;

pub use mat3::*;
pub use vec3::*;
