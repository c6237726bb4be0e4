//! # hdrview-primaries
//!
//! Chromaticity definitions and RGB↔XYZ matrix generation for the three
//! gamuts the pipeline touches: BT.2020 (source), sRGB and Display P3
//! (destinations). All share the D65 white point, so no chromatic
//! adaptation is required anywhere in the chain.
//!
//! # Usage
//!
//! ```rust
//! use hdrview_math::Vec3;
//! use hdrview_primaries::{BT2020, SRGB, rgb_to_xyz_matrix, xyz_to_rgb_matrix};
//!
//! // BT.2020 white maps to sRGB white
//! let to_xyz = rgb_to_xyz_matrix(&BT2020);
//! let to_srgb = xyz_to_rgb_matrix(&SRGB);
//! let w = to_srgb * (to_xyz * Vec3::ONE);
//! assert!((w.x - 1.0).abs() < 1e-4);
//! ```
//!
//! # Used By
//!
//! - `hdrview-color` - gamut stage of the transform chain

#![warn(missing_docs)]

use hdrview_math::{Mat3, Vec3};

/// An RGB color space defined by primary and white-point chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y).
    pub r: (f32, f32),
    /// Green primary (x, y).
    pub g: (f32, f32),
    /// Blue primary (x, y).
    pub b: (f32, f32),
    /// White point (x, y).
    pub w: (f32, f32),
    /// Display name.
    pub name: &'static str,
}

/// D65 white point (~6500 K), shared by every gamut here.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// sRGB / Rec.709 primaries.
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Display P3 primaries: DCI-P3 gamut with a D65 white point.
pub const DISPLAY_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// BT.2020 wide-gamut primaries used by HDR video.
pub const BT2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "BT.2020",
};

/// BT.2020 luminance weights (R, G, B).
///
/// Used both by the non-constant-luminance YCbCr matrix and by the
/// tone-mapping operator's luminance estimate.
pub const BT2020_LUMA: Vec3 = Vec3::new(0.2627, 0.6780, 0.0593);

/// Converts an xy chromaticity to XYZ with Y = 1.
fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the linear-RGB to XYZ matrix for a set of primaries.
///
/// Standard derivation: place the primaries' XYZ coordinates as columns,
/// then scale each column so equal-energy white lands on the white point.
pub fn rgb_to_xyz_matrix(p: &Primaries) -> Mat3 {
    let r = xy_to_xyz(p.r.0, p.r.1);
    let g = xy_to_xyz(p.g.0, p.g.1);
    let b = xy_to_xyz(p.b.0, p.b.1);
    let w = xy_to_xyz(p.w.0, p.w.1);

    let m = Mat3::from_col_vecs(r, g, b);
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * w;

    let mut out = m;
    out.scale_col(0, s.x);
    out.scale_col(1, s.y);
    out.scale_col(2, s.z);
    out
}

/// Computes the XYZ to linear-RGB matrix for a set of primaries.
pub fn xyz_to_rgb_matrix(p: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(p)
        .inverse()
        .unwrap_or(Mat3::IDENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_white_maps_to_white() {
        for p in [&SRGB, &DISPLAY_P3, &BT2020] {
            let xyz = rgb_to_xyz_matrix(p) * Vec3::ONE;
            // Y of white must be 1 after normalization.
            assert_relative_eq!(xyz.y, 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_bt2020_luma_row() {
        // The Y row of the BT.2020 matrix is the luma weight vector.
        let m = rgb_to_xyz_matrix(&BT2020);
        assert_relative_eq!(m.m[1][0], BT2020_LUMA.x, epsilon = 2e-4);
        assert_relative_eq!(m.m[1][1], BT2020_LUMA.y, epsilon = 2e-4);
        assert_relative_eq!(m.m[1][2], BT2020_LUMA.z, epsilon = 2e-4);
    }

    #[test]
    fn test_forward_inverse_identity() {
        let fwd = rgb_to_xyz_matrix(&BT2020);
        let inv = xyz_to_rgb_matrix(&BT2020);
        let id = inv * fwd;
        for i in 0..3 {
            for j in 0..3 {
                let expect = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(id.m[i][j], expect, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_known_srgb_red_column() {
        let m = rgb_to_xyz_matrix(&SRGB);
        // Classic sRGB D65 values.
        assert_relative_eq!(m.m[0][0], 0.41239, epsilon = 1e-3);
        assert_relative_eq!(m.m[1][0], 0.21264, epsilon = 1e-3);
        assert_relative_eq!(m.m[2][0], 0.01933, epsilon = 1e-3);
    }
}
