//! Video-range normalization and YCbCr to R'G'B' conversion.
//!
//! Decoded samples are video-range limited: 8-bit luma occupies [16, 235],
//! chroma [16, 240]; the 10-bit-in-16-bit layout scales both by 256.
//! Normalization maps the limited range onto [0, 1] and deliberately does
//! not clamp values outside it (sync and blanking codes pass through and
//! get clamped once at the forward-encode stage).

use hdrview_math::Vec3;

/// 8-bit video-range black level.
pub const NARROW8_MIN: f32 = 16.0;
/// 8-bit video-range luma white level.
pub const NARROW8_LUMA_MAX: f32 = 235.0;
/// 8-bit video-range chroma max.
pub const NARROW8_CHROMA_MAX: f32 = 240.0;

/// 10-in-16-bit video-range black level (16·256).
pub const P010_MIN: f32 = 4096.0;
/// 10-in-16-bit luma white level (235·256).
pub const P010_LUMA_MAX: f32 = 60160.0;
/// 10-in-16-bit chroma max (240·256).
pub const P010_CHROMA_MAX: f32 = 61440.0;

/// Normalizes an 8-bit video-range luma sample to [0, 1], unclamped.
#[inline]
pub fn normalize_luma_u8(s: u8) -> f32 {
    (s as f32 - NARROW8_MIN) / (NARROW8_LUMA_MAX - NARROW8_MIN)
}

/// Normalizes an 8-bit video-range chroma sample to [0, 1], unclamped.
#[inline]
pub fn normalize_chroma_u8(s: u8) -> f32 {
    (s as f32 - NARROW8_MIN) / (NARROW8_CHROMA_MAX - NARROW8_MIN)
}

/// Normalizes a P010 luma word to [0, 1], unclamped.
#[inline]
pub fn normalize_luma_u16(s: u16) -> f32 {
    (s as f32 - P010_MIN) / (P010_LUMA_MAX - P010_MIN)
}

/// Normalizes a P010 chroma word to [0, 1], unclamped.
#[inline]
pub fn normalize_chroma_u16(s: u16) -> f32 {
    (s as f32 - P010_MIN) / (P010_CHROMA_MAX - P010_MIN)
}

/// BT.2020 non-constant-luminance YCbCr to R'G'B'.
///
/// Inputs are normalized encoded values: `y` in [0, 1], `u`/`v` in [0, 1]
/// with 0.5 as the neutral chroma point. The coefficients are the fixed
/// BT.2020 set; BT.601/709 values must not be substituted here.
///
/// ```text
/// R' = y + 1.4746  * cr
/// G' = y - 0.16455 * cb - 0.57135 * cr
/// B' = y + 1.8814  * cb
/// ```
#[inline]
pub fn ycbcr_to_rgb(y: f32, u: f32, v: f32) -> Vec3 {
    let cb = u - 0.5;
    let cr = v - 0.5;
    Vec3::new(
        y + 1.4746 * cr,
        y - 0.16455 * cb - 0.57135 * cr,
        y + 1.8814 * cb,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_range_endpoints() {
        // Video range endpoints: 16·256 -> 0, 235·256 -> 1.
        assert_eq!(normalize_luma_u16(16 * 256), 0.0);
        assert_eq!(normalize_luma_u16(235 * 256), 1.0);
        assert_eq!(normalize_luma_u8(16), 0.0);
        assert_eq!(normalize_luma_u8(235), 1.0);
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        // Blanking codes below black stay negative; clamping is deferred
        // to the encode stage.
        assert!(normalize_luma_u16(0) < 0.0);
        assert!(normalize_luma_u16(64000) > 1.0);
        assert!(normalize_chroma_u8(255) > 1.0);
    }

    #[test]
    fn test_chroma_endpoints() {
        assert_eq!(normalize_chroma_u16(16 * 256), 0.0);
        assert_eq!(normalize_chroma_u16(240 * 256), 1.0);
    }

    #[test]
    fn test_neutral_chroma_is_gray() {
        let rgb = ycbcr_to_rgb(0.5, 0.5, 0.5);
        assert_eq!(rgb, Vec3::splat(0.5));
    }

    #[test]
    fn test_cr_only_drives_red() {
        let rgb = ycbcr_to_rgb(0.0, 0.5, 1.0);
        assert!((rgb.x - 0.7373).abs() < 1e-4);
        assert!(rgb.y < 0.0);
        assert_eq!(rgb.z, 0.0);
    }
}
