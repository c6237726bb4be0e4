//! sRGB transfer function (IEC 61966-2-1).
//!
//! Piecewise curve: a short linear segment near black, then a 1/2.4 power
//! law. Display P3 shares this exact curve shape, so the P3 target reuses
//! [`oetf`] unchanged.

/// sRGB OETF: linear light [0, 1] to encoded signal.
///
/// ```text
/// v <= 0.0031308  ->  12.92 * v
/// otherwise       ->  1.055 * v^(1/2.4) - 0.055
/// ```
#[inline]
pub fn oetf(v: f32) -> f32 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB EOTF: encoded signal [0, 1] back to linear light.
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_endpoints() {
        assert_eq!(oetf(0.0), 0.0);
        assert_abs_diff_eq!(oetf(1.0), 1.0, epsilon = 1e-6);
        assert_eq!(eotf(0.0), 0.0);
        assert_abs_diff_eq!(eotf(1.0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip_001_steps() {
        // OETF round-trips its inverse within 1e-4 over [0, 1].
        for i in 0..=100 {
            let v = i as f32 * 0.01;
            assert_abs_diff_eq!(eotf(oetf(v)), v, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_linear_segment_continuity() {
        assert_abs_diff_eq!(oetf(0.0031307), oetf(0.0031309), epsilon = 1e-4);
    }
}
