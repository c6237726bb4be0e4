//! Hybrid Log-Gamma transfer function (ITU-R BT.2100).
//!
//! The source frames in this pipeline are HLG-encoded BT.2020; decoding
//! runs [`oetf_inv`] per component to reach scene-linear light, where 1.0
//! corresponds to the nominal 1000-nit peak. The HLG output target skips
//! decode entirely and passes the encoded signal through.

/// HLG constant `a`.
pub const A: f32 = 0.17883277;
/// HLG constant `b` (= 1 - 4a).
pub const B: f32 = 0.28466892;
/// HLG constant `c` (= 0.5 - a·ln(4a)).
pub const C: f32 = 0.55991073;

/// HLG OETF: scene-linear [0, 1] to encoded signal.
///
/// ```text
/// e <= 1/12  ->  sqrt(3e)
/// otherwise  ->  a * ln(12e - b) + c
/// ```
#[inline]
pub fn oetf(e: f32) -> f32 {
    if e <= 0.0 {
        0.0
    } else if e <= 1.0 / 12.0 {
        (3.0 * e).sqrt()
    } else {
        A * (12.0 * e - B).ln() + C
    }
}

/// Inverse HLG OETF: encoded signal to scene-linear [0, 1].
///
/// ```text
/// v <= 0.5   ->  v^2 / 3
/// otherwise  ->  (exp((v - c) / a) + b) / 12
/// ```
#[inline]
pub fn oetf_inv(v: f32) -> f32 {
    if v <= 0.0 {
        0.0
    } else if v <= 0.5 {
        v * v / 3.0
    } else {
        (((v - C) / A).exp() + B) / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_midpoint_inverse() {
        // forward(inverse(0.5)) ≈ 0.5 within 1e-4.
        assert_abs_diff_eq!(oetf(oetf_inv(0.5)), 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(oetf(0.0), 0.0);
        assert_abs_diff_eq!(oetf(1.0), 1.0, epsilon = 1e-5);
        assert_eq!(oetf_inv(0.0), 0.0);
        assert_abs_diff_eq!(oetf_inv(1.0), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_knee_continuity() {
        // Both branches meet at signal 0.5 / linear 1/12.
        assert_abs_diff_eq!(oetf_inv(0.4999), oetf_inv(0.5001), epsilon = 1e-3);
        assert_abs_diff_eq!(oetf_inv(0.5), 1.0 / 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip_sweep() {
        for i in 0..=100 {
            let e = i as f32 / 100.0;
            assert_abs_diff_eq!(oetf_inv(oetf(e)), e, epsilon = 1e-4);
        }
    }
}
