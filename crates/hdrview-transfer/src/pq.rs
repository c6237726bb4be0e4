//! Perceptual Quantizer transfer function (SMPTE ST 2084).
//!
//! PQ encodes absolute luminance up to 10 000 cd/m² into [0, 1]. The PQ
//! output target scales scene-linear values by the source-peak to PQ-peak
//! ratio (1000/10000 here) before encoding; that scaling lives in the
//! pipeline, not in this module.

/// PQ peak luminance in cd/m².
pub const L_MAX: f32 = 10000.0;

/// ST 2084 constant m1.
pub const M1: f32 = 0.1593017578125;
/// ST 2084 constant m2.
pub const M2: f32 = 78.84375;
/// ST 2084 constant c1.
pub const C1: f32 = 0.8359375;
/// ST 2084 constant c2.
pub const C2: f32 = 18.8515625;
/// ST 2084 constant c3.
pub const C3: f32 = 18.6875;

/// PQ OETF over normalized luminance: `y` in [0, 1] where 1.0 = 10 000 nits.
#[inline]
pub fn oetf(y: f32) -> f32 {
    if y <= 0.0 {
        return 0.0;
    }
    let yp = y.clamp(0.0, 1.0).powf(M1);
    ((C1 + C2 * yp) / (1.0 + C3 * yp)).powf(M2)
}

/// Inverse of [`oetf`]: encoded signal back to normalized luminance.
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.0 {
        return 0.0;
    }
    let vp = v.powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;
    (num / den).powf(1.0 / M1)
}

/// PQ OETF over absolute luminance in cd/m².
#[inline]
pub fn oetf_nits(l: f32) -> f32 {
    oetf(l / L_MAX)
}
