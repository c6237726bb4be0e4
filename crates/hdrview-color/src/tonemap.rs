//! Luminance-preserving tone compression.
//!
//! One fixed EETF-style operator, no runtime algorithm selection. Scene
//! luminance at or below the SDR reference peak passes through unchanged;
//! above it, luminance is compressed along a knee-continuous curve bounded
//! at twice the reference peak, and the resulting scalar is applied to all
//! three components so hue and chroma are preserved.
//!
//! The legacy implementations this replaces disagreed on the reference
//! peak (100 vs 240 nits) and on the luma weights; this operator settles
//! on 100 nits and the BT.2020 weights throughout.

use hdrview_math::Vec3;
use hdrview_primaries::BT2020_LUMA;

/// Scene-linear 1.0 corresponds to this luminance (HLG nominal peak).
pub const SOURCE_PEAK_NITS: f32 = 1000.0;

/// SDR reference peak: the knee of the compression curve.
pub const REFERENCE_PEAK_NITS: f32 = 100.0;

/// Floor protecting the scale ratio against zero luminance.
pub const LUMA_EPSILON: f32 = 1e-5;

/// Compression scale for a scene luminance in cd/m².
///
/// Identity at or below [`REFERENCE_PEAK_NITS`]; above it the compressed
/// luminance is
///
/// ```text
/// Lc = K + (L - K) / (1 + (L - K) / K)        K = reference peak
/// ```
///
/// which is continuous at the knee, monotonic, and bounded by `2K` as
/// `L -> inf`. The returned value is `Lc / L`.
#[inline]
pub fn scale(l_nits: f32) -> f32 {
    let k = REFERENCE_PEAK_NITS;
    if l_nits <= k {
        return 1.0;
    }
    let over = l_nits - k;
    let compressed = k + over / (1.0 + over / k);
    compressed / l_nits.max(LUMA_EPSILON)
}

/// Applies the operator to a scene-linear BT.2020 RGB value
/// (1.0 = [`SOURCE_PEAK_NITS`]).
#[inline]
pub fn apply(rgb: Vec3) -> Vec3 {
    let l = rgb.dot(BT2020_LUMA) * SOURCE_PEAK_NITS;
    rgb * scale(l)
}
