//! CPU reference implementation of the full transform chain.
//!
//! Per pixel: range-normalize, YCbCr to R'G'B', inverse HLG decode, gamut
//! transform, tone map, forward encode for the selected target. The WGSL
//! fragment program executes the identical stages; keep the two in sync.

use std::sync::LazyLock;

use half::f16;
use hdrview_core::{ColorSpaceTag, Frame, SourceKind};
use hdrview_math::{Mat3, Vec3};
use hdrview_primaries::{BT2020, DISPLAY_P3, SRGB, rgb_to_xyz_matrix, xyz_to_rgb_matrix};
use hdrview_transfer::{hlg, pq, srgb};
use rayon::prelude::*;

use crate::tonemap;
use crate::ycbcr;

static BT2020_TO_XYZ: LazyLock<Mat3> = LazyLock::new(|| rgb_to_xyz_matrix(&BT2020));
static XYZ_TO_SRGB: LazyLock<Mat3> = LazyLock::new(|| xyz_to_rgb_matrix(&SRGB));
static XYZ_TO_P3: LazyLock<Mat3> = LazyLock::new(|| xyz_to_rgb_matrix(&DISPLAY_P3));

/// Ratio mapping the SDR reference peak onto display 1.0.
const DISPLAY_SCALE: f32 = tonemap::SOURCE_PEAK_NITS / tonemap::REFERENCE_PEAK_NITS;

/// Transforms one pixel of normalized encoded YCbCr into the target space.
///
/// `y`, `u`, `v` are encoded values in [0, 1] (0.5 = neutral chroma); the
/// source is HLG-encoded BT.2020. Output is one RGB triple, transfer-encoded
/// for `target` (linear and unclamped for the scRGB target).
pub fn render_pixel(y: f32, u: f32, v: f32, target: ColorSpaceTag) -> [f32; 3] {
    let rgb_prime = ycbcr::ycbcr_to_rgb(y, u, v);

    match target {
        // The destination surface is itself HLG-encoded: pass the encoded
        // signal through untouched, clamped for the fixed-point surface.
        ColorSpaceTag::Bt2020Hlg => rgb_prime.clamp01().to_array(),

        // PQ can carry the full source range, so no tone mapping: decode,
        // rescale from the 1000-nit source peak to the 10000-nit PQ peak,
        // encode. Gamut stays BT.2020.
        ColorSpaceTag::Bt2020Pq => {
            let lin = rgb_prime.map(hlg::oetf_inv);
            let scaled = lin * (tonemap::SOURCE_PEAK_NITS / pq::L_MAX);
            scaled.map(pq::oetf).to_array()
        }

        // SDR-ish targets: decode, tone map in BT.2020 linear, regamut
        // through XYZ, rescale so the reference peak hits display 1.0.
        ColorSpaceTag::Srgb | ColorSpaceTag::DisplayP3 | ColorSpaceTag::ScrgbLinear => {
            let lin = rgb_prime.map(hlg::oetf_inv);
            let mapped = tonemap::apply(lin);
            let xyz = *BT2020_TO_XYZ * mapped;
            let to_rgb = match target {
                ColorSpaceTag::DisplayP3 => *XYZ_TO_P3,
                _ => *XYZ_TO_SRGB,
            };
            let display = (to_rgb * xyz) * DISPLAY_SCALE;
            match target {
                // Linear float surface: no OETF, no clamp.
                ColorSpaceTag::ScrgbLinear => display.to_array(),
                // P3 shares the sRGB curve shape.
                _ => display.clamp01().map(srgb::oetf).to_array(),
            }
        }
    }
}

/// Samples frame planes at pixel (x, y) as normalized encoded YCbCr.
///
/// Chroma is fetched nearest-neighbor at half resolution, matching the
/// integer-texture fetch on the GPU side.
fn sample_ycbcr(frame: &Frame, x: u32, y: u32) -> (f32, f32, f32) {
    let (cx, cy) = (x / 2, y / 2);
    match frame {
        Frame::Planar { y: yp, u, v } => match frame.source_kind() {
            SourceKind::Narrow8 => (
                ycbcr::normalize_luma_u8(yp.row_u8(y)[x as usize]),
                ycbcr::normalize_chroma_u8(u.row_u8(cy)[cx as usize]),
                ycbcr::normalize_chroma_u8(v.row_u8(cy)[cx as usize]),
            ),
            _ => (
                f16::from_bits(yp.row_u16(y)[x as usize]).to_f32(),
                f16::from_bits(u.row_u16(cy)[cx as usize]).to_f32(),
                f16::from_bits(v.row_u16(cy)[cx as usize]).to_f32(),
            ),
        },
        Frame::SemiPlanar { y: yp, uv } => {
            let row = uv.row_u16(cy);
            (
                ycbcr::normalize_luma_u16(yp.row_u16(y)[x as usize]),
                ycbcr::normalize_chroma_u16(row[(cx * 2) as usize]),
                ycbcr::normalize_chroma_u16(row[(cx * 2 + 1) as usize]),
            )
        }
    }
}

/// Renders a whole frame on the CPU.
///
/// Returns interleaved RGB f32 triples, row-major, `width * height * 3`
/// values. Rows are processed in parallel.
pub fn render_frame(frame: &Frame, target: ColorSpaceTag) -> Vec<f32> {
    let (w, h) = (frame.width(), frame.height());
    let mut out = vec![0.0f32; (w * h * 3) as usize];

    out.par_chunks_mut((w * 3) as usize)
        .enumerate()
        .for_each(|(row, chunk)| {
            for x in 0..w {
                let (y, u, v) = sample_ycbcr(frame, x, row as u32);
                let rgb = render_pixel(y, u, v, target);
                let base = (x * 3) as usize;
                chunk[base..base + 3].copy_from_slice(&rgb);
            }
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hdrview_core::PlaneBuffer;

    /// Expected sRGB output for mid-gray HLG input (y=u=v=0.5), derived
    /// from the matrix chain: HLG 0.5 decodes to 1/12, 83.3 nits sits
    /// below the knee, display value 5/6, sRGB-encoded 0.9228246.
    const MID_GRAY_SRGB: f32 = 0.922_824_6;

    #[test]
    fn test_black_in_every_target() {
        for tag in ColorSpaceTag::ALL {
            let rgb = render_pixel(0.0, 0.5, 0.5, tag);
            for c in rgb {
                assert_eq!(c, 0.0, "target {} produced {c}", tag.name());
            }
        }
    }

    #[test]
    fn test_mid_gray_to_srgb_reference() {
        let rgb = render_pixel(0.5, 0.5, 0.5, ColorSpaceTag::Srgb);
        for c in rgb {
            assert_relative_eq!(c, MID_GRAY_SRGB, epsilon = 5e-4);
        }
    }

    #[test]
    fn test_hlg_target_is_passthrough() {
        let rgb = render_pixel(0.5, 0.5, 0.5, ColorSpaceTag::Bt2020Hlg);
        for c in rgb {
            assert_eq!(c, 0.5);
        }
    }

    #[test]
    fn test_scrgb_unclamped_and_linear() {
        // Full-scale HLG white decodes to 1.0 linear = 1000 nits; tone
        // mapped to under 200 nits, display value stays below 2.0 but
        // above 1.0, proving no clamp was applied.
        let rgb = render_pixel(1.0, 0.5, 0.5, ColorSpaceTag::ScrgbLinear);
        assert!(rgb[0] > 1.0 && rgb[0] < 2.0, "got {}", rgb[0]);
    }

    #[test]
    fn test_pq_white_below_full_code() {
        // 1000 nits is a tenth of PQ peak, so encoded white must land well
        // under 1.0 (~0.7518 per ST 2084).
        let rgb = render_pixel(1.0, 0.5, 0.5, ColorSpaceTag::Bt2020Pq);
        assert_relative_eq!(rgb[0], 0.7518, epsilon = 1e-3);
    }

    #[test]
    fn test_render_frame_p010_black() {
        // Video-range black in P010: luma 16·256, chroma 128·256.
        let y = PlaneBuffer::from_u16(4, 2, &[16 * 256; 8]).unwrap();
        let uv = PlaneBuffer::from_u16(4, 1, &[128 * 256; 4]).unwrap();
        let frame = Frame::semi_planar(y, uv).unwrap();

        for tag in ColorSpaceTag::ALL {
            let out = render_frame(&frame, tag);
            assert_eq!(out.len(), 4 * 2 * 3);
            for c in out {
                assert!(c.abs() < 1e-3, "target {}: {c}", tag.name());
            }
        }
    }

    #[test]
    fn test_render_frame_matches_render_pixel() {
        let y = PlaneBuffer::from_u8(2, 2, &[16, 126, 235, 80]).unwrap();
        let u = PlaneBuffer::from_u8(1, 1, &[128]).unwrap();
        let v = PlaneBuffer::from_u8(1, 1, &[128]).unwrap();
        let frame = Frame::planar(y, u, v).unwrap();

        let out = render_frame(&frame, ColorSpaceTag::Srgb);
        let expect = render_pixel(
            ycbcr::normalize_luma_u8(126),
            ycbcr::normalize_chroma_u8(128),
            ycbcr::normalize_chroma_u8(128),
            ColorSpaceTag::Srgb,
        );
        assert_eq!(&out[3..6], &expect);
    }
}
