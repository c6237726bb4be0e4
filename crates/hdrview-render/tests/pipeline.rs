//! GPU presenter vs software pipeline agreement.
//!
//! Renders the same frame through the shader and through
//! `hdrview_color::render_frame` and compares per-pixel. Chroma is kept
//! uniform so the sampler's linear chroma filter and the software
//! nearest-neighbor lookup read the same values.

use approx::assert_abs_diff_eq;
use half::f16;

use hdrview_core::{ColorSpaceTag, Frame, PlaneBuffer, TargetSpec};
use hdrview_render::{RenderContext, SurfaceContext, present};

const W: u32 = 8;
const H: u32 = 8;

/// 8-bit frame with a luma gradient and neutral chroma.
fn gradient_frame() -> Frame {
    let mut y = Vec::with_capacity((W * H) as usize);
    for row in 0..H {
        for col in 0..W {
            // Spans the video range including a touch of overshoot.
            y.push((16 + (row * W + col) * 4).min(240) as u8);
        }
    }
    let u = PlaneBuffer::from_u8(W / 2, H / 2, &[128; (W * H / 4) as usize]).unwrap();
    let v = PlaneBuffer::from_u8(W / 2, H / 2, &[128; (W * H / 4) as usize]).unwrap();
    Frame::planar(PlaneBuffer::from_u8(W, H, &y).unwrap(), u, v).unwrap()
}

/// Decodes one surface pixel back to linear RGB floats.
fn decode_pixel(spec: TargetSpec, bytes: &[u8]) -> [f32; 3] {
    match spec.channel_bits {
        8 => [
            bytes[0] as f32 / 255.0,
            bytes[1] as f32 / 255.0,
            bytes[2] as f32 / 255.0,
        ],
        10 => {
            let word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            [
                (word & 0x3ff) as f32 / 1023.0,
                ((word >> 10) & 0x3ff) as f32 / 1023.0,
                ((word >> 20) & 0x3ff) as f32 / 1023.0,
            ]
        }
        16 => [
            f16::from_le_bytes([bytes[0], bytes[1]]).to_f32(),
            f16::from_le_bytes([bytes[2], bytes[3]]).to_f32(),
            f16::from_le_bytes([bytes[4], bytes[5]]).to_f32(),
        ],
        _ => unreachable!(),
    }
}

/// Quantization plus shader rounding headroom per format.
fn tolerance(spec: TargetSpec) -> f32 {
    match spec.channel_bits {
        8 => 2.5 / 255.0,
        10 => 2.5 / 1023.0,
        _ => 2e-2,
    }
}

fn check_target(ctx: &RenderContext, frame: &Frame, tag: ColorSpaceTag) {
    let spec = TargetSpec::for_tag(tag);
    let surface = SurfaceContext::configure(ctx, spec, W, H).unwrap();
    present(ctx, &surface, frame).unwrap();
    let gpu = surface.read_back(ctx).unwrap();
    let cpu = hdrview_color::render_frame(frame, tag);

    let bpp = surface.bytes_per_pixel() as usize;
    for px in 0..(W * H) as usize {
        let got = decode_pixel(spec, &gpu[px * bpp..]);
        let want = &cpu[px * 3..px * 3 + 3];
        for c in 0..3 {
            assert_abs_diff_eq!(got[c], want[c], epsilon = tolerance(spec));
        }
    }
}

#[test]
fn test_gpu_matches_cpu_on_every_target() {
    if !RenderContext::is_available() {
        eprintln!("skipping: no GPU adapter");
        return;
    }
    let ctx = RenderContext::new().unwrap();
    let frame = gradient_frame();
    for tag in ColorSpaceTag::ALL {
        check_target(&ctx, &frame, tag);
    }
}

#[test]
fn test_p010_black_frame_renders_black() {
    if !RenderContext::is_available() {
        eprintln!("skipping: no GPU adapter");
        return;
    }
    let ctx = RenderContext::new().unwrap();

    let y = PlaneBuffer::from_u16(W, H, &[4096; (W * H) as usize]).unwrap();
    let uv = PlaneBuffer::from_u16(W, H / 2, &[32768; (W * H / 2) as usize]).unwrap();
    let frame = Frame::semi_planar(y, uv).unwrap();

    let spec = TargetSpec::for_tag(ColorSpaceTag::Srgb);
    let surface = SurfaceContext::configure(&ctx, spec, W, H).unwrap();
    present(&ctx, &surface, &frame).unwrap();
    let gpu = surface.read_back(&ctx).unwrap();

    for px in 0..(W * H) as usize {
        let got = decode_pixel(spec, &gpu[px * 4..]);
        for c in got {
            assert!(c <= 1.5 / 255.0, "expected black, got {c}");
        }
    }
}
