//! WGSL sources for the color transform program.
//!
//! The transform chain is one fragment shader, dispatched over the five
//! target spaces by an integer uniform; the CPU pipeline in
//! `hdrview-color` is the reference these sources must agree with.
//!
//! Two variants share the transform body and differ only in plane fetch:
//! planar frames sample three filterable textures, semi-planar P010
//! frames fetch two integer textures with `textureLoad` (integer formats
//! are not filterable).

/// Transform stages shared by both fragment variants.
///
/// Constants mirror `hdrview-transfer` and `hdrview-color`; matrices are
/// the fixed BT.2020/sRGB/Display-P3 D65 set, written as columns.
const TRANSFORM_COMMON: &str = r#"
struct Params {
    target_space: u32,
    source_kind: u32,
    _pad0: u32,
    _pad1: u32,
}

const HLG_A: f32 = 0.17883277;
const HLG_B: f32 = 0.28466892;
const HLG_C: f32 = 0.55991073;

const PQ_M1: f32 = 0.1593017578125;
const PQ_M2: f32 = 78.84375;
const PQ_C1: f32 = 0.8359375;
const PQ_C2: f32 = 18.8515625;
const PQ_C3: f32 = 18.6875;

const SOURCE_PEAK: f32 = 1000.0;
const REFERENCE_PEAK: f32 = 100.0;
const PQ_PEAK: f32 = 10000.0;
const DISPLAY_SCALE: f32 = SOURCE_PEAK / REFERENCE_PEAK;
const LUMA_EPS: f32 = 1e-5;

const LUMA_2020 = vec3<f32>(0.2627, 0.6780, 0.0593);

const BT2020_TO_XYZ = mat3x3<f32>(
    vec3<f32>(0.636958, 0.262700, 0.000000),
    vec3<f32>(0.144617, 0.677998, 0.028073),
    vec3<f32>(0.168881, 0.059302, 1.060985),
);

const XYZ_TO_SRGB = mat3x3<f32>(
    vec3<f32>(3.240970, -0.969244, 0.055630),
    vec3<f32>(-1.537383, 1.875968, -0.203977),
    vec3<f32>(-0.498611, 0.041555, 1.056972),
);

const XYZ_TO_P3 = mat3x3<f32>(
    vec3<f32>(2.493497, -0.829489, 0.035846),
    vec3<f32>(-0.931384, 1.762664, -0.076172),
    vec3<f32>(-0.402711, 0.023625, 0.956885),
);

fn hlg_oetf_inv(v: f32) -> f32 {
    if v <= 0.0 {
        return 0.0;
    }
    if v <= 0.5 {
        return v * v / 3.0;
    }
    return (exp((v - HLG_C) / HLG_A) + HLG_B) / 12.0;
}

fn srgb_oetf(v: f32) -> f32 {
    if v <= 0.0031308 {
        return 12.92 * v;
    }
    return 1.055 * pow(v, 1.0 / 2.4) - 0.055;
}

fn pq_oetf(y: f32) -> f32 {
    if y <= 0.0 {
        return 0.0;
    }
    let yp = pow(clamp(y, 0.0, 1.0), PQ_M1);
    return pow((PQ_C1 + PQ_C2 * yp) / (1.0 + PQ_C3 * yp), PQ_M2);
}

fn tone_scale(l: f32) -> f32 {
    if l <= REFERENCE_PEAK {
        return 1.0;
    }
    let over = l - REFERENCE_PEAK;
    let compressed = REFERENCE_PEAK + over / (1.0 + over / REFERENCE_PEAK);
    return compressed / max(l, LUMA_EPS);
}

// Full chain for one pixel of normalized encoded YCbCr.
fn transform(y: f32, u: f32, v: f32, target_space: u32) -> vec3<f32> {
    let cb = u - 0.5;
    let cr = v - 0.5;
    // BT.2020 non-constant-luminance coefficients, not 601/709.
    let rgb_prime = vec3<f32>(
        y + 1.4746 * cr,
        y - 0.16455 * cb - 0.57135 * cr,
        y + 1.8814 * cb,
    );

    // HLG surface: the destination decodes, so pass the signal through.
    if target_space == 3u {
        return clamp(rgb_prime, vec3<f32>(0.0), vec3<f32>(1.0));
    }

    let lin = vec3<f32>(
        hlg_oetf_inv(rgb_prime.x),
        hlg_oetf_inv(rgb_prime.y),
        hlg_oetf_inv(rgb_prime.z),
    );

    // PQ carries the full range: rescale to the PQ peak, no tone mapping.
    if target_space == 4u {
        let scaled = lin * (SOURCE_PEAK / PQ_PEAK);
        return vec3<f32>(pq_oetf(scaled.x), pq_oetf(scaled.y), pq_oetf(scaled.z));
    }

    let l = dot(lin, LUMA_2020) * SOURCE_PEAK;
    let mapped = lin * tone_scale(l);
    let xyz = BT2020_TO_XYZ * mapped;

    var rgb = XYZ_TO_SRGB * xyz;
    if target_space == 1u {
        rgb = XYZ_TO_P3 * xyz;
    }
    rgb = rgb * DISPLAY_SCALE;

    // Linear float surface: no OETF, no clamp.
    if target_space == 2u {
        return rgb;
    }

    rgb = clamp(rgb, vec3<f32>(0.0), vec3<f32>(1.0));
    return vec3<f32>(srgb_oetf(rgb.x), srgb_oetf(rgb.y), srgb_oetf(rgb.z));
}

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@location(0) pos: vec2<f32>, @location(1) uv: vec2<f32>) -> VsOut {
    var out: VsOut;
    out.pos = vec4<f32>(pos, 0.0, 1.0);
    out.uv = uv;
    return out;
}
"#;

/// Fragment bindings for planar frames (three filterable planes).
///
/// `source_kind` 1 marks 8-bit video-range planes needing the limited-range
/// offset undone; 0 means decoder floats used as-is.
const PLANAR_BODY: &str = r#"
@group(0) @binding(0) var y_tex: texture_2d<f32>;
@group(0) @binding(1) var u_tex: texture_2d<f32>;
@group(0) @binding(2) var v_tex: texture_2d<f32>;
@group(0) @binding(3) var plane_sampler: sampler;
@group(0) @binding(4) var<uniform> params: Params;

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    var y = textureSample(y_tex, plane_sampler, in.uv).r;
    var u = textureSample(u_tex, plane_sampler, in.uv).r;
    var v = textureSample(v_tex, plane_sampler, in.uv).r;
    if params.source_kind == 1u {
        // Undo 8-bit video range; out-of-range samples stay unclamped.
        y = (y * 255.0 - 16.0) / 219.0;
        u = (u * 255.0 - 16.0) / 224.0;
        v = (v * 255.0 - 16.0) / 224.0;
    }
    return vec4<f32>(transform(y, u, v, params.target_space), 1.0);
}
"#;

/// Fragment bindings for semi-planar P010 frames (two integer planes).
const SEMI_PLANAR_BODY: &str = r#"
@group(0) @binding(0) var y_tex: texture_2d<u32>;
@group(0) @binding(1) var uv_tex: texture_2d<u32>;
@group(0) @binding(2) var<uniform> params: Params;

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let dims = textureDimensions(y_tex);
    let fdims = vec2<f32>(f32(dims.x), f32(dims.y));
    let px = vec2<u32>(clamp(in.uv * fdims, vec2<f32>(0.0), fdims - 1.0));

    let s = f32(textureLoad(y_tex, px, 0).r);
    let c = textureLoad(uv_tex, px / 2u, 0).rg;

    // Video-limited 10-in-16 range: [16*256, 235*256] luma,
    // [16*256, 240*256] chroma. Out-of-range samples stay unclamped.
    let y = (s - 4096.0) / 56064.0;
    let u = (f32(c.x) - 4096.0) / 57344.0;
    let v = (f32(c.y) - 4096.0) / 57344.0;

    return vec4<f32>(transform(y, u, v, params.target_space), 1.0);
}
"#;

/// Complete WGSL source for planar frames.
pub fn planar_source() -> String {
    format!("{TRANSFORM_COMMON}{PLANAR_BODY}")
}

/// Complete WGSL source for semi-planar frames.
pub fn semi_planar_source() -> String {
    format!("{TRANSFORM_COMMON}{SEMI_PLANAR_BODY}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_contain_both_stages() {
        for src in [planar_source(), semi_planar_source()] {
            assert!(src.contains("fn vs_main"));
            assert!(src.contains("fn fs_main"));
            assert!(src.contains("fn transform"));
        }
    }

    #[test]
    fn test_constants_match_reference_crates() {
        let src = planar_source();
        // Keep shader constants locked to the CPU reference values.
        assert!(src.contains("0.17883277"));
        assert!(src.contains("0.1593017578125"));
        assert!(src.contains("0.2627, 0.6780, 0.0593"));
        assert!(src.contains("1.4746"));
    }
}
