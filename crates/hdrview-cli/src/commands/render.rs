//! Render command
//!
//! Builds a frame (raw file or synthetic ramp), renders it for each
//! selected target and writes the resulting surface to disk. Uses the
//! GPU presenter when an adapter exists, the CPU pipeline otherwise.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;

use hdrview_core::{ColorSpaceTag, Frame, PlaneBuffer, TargetSpec};
use hdrview_render::{RenderContext, SurfaceContext, present};

use crate::{RenderArgs, SourceArg};

/// Synthetic ramp dimensions.
const RAMP_WIDTH: u32 = 256;
const RAMP_HEIGHT: u32 = 128;

pub fn run(args: RenderArgs, verbose: bool) -> Result<()> {
    let frame = match &args.input {
        Some(path) => load_frame(path, &args)?,
        None => synthetic_ramp()?,
    };
    if verbose {
        println!(
            "Frame: {}x{} ({:?})",
            frame.width(),
            frame.height(),
            frame.source_kind()
        );
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let use_gpu = !args.cpu && RenderContext::is_available();
    if !use_gpu && !args.cpu {
        println!("No GPU adapter found, falling back to CPU pipeline");
    }

    let ctx = if use_gpu { Some(RenderContext::new()?) } else { None };

    for tag in args.target.tags() {
        let start = Instant::now();
        let bytes = match &ctx {
            Some(ctx) => render_gpu(ctx, &frame, tag)?,
            None => render_cpu(&frame, tag),
        };
        let path = args.output.join(format!("{}.raw", tag.name()));
        fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(target = tag.name(), ms = start.elapsed().as_millis() as u64, "rendered");
        if verbose {
            println!(
                "  {} -> {} ({} bytes, {:.1} ms)",
                tag.name(),
                path.display(),
                bytes.len(),
                start.elapsed().as_secs_f64() * 1e3
            );
        }
    }

    Ok(())
}

/// Draws on an offscreen surface sized to the frame and reads it back.
fn render_gpu(ctx: &RenderContext, frame: &Frame, tag: ColorSpaceTag) -> Result<Vec<u8>> {
    let spec = TargetSpec::for_tag(tag);
    let surface = SurfaceContext::configure(ctx, spec, frame.width(), frame.height())?;
    present(ctx, &surface, frame)?;
    Ok(surface.read_back(ctx)?)
}

/// Software pipeline; emits interleaved RGB f32, native byte order.
fn render_cpu(frame: &Frame, tag: ColorSpaceTag) -> Vec<u8> {
    let rgb = hdrview_color::render_frame(frame, tag);
    let mut bytes = Vec::with_capacity(rgb.len() * 4);
    for v in rgb {
        bytes.extend_from_slice(&v.to_ne_bytes());
    }
    bytes
}

/// Reads a raw frame file: planes concatenated, no row padding.
fn load_frame(path: &Path, args: &RenderArgs) -> Result<Frame> {
    let (Some(w), Some(h)) = (args.width, args.height) else {
        bail!("--width and --height are required with an input file");
    };
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let cw = w.div_ceil(2);
    let ch = h.div_ceil(2);

    let frame = match args.source {
        SourceArg::Narrow8 => {
            let y_len = (w * h) as usize;
            let c_len = (cw * ch) as usize;
            if data.len() < y_len + 2 * c_len {
                bail!("{} is too short for {}x{} 8-bit 4:2:0", path.display(), w, h);
            }
            let y = PlaneBuffer::from_u8(w, h, &data[..y_len])?;
            let u = PlaneBuffer::from_u8(cw, ch, &data[y_len..y_len + c_len])?;
            let v = PlaneBuffer::from_u8(cw, ch, &data[y_len + c_len..y_len + 2 * c_len])?;
            Frame::planar(y, u, v)?
        }
        SourceArg::F16 => {
            let y_len = (w * h) as usize;
            let c_len = (cw * ch) as usize;
            let words = as_le_words(&data, y_len + 2 * c_len, path)?;
            let to_f32 = |w: &[u16]| -> Vec<f32> {
                w.iter().map(|s| half::f16::from_bits(*s).to_f32()).collect()
            };
            let y = PlaneBuffer::from_f16(w, h, &to_f32(&words[..y_len]))?;
            let u = PlaneBuffer::from_f16(cw, ch, &to_f32(&words[y_len..y_len + c_len]))?;
            let v = PlaneBuffer::from_f16(cw, ch, &to_f32(&words[y_len + c_len..]))?;
            Frame::planar(y, u, v)?
        }
        SourceArg::P010 => {
            let y_len = (w * h) as usize;
            let uv_len = (cw * 2 * ch) as usize;
            let words = as_le_words(&data, y_len + uv_len, path)?;
            let y = PlaneBuffer::from_u16(w, h, &words[..y_len])?;
            let uv = PlaneBuffer::from_u16(cw * 2, ch, &words[y_len..])?;
            Frame::semi_planar(y, uv)?
        }
    };
    Ok(frame)
}

/// Reinterprets the file as little-endian 16-bit words.
fn as_le_words(data: &[u8], want: usize, path: &Path) -> Result<Vec<u16>> {
    if data.len() < want * 2 {
        bail!(
            "{} is too short: want {} bytes, got {}",
            path.display(),
            want * 2,
            data.len()
        );
    }
    Ok(data[..want * 2]
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect())
}

/// Half-float HLG frame: horizontal luma ramp, neutral chroma.
fn synthetic_ramp() -> Result<Frame> {
    let mut y = Vec::with_capacity((RAMP_WIDTH * RAMP_HEIGHT) as usize);
    for _ in 0..RAMP_HEIGHT {
        for x in 0..RAMP_WIDTH {
            y.push(x as f32 / (RAMP_WIDTH - 1) as f32);
        }
    }
    let cw = RAMP_WIDTH / 2;
    let ch = RAMP_HEIGHT / 2;
    let neutral = vec![0.5f32; (cw * ch) as usize];

    let y = PlaneBuffer::from_f16(RAMP_WIDTH, RAMP_HEIGHT, &y)?;
    let u = PlaneBuffer::from_f16(cw, ch, &neutral)?;
    let v = PlaneBuffer::from_f16(cw, ch, &neutral)?;
    Ok(Frame::planar(y, u, v)?)
}
