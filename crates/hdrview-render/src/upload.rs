//! Plane-to-texture transfer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use hdrview_core::PlaneBuffer;

use crate::{RenderContext, RenderError, Result};

/// How a plane is exposed to the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// 8-bit plane as `R8Unorm`, linear-filterable; the shader undoes the
    /// video-range offset.
    Unorm8,
    /// Decoder float plane as `R16Float`, sampled directly as [0, 1].
    Float16,
    /// P010 luma as `R16Uint`; raw words, normalized in the shader because
    /// the valid range is video-limited, not full-scale.
    Uint16,
    /// P010 interleaved chroma as `Rg16Uint`, two samples per texel.
    Uint16x2,
}

impl SampleKind {
    fn format(self) -> wgpu::TextureFormat {
        match self {
            SampleKind::Unorm8 => wgpu::TextureFormat::R8Unorm,
            SampleKind::Float16 => wgpu::TextureFormat::R16Float,
            SampleKind::Uint16 => wgpu::TextureFormat::R16Uint,
            SampleKind::Uint16x2 => wgpu::TextureFormat::Rg16Uint,
        }
    }

    /// True for the integer formats, which hardware cannot filter; the
    /// shader fetches them nearest-neighbor with `textureLoad`.
    pub fn is_integer(self) -> bool {
        matches!(self, SampleKind::Uint16 | SampleKind::Uint16x2)
    }

    /// Samples packed into one texel.
    fn samples_per_texel(self) -> u32 {
        if self == SampleKind::Uint16x2 { 2 } else { 1 }
    }
}

/// A plane living on the GPU for the duration of one draw.
///
/// Holds a shared alive-counter so tests can assert that no texture
/// outlives its draw, on any exit path.
pub struct PlaneTexture {
    pub(crate) view: wgpu::TextureView,
    pub(crate) kind: SampleKind,
    counter: Arc<AtomicUsize>,
}

impl Drop for PlaneTexture {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Transfers one plane into a GPU texture.
///
/// The upload's `bytes_per_row` is the plane's row stride, which is what
/// skips decoder row padding; programming the tight width here instead
/// corrupts every row after the first.
pub fn upload(ctx: &RenderContext, plane: &PlaneBuffer, kind: SampleKind) -> Result<PlaneTexture> {
    let texel_width = plane.width() / kind.samples_per_texel();
    if texel_width == 0 || plane.height() == 0 {
        return Err(RenderError::Upload(format!(
            "degenerate plane {}x{}",
            plane.width(),
            plane.height()
        )));
    }

    let size = wgpu::Extent3d {
        width: texel_width,
        height: plane.height(),
        depth_or_array_layers: 1,
    };

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("plane_texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: kind.format(),
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    trace!(
        width = texel_width,
        height = plane.height(),
        stride = plane.row_stride(),
        ?kind,
        "uploading plane"
    );

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        plane.bytes(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(plane.row_stride() as u32),
            rows_per_image: Some(plane.height()),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    ctx.alive_textures.fetch_add(1, Ordering::SeqCst);

    Ok(PlaneTexture {
        view,
        kind,
        counter: Arc::clone(&ctx.alive_textures),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_formats() {
        assert_eq!(SampleKind::Unorm8.format(), wgpu::TextureFormat::R8Unorm);
        assert_eq!(SampleKind::Float16.format(), wgpu::TextureFormat::R16Float);
        assert_eq!(SampleKind::Uint16.format(), wgpu::TextureFormat::R16Uint);
        assert_eq!(SampleKind::Uint16x2.format(), wgpu::TextureFormat::Rg16Uint);
    }

    #[test]
    fn test_integer_kinds_unfiltered() {
        assert!(!SampleKind::Unorm8.is_integer());
        assert!(!SampleKind::Float16.is_integer());
        assert!(SampleKind::Uint16.is_integer());
        assert!(SampleKind::Uint16x2.is_integer());
    }

    #[test]
    fn test_samples_per_texel() {
        assert_eq!(SampleKind::Uint16x2.samples_per_texel(), 2);
        assert_eq!(SampleKind::Uint16.samples_per_texel(), 1);
    }
}
