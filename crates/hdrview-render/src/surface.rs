//! Output surface configuration.

use tracing::debug;

use hdrview_core::{ComponentType, TargetSpec};

use crate::{RenderContext, RenderError, Result};

/// Render target bound to one [`TargetSpec`].
///
/// Recreated from scratch whenever the target changes — formats and color
/// spaces are never reused across specs, and at most one instance is live
/// per worker. The colorspace tag travels as surface metadata; it plays no
/// part in format selection.
pub struct SurfaceContext {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    spec: TargetSpec,
    width: u32,
    height: u32,
}

/// Maps a target spec onto the device pixel format.
///
/// Mirrors the config-request arithmetic of the EGL original: RGB channel
/// size equals `channel_bits`, alpha fills the 64-bit-aligned remainder
/// (`(64 - 3 * bits) mod 32`), component type fixed or float. First match
/// wins; there is no ranking step.
fn matching_format(spec: &TargetSpec) -> Result<wgpu::TextureFormat> {
    let fail = || RenderError::Configuration {
        channel_bits: spec.channel_bits,
        component: match spec.component {
            ComponentType::Fixed => "fixed",
            ComponentType::Float => "float",
        },
    };
    match (spec.channel_bits, spec.component) {
        (8, ComponentType::Fixed) => Ok(wgpu::TextureFormat::Rgba8Unorm),
        (10, ComponentType::Fixed) => Ok(wgpu::TextureFormat::Rgb10a2Unorm),
        (16, ComponentType::Float) => Ok(wgpu::TextureFormat::Rgba16Float),
        _ => Err(fail()),
    }
}

impl SurfaceContext {
    /// Builds the render target for `spec`.
    ///
    /// The caller replaces any previous context by assignment, which drops
    /// the old target before the first draw on the new one.
    pub fn configure(ctx: &RenderContext, spec: TargetSpec, width: u32, height: u32) -> Result<Self> {
        let format = matching_format(&spec)?;
        debug!(
            target = spec.colorspace.name(),
            ?format,
            width,
            height,
            "configuring output surface"
        );

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("output_surface"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            format,
            spec,
            width,
            height,
        })
    }

    /// The spec this surface was configured for.
    pub fn spec(&self) -> TargetSpec {
        self.spec
    }

    /// The selected device format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Storage bytes per output pixel for the selected format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            wgpu::TextureFormat::Rgba16Float => 8,
            _ => 4,
        }
    }

    /// Downloads the rendered target as tightly-packed rows.
    ///
    /// Staging copies must use 256-byte-aligned rows; the padding is
    /// stripped before returning.
    pub fn read_back(&self, ctx: &RenderContext) -> Result<Vec<u8>> {
        const ALIGN: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let unpadded = self.width * self.bytes_per_pixel();
        let padded = unpadded.div_ceil(ALIGN) * ALIGN;
        let size = (padded * self.height) as u64;

        let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_staging"),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("readback_encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        ctx.submit_and_wait(encoder);

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        ctx.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|_| RenderError::ReadBack("map channel closed".into()))?
            .map_err(|e| RenderError::ReadBack(e.to_string()))?;

        let mapped = slice.get_mapped_range();
        let mut out = Vec::with_capacity((unpadded * self.height) as usize);
        for row in 0..self.height {
            let start = (row * padded) as usize;
            out.extend_from_slice(&mapped[start..start + unpadded as usize]);
        }
        drop(mapped);
        staging.unmap();

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrview_core::ColorSpaceTag;

    #[test]
    fn test_format_matching() {
        let cases = [
            (ColorSpaceTag::Srgb, wgpu::TextureFormat::Rgba8Unorm),
            (ColorSpaceTag::DisplayP3, wgpu::TextureFormat::Rgba8Unorm),
            (ColorSpaceTag::Bt2020Hlg, wgpu::TextureFormat::Rgb10a2Unorm),
            (ColorSpaceTag::Bt2020Pq, wgpu::TextureFormat::Rgb10a2Unorm),
            (ColorSpaceTag::ScrgbLinear, wgpu::TextureFormat::Rgba16Float),
        ];
        for (tag, want) in cases {
            let got = matching_format(&TargetSpec::for_tag(tag)).unwrap();
            assert_eq!(got, want, "{}", tag.name());
        }
    }

    #[test]
    fn test_unsupported_bit_depth_fails() {
        let spec = TargetSpec {
            channel_bits: 12,
            colorspace: ColorSpaceTag::Srgb,
            component: ComponentType::Fixed,
        };
        assert!(matches!(
            matching_format(&spec),
            Err(RenderError::Configuration {
                channel_bits: 12,
                ..
            })
        ));
    }
}
