//! One-draw frame presentation.

use bytemuck::{Pod, Zeroable};
use tracing::{debug, warn};
use wgpu::util::DeviceExt;

use hdrview_core::{Frame, SourceKind};

use crate::shaders;
use crate::upload::{SampleKind, upload};
use crate::{PlaneTexture, RenderContext, RenderError, Result, SurfaceContext};

/// Fragment uniforms: target selector and source encoding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct ParamsUniform {
    target_space: u32,
    source_kind: u32,
    _pad0: u32,
    _pad1: u32,
}

/// Interleaved position + UV for the full-screen quad.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

/// Static full-screen quad: two triangles as a 4-vertex strip.
const QUAD: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, -1.0], uv: [0.0, 1.0] },
    QuadVertex { pos: [1.0, -1.0], uv: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0], uv: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0], uv: [1.0, 0.0] },
];

/// Presents one frame onto the configured surface.
///
/// Uploads the planes, builds the color program, draws the quad, submits.
/// Every GPU object created here is released on every exit path; a shader
/// or upload failure aborts this draw only.
pub fn present(ctx: &RenderContext, surface: &SurfaceContext, frame: &Frame) -> Result<()> {
    let result = draw(ctx, surface, frame, None);
    if let Err(ref e) = result {
        warn!(target = surface.spec().colorspace.name(), error = %e, "draw aborted");
    }
    result
}

/// Presents a cleared surface when no frame is available yet.
///
/// A missing frame is a valid state, not an error: the draw still runs so
/// the surface shows defined (black) content.
pub fn present_clear(ctx: &RenderContext, surface: &SurfaceContext) -> Result<()> {
    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("clear_encoder"),
        });
    {
        let attachments = clear_pass_attachments(surface);
        let _pass = encoder.begin_render_pass(&clear_pass_descriptor(&attachments));
    }
    ctx.submit_and_wait(encoder);
    Ok(())
}

fn clear_pass_attachments<'a>(
    surface: &'a SurfaceContext,
) -> [Option<wgpu::RenderPassColorAttachment<'a>>; 1] {
    [Some(wgpu::RenderPassColorAttachment {
        view: &surface.view,
        resolve_target: None,
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            store: wgpu::StoreOp::Store,
        },
    })]
}

fn clear_pass_descriptor<'a>(
    color_attachments: &'a [Option<wgpu::RenderPassColorAttachment<'a>>],
) -> wgpu::RenderPassDescriptor<'a> {
    wgpu::RenderPassDescriptor {
        label: Some("present_pass"),
        color_attachments,
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    }
}

/// Uploads the frame's planes with the sampling kind each one needs.
fn upload_planes(ctx: &RenderContext, frame: &Frame) -> Result<Vec<PlaneTexture>> {
    match frame {
        Frame::Planar { y, u, v } => {
            let kind = match frame.source_kind() {
                SourceKind::Narrow8 => SampleKind::Unorm8,
                _ => SampleKind::Float16,
            };
            Ok(vec![
                upload(ctx, y, kind)?,
                upload(ctx, u, kind)?,
                upload(ctx, v, kind)?,
            ])
        }
        Frame::SemiPlanar { y, uv } => Ok(vec![
            upload(ctx, y, SampleKind::Uint16)?,
            upload(ctx, uv, SampleKind::Uint16x2)?,
        ]),
    }
}

/// Builds the program, binds everything, draws once.
///
/// `shader_override` swaps in alternative WGSL for fault-injection tests.
fn draw(
    ctx: &RenderContext,
    surface: &SurfaceContext,
    frame: &Frame,
    shader_override: Option<&str>,
) -> Result<()> {
    let planes = upload_planes(ctx, frame)?;
    let source_kind = frame.source_kind();

    let source = match shader_override {
        Some(s) => s.to_owned(),
        None => match source_kind {
            SourceKind::P010 => shaders::semi_planar_source(),
            _ => shaders::planar_source(),
        },
    };

    // Compile and link inside a validation scope so a broken shader
    // surfaces as a ShaderError with the compiler log instead of an
    // uncaptured device error.
    ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = ctx
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("color_transform"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

    let pipeline = ctx
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("color_transform_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface.format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

    if let Some(err) = pollster::block_on(ctx.device.pop_error_scope()) {
        // planes drop here, alive count returns to zero.
        return Err(RenderError::Shader(err.to_string()));
    }

    let params = ParamsUniform {
        target_space: surface.spec().shader_index(),
        source_kind: match source_kind {
            SourceKind::Narrow8 => 1,
            _ => 0,
        },
        _pad0: 0,
        _pad1: 0,
    };
    let params_buf = ctx
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("params_uniform"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

    let vertex_buf = ctx
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vertices"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

    let bind_group = build_bind_group(ctx, &pipeline, &planes, &params_buf, source_kind)?;

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("present_encoder"),
        });
    {
        let attachments = clear_pass_attachments(surface);
        let mut pass = encoder.begin_render_pass(&clear_pass_descriptor(&attachments));
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buf.slice(..));
        pass.draw(0..4, 0..1);
    }
    ctx.submit_and_wait(encoder);

    debug!(
        target = surface.spec().colorspace.name(),
        width = frame.width(),
        height = frame.height(),
        "frame presented"
    );
    Ok(())
}

/// Binds plane textures, sampler (planar only) and uniforms.
fn build_bind_group(
    ctx: &RenderContext,
    pipeline: &wgpu::RenderPipeline,
    planes: &[PlaneTexture],
    params_buf: &wgpu::Buffer,
    source_kind: SourceKind,
) -> Result<wgpu::BindGroup> {
    let layout = pipeline.get_bind_group_layout(0);

    let bind_group = if source_kind == SourceKind::P010 {
        // Integer planes: no sampler binding exists.
        debug_assert!(planes.iter().all(|p| p.kind.is_integer()));
        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("semi_planar_bind_group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&planes[0].view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&planes[1].view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buf.as_entire_binding(),
                },
            ],
        })
    } else {
        // Normalized planes filter linearly; integer chroma never gets here.
        debug_assert!(planes.iter().all(|p| !p.kind.is_integer()));
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("plane_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planar_bind_group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&planes[0].view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&planes[1].view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&planes[2].view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: params_buf.as_entire_binding(),
                },
            ],
        })
    };

    Ok(bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrview_core::{ColorSpaceTag, PlaneBuffer, TargetSpec};

    fn test_frame() -> Frame {
        let y = PlaneBuffer::from_u8(4, 4, &[126; 16]).unwrap();
        let u = PlaneBuffer::from_u8(2, 2, &[128; 4]).unwrap();
        let v = PlaneBuffer::from_u8(2, 2, &[128; 4]).unwrap();
        Frame::planar(y, u, v).unwrap()
    }

    #[test]
    fn test_shader_error_releases_textures() {
        if !RenderContext::is_available() {
            eprintln!("skipping: no GPU adapter");
            return;
        }
        let ctx = RenderContext::new().unwrap();
        let spec = TargetSpec::for_tag(ColorSpaceTag::Srgb);
        let surface = SurfaceContext::configure(&ctx, spec, 4, 4).unwrap();

        let frame = test_frame();
        let broken = "fn fs_main( this is not wgsl";
        let err = draw(&ctx, &surface, &frame, Some(broken)).unwrap_err();
        assert!(matches!(err, RenderError::Shader(_)));

        // After a forced shader error the texture count returns to zero.
        assert_eq!(ctx.alive_texture_count(), 0);
    }

    #[test]
    fn test_successful_draw_releases_textures() {
        if !RenderContext::is_available() {
            eprintln!("skipping: no GPU adapter");
            return;
        }
        let ctx = RenderContext::new().unwrap();
        let spec = TargetSpec::for_tag(ColorSpaceTag::Srgb);
        let surface = SurfaceContext::configure(&ctx, spec, 4, 4).unwrap();

        present(&ctx, &surface, &test_frame()).unwrap();
        assert_eq!(ctx.alive_texture_count(), 0);
    }

    #[test]
    fn test_clear_without_frame() {
        if !RenderContext::is_available() {
            eprintln!("skipping: no GPU adapter");
            return;
        }
        let ctx = RenderContext::new().unwrap();
        let spec = TargetSpec::for_tag(ColorSpaceTag::ScrgbLinear);
        let surface = SurfaceContext::configure(&ctx, spec, 8, 8).unwrap();
        present_clear(&ctx, &surface).unwrap();

        // RGB zero everywhere; alpha clears to one.
        let bytes = surface.read_back(&ctx).unwrap();
        for px in bytes.chunks_exact(8) {
            assert!(px[..6].iter().all(|b| *b == 0));
        }
    }
}
