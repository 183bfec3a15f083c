use std::collections::HashMap;

use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::sprite::Sprite;
use crate::texture::{TextureId, TextureStore, PLACEHOLDER_PIXEL};

use super::draw_image::DrawUniforms;
use super::quad::{QuadVertex, QUAD_VERTEX_COUNT, QUAD_VERTICES};

/// Sprite renderer.
///
/// Issues one draw call per sprite in list order. Each draw binds:
/// - group 0: the sprite's [`DrawUniforms`] slot in a shared dynamic-offset buffer
/// - group 1: the sprite's texture + a clamp-to-edge linear sampler
///
/// Textures start as the 1x1 placeholder pixel and are replaced by
/// [`upload`](Self::upload) when their image arrives.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    uniform_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    quad_vbo: Option<wgpu::Buffer>,

    uniform_ubo: Option<wgpu::Buffer>,
    uniform_bind_group: Option<wgpu::BindGroup>,
    uniform_capacity: usize,
    uniform_stride: u64,

    textures: HashMap<TextureId, GpuTexture>,

    warned_missing_texture: bool,
}

struct GpuTexture {
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the GPU image behind `id` with `image`.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, id: TextureId, image: &RgbaImage) {
        self.ensure_layouts(ctx);
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            log::warn!("SpriteRenderer: refusing zero-size upload for {id:?}");
            return;
        }
        if let Some(tex) = self.create_texture(ctx, width, height, image.as_raw()) {
            self.textures.insert(id, tex);
        }
    }

    /// Draws `sprites` back-to-front in slice order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        sprites: &[Sprite],
        textures: &TextureStore,
    ) {
        self.ensure_layouts(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);

        let mut uniforms: Vec<DrawUniforms> = Vec::with_capacity(sprites.len());
        let mut bound: Vec<TextureId> = Vec::with_capacity(sprites.len());

        for sprite in sprites {
            let Some(texture) = textures.get(sprite.texture) else {
                if !self.warned_missing_texture {
                    log::warn!("SpriteRenderer: sprite references unknown {:?}; skipped", sprite.texture);
                    self.warned_missing_texture = true;
                }
                continue;
            };

            let draw = sprite.draw_params(texture).resolve(texture.size());
            uniforms.push(draw.uniforms(ctx.viewport));
            self.ensure_texture(ctx, sprite.texture);
            bound.push(sprite.texture);
        }

        if uniforms.is_empty() {
            return;
        }

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.ensure_uniform_capacity(ctx, uniforms.len());

        let stride = self.uniform_stride;
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, &pack_uniforms(&uniforms, stride));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(uniform_bind_group) = self.uniform_bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };

        let mut rpass = target.begin_pass("tumble sprite pass", None);
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));

        for (slot, id) in bound.iter().enumerate() {
            let Some(texture) = self.textures.get(id) else { continue };
            let offset = (slot as u64 * stride) as wgpu::DynamicOffset;
            rpass.set_bind_group(0, uniform_bind_group, &[offset]);
            rpass.set_bind_group(1, &texture.bind_group, &[]);
            rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    /// Bind group layouts + sampler. Independent of the surface format, so
    /// uploaded textures survive a pipeline rebuild.
    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.uniform_bgl.is_some() && self.texture_bgl.is_some() && self.sampler.is_some() {
            return;
        }

        let uniform_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tumble sprite uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<DrawUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tumble sprite texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Images are not assumed to be powers of two: clamp, never wrap.
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tumble sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        self.uniform_bgl = Some(uniform_bgl);
        self.texture_bgl = Some(texture_bgl);
        self.sampler = Some(sampler);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(uniform_bgl) = self.uniform_bgl.as_ref() else { return };
        let Some(texture_bgl) = self.texture_bgl.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tumble sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tumble sprite pipeline layout"),
            bind_group_layouts: &[uniform_bgl, texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tumble sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    // Sprites overwrite what is beneath them; no blending.
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("SpriteRenderer: pipeline built for {:?}", ctx.surface_format);
        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tumble sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.uniform_capacity
            && self.uniform_ubo.is_some()
            && self.uniform_bind_group.is_some()
        {
            return;
        }
        let Some(bgl) = self.uniform_bgl.as_ref() else { return };

        let stride = uniform_stride(ctx.uniform_alignment());
        let new_cap = required.next_power_of_two().max(16);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tumble sprite uniform ubo"),
            size: new_cap as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tumble sprite uniform bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64),
                }),
            }],
        });

        self.uniform_ubo = Some(ubo);
        self.uniform_bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
        self.uniform_stride = stride;
    }

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>, id: TextureId) {
        if self.textures.contains_key(&id) {
            return;
        }
        if let Some(tex) = self.create_texture(ctx, 1, 1, &PLACEHOLDER_PIXEL) {
            self.textures.insert(id, tex);
        }
    }

    fn create_texture(
        &self,
        ctx: &RenderCtx<'_>,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Option<GpuTexture> {
        let bgl = self.texture_bgl.as_ref()?;
        let sampler = self.sampler.as_ref()?;

        let texture = ctx.upload_rgba("tumble sprite texture", width, height, rgba);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tumble sprite texture bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Some(GpuTexture {
            _texture: texture,
            bind_group,
        })
    }
}

/// Size of one uniform slot: `DrawUniforms` rounded up to `alignment`.
fn uniform_stride(alignment: u32) -> u64 {
    let size = std::mem::size_of::<DrawUniforms>() as u64;
    let align = u64::from(alignment.max(1));
    size.div_ceil(align) * align
}

/// Lays `uniforms` out at `stride`-byte intervals, zero padding in between.
fn pack_uniforms(uniforms: &[DrawUniforms], stride: u64) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = vec![0u8; uniforms.len() * stride];
    for (slot, u) in uniforms.iter().enumerate() {
        let src = bytemuck::bytes_of(u);
        bytes[slot * stride..slot * stride + src.len()].copy_from_slice(src);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use bytemuck::Zeroable;

    use super::*;

    fn uniforms(seed: f32) -> DrawUniforms {
        let mut u = DrawUniforms::zeroed();
        u.matrix[0][0] = seed;
        u.texture_matrix[3][3] = seed + 1.0;
        u
    }

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(uniform_stride(256), 256);
        assert_eq!(uniform_stride(64), 128);
        assert_eq!(uniform_stride(96), 192);
        assert_eq!(uniform_stride(0), 128);
    }

    #[test]
    fn packed_slots_start_at_stride_boundaries() {
        let list = [uniforms(1.0), uniforms(2.0), uniforms(3.0)];
        let bytes = pack_uniforms(&list, 256);
        assert_eq!(bytes.len(), 3 * 256);

        for (slot, u) in list.iter().enumerate() {
            let at = slot * 256;
            let back: DrawUniforms = bytemuck::pod_read_unaligned(&bytes[at..at + 128]);
            assert_eq!(&back, u);
            assert!(bytes[at + 128..at + 256].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn packing_nothing_is_empty() {
        assert!(pack_uniforms(&[], 256).is_empty());
    }
}
