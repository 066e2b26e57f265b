//! Production [`FrameBackend`] drawing scene nodes with wgpu.
//!
//! One render pipeline per [`Topology`], all sharing a single layout:
//!
//! | group | binding | contents |
//! |-------|---------|----------|
//! | 0 | 0 | camera uniform |
//! | 1 | 0 | node uniform (dynamic offset per draw) |
//! | 2 | 0, 1 | node texture + sampler |
//!
//! Vertex slots 0, 1, 2 carry positions, colors and normals. Nodes without
//! normals bind their position buffer to slot 2 and clear the normal flag;
//! nodes without an image bind a 1×1 white placeholder.

use wgpu::util::DeviceExt;

use super::arena::GpuArena;
use super::{FrameBackend, NodeDraw};
use crate::camera::core::CameraUniform;
use crate::camera::FrameMatrices;
use crate::error::MirageError;
use crate::gpu::dynamic_buffer::{align_to, DynamicBuffer};
use crate::gpu::pipeline_helpers::{
    depth_stencil_state, dynamic_uniform_buffer, filtering_sampler,
    node_vertex_layouts, repeat_sampler, texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{Shader, ShaderComposer};
use crate::gpu::texture::{DepthTarget, ImageTexture};
use crate::options::RenderOptions;
use crate::scene::{SceneNode, Topology};

/// Per-draw uniform: model matrix and feature flags.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    /// Model (object → world) matrix.
    pub model: [[f32; 4]; 4],
    /// x: node has normals, y: node has an image.
    pub flags: [u32; 4],
}

/// Node draws preallocated in the uniform buffer before it first grows.
const INITIAL_NODE_CAPACITY: usize = 64;

/// GPU resources for one node of the current snapshot.
struct NodeResources {
    vertices: wgpu::Buffer,
    colors: wgpu::Buffer,
    normals: Option<wgpu::Buffer>,
    texture: Option<(ImageTexture, wgpu::BindGroup)>,
}

struct DrawRecord {
    index: usize,
    topology: Topology,
    vertex_count: u32,
    uniform: NodeUniform,
}

/// An acquired surface plus the draws recorded for it.
pub struct WgpuFrame {
    surface: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    draws: Vec<DrawRecord>,
}

/// wgpu implementation of [`FrameBackend`].
pub struct WgpuBackend {
    context: RenderContext,
    clear_color: wgpu::Color,
    pipelines: Vec<wgpu::RenderPipeline>,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    node_layout: wgpu::BindGroupLayout,
    node_uniforms: DynamicBuffer,
    node_bind_group: wgpu::BindGroup,
    node_stride: usize,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    placeholder_bind_group: wgpu::BindGroup,
    depth: DepthTarget,
    arena: GpuArena<NodeResources>,
    uniform_bytes: Vec<u8>,
}

impl WgpuBackend {
    /// Build every pipeline and shared resource for `context`.
    ///
    /// Pipeline creation runs inside a validation error scope, so a device
    /// that rejects the shader or pipeline state is reported here rather
    /// than on the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`MirageError::Pipeline`] if shader composition or pipeline
    /// validation fails.
    pub async fn new(
        context: RenderContext,
        options: &RenderOptions,
    ) -> Result<Self, MirageError> {
        let device = &context.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let mut composer = ShaderComposer::new()?;
        let shader = composer.compose(device, Shader::Node)?;

        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[uniform_buffer(0)],
            });
        let node_uniform_size = size_of::<NodeUniform>();
        let node_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Node Bind Group Layout"),
                entries: &[dynamic_uniform_buffer(0, node_uniform_size as u64)],
            });
        let texture_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Node Texture Bind Group Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Node Pipeline Layout"),
                bind_group_layouts: &[
                    &camera_layout,
                    &node_layout,
                    &texture_layout,
                ],
                push_constant_ranges: &[],
            });
        let pipelines = Topology::ALL
            .iter()
            .map(|&topology| {
                create_node_pipeline(
                    device,
                    &pipeline_layout,
                    &shader,
                    context.format(),
                    topology,
                )
            })
            .collect();

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::new()]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let alignment =
            device.limits().min_uniform_buffer_offset_alignment as usize;
        let node_stride = align_to(node_uniform_size, alignment);
        let node_uniforms = DynamicBuffer::new(
            device,
            "Node Uniform Buffer",
            node_stride * INITIAL_NODE_CAPACITY,
            wgpu::BufferUsages::UNIFORM,
        );
        let node_bind_group =
            create_node_bind_group(device, &node_layout, &node_uniforms);

        let sampler = repeat_sampler(device, "Node Texture Sampler");
        let placeholder = ImageTexture::placeholder(device, &context.queue);
        let placeholder_bind_group = create_texture_bind_group(
            device,
            &texture_layout,
            &placeholder,
            &sampler,
        );

        let (width, height) = context.size();
        let depth = DepthTarget::new(device, width, height);

        if let Some(error) = device.pop_error_scope().await {
            log::error!("renderer construction failed: {error}");
            return Err(MirageError::Pipeline(error.to_string()));
        }
        log::info!(
            "renderer ready: {} pipelines, node uniform stride {node_stride}",
            Topology::ALL.len()
        );

        Ok(Self {
            context,
            clear_color: options.clear(),
            pipelines,
            camera_buffer,
            camera_bind_group,
            node_layout,
            node_uniforms,
            node_bind_group,
            node_stride,
            texture_layout,
            sampler,
            placeholder_bind_group,
            depth,
            arena: GpuArena::new(),
            uniform_bytes: Vec::new(),
        })
    }

    /// The underlying render context.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Number of nodes with cached GPU resources.
    #[must_use]
    pub fn cached_nodes(&self) -> usize {
        self.arena.len()
    }

    fn upload_node(&self, node: &SceneNode) -> NodeResources {
        let device = &self.context.device;
        let buffer = |label: &str, data: &[f32]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        let texture = node.image().map(|image| {
            let texture = ImageTexture::from_image(
                device,
                &self.context.queue,
                "Node Texture",
                image,
            );
            let bind_group = create_texture_bind_group(
                device,
                &self.texture_layout,
                &texture,
                &self.sampler,
            );
            (texture, bind_group)
        });
        NodeResources {
            vertices: buffer("Node Vertices", node.vertices()),
            colors: buffer("Node Colors", node.colors()),
            normals: node.normals().map(|n| buffer("Node Normals", n)),
            texture,
        }
    }

    /// Pack every recorded uniform at the dynamic-offset stride.
    fn upload_uniforms(&mut self, draws: &[DrawRecord]) {
        self.uniform_bytes.clear();
        self.uniform_bytes.resize(draws.len() * self.node_stride, 0);
        for (chunk, draw) in
            self.uniform_bytes.chunks_exact_mut(self.node_stride).zip(draws)
        {
            let bytes = bytemuck::bytes_of(&draw.uniform);
            chunk[..bytes.len()].copy_from_slice(bytes);
        }
        let reallocated = self.node_uniforms.write_bytes(
            &self.context.device,
            &self.context.queue,
            &self.uniform_bytes,
        );
        if reallocated {
            self.node_bind_group = create_node_bind_group(
                &self.context.device,
                &self.node_layout,
                &self.node_uniforms,
            );
        }
    }
}

impl FrameBackend for WgpuBackend {
    type Frame = WgpuFrame;

    fn acquire(&mut self) -> Option<WgpuFrame> {
        let surface = self.context.acquire()?;
        let view = surface
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Some(WgpuFrame {
            surface,
            view,
            draws: Vec::new(),
        })
    }

    fn begin(
        &mut self,
        frame: &mut WgpuFrame,
        matrices: &FrameMatrices,
        revision: Option<u64>,
    ) {
        let mut uniform = CameraUniform::new();
        uniform.update(matrices);
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[uniform]),
        );
        let _ = self.arena.sync(revision);
        frame.draws.clear();
    }

    fn check_node(&self, node: &SceneNode) -> Option<String> {
        self.context.limits().check(node)
    }

    fn encode_node(&mut self, frame: &mut WgpuFrame, draw: NodeDraw<'_>) {
        if self.arena.get(draw.index).is_none() {
            let resources = self.upload_node(draw.node);
            let _ = self.arena.get_or_insert_with(draw.index, || resources);
        }
        frame.draws.push(DrawRecord {
            index: draw.index,
            topology: draw.node.topology(),
            vertex_count: draw.node.vertex_count() as u32,
            uniform: node_uniform(&draw),
        });
    }

    fn present(&mut self, frame: WgpuFrame) {
        self.upload_uniforms(&frame.draws);

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &frame.view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for (slot, draw) in frame.draws.iter().enumerate() {
                let Some(resources) = self.arena.get(draw.index) else {
                    continue;
                };
                let Some(pipeline) = self.pipelines.get(draw.topology.index())
                else {
                    continue;
                };
                let offset = (slot * self.node_stride) as wgpu::DynamicOffset;
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, &self.node_bind_group, &[offset]);
                let texture_bind_group = resources
                    .texture
                    .as_ref()
                    .map_or(&self.placeholder_bind_group, |(_, bg)| bg);
                pass.set_bind_group(2, texture_bind_group, &[]);
                pass.set_vertex_buffer(0, resources.vertices.slice(..));
                pass.set_vertex_buffer(1, resources.colors.slice(..));
                let normals =
                    resources.normals.as_ref().unwrap_or(&resources.vertices);
                pass.set_vertex_buffer(2, normals.slice(..));
                pass.draw(0..draw.vertex_count, 0..1);
            }
        }
        self.context.submit(encoder);
        frame.surface.present();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        let (width, height) = self.context.size();
        if self.depth.size() != (width, height) {
            self.depth = DepthTarget::new(&self.context.device, width, height);
        }
    }

    fn set_clear_color(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }
}

/// Uniform for one draw. The flags select the shading path: without
/// normals the shader skips lighting (slot 2 then holds the positions),
/// without an image it samples the white placeholder.
fn node_uniform(draw: &NodeDraw<'_>) -> NodeUniform {
    NodeUniform {
        model: draw.model.to_cols_array_2d(),
        flags: [
            u32::from(draw.node.has_normals()),
            u32::from(draw.node.image().is_some()),
            0,
            0,
        ],
    }
}

fn create_node_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: Topology,
) -> wgpu::RenderPipeline {
    let label = format!("Node Pipeline ({topology})");
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &node_vertex_layouts(),
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: topology.to_wgpu(),
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_node_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &DynamicBuffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Node Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: uniforms.buffer(),
                offset: 0,
                size: wgpu::BufferSize::new(size_of::<NodeUniform>() as u64),
            }),
        }],
    })
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &ImageTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Node Texture Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::scene::NodeImage;

    fn triangle() -> SceneNode {
        SceneNode::new(
            vec![
                0.0, 0.0, 0.0, 1.0, //
                1.0, 0.0, 0.0, 1.0, //
                0.0, 1.0, 0.0, 1.0,
            ],
            vec![1.0; 12],
        )
    }

    fn uniform_for(node: &SceneNode) -> NodeUniform {
        node_uniform(&NodeDraw {
            index: 0,
            node,
            model: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        })
    }

    #[test]
    fn plain_node_is_unlit_and_untextured() {
        let uniform = uniform_for(&triangle());
        assert_eq!(uniform.flags, [0, 0, 0, 0]);
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn normals_set_the_lighting_flag() {
        let node = triangle().with_normals(vec![0.0, 0.0, 1.0, 0.0].repeat(3));
        assert_eq!(uniform_for(&node).flags, [1, 0, 0, 0]);
    }

    #[test]
    fn image_sets_the_texture_flag() {
        let image = NodeImage::new(1, 1, vec![255, 0, 0, 255]);
        let node = triangle().with_image(image);
        assert_eq!(uniform_for(&node).flags, [0, 1, 0, 0]);

        let node = node.with_normals(vec![0.0; 12]);
        assert_eq!(uniform_for(&node).flags, [1, 1, 0, 0]);
    }

    #[test]
    fn node_uniform_layout_matches_shader() {
        // mat4x4<f32> + vec4<u32>
        assert_eq!(size_of::<NodeUniform>(), 64 + 16);
        assert_eq!(align_to(size_of::<NodeUniform>(), 256), 256);
    }
}
