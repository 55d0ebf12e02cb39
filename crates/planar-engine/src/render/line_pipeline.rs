use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::device::DEPTH_FORMAT;
use crate::math::Mat4;

use super::vertex::LineVertex;

/// Number of model-matrix slots in the dynamic uniform buffer.
pub const MODEL_SLOTS: u32 = 2;

/// Model slot holding the identity transform.
pub const SLOT_IDENTITY: u32 = 0;
/// Model slot holding the animated cube's rotation.
pub const SLOT_CUBE: u32 = 1;

/// Write-once vertex buffer with its draw count.
#[derive(Debug)]
pub struct LineBuffer {
    pub buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

/// Turns CPU vertices into a render handle.
///
/// The scene store is generic over this so it can be driven without a GPU.
pub trait VertexUpload {
    type Handle;

    fn upload(&self, label: &str, vertices: &[LineVertex]) -> Self::Handle;
}

impl VertexUpload for wgpu::Device {
    type Handle = LineBuffer;

    fn upload(&self, label: &str, vertices: &[LineVertex]) -> LineBuffer {
        let buffer = self.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        LineBuffer {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlobalsUniform {
    proj: Mat4,
    view: Mat4,
}

/// The single unlit line program plus its uniform buffers.
///
/// Uniform layout (group 0):
/// - binding 0: `{ proj, view }`, written once per frame
/// - binding 1: model matrix, one aligned slot per transform, selected with a
///   dynamic offset at draw time
pub struct LinePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    globals_ubo: wgpu::Buffer,
    model_ubo: wgpu::Buffer,
    model_stride: u64,
}

impl LinePipeline {
    /// Compiles the shader and builds the pipeline for `surface_format`.
    ///
    /// Shader or pipeline validation failures are returned, not panicked on.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Result<Self> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("planar line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("planar line bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<GlobalsUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Mat4>() as u64),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("planar line pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("planar line pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[LineVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            anyhow::bail!("line pipeline failed validation: {err}");
        }

        let model_stride = model_slot_stride(
            std::mem::size_of::<Mat4>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );

        let globals_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("planar globals ubo"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let model_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("planar model ubo"),
            size: model_stride * MODEL_SLOTS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let model_binding = wgpu::BufferBinding {
            buffer: &model_ubo,
            offset: 0,
            size: wgpu::BufferSize::new(std::mem::size_of::<Mat4>() as u64),
        };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planar line bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(model_binding),
                },
            ],
        });

        log::debug!(
            "line pipeline ready: format={surface_format:?}, model stride={model_stride}"
        );

        Ok(Self {
            pipeline,
            bind_group,
            globals_ubo,
            model_ubo,
            model_stride,
        })
    }

    pub fn write_globals(&self, queue: &wgpu::Queue, proj: &Mat4, view: &Mat4) {
        let globals = GlobalsUniform { proj: *proj, view: *view };
        queue.write_buffer(&self.globals_ubo, 0, bytemuck::bytes_of(&globals));
    }

    /// Writes `model` into `slot`. Out-of-range slots are ignored.
    pub fn write_model(&self, queue: &wgpu::Queue, slot: u32, model: &Mat4) {
        if slot >= MODEL_SLOTS {
            log::warn!("model slot {slot} out of range");
            return;
        }
        let offset = self.model_stride * slot as u64;
        queue.write_buffer(&self.model_ubo, offset, bytemuck::bytes_of(model));
    }

    /// Draws every vertex of `buffer` as a line list with the model in `slot`.
    ///
    /// Pipeline, bind group and vertex buffer are bound on every call.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, buffer: &LineBuffer, slot: u32) {
        if buffer.vertex_count == 0 || slot >= MODEL_SLOTS {
            return;
        }
        let offset = (self.model_stride * slot as u64) as wgpu::DynamicOffset;
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[offset]);
        pass.set_vertex_buffer(0, buffer.buffer.slice(..));
        pass.draw(0..buffer.vertex_count, 0..1);
    }
}

/// Rounds `size` up to the device's dynamic-offset alignment.
fn model_slot_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_stride_respects_alignment() {
        assert_eq!(model_slot_stride(64, 256), 256);
        assert_eq!(model_slot_stride(64, 64), 64);
        assert_eq!(model_slot_stride(64, 0), 64);
        assert_eq!(model_slot_stride(300, 256), 512);
    }

    #[test]
    fn globals_layout_matches_shader() {
        // Two mat4x4<f32>, no padding.
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 128);
    }
}
