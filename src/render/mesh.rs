use wgpu::util::DeviceExt;

use crate::core::model::ModelData;

// Dynamic-offset stride for per-entry uniforms (min alignment on web)
pub(crate) const ENTRY_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) point_light_pos: [f32; 3],
    pub(crate) point_intensity: f32,
    pub(crate) hemi_sky: [f32; 3],
    pub(crate) hemi_intensity: f32,
    pub(crate) hemi_ground: [f32; 3],
    pub(crate) _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct EntryUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
}

/// One (node, primitive) draw: its GPU buffers plus the node it follows.
pub(crate) struct DrawEntry {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) node: usize,
    pub(crate) base_color: [f32; 4],
}

pub(crate) struct MeshResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) frame_buffer: wgpu::Buffer,
    pub(crate) frame_bind_group: wgpu::BindGroup,
    entry_bgl: wgpu::BindGroupLayout,
    pub(crate) entries: Vec<DrawEntry>,
    pub(crate) entry_buffer: Option<wgpu::Buffer>,
    pub(crate) entry_bind_group: Option<wgpu::BindGroup>,
}

pub(crate) fn create_mesh_resources(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
) -> MeshResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mesh_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::MESH_WGSL.into()),
    });
    let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("mesh_frame_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let entry_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("mesh_entry_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("mesh_pl"),
        bind_group_layouts: &[&frame_bgl, &entry_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("mesh_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_mesh"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: 24,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_mesh"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("mesh_frame_uniforms"),
        size: std::mem::size_of::<FrameUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("mesh_frame_bg"),
        layout: &frame_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: frame_buffer.as_entire_binding(),
        }],
    });

    MeshResources {
        pipeline,
        frame_buffer,
        frame_bind_group,
        entry_bgl,
        entries: Vec::new(),
        entry_buffer: None,
        entry_bind_group: None,
    }
}

impl MeshResources {
    /// Upload a loaded model: one draw entry per (node, primitive) pair, plus
    /// a dynamic-offset uniform buffer holding each entry's model matrix.
    pub(crate) fn upload_model(&mut self, device: &wgpu::Device, model: &ModelData) {
        let mut entries = Vec::new();
        for (node_index, node) in model.nodes.iter().enumerate() {
            let Some(mesh_index) = node.mesh else { continue };
            let Some(mesh) = model.meshes.get(mesh_index) else {
                continue;
            };
            for primitive in &mesh.primitives {
                let mut vertices = Vec::with_capacity(primitive.positions.len() * 6);
                for (pos, normal) in primitive.positions.iter().zip(&primitive.normals) {
                    vertices.extend_from_slice(pos);
                    vertices.extend_from_slice(normal);
                }
                let vertex_buffer =
                    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("mesh_vertices"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_indices"),
                    contents: bytemuck::cast_slice(&primitive.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                entries.push(DrawEntry {
                    vertex_buffer,
                    index_buffer,
                    index_count: primitive.indices.len() as u32,
                    node: node_index,
                    base_color: primitive.base_color,
                });
            }
        }

        if entries.is_empty() {
            self.entries = entries;
            return;
        }

        let entry_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh_entry_uniforms"),
            size: entries.len() as u64 * ENTRY_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let entry_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_entry_bg"),
            layout: &self.entry_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &entry_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<EntryUniforms>() as u64),
                }),
            }],
        });

        self.entries = entries;
        self.entry_buffer = Some(entry_buffer);
        self.entry_bind_group = Some(entry_bind_group);
    }
}
