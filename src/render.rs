//! WebGPU state and the per-frame draw: a star billboard pass followed by a
//! depth-tested lit mesh pass for the plane model.

use glam::Mat4;
use web_sys as web;

use crate::core::constants::{
    HEMI_GROUND_COLOR, HEMI_INTENSITY, HEMI_SKY_COLOR, POINT_LIGHT_INTENSITY, POINT_LIGHT_POS,
    STAR_FIELD_Z_OFFSET, STAR_SIZE,
};
use crate::core::model::global_transforms;
use crate::core::scene::Camera;
use crate::core::SceneState;

mod mesh;
mod starfield;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    stars: starfield::StarResources,
    mesh: mesh::MeshResources,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    model_uploaded: bool,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, width, height);
        let stars = starfield::create_star_resources(&device, format, DEPTH_FORMAT);
        let mesh = mesh::create_mesh_resources(&device, format, DEPTH_FORMAT);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            stars,
            mesh,
            depth_view,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.01,
                a: 1.0,
            },
            model_uploaded: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    /// Draw one frame of the scene with the given camera.
    pub fn render(
        &mut self,
        scene: &SceneState,
        camera: &Camera,
    ) -> Result<(), wgpu::SurfaceError> {
        if !self.model_uploaded {
            if let Some(model) = scene.plane.model() {
                self.mesh.upload_model(&self.device, model);
                self.model_uploaded = true;
            }
        }

        let view_m = camera.view_matrix().to_cols_array_2d();
        let proj_m = camera.projection_matrix().to_cols_array_2d();

        // Star field: stream positions, then field transform (roll + offset)
        self.queue.write_buffer(
            &self.stars.instance_buffer,
            0,
            bytemuck::cast_slice(scene.stars.positions()),
        );
        let field = Mat4::from_translation(glam::Vec3::new(0.0, 0.0, STAR_FIELD_Z_OFFSET))
            * Mat4::from_rotation_z(scene.stars.roll());
        let star_uniforms = starfield::StarUniforms {
            view: view_m,
            proj: proj_m,
            model: field.to_cols_array_2d(),
            size: STAR_SIZE,
            _pad: [0.0; 3],
        };
        self.queue.write_buffer(
            &self.stars.uniform_buffer,
            0,
            bytemuck::bytes_of(&star_uniforms),
        );

        // Mesh frame + per-entry uniforms
        let frame_uniforms = mesh::FrameUniforms {
            view: view_m,
            proj: proj_m,
            point_light_pos: POINT_LIGHT_POS.to_array(),
            point_intensity: POINT_LIGHT_INTENSITY,
            hemi_sky: HEMI_SKY_COLOR,
            hemi_intensity: HEMI_INTENSITY,
            hemi_ground: HEMI_GROUND_COLOR,
            _pad: 0.0,
        };
        self.queue.write_buffer(
            &self.mesh.frame_buffer,
            0,
            bytemuck::bytes_of(&frame_uniforms),
        );

        let draw_model = self.model_uploaded && !self.mesh.entries.is_empty();
        if draw_model {
            if let (Some(model), Some(entry_buffer)) =
                (scene.plane.model(), self.mesh.entry_buffer.as_ref())
            {
                let globals = global_transforms(&model.nodes);
                let root = Mat4::from_translation(scene.plane.position());
                let mut data = vec![0u8; self.mesh.entries.len() * mesh::ENTRY_STRIDE as usize];
                for (i, entry) in self.mesh.entries.iter().enumerate() {
                    let u = mesh::EntryUniforms {
                        model: (root * globals[entry.node]).to_cols_array_2d(),
                        color: entry.base_color,
                    };
                    let offset = i * mesh::ENTRY_STRIDE as usize;
                    data[offset..offset + std::mem::size_of::<mesh::EntryUniforms>()]
                        .copy_from_slice(bytemuck::bytes_of(&u));
                }
                self.queue.write_buffer(entry_buffer, 0, &data);
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.stars.pipeline);
            rpass.set_bind_group(0, &self.stars.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.stars.instance_buffer.slice(..));
            rpass.draw(0..6, 0..scene.stars.len() as u32);

            if draw_model {
                if let Some(entry_bg) = self.mesh.entry_bind_group.as_ref() {
                    rpass.set_pipeline(&self.mesh.pipeline);
                    rpass.set_bind_group(0, &self.mesh.frame_bind_group, &[]);
                    for (i, entry) in self.mesh.entries.iter().enumerate() {
                        let offset = (i as u64 * mesh::ENTRY_STRIDE) as u32;
                        rpass.set_bind_group(1, entry_bg, &[offset]);
                        rpass.set_vertex_buffer(0, entry.vertex_buffer.slice(..));
                        rpass.set_index_buffer(
                            entry.index_buffer.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        rpass.draw_indexed(0..entry.index_count, 0, 0..1);
                    }
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}
