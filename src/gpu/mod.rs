//! wgpu line renderer for the vector field and strings.
//!
//! The grid's flat position buffer is bound directly as line-list vertex
//! data: every [`GridPoint`](crate::GridPoint) is two `vec3` vertices,
//! origin then current endpoint, so one point is one line segment. Strings
//! get a second line-list buffer of their own.
//!
//! Buffers are only re-uploaded when the scene reports them dirty, and only
//! after the scene has finished its update for the frame.

mod camera;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use camera::Camera;

use crate::config::SceneConfig;
use crate::error::GpuError;
use crate::scene::Scene;

/// WGSL source of the line pipeline.
pub const LINE_SHADER: &str = include_str!("lines.wgsl");

/// Bytes per vertex: one `vec3<f32>`.
pub const VERTEX_STRIDE: u64 = 12;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: 0,
}];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineUniforms {
    view_proj: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Colours used to draw a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub line_color: [f32; 3],
    pub string_color: [f32; 3],
    pub background: [f32; 3],
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::from(&SceneConfig::default())
    }
}

impl From<&SceneConfig> for LineStyle {
    fn from(config: &SceneConfig) -> Self {
        Self {
            line_color: config.line_color,
            string_color: config.string_color,
            background: config.background,
        }
    }
}

/// One uniform buffer and its bind group.
struct LineLayer {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 4],
}

impl LineLayer {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        color: [f32; 3],
    ) -> Self {
        let color = [color[0], color[1], color[2], 1.0];
        let uniforms = LineUniforms {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color,
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            uniform_buffer,
            bind_group,
            color,
        }
    }

    fn write(&self, queue: &wgpu::Queue, view_proj: glam::Mat4) {
        let uniforms = LineUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            color: self.color,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    grid_buffer: wgpu::Buffer,
    grid_vertices: u32,
    grid_layer: LineLayer,
    string_buffer: Option<wgpu::Buffer>,
    string_vertices: u32,
    string_layer: LineLayer,
    string_scratch: Vec<[f32; 3]>,
    background: wgpu::Color,
    pub camera: Camera,
}

impl GpuState {
    pub async fn new(
        window: Arc<Window>,
        scene: &mut Scene,
        style: LineStyle,
        camera: Camera,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(GpuError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Grid vertices: the scene's buffer as-is
        let vectors = scene.vectors_mut();
        vectors.take_dirty();
        let grid_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: vectors.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let grid_vertices = vectors.vertex_count();

        let mut string_scratch = Vec::new();
        let string_buffer = scene.strings_mut().map(|strings| {
            strings.take_dirty();
            strings.fill_segments(&mut string_scratch);
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("String Vertex Buffer"),
                contents: bytemuck::cast_slice(&string_scratch),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
        });
        let string_vertices = string_scratch.len() as u32;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Line Bind Group Layout"),
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

        let grid_layer = LineLayer::new(&device, &bind_group_layout, "Grid Uniforms", style.line_color);
        let string_layer =
            LineLayer::new(&device, &bind_group_layout, "String Uniforms", style.string_color);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: VERTEX_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let [r, g, b] = style.background;
        let background = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            grid_buffer,
            grid_vertices,
            grid_layer,
            string_buffer,
            string_vertices,
            string_layer,
            string_scratch,
            background,
            camera,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Copy whatever the scene marked dirty into the vertex buffers.
    pub fn upload(&mut self, scene: &mut Scene) {
        let vectors = scene.vectors_mut();
        if vectors.take_dirty() {
            self.queue.write_buffer(&self.grid_buffer, 0, vectors.as_bytes());
        }

        if let (Some(buffer), Some(strings)) = (&self.string_buffer, scene.strings_mut()) {
            if strings.take_dirty() {
                strings.fill_segments(&mut self.string_scratch);
                self.queue
                    .write_buffer(buffer, 0, bytemuck::cast_slice(&self.string_scratch));
            }
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let view_proj = self.camera.view_proj(aspect);
        self.grid_layer.write(&self.queue, view_proj);
        self.string_layer.write(&self.queue, view_proj);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Line Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);

            render_pass.set_bind_group(0, &self.grid_layer.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.grid_buffer.slice(..));
            render_pass.draw(0..self.grid_vertices, 0..1);

            if let Some(buffer) = &self.string_buffer {
                if self.string_vertices > 0 {
                    render_pass.set_bind_group(0, &self.string_layer.bind_group, &[]);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..self.string_vertices, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
