use glam::Mat4;
use log::{debug, info, trace};
use winit::window::Window;

use crate::{
    command_buffer,
    command_encoder::CommandEncoderExt,
    error::Error,
    fractal,
    geometry::{Triangle, Vertex, QUAD_INDEX_COUNT, QUAD_TRIANGLES, QUAD_VERTICES},
    screen, typed_buffer, var,
};

/// Everything on the GPU side: the surface, the one pipeline, the static quad
/// and the projection uniform.
pub struct Renderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    vertex_buffer: typed_buffer::Buffer<Vertex>,
    index_buffer: typed_buffer::Buffer<Triangle>,
    mvp: var::Var<[[f32; 4]; 4]>,
}

/// Brightness is written as-is, so prefer a target that doesn't gamma-encode it.
fn choose_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.describe().srgb)
        .or_else(|| formats.first().copied())
}

impl Renderer {
    pub fn new(
        window: &Window,
        size: screen::Size,
        present_mode: wgpu::PresentMode,
    ) -> Result<Self, Error> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let surface = unsafe { instance.create_surface(window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(Error::NoAdapter)?;
        info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let format = choose_format(&surface.get_supported_formats(&adapter))
            .ok_or(Error::IncompatibleSurface)?;
        info!("surface format {:?}", format);

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        if !size.is_empty() {
            surface.configure(&device, &surface_configuration);
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mandelbrot-shader"),
            source: wgpu::ShaderSource::Wgsl(fractal::SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("view-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("render-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[Vertex::layout()],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The projection flips y, which reverses the quad's winding.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(Error::Shader(error.to_string()));
        }

        let vertex_buffer = typed_buffer::Builder::from(&QUAD_VERTICES[..])
            .with_label("quad-vertices")
            .with_usage(wgpu::BufferUsages::VERTEX)
            .create(&device);

        let index_buffer = typed_buffer::Builder::from(&QUAD_TRIANGLES[..])
            .with_label("quad-triangles")
            .with_usage(wgpu::BufferUsages::INDEX)
            .create(&device);

        let mvp = var::Builder::new(Mat4::IDENTITY.to_cols_array_2d())
            .with_label("mvp")
            .with_usage(wgpu::BufferUsages::UNIFORM)
            .create(&device);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("view-bind-group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mvp.binding_resource(),
            }],
        });

        Ok(Self {
            surface,
            device,
            queue,
            surface_configuration,
            render_pipeline,
            bind_group,
            vertex_buffer,
            index_buffer,
            mvp,
        })
    }

    /// Does nothing for an empty size; the surface keeps its last configuration.
    pub fn resize(&mut self, size: screen::Size) {
        if size.is_empty() {
            return;
        }
        debug!("resizing surface to {:?}", size);
        self.surface_configuration.width = size.width;
        self.surface_configuration.height = size.height;
        self.surface.configure(&self.device, &self.surface_configuration);
    }

    /// Reconfigure with the current size after the surface was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_configuration);
    }

    pub fn upload_projection(&self, mvp: Mat4) {
        self.mvp.write(&self.queue, mvp.to_cols_array_2d());
    }

    pub fn draw(&self) -> Result<(), wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        command_buffer::submit(
            &self.device,
            &self.queue,
            &wgpu::CommandEncoderDescriptor {
                label: Some("draw"),
            },
            |command_encoder| {
                command_encoder.with_debug_group("render-pass", |command_encoder| {
                    command_encoder.with_render_pass(
                        &wgpu::RenderPassDescriptor {
                            label: Some("render-pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &surface_texture_view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                    store: true,
                                },
                            })],
                            depth_stencil_attachment: None,
                        },
                        |render_pass| {
                            render_pass.set_pipeline(&self.render_pipeline);
                            render_pass.set_bind_group(0, &self.bind_group, &[]);
                            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                            render_pass.set_index_buffer(
                                self.index_buffer.slice(..),
                                wgpu::IndexFormat::Uint32,
                            );
                            render_pass.insert_debug_marker("mandelbrot");
                            render_pass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..1);
                        },
                    )
                })
            },
        );

        trace!("presenting frame");
        surface_texture.present();
        Ok(())
    }

    pub fn destroy(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.mvp.destroy();
    }
}
