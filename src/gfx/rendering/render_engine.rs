//! WGPU-based rendering engine
//!
//! Owns the surface, device and depth buffer, keeps the global uniforms in
//! sync with the scene and draws every object with the pipeline that matches
//! the current render toggles.

use std::sync::Arc;

use log::{info, warn};
use wgpu::{Device, TextureFormat};

use crate::{
    error::RenderError,
    gfx::{
        resources::{
            global_bindings::{GlobalBindings, GlobalUBO, GlobalUniform},
            texture_resource::TextureResource,
        },
        scene::{
            object::{object_bind_group_layout, DrawObject},
            scene::Scene,
        },
    },
    wgpu_utils::binding_builder::BindGroupLayoutWithDesc,
};

use super::pipeline_manager::{PipelineConfig, PipelineKey, PipelineManager};

const SCENE_SHADER: &str = "scene";
const SCENE_SHADER_SOURCE: &str = include_str!("scene.wgsl");

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_layout: BindGroupLayoutWithDesc,
    line_mode_supported: bool,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter: {}", adapter.get_info().name);

        let line_mode_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        if !line_mode_supported {
            warn!("Adapter does not support line polygon mode; wireframe will render filled");
        }

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: if line_mode_supported {
                    wgpu::Features::POLYGON_MODE_LINE
                } else {
                    wgpu::Features::empty()
                },
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8Unorm);
        let immediate_supported = surface_capabilities
            .present_modes
            .contains(&wgpu::PresentMode::Immediate);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync, immediate_supported),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let object_layout = object_bind_group_layout(&device);

        // Wrap device and queue in Arc for pipeline manager
        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader(SCENE_SHADER, SCENE_SHADER_SOURCE);

        let base_config = PipelineConfig::new(SCENE_SHADER, format)
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_bind_group_layouts(vec![
                global_bindings.bind_group_layout().clone(),
                object_layout.layout.clone(),
            ]);
        for key in PipelineKey::all(line_mode_supported) {
            pipeline_manager.register_pipeline(&key.name(), base_config.clone().for_key(&key));
        }

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            pipeline_manager,
            global_ubo,
            global_bindings,
            object_layout,
            line_mode_supported,
        })
    }

    /// Uploads the scene's projection, lights and per-object uniforms
    pub fn update(&mut self, scene: &mut Scene) {
        let globals = GlobalUniform::new(scene.projection_matrix(), scene.lights());
        self.global_ubo.update_content(&self.queue, globals);
        scene.update_gpu_resources(&self.queue);
    }

    /// Draws one frame
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring the next frame");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            let key = PipelineKey::new(&scene.toggles, self.line_mode_supported);
            if let Some(pipeline) = self.pipeline_manager.get_pipeline(&key.name()) {
                render_pass.set_pipeline(pipeline);

                for object in scene.objects.iter() {
                    if let Some(mesh) = scene.mesh(object.model) {
                        render_pass.draw_object(object, mesh);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Layout scene objects build their bind groups against
    pub fn object_bind_group_layout(&self) -> &BindGroupLayoutWithDesc {
        &self.object_layout
    }
}

fn present_mode(vsync: bool, immediate_supported: bool) -> wgpu::PresentMode {
    if vsync || !immediate_supported {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::Immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_mode() {
        assert_eq!(present_mode(true, true), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode(false, true), wgpu::PresentMode::Immediate);
        assert_eq!(present_mode(false, false), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn test_lit_colour_is_clamped_per_vertex() {
        let diffuse = SCENE_SHADER_SOURCE
            .split("fn diffuse(")
            .nth(1)
            .and_then(|rest| rest.split("\nfn ").next())
            .unwrap();
        assert!(diffuse.contains("return clamp(color, vec3<f32>(0.0), vec3<f32>(1.0));"));
    }

    #[test]
    fn test_shader_has_every_entry_point() {
        for entry in ["vs_main", "vs_flat", "fs_main", "fs_flat"] {
            assert!(SCENE_SHADER_SOURCE.contains(&format!("fn {}(", entry)), "{}", entry);
        }
    }
}
