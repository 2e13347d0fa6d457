//! Render pipeline management for the scene
//!
//! Every combination of the viewer's render toggles gets its own pipeline.
//! Configurations are registered up front and the pipelines themselves are
//! only created the first time a frame asks for them.

use std::{collections::HashMap, sync::Arc};

use log::{debug, error};
use wgpu::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Rasterisation switches the keyboard controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderToggles {
    pub wireframe: bool,
    pub cull_face: bool,
    pub flat_shading: bool,
}

impl Default for RenderToggles {
    fn default() -> Self {
        Self {
            wireframe: false,
            cull_face: true,
            flat_shading: false,
        }
    }
}

impl RenderToggles {
    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
        debug!("wireframe: {}", self.wireframe);
    }

    pub fn toggle_cull_face(&mut self) {
        self.cull_face = !self.cull_face;
        debug!("back-face culling: {}", self.cull_face);
    }

    pub fn toggle_flat_shading(&mut self) {
        self.flat_shading = !self.flat_shading;
        debug!("flat shading: {}", self.flat_shading);
    }
}

/// How normals are interpolated across a triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shading {
    Smooth,
    Flat,
}

impl Shading {
    pub fn vertex_entry(self) -> &'static str {
        match self {
            Shading::Smooth => "vs_main",
            Shading::Flat => "vs_flat",
        }
    }

    pub fn fragment_entry(self) -> &'static str {
        match self {
            Shading::Smooth => "fs_main",
            Shading::Flat => "fs_flat",
        }
    }
}

/// Identifies one of the scene pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub polygon_mode: PolygonMode,
    pub cull_mode: Option<Face>,
    pub shading: Shading,
}

impl PipelineKey {
    /// Pipeline for `toggles`; wireframe becomes fill without line support
    pub fn new(toggles: &RenderToggles, line_mode_supported: bool) -> Self {
        Self {
            polygon_mode: if toggles.wireframe && line_mode_supported {
                PolygonMode::Line
            } else {
                PolygonMode::Fill
            },
            cull_mode: toggles.cull_face.then_some(Face::Back),
            shading: if toggles.flat_shading {
                Shading::Flat
            } else {
                Shading::Smooth
            },
        }
    }

    /// Every toggle combination
    pub fn all(line_mode_supported: bool) -> Vec<Self> {
        let mut keys = Vec::with_capacity(8);
        for wireframe in [false, true] {
            for cull_face in [true, false] {
                for flat_shading in [false, true] {
                    let toggles = RenderToggles {
                        wireframe,
                        cull_face,
                        flat_shading,
                    };
                    let key = Self::new(&toggles, line_mode_supported);
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
            }
        }
        keys
    }

    pub fn name(&self) -> String {
        let mode = match self.polygon_mode {
            PolygonMode::Line => "line",
            PolygonMode::Point => "point",
            PolygonMode::Fill => "fill",
        };
        let cull = if self.cull_mode.is_some() { "cull" } else { "nocull" };
        let shading = match self.shading {
            Shading::Smooth => "smooth",
            Shading::Flat => "flat",
        };
        format!("scene-{}-{}-{}", mode, cull, shading)
    }
}

impl From<RenderToggles> for PipelineKey {
    fn from(toggles: RenderToggles) -> Self {
        Self::new(&toggles, true)
    }
}

/// Configuration for creating a render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub cull_mode: Option<Face>,
    pub polygon_mode: PolygonMode,
    pub depth_format: Option<TextureFormat>,
    pub color_format: TextureFormat,
}

impl PipelineConfig {
    pub fn new(shader: &str, color_format: TextureFormat) -> Self {
        Self {
            label: "Scene Pipeline".to_string(),
            shader: shader.to_string(),
            vertex_entry: Shading::Smooth.vertex_entry(),
            fragment_entry: Shading::Smooth.fragment_entry(),
            bind_group_layouts: Vec::new(),
            cull_mode: Some(Face::Back),
            polygon_mode: PolygonMode::Fill,
            depth_format: None,
            color_format,
        }
    }

    /// Applies the rasterisation state and shader entry points of `key`
    pub fn for_key(mut self, key: &PipelineKey) -> Self {
        self.label = key.name();
        self.cull_mode = key.cull_mode;
        self.polygon_mode = key.polygon_mode;
        self.vertex_entry = key.shading.vertex_entry();
        self.fragment_entry = key.shading.fragment_entry();
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }
}

/// Manages render pipelines with caching and lazy creation
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
        }
    }

    /// Registers a pipeline configuration without creating it
    ///
    /// Pipelines are created lazily when first requested via `get_pipeline()`.
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
        self.pipelines.remove(name);
    }

    pub fn load_shader(&mut self, name: &str, source: &str) {
        let shader_module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        self.shader_modules.insert(name.to_string(), shader_module);
    }

    /// Gets or creates a pipeline
    pub fn get_pipeline(&mut self, name: &str) -> Option<&RenderPipeline> {
        if !self.pipelines.contains_key(name) {
            let config = self.pipeline_configs.get(name)?;
            match self.create_pipeline_from_config(config) {
                Ok(pipeline) => {
                    debug!("created pipeline '{}'", name);
                    self.pipelines.insert(name.to_string(), pipeline);
                }
                Err(e) => {
                    error!("Failed to create pipeline '{}': {}", name, e);
                    return None;
                }
            }
        }
        self.pipelines.get(name)
    }

    fn create_pipeline_from_config(&self, config: &PipelineConfig) -> Result<RenderPipeline, String> {
        let shader = self
            .shader_modules
            .get(&config.shader)
            .ok_or_else(|| format!("Shader '{}' not found", config.shader))?;

        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", config.label)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

        let depth_stencil = config.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some(config.vertex_entry),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: Some(config.fragment_entry),
                    targets: &[Some(ColorTargetState {
                        format: config.color_format,
                        blend: Some(BlendState::REPLACE),
                        write_mask: ColorWrites::ALL,
                    })],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: config.polygon_mode,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Ok(pipeline)
    }
}
