use std::collections::HashMap;

use anyhow::Context;
use cgmath::Matrix4;
use log::{debug, info};
use wgpu::Device;

use crate::{
    config::ViewerConfig,
    gfx::{
        camera::{CameraController, CameraManager, OrbitCamera},
        geometry::generate_sphere,
        rendering::pipeline_manager::RenderToggles,
        resources::{
            global_bindings::{DirectionalLight, LIGHT_COUNT},
            material::MaterialState,
        },
    },
    input::ViewerAction,
    wgpu_utils::binding_builder::BindGroupLayoutWithDesc,
};

use super::{
    animation::Animation,
    hierarchy::{compose, Model, Placement, EYE_LIGHT, SUN_LIGHTS, SUN_SPHERE},
    mesh::{load_obj, MeshData},
    object::{Mesh, Object},
};

/// The animated scene: shared meshes, one object per placement, camera and lights
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub animation: Animation,
    pub toggles: RenderToggles,
    meshes: HashMap<Model, Mesh>,
    material_state: MaterialState,
    lights: [DirectionalLight; LIGHT_COUNT],
}

impl Scene {
    /// Loads every model file once from the configured asset directory
    pub fn load(config: &ViewerConfig) -> anyhow::Result<Self> {
        let mut meshes = HashMap::new();

        for model in Model::ALL {
            let data = match model.file_name() {
                Some(file_name) => {
                    let path = config.asset_dir.join(file_name);
                    load_obj(&path)
                        .with_context(|| format!("failed to load model {}", path.display()))?
                }
                None => {
                    let (slices, stacks, radius) = SUN_SPHERE;
                    MeshData::from_geometry(generate_sphere(slices, stacks, radius))
                }
            };
            meshes.insert(model, data);
        }

        let aspect = config.window_width.max(1) as f32 / config.window_height.max(1) as f32;
        let camera = OrbitCamera::new(config.scene_bounds, aspect);

        Ok(Self::from_meshes(
            meshes,
            CameraManager::new(camera, CameraController::new()),
            Animation::new(config.animation_fps),
        ))
    }

    /// Builds the scene from already loaded meshes
    ///
    /// Objects whose model has no mesh are kept but never drawn.
    pub fn from_meshes(
        meshes: HashMap<Model, MeshData>,
        camera_manager: CameraManager,
        animation: Animation,
    ) -> Self {
        let meshes: HashMap<Model, Mesh> = meshes
            .iter()
            .map(|(&model, data)| (model, Mesh::new(data)))
            .collect();

        // A scratch material state keeps the first rendered frame on GL defaults
        let placements = compose(&animation.angles, &mut MaterialState::default());
        let objects = placements
            .iter()
            .map(|placement| Object::new(placement.name, placement.model))
            .collect();

        let mut scene = Self {
            camera_manager,
            objects,
            animation,
            toggles: RenderToggles::default(),
            meshes,
            material_state: MaterialState::default(),
            lights: [SUN_LIGHTS[0], SUN_LIGHTS[1], EYE_LIGHT],
        };
        scene.place(&placements);
        scene
    }

    /// Advances the animation by `dt_seconds` and recomputes every transform
    pub fn update(&mut self, dt_seconds: f32) {
        self.animation.advance(dt_seconds);

        let placements = compose(&self.animation.angles, &mut self.material_state);
        self.place(&placements);
    }

    /// Sets object transforms, materials and lights from one composition
    fn place(&mut self, placements: &[Placement]) {
        let view = self.camera_manager.view_matrix();

        for (object, placement) in self.objects.iter_mut().zip(placements) {
            object.model_view = view * placement.transform;
            object.material = placement.material;
        }

        // Two lights ride on the sun, the third stays put relative to the eye
        let sun: Matrix4<f32> = placements
            .iter()
            .find(|p| p.model == Model::Sun)
            .map_or(view, |p| view * p.transform);
        self.lights = [
            SUN_LIGHTS[0].transformed(sun),
            SUN_LIGHTS[1].transformed(sun),
            EYE_LIGHT,
        ];
    }

    /// Applies a keyboard action; returns true when the viewer should quit
    pub fn apply(&mut self, action: ViewerAction) -> bool {
        match action {
            ViewerAction::Quit => return true,
            ViewerAction::ResetView => {
                self.camera_manager.reset();
                debug!("view reset");
            }
            ViewerAction::ToggleWireframe => self.toggles.toggle_wireframe(),
            ViewerAction::ToggleCullFace => self.toggles.toggle_cull_face(),
            ViewerAction::ToggleFlatShading => self.toggles.toggle_flat_shading(),
            ViewerAction::ToggleAnimation => self.animation.toggle(),
            ViewerAction::SpeedUp => self.animation.speed_up(),
            ViewerAction::SlowDown => self.animation.slow_down(),
        }
        false
    }

    /// Forwards mouse input to the camera; returns true if the view changed
    pub fn process_window_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.camera_manager.process_event(event)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera_manager.camera.resize_projection(width, height);
    }

    pub fn mesh(&self, model: Model) -> Option<&Mesh> {
        self.meshes.get(&model)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.camera_manager.projection_matrix()
    }

    /// Light directions in eye space for the current frame
    pub fn lights(&self) -> &[DirectionalLight; LIGHT_COUNT] {
        &self.lights
    }

    /// Initializes GPU resources for all meshes and objects
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, layout: &BindGroupLayoutWithDesc) {
        for mesh in self.meshes.values_mut() {
            mesh.init_gpu_resources(device);
        }
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, layout);
        }

        let stats = self.statistics();
        info!(
            "Uploaded {} meshes for {} objects ({} triangles drawn per frame)",
            stats.mesh_count, stats.object_count, stats.total_triangles
        );
    }

    /// Syncs object transforms and materials to the GPU
    pub fn update_gpu_resources(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            object.update_gpu_resources(queue);
        }
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let drawn = self.objects.iter().filter_map(|obj| self.meshes.get(&obj.model));

        let (total_vertices, total_triangles) = drawn.fold((0, 0), |(v, t), mesh| {
            (v + mesh.vertex_count(), t + mesh.triangle_count())
        });

        SceneStatistics {
            object_count: self.objects.len(),
            mesh_count: self.meshes.len(),
            total_vertices,
            total_triangles,
        }
    }
}

/// Scene statistics for debugging and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub mesh_count: usize,
    /// Summed over drawn objects, so shared meshes count once per use
    pub total_vertices: usize,
    pub total_triangles: usize,
}
