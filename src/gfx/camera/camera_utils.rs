use cgmath::Matrix4;
use winit::event::WindowEvent;

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Returns true if the camera moved
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    pub fn reset(&mut self) {
        self.camera.reset_to_default();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.camera.projection_matrix()
    }
}
