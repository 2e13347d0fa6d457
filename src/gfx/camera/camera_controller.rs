use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::orbit_camera::OrbitCamera;

/// Pixels of vertical drag one wheel line stands for
const LINE_SCROLL_PIXELS: f32 = 10.0;

/// Turns mouse input on the window into camera motion
///
/// Left drag rotates, middle drag pans and right drag zooms. Only the button
/// pressed last counts, and releasing any button ends the drag.
#[derive(Debug, Default)]
pub struct CameraController {
    active_button: Option<MouseButton>,
    cursor: Option<PhysicalPosition<f64>>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the event changed the camera
    pub fn process_events(&mut self, event: &WindowEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.button_changed(*button, *state);
                false
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position, camera),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => {
                        *y as f32 / LINE_SCROLL_PIXELS
                    }
                };
                self.scroll(lines, camera);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            _ => false,
        }
    }

    pub fn button_changed(&mut self, button: MouseButton, state: ElementState) {
        self.active_button = match state {
            ElementState::Pressed => Some(button),
            ElementState::Released => None,
        };
    }

    /// Applies the drag since the previous cursor position
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>, camera: &mut OrbitCamera) -> bool {
        let previous = self.cursor.replace(position);
        let (Some(button), Some(previous)) = (self.active_button, previous) else {
            return false;
        };

        let dx = (position.x - previous.x) as f32;
        let dy = (position.y - previous.y) as f32;

        match button {
            MouseButton::Left => {
                camera.add_yaw(-dx * camera.rotate_speed);
                camera.add_pitch(dy * camera.rotate_speed);
            }
            MouseButton::Middle => {
                camera.pan((-dx * camera.motion_speed, dy * camera.motion_speed));
            }
            MouseButton::Right => {
                camera.add_distance(-dy * camera.motion_speed);
            }
            _ => return false,
        }
        true
    }

    /// Wheel up moves toward the scene
    pub fn scroll(&mut self, lines: f32, camera: &mut OrbitCamera) {
        camera.add_distance(-lines * LINE_SCROLL_PIXELS * camera.motion_speed);
    }

    pub fn is_dragging(&self) -> bool {
        self.active_button.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Bounds;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Bounds::default(), 1.0)
    }

    fn drag(controller: &mut CameraController, camera: &mut OrbitCamera, button: MouseButton, to: (f64, f64)) {
        controller.cursor_moved(PhysicalPosition::new(100.0, 100.0), camera);
        controller.button_changed(button, ElementState::Pressed);
        controller.cursor_moved(PhysicalPosition::new(to.0, to.1), camera);
        controller.button_changed(button, ElementState::Released);
    }

    #[test]
    fn test_left_drag_rotates() {
        let mut camera = camera();
        let mut controller = CameraController::new();
        drag(&mut controller, &mut camera, MouseButton::Left, (110.0, 120.0));

        assert!((camera.yaw + 1.0).abs() < 1e-5);
        assert!((camera.pitch - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_middle_drag_pans() {
        let mut camera = camera();
        let start = camera.position;
        let mut controller = CameraController::new();
        drag(&mut controller, &mut camera, MouseButton::Middle, (110.0, 120.0));

        let ms = camera.motion_speed;
        assert!((camera.position.x - (start.x - 10.0 * ms)).abs() < 1e-5);
        assert!((camera.position.y - (start.y + 20.0 * ms)).abs() < 1e-5);
        assert_eq!(camera.position.z, start.z);
    }

    #[test]
    fn test_right_drag_zooms() {
        let mut camera = camera();
        let start = camera.position.z;
        let mut controller = CameraController::new();
        drag(&mut controller, &mut camera, MouseButton::Right, (100.0, 150.0));

        assert!((camera.position.z - (start - 50.0 * camera.motion_speed)).abs() < 1e-5);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut camera = camera();
        let before = camera.view_matrix();
        let mut controller = CameraController::new();

        assert!(!controller.cursor_moved(PhysicalPosition::new(0.0, 0.0), &mut camera));
        assert!(!controller.cursor_moved(PhysicalPosition::new(50.0, 50.0), &mut camera));
        assert_eq!(camera.view_matrix(), before);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_starts_from_press_position() {
        let mut camera = camera();
        let mut controller = CameraController::new();
        controller.cursor_moved(PhysicalPosition::new(0.0, 0.0), &mut camera);
        controller.cursor_moved(PhysicalPosition::new(200.0, 0.0), &mut camera);
        controller.button_changed(MouseButton::Left, ElementState::Pressed);
        controller.cursor_moved(PhysicalPosition::new(210.0, 0.0), &mut camera);

        // Only the 10 pixels after the press count
        assert!((camera.yaw + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scroll_moves_toward_scene() {
        let mut camera = camera();
        let start = camera.position.z;
        let mut controller = CameraController::new();
        controller.scroll(1.0, &mut camera);
        assert!(camera.position.z < start);
    }
}
