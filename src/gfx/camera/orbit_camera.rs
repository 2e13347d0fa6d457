use cgmath::*;

use crate::gfx::geometry::Bounds;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Camera that turns the scene about a centre point
///
/// The eye looks down -Z from `position`. Rotation is applied to the scene
/// around `center`, horizontally by `yaw` and vertically by `pitch` (both in
/// degrees), so dragging spins the models rather than moving the eye.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub position: Vector3<f32>,
    pub center: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    /// Scene units moved per pixel when panning or zooming
    pub motion_speed: f32,
    /// Degrees turned per pixel when rotating
    pub rotate_speed: f32,
    bounds: Bounds,
}

impl OrbitCamera {
    pub fn new(bounds: Bounds, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vector3::zero(),
            center: Vector3::zero(),
            yaw: 0.0,
            pitch: 0.0,
            aspect,
            fovy: Deg(45.0),
            znear: 0.01,
            zfar: 1000.0,
            motion_speed: 0.0,
            rotate_speed: 0.0,
            bounds,
        };
        camera.init_view_parameters(bounds);
        camera
    }

    /// Frames `bounds`: centres on the box and backs off far enough for the
    /// bounding ball to fit the 45 degree field of view
    pub fn init_view_parameters(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.yaw = 0.0;
        self.pitch = 0.0;

        let ball_r = bounds.diagonal() * 0.707;
        self.center = Vector3::from(bounds.center());
        self.position = Vector3::new(
            self.center.x,
            self.center.y,
            ball_r / Deg(45.0_f32).sin() + self.center.z,
        );

        self.motion_speed = 0.002 * ball_r;
        self.rotate_speed = 0.1;
    }

    pub fn reset_to_default(&mut self) {
        self.init_view_parameters(self.bounds);
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch += delta;
    }

    /// Moves the eye within the view plane
    pub fn pan(&mut self, delta: (f32, f32)) {
        self.position.x += delta.0;
        self.position.y += delta.1;
    }

    /// Moves the eye along the view axis; positive values move away from the scene
    pub fn add_distance(&mut self, delta: f32) {
        self.position.z += delta;
    }

    /// World-to-eye transform
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(-self.position)
            * Matrix4::from_translation(self.center)
            * Matrix4::from_angle_y(Deg(360.0 - self.yaw))
            * Matrix4::from_angle_x(Deg(self.pitch))
            * Matrix4::from_translation(-self.center)
    }

    /// Perspective projection in wgpu clip space (depth in `[0, 1]`)
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}
