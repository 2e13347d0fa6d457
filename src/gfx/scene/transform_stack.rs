//! Matrix stack for composing nested transforms
//!
//! Every operation post-multiplies the current matrix, so transforms apply to
//! geometry in the reverse of the order they are issued: the last call acts
//! first on the vertices, exactly like a fixed-function modelview stack.

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};
use log::warn;

#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Matrix4<f32>,
    saved: Vec<Matrix4<f32>>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Starts from the identity matrix
    pub fn new() -> Self {
        Self::with_base(Matrix4::identity())
    }

    pub fn with_base(base: Matrix4<f32>) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> Matrix4<f32> {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Saves the current matrix
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the most recently saved matrix
    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(matrix) => self.current = matrix,
            None => warn!("transform stack underflow; keeping current matrix"),
        }
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.current = self.current * Matrix4::from_translation(Vector3::new(x, y, z));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.current = self.current * Matrix4::from_nonuniform_scale(x, y, z);
    }

    pub fn uniform_scale(&mut self, s: f32) {
        self.current = self.current * Matrix4::from_scale(s);
    }

    /// Rotates by `angle` degrees about `axis`; the axis need not be unit length
    pub fn rotate_deg(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let axis = Vector3::new(x, y, z);
        if axis.magnitude2() == 0.0 {
            return;
        }
        self.current = self.current * Matrix4::from_axis_angle(axis.normalize(), Deg(angle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Transform};

    fn assert_point(actual: Point3<f32>, expected: [f32; 3]) {
        assert!(
            (actual.x - expected[0]).abs() < 1e-5
                && (actual.y - expected[1]).abs() < 1e-5
                && (actual.z - expected[2]).abs() < 1e-5,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_push_pop_restores() {
        let mut stack = TransformStack::new();
        stack.translate(1.0, 2.0, 3.0);
        let before = stack.current();

        stack.push();
        stack.uniform_scale(4.0);
        stack.rotate_deg(30.0, 0.0, 1.0, 0.0);
        assert_eq!(stack.depth(), 1);
        stack.pop();

        assert_eq!(stack.current(), before);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_last_operation_applies_first() {
        let mut stack = TransformStack::new();
        stack.translate(1.0, 0.0, 0.0);
        stack.uniform_scale(2.0);
        // Scale first, then translate
        let p = stack.current().transform_point(Point3::new(1.0, 1.0, 0.0));
        assert_point(p, [3.0, 2.0, 0.0]);
    }

    #[test]
    fn test_rotation_axis_is_normalised() {
        let mut stack = TransformStack::new();
        stack.rotate_deg(90.0, 0.0, 5.0, 0.0);
        let p = stack.current().transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_point(p, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_zero_axis_rotation_is_skipped() {
        let mut stack = TransformStack::new();
        stack.rotate_deg(45.0, 0.0, 0.0, 0.0);
        assert_eq!(stack.current(), Matrix4::identity());
    }

    #[test]
    fn test_pop_on_empty_stack_keeps_matrix() {
        let mut stack = TransformStack::new();
        stack.translate(0.0, 1.0, 0.0);
        let before = stack.current();
        stack.pop();
        assert_eq!(stack.current(), before);
    }
}
