//! Camera resource.
//!
//! Stored in the resource manager like any other entity; the renderer
//! resolves the default camera by name at startup and derives the
//! projection and view matrices published to every draw.

use glam::{Mat4, Vec3};

/// Perspective camera pose and lens
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    fov_degrees: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z, Vec3::Y)
    }
}

impl Camera {
    /// Camera at `position` looking along `front`, 65° field of view,
    /// clip planes 0.1 .. 1000
    pub fn new(position: Vec3, front: Vec3, up: Vec3) -> Self {
        Self {
            position,
            front: front.normalize_or_zero(),
            up: up.normalize_or_zero(),
            fov_degrees: 65.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn with_lens(mut self, fov_degrees: f32, near: f32, far: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self.near = near;
        self.far = far;
        self
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Right vector (front × up)
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize_or_zero()
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the viewing direction; `up` is re-orthogonalized against it
    pub fn set_front(&mut self, front: Vec3) {
        self.front = front.normalize_or_zero();
        let right = self.front.cross(self.up);
        if right.length_squared() > f32::EPSILON {
            self.up = right.cross(self.front).normalize();
        }
    }

    // ===== MATRICES =====

    /// Perspective projection for a target of `size` pixels
    pub fn compute_projection(&self, size: (u32, u32)) -> Mat4 {
        let aspect = size.0 as f32 / size.1.max(1) as f32;
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// View matrix looking from `position` along `front`
    pub fn compute_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
