//! Per-draw global uniforms.

use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::graphics_device::UniformValue;

/// Values published to every program before each draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    /// Seconds since the first frame
    pub time_s: f32,
    /// Seconds since the previous frame
    pub delta_time_s: f32,
    pub camera_position: Vec3,
    pub camera_front: Vec3,
    pub camera_right: Vec3,
    pub camera_up: Vec3,
}

impl FrameUniforms {
    /// Globals for `camera`, identity model
    pub fn new(camera: &Camera, projection: Mat4, view: Mat4, time_s: f32, delta_time_s: f32) -> Self {
        Self {
            projection,
            view,
            model: Mat4::IDENTITY,
            time_s,
            delta_time_s,
            camera_position: camera.position(),
            camera_front: camera.front(),
            camera_right: camera.right(),
            camera_up: camera.up(),
        }
    }

    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model;
        self
    }

    pub fn with_projection_view(mut self, projection: Mat4, view: Mat4) -> Self {
        self.projection = projection;
        self.view = view;
        self
    }

    /// (uniform name, value) pairs, in publication order
    pub fn named_values(&self) -> [(&'static str, UniformValue); 9] {
        [
            ("projection", UniformValue::Mat4(self.projection)),
            ("view", UniformValue::Mat4(self.view)),
            ("model", UniformValue::Mat4(self.model)),
            ("time_s", UniformValue::Float(self.time_s)),
            ("delta_time_s", UniformValue::Float(self.delta_time_s)),
            ("camera_position", UniformValue::Vec3(self.camera_position)),
            ("camera_front", UniformValue::Vec3(self.camera_front)),
            ("camera_right", UniformValue::Vec3(self.camera_right)),
            ("camera_up", UniformValue::Vec3(self.camera_up)),
        ]
    }
}
