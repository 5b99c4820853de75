//! Renderer configuration
//!
//! Passive settings handed to `Renderer::new()`. Validation happens once,
//! at construction, and reports `Error::ConfigurationError`.

use crate::error::{Error, Result};

/// Hardware texture-unit limit: no material may bind more textures at once slots than this
pub const MAX_TEXTURE_SLOTS: usize = 32;

/// Renderer settings
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Size of the default frame (width, height) in pixels
    pub size: (u32, u32),
    /// Clear color used by node clears (RGBA)
    pub clear_color: [f32; 4],
    /// Texture units exposed by the device; no material may bind more textures at once
    pub texture_slot_capacity: usize,
    /// Depth testing enabled on the device at startup
    pub depth_test: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            size: (640, 480),
            clear_color: [0.2, 0.0, 0.2, 1.0],
            texture_slot_capacity: MAX_TEXTURE_SLOTS,
            depth_test: true,
        }
    }
}

impl RendererConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_texture_slot_capacity(mut self, capacity: usize) -> Self {
        self.texture_slot_capacity = capacity;
        self
    }

    pub fn with_depth_test(mut self, enable: bool) -> Self {
        self.depth_test = enable;
        self
    }

    /// Aspect ratio (width / height) of the default frame
    pub fn aspect_ratio(&self) -> f32 {
        self.size.0 as f32 / self.size.1 as f32
    }

    /// Check the settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - a dimension of `size` is zero
    /// - `texture_slot_capacity` is zero or above `MAX_TEXTURE_SLOTS`
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(Error::ConfigurationError(format!(
                "malformed size ({}, {})", self.size.0, self.size.1)));
        }
        if self.texture_slot_capacity == 0 || self.texture_slot_capacity > MAX_TEXTURE_SLOTS {
            return Err(Error::ConfigurationError(format!(
                "texture slot capacity {} outside 1..={}",
                self.texture_slot_capacity, MAX_TEXTURE_SLOTS)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
