//! Graphics device module - the boundary to the graphics API

pub mod graphics_device;
pub mod mock_graphics_device;

pub use graphics_device::*;
pub use mock_graphics_device::{DeviceCommand, MockGraphicsDevice};
