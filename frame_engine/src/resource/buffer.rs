//! Resource-level vertex/index buffer.
//!
//! Holds the raw bytes uploaded to the GPU together with the element
//! stride, so a mesh can report how many vertices or indices it draws.

use bytemuck::Pod;
use crate::error::{Error, Result};

// ===== BUFFER KIND =====

/// Vertex attributes or triangle indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Vertex,
    Index,
}

// ===== BUFFER =====

/// Typed GPU buffer contents
#[derive(Debug, Clone)]
pub struct Buffer {
    name: String,
    kind: BufferKind,
    data: Vec<u8>,
    stride: usize,
}

impl Buffer {
    /// Build a buffer from a slice of `Pod` elements
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an empty slice or a zero-sized
    /// element type.
    pub fn from_slice<T: Pod>(name: &str, kind: BufferKind, elements: &[T]) -> Result<Self> {
        let stride = std::mem::size_of::<T>();
        if elements.is_empty() || stride == 0 {
            return Err(Error::ConfigurationError(format!(
                "buffer '{}': no data", name)));
        }
        Ok(Self {
            name: name.to_string(),
            kind,
            data: bytemuck::cast_slice(elements).to_vec(),
            stride,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Raw bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of one element in bytes
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of elements (vertices or indices)
    pub fn element_count(&self) -> usize {
        self.data.len() / self.stride
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
