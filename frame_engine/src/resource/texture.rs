//! Resource-level texture type.
//!
//! A Texture describes an image the render graph reads (program inputs)
//! or writes (program outputs). Pixel data is optional: render targets
//! are usually created empty and filled by the program producing them.
//!
//! Architecture:
//! - Kind: 2D or cube map (6 square faces)
//! - Format: pixel layout, gives the byte size of one pixel
//! - Data: optional pixels, one buffer per face
//! - Mipmaps: full chain computed from the size when enabled

use bytemuck::Pod;
use crate::error::{Error, Result};

// ===== TEXTURE KIND =====

/// Texture dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Texture2D,
    CubeMap,
}

impl TextureKind {
    /// Number of faces (1 for 2D, 6 for cube maps)
    pub fn face_count(&self) -> u32 {
        match self {
            TextureKind::Texture2D => 1,
            TextureKind::CubeMap => 6,
        }
    }
}

// ===== PIXEL FORMAT =====

/// Pixel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum PixelFormat {
    R8_UNORM,
    R8G8B8_UNORM,
    R8G8B8A8_UNORM,
    R16G16B16A16_SFLOAT,
    R32G32B32A32_SFLOAT,
    D32_SFLOAT,
}

impl PixelFormat {
    /// Size of one pixel in bytes
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::R8_UNORM => 1,
            PixelFormat::R8G8B8_UNORM => 3,
            PixelFormat::R8G8B8A8_UNORM => 4,
            PixelFormat::R16G16B16A16_SFLOAT => 8,
            PixelFormat::R32G32B32A32_SFLOAT => 16,
            PixelFormat::D32_SFLOAT => 4,
        }
    }
}

// ===== TEXTURE DATA =====

/// Initial pixel data
#[derive(Debug, Clone, PartialEq)]
pub enum TextureData {
    /// Pixels of a 2D texture
    Single(Vec<u8>),
    /// Pixels of each cube face, in +X, -X, +Y, -Y, +Z, -Z order
    CubeFaces(Vec<Vec<u8>>),
}

// ===== DESCRIPTOR =====

/// Texture creation descriptor
#[derive(Debug, Clone)]
pub struct TextureDesc {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub kind: TextureKind,
    pub format: PixelFormat,
    pub data: Option<TextureData>,
    pub mipmap: bool,
}

impl TextureDesc {
    /// Empty 2D RGBA8 texture (typical render target)
    pub fn new_2d(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            kind: TextureKind::Texture2D,
            format: PixelFormat::R8G8B8A8_UNORM,
            data: None,
            mipmap: false,
        }
    }

    /// Empty RGBA16F cube map with square faces
    pub fn new_cube_map(name: &str, size: u32) -> Self {
        Self {
            name: name.to_string(),
            width: size,
            height: size,
            kind: TextureKind::CubeMap,
            format: PixelFormat::R16G16B16A16_SFLOAT,
            data: None,
            mipmap: false,
        }
    }
}

// ===== TEXTURE =====

/// Texture resource
#[derive(Debug, Clone)]
pub struct Texture {
    name: String,
    width: u32,
    height: u32,
    kind: TextureKind,
    format: PixelFormat,
    data: Option<TextureData>,
    mip_levels: u32,
}

impl Texture {
    /// Create a texture from a descriptor
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - a dimension is zero
    /// - a cube map has non-square faces
    /// - the data variant does not match the kind
    /// - a data buffer does not hold exactly width × height pixels
    pub fn from_desc(desc: TextureDesc) -> Result<Self> {
        if desc.width == 0 || desc.height == 0 {
            return Err(Error::ConfigurationError(format!(
                "texture '{}': malformed size ({}, {})", desc.name, desc.width, desc.height)));
        }
        if desc.kind == TextureKind::CubeMap && desc.width != desc.height {
            return Err(Error::ConfigurationError(format!(
                "cube map '{}': faces must be square, got ({}, {})",
                desc.name, desc.width, desc.height)));
        }

        let expected = desc.width as usize * desc.height as usize * desc.format.bytes_per_pixel();
        match (&desc.data, desc.kind) {
            (None, _) => {}
            (Some(TextureData::Single(bytes)), TextureKind::Texture2D) => {
                check_data_len(&desc.name, bytes.len(), expected)?;
            }
            (Some(TextureData::CubeFaces(faces)), TextureKind::CubeMap) => {
                if faces.len() != 6 {
                    return Err(Error::ConfigurationError(format!(
                        "cube map '{}': expected 6 faces, got {}", desc.name, faces.len())));
                }
                for face in faces {
                    check_data_len(&desc.name, face.len(), expected)?;
                }
            }
            (Some(_), kind) => {
                return Err(Error::ConfigurationError(format!(
                    "texture '{}': data does not match kind {:?}", desc.name, kind)));
            }
        }

        let mip_levels = if desc.mipmap {
            32 - desc.width.max(desc.height).leading_zeros()
        } else {
            1
        };

        Ok(Self {
            name: desc.name,
            width: desc.width,
            height: desc.height,
            kind: desc.kind,
            format: desc.format,
            data: desc.data,
            mip_levels,
        })
    }

    /// Create a 2D texture from typed pixels (e.g. `[u8; 4]`, `[f32; 4]`)
    pub fn from_pixels<T: Pod>(
        name: &str,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[T],
    ) -> Result<Self> {
        Self::from_desc(TextureDesc {
            name: name.to_string(),
            width,
            height,
            kind: TextureKind::Texture2D,
            format,
            data: Some(TextureData::Single(bytemuck::cast_slice(pixels).to_vec())),
            mipmap: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// (width, height) at mip level 0
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// (width, height) at `level`, halved per level, never below 1
    pub fn mip_size(&self, level: u32) -> Option<(u32, u32)> {
        if level >= self.mip_levels {
            return None;
        }
        Some(((self.width >> level).max(1), (self.height >> level).max(1)))
    }

    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    pub fn is_cube_map(&self) -> bool {
        self.kind == TextureKind::CubeMap
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> Option<&TextureData> {
        self.data.as_ref()
    }

    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }
}

fn check_data_len(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::ConfigurationError(format!(
            "texture '{}': data size {} does not match expected {}", name, actual, expected)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
