//! Resource-level shader program.
//!
//! A Program is a node of the render graph: it samples its input textures
//! and writes its output textures. Shader compilation is done by the
//! graphics backend; the engine only keeps the declaration.

use crate::error::{Error, Result};
use crate::graphics_device::UniformValue;
use crate::render_graph::PassAction;
use super::EntityId;

// ===== DESCRIPTOR =====

/// Program creation descriptor
#[derive(Debug, Clone, Default)]
pub struct ProgramDesc {
    pub name: String,
    /// Textures sampled by the program, in declaration order
    pub inputs: Vec<EntityId>,
    /// Textures written by the program (color attachments, in order)
    pub outputs: Vec<EntityId>,
    pub pass: PassAction,
    /// Material used by full-screen passes
    pub material_id: Option<EntityId>,
    /// Uniforms set every time the program is used
    pub uniforms: Vec<(String, UniformValue)>,
}

// ===== PROGRAM =====

/// Declared shader program
#[derive(Debug, Clone)]
pub struct Program {
    name: String,
    inputs: Vec<EntityId>,
    outputs: Vec<EntityId>,
    pass: PassAction,
    material_id: Option<EntityId>,
    uniforms: Vec<(String, UniformValue)>,
}

impl Program {
    /// Create a program from a descriptor
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the program writes no texture or
    /// lists the same output twice.
    pub fn from_desc(desc: ProgramDesc) -> Result<Self> {
        if desc.outputs.is_empty() {
            return Err(Error::ConfigurationError(format!(
                "program '{}' declares no output texture", desc.name)));
        }
        for (i, output) in desc.outputs.iter().enumerate() {
            if desc.outputs[..i].contains(output) {
                return Err(Error::ConfigurationError(format!(
                    "program '{}' declares output {} twice", desc.name, output)));
            }
        }
        Ok(Self {
            name: desc.name,
            inputs: desc.inputs,
            outputs: desc.outputs,
            pass: desc.pass,
            material_id: desc.material_id,
            uniforms: desc.uniforms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[EntityId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[EntityId] {
        &self.outputs
    }

    pub fn pass(&self) -> PassAction {
        self.pass
    }

    pub fn material_id(&self) -> Option<EntityId> {
        self.material_id
    }

    pub fn set_material_id(&mut self, material_id: Option<EntityId>) {
        self.material_id = material_id;
    }

    pub fn uniforms(&self) -> &[(String, UniformValue)] {
        &self.uniforms
    }

    /// Whether `texture` is one of the outputs
    pub fn writes(&self, texture: EntityId) -> bool {
        self.outputs.contains(&texture)
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
