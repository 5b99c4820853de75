//! Resource-level material type.
//!
//! A Material maps texture ids to the uniform names a shader samples them
//! by, carries named parameters, and owns the slot table used to bind its
//! textures to hardware texture units for the duration of one draw.
//!
//! Architecture:
//! - Program reference: optional; a material naming a program only draws
//!   in that program's scene passes
//! - Textures: texture id → uniform name, in insertion order
//! - Parameters: named uniform values (roughness, tint, ...)
//! - Slots: fixed-capacity table, lowest free unit first, no eviction

use rustc_hash::FxHashMap;
use crate::config::MAX_TEXTURE_SLOTS;
use crate::error::{Error, Result};
use crate::graphics_device::UniformValue;
use crate::utils::SlotTable;
use super::EntityId;

// ===== TEXTURE BINDER =====

/// Backing store that makes a texture visible on a hardware unit
///
/// Supplied by the caller of `enable_texture_id` / `disable_texture_id`
/// (the renderer wraps its graphics device).
pub trait TextureBinder {
    fn bind_texture(&mut self, texture: EntityId, slot: u32) -> Result<()>;
    fn unbind_texture(&mut self, texture: EntityId, slot: u32) -> Result<()>;
}

// ===== MATERIAL =====

/// Surface description
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    program_id: Option<EntityId>,
    textures: Vec<(EntityId, String)>,
    texture_index: FxHashMap<EntityId, usize>,
    params: Vec<(String, UniformValue)>,
    slots: SlotTable<EntityId>,
}

impl Material {
    /// Create an empty material with the default slot capacity
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            program_id: None,
            textures: Vec::new(),
            texture_index: FxHashMap::default(),
            params: Vec::new(),
            slots: SlotTable::new(MAX_TEXTURE_SLOTS),
        }
    }

    /// Create an empty material with `capacity` texture slots
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `capacity` is 0 or above
    /// `MAX_TEXTURE_SLOTS`.
    pub fn with_slot_capacity(name: &str, capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > MAX_TEXTURE_SLOTS {
            return Err(Error::ConfigurationError(format!(
                "material '{}': slot capacity {} outside 1..={}",
                name, capacity, MAX_TEXTURE_SLOTS)));
        }
        let mut material = Self::new(name);
        material.slots = SlotTable::new(capacity);
        Ok(material)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program_id(&self) -> Option<EntityId> {
        self.program_id
    }

    pub fn set_program_id(&mut self, program_id: Option<EntityId>) {
        self.program_id = program_id;
    }

    /// Whether this material draws in scene passes of `program`
    pub fn accepts_program(&self, program: EntityId) -> bool {
        self.program_id.map_or(true, |own| own == program)
    }

    // ===== TEXTURES =====

    /// Reference `texture` under uniform name `uniform`
    ///
    /// Re-adding a texture renames it.
    pub fn add_texture_id(&mut self, texture: EntityId, uniform: &str) {
        match self.texture_index.get(&texture) {
            Some(&index) => self.textures[index].1 = uniform.to_string(),
            None => {
                self.texture_index.insert(texture, self.textures.len());
                self.textures.push((texture, uniform.to_string()));
            }
        }
    }

    /// Stop referencing `texture`
    ///
    /// # Errors
    ///
    /// - `NotFound` if the material does not reference it
    /// - `AlreadyBound` if it currently occupies a slot
    pub fn remove_texture_id(&mut self, texture: EntityId) -> Result<()> {
        let index = *self.texture_index.get(&texture).ok_or_else(|| Error::NotFound(format!(
            "material '{}' does not reference texture {}", self.name, texture)))?;
        if let Some(slot) = self.slots.slot_of(texture) {
            return Err(Error::AlreadyBound(format!(
                "material '{}': texture {} still bound to slot {}", self.name, texture, slot)));
        }
        self.textures.remove(index);
        self.texture_index = self.textures
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (*id, i))
            .collect();
        Ok(())
    }

    pub fn has_texture_id(&self, texture: EntityId) -> bool {
        self.texture_index.contains_key(&texture)
    }

    /// Uniform name of `texture`
    pub fn texture_uniform(&self, texture: EntityId) -> Option<&str> {
        self.texture_index.get(&texture).map(|&i| self.textures[i].1.as_str())
    }

    /// Referenced textures, in insertion order
    pub fn texture_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.textures.iter().map(|(id, _)| *id)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    // ===== PARAMETERS =====

    /// Set parameter `name`, replacing any previous value
    pub fn set_param(&mut self, name: &str, value: UniformValue) {
        match self.params.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.params.push((name.to_string(), value)),
        }
    }

    pub fn param(&self, name: &str) -> Option<UniformValue> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn params(&self) -> &[(String, UniformValue)] {
        &self.params
    }

    // ===== SLOTS =====

    /// Bind `texture` to the lowest free slot
    ///
    /// Returns the texture's uniform name and the slot it now occupies.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the material does not reference `texture`
    /// - `AlreadyBound` if `texture` already occupies a slot
    /// - `NoFreeSlots` if every slot is occupied
    /// - any error of the binder (the slot is released again)
    pub fn enable_texture_id(
        &mut self,
        texture: EntityId,
        binder: &mut dyn TextureBinder,
    ) -> Result<(String, u32)> {
        let uniform = self.texture_uniform(texture)
            .ok_or_else(|| Error::NotFound(format!(
                "material '{}' does not reference texture {}", self.name, texture)))?
            .to_string();
        let slot = self.slots.acquire(texture)?;
        if let Err(err) = binder.bind_texture(texture, slot) {
            self.slots.release(texture)?;
            return Err(err);
        }
        Ok((uniform, slot))
    }

    /// Unbind `texture` and free its slot
    ///
    /// # Errors
    ///
    /// Returns `NotBound` if `texture` occupies no slot. The slot is freed
    /// even if the binder fails.
    pub fn disable_texture_id(
        &mut self,
        texture: EntityId,
        binder: &mut dyn TextureBinder,
    ) -> Result<()> {
        let slot = self.slots.release(texture)?;
        binder.unbind_texture(texture, slot)
    }

    /// Unbind every occupied slot
    ///
    /// The table is always empty afterwards; the first binder error, if
    /// any, is returned.
    pub fn disable_all(&mut self, binder: &mut dyn TextureBinder) -> Result<()> {
        let occupied: Vec<(u32, EntityId)> = self.slots.occupied().collect();
        let mut first_error = None;
        for (slot, texture) in occupied {
            self.slots.release(texture)?;
            if let Err(err) = binder.unbind_texture(texture, slot) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Slot currently held by `texture`
    pub fn slot_of(&self, texture: EntityId) -> Option<u32> {
        self.slots.slot_of(texture)
    }

    /// Texture currently held by `slot`
    pub fn texture_in_slot(&self, slot: u32) -> Option<EntityId> {
        self.slots.occupant(slot)
    }

    pub fn bound_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot_capacity(&self) -> usize {
        self.slots.capacity()
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
