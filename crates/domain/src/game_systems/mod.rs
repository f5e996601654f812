//! Game system implementations for spellcasting.
//!
//! This module provides system-specific slot progression and class rules.
//! Each system implements the core traits defined in `traits.rs`.
//!
//! # Supported Systems
//!
//! - D&D 5th Edition (`dnd5e`)

mod dnd5e;
mod traits;

// D&D 5e exports
pub use dnd5e::{
    full_caster_slots, half_caster_slots, multiclass_caster_level, pact_magic, Dnd5eSystem,
};

// Core traits
pub use traits::{
    CasterType, PactMagic, RestType, SlotProgression, SpellAccess, SpellcastingSystem,
    SPELL_LEVELS,
};

use std::sync::Arc;

/// Registry of available game systems.
pub struct GameSystemRegistry {
    systems: Vec<Arc<dyn SpellcastingSystem>>,
}

impl Default for GameSystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystemRegistry {
    /// Create a new registry with all built-in game systems.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(Dnd5eSystem::new()));
        registry
    }

    /// Create an empty registry without built-in systems.
    pub fn empty() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Register a game system.
    pub fn register(&mut self, system: Arc<dyn SpellcastingSystem>) {
        self.systems.push(system);
    }

    /// Get a game system by its ID.
    pub fn get(&self, system_id: &str) -> Option<Arc<dyn SpellcastingSystem>> {
        self.systems
            .iter()
            .find(|s| s.system_id() == system_id)
            .cloned()
    }

    /// List all registered system IDs.
    pub fn list_systems(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.system_id()).collect()
    }
}
