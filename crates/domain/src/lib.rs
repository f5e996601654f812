//! Grimoire domain: spell slot progression and the slot state machine.
//!
//! - `value_objects` - canonical class/level membership
//! - `game_systems` - caster tables and multiclass rules
//! - `entities` - slot pools with consume/rest/recalculate transitions

pub mod entities;
pub mod error;
pub mod game_systems;
pub mod value_objects;

pub use entities::{
    CastOption, CastRejection, PactSlots, SlotChoice, SlotSpend, SpellSlotPool, SpellSlots,
};

pub use error::DomainError;

// Re-export game system traits and types
pub use game_systems::{
    full_caster_slots, half_caster_slots, multiclass_caster_level, pact_magic, CasterType,
    Dnd5eSystem, GameSystemRegistry, PactMagic, RestType, SlotProgression, SpellAccess,
    SpellcastingSystem, SPELL_LEVELS,
};

pub use value_objects::{ClassId, ClassLevels, ClassMembership, MAX_CLASS_LEVEL};
