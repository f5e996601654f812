//! Game system traits for spellcasting mechanics.
//!
//! These traits define the interface for system-specific slot progression,
//! allowing a ruleset to plug its own tables in behind a common API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::value_objects::{ClassId, ClassLevels};

/// Number of standard spell levels (1-9).
pub const SPELL_LEVELS: usize = 9;

/// For systems with spellcasting.
pub trait SpellcastingSystem: Send + Sync {
    /// Unique identifier for this game system (e.g., "dnd5e").
    fn system_id(&self) -> &str;

    /// Resolve a class name or alias through the static alias table.
    fn resolve_class_alias(&self, name: &str) -> Option<ClassId>;

    /// Get the caster type for a class (if it has spellcasting).
    fn caster_type(&self, class: &str) -> Option<CasterType>;

    /// Get the spellcasting ability for a class.
    fn spellcasting_stat(&self, class: &str) -> Option<&str>;

    /// Highest spell level a single class can cast at a given class level.
    ///
    /// `None` for classes without spellcasting.
    fn max_spell_level(&self, class: &str, level: u8) -> Option<u8>;

    /// Derive standard and pact slot maxima for a full class/level set.
    fn slot_progression(&self, classes: &ClassLevels) -> SlotProgression;

    /// Which classes give access to the compendium, and up to what level.
    fn spell_access(&self, classes: &ClassLevels) -> SpellAccess {
        let mut class_ids = BTreeSet::new();
        let mut max_spell_level = None;
        for (class_id, level) in classes.iter() {
            class_ids.insert(class_id.clone());
            if let Some(max) = self.max_spell_level(class_id.as_str(), level) {
                max_spell_level = Some(max_spell_level.map_or(max, |m: u8| m.max(max)));
            }
        }
        SpellAccess {
            class_ids,
            max_spell_level,
        }
    }
}

/// Type of spellcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterType {
    /// Full caster (Wizard, Cleric, Druid, Sorcerer, Bard)
    Full,
    /// Half caster (Paladin, Ranger)
    Half,
    /// Pact magic (Warlock)
    Pact,
}

/// Rest type for resource recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestType {
    /// Short rest (typically 1 hour)
    Short,
    /// Long rest (typically 8 hours)
    Long,
}

impl fmt::Display for RestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestType::Short => write!(f, "short"),
            RestType::Long => write!(f, "long"),
        }
    }
}

/// Pact magic: a handful of slots that all share one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PactMagic {
    pub slot_count: u8,
    pub slot_level: u8,
}

/// Slot maxima derived from a character's classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotProgression {
    /// Index 0 is spell level 1.
    pub standard: [u8; SPELL_LEVELS],
    pub pact: PactMagic,
}

impl SlotProgression {
    /// Maximum standard slots at a spell level (1-9); 0 outside that range.
    pub fn standard_at(&self, spell_level: u8) -> u8 {
        match spell_level {
            1..=9 => self.standard[usize::from(spell_level - 1)],
            _ => 0,
        }
    }

    /// True when neither pool has any slot.
    pub fn is_empty(&self) -> bool {
        self.standard.iter().all(|&n| n == 0) && self.pact.slot_count == 0
    }
}

/// Compendium access derived from a character's classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellAccess {
    /// Classes whose spell lists apply.
    pub class_ids: BTreeSet<ClassId>,
    /// Highest castable spell level; `None` when no class casts.
    pub max_spell_level: Option<u8>,
}
