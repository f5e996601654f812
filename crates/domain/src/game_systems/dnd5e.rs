//! D&D 5th Edition spellcasting rules.
//!
//! Slot progression tables for full, half and pact casters, plus the
//! multiclass rule that folds several casting classes into one shared pool.

use super::traits::{
    CasterType, PactMagic, SlotProgression, SpellcastingSystem, SPELL_LEVELS,
};
use crate::value_objects::{ClassId, ClassLevels, MAX_CLASS_LEVEL};

/// D&D 5th Edition game system.
pub struct Dnd5eSystem;

impl Default for Dnd5eSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Dnd5eSystem {
    /// Create a new D&D 5e system instance.
    pub fn new() -> Self {
        Self
    }
}

/// Static alias table: canonical ids plus English and Italian display names.
const CLASS_ALIASES: &[(&str, &str)] = &[
    ("barbarian", "barbarian"),
    ("barbaro", "barbarian"),
    ("bard", "bard"),
    ("bardo", "bard"),
    ("cleric", "cleric"),
    ("chierico", "cleric"),
    ("druid", "druid"),
    ("druido", "druid"),
    ("fighter", "fighter"),
    ("guerriero", "fighter"),
    ("monk", "monk"),
    ("monaco", "monk"),
    ("paladin", "paladin"),
    ("paladino", "paladin"),
    ("ranger", "ranger"),
    ("rogue", "rogue"),
    ("ladro", "rogue"),
    ("sorcerer", "sorcerer"),
    ("stregone", "sorcerer"),
    ("warlock", "warlock"),
    ("wizard", "wizard"),
    ("mago", "wizard"),
];

impl SpellcastingSystem for Dnd5eSystem {
    fn system_id(&self) -> &str {
        "dnd5e"
    }

    fn resolve_class_alias(&self, name: &str) -> Option<ClassId> {
        let key = name.trim().to_lowercase();
        CLASS_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .and_then(|(_, id)| ClassId::new(*id).ok())
    }

    fn caster_type(&self, class: &str) -> Option<CasterType> {
        match class.to_lowercase().as_str() {
            "wizard" | "cleric" | "druid" | "sorcerer" | "bard" => Some(CasterType::Full),
            "paladin" | "ranger" => Some(CasterType::Half),
            "warlock" => Some(CasterType::Pact),
            _ => None,
        }
    }

    fn spellcasting_stat(&self, class: &str) -> Option<&str> {
        match class.to_lowercase().as_str() {
            "wizard" => Some("INT"),
            "cleric" | "druid" | "ranger" => Some("WIS"),
            "sorcerer" | "bard" | "paladin" | "warlock" => Some("CHA"),
            _ => None,
        }
    }

    fn max_spell_level(&self, class: &str, level: u8) -> Option<u8> {
        let level = level.clamp(1, MAX_CLASS_LEVEL);
        match self.caster_type(class)? {
            // 1-2 -> 1, 3-4 -> 2, ... 17+ -> 9
            CasterType::Full => Some(level.div_ceil(2).min(9)),
            CasterType::Half => Some(match level {
                1 => 0,
                2..=4 => 1,
                5..=8 => 2,
                9..=12 => 3,
                13..=16 => 4,
                _ => 5,
            }),
            CasterType::Pact => Some(pact_magic(level).slot_level),
        }
    }

    fn slot_progression(&self, classes: &ClassLevels) -> SlotProgression {
        let mut full_levels: u8 = 0;
        let mut half_levels: u8 = 0;
        let mut pact_levels: u8 = 0;
        let mut standard_casters = 0usize;
        let mut single_half_caster = false;

        for (class_id, level) in classes.iter() {
            match self.caster_type(class_id.as_str()) {
                Some(CasterType::Full) => {
                    full_levels = full_levels.saturating_add(level);
                    standard_casters += 1;
                }
                Some(CasterType::Half) => {
                    half_levels = half_levels.saturating_add(level);
                    standard_casters += 1;
                    single_half_caster = true;
                }
                Some(CasterType::Pact) => pact_levels = pact_levels.saturating_add(level),
                None => {}
            }
        }

        let standard = match standard_casters {
            0 => [0; SPELL_LEVELS],
            // The dedicated half-caster table differs from the generic formula
            // at low levels, so it only applies to a lone half caster.
            1 if single_half_caster => half_caster_slots(half_levels),
            _ => full_caster_slots(multiclass_caster_level(full_levels, half_levels)),
        };

        SlotProgression {
            standard,
            pact: pact_magic(pact_levels.min(MAX_CLASS_LEVEL)),
        }
    }
}

/// Effective caster level for the shared multiclass pool.
///
/// Full caster levels count whole, half caster levels are summed and then
/// halved (rounded down). Pact levels never count.
pub fn multiclass_caster_level(full_levels: u8, half_levels: u8) -> u8 {
    full_levels
        .saturating_add(half_levels / 2)
        .min(MAX_CLASS_LEVEL)
}

// Spell slot progression tables

/// Full caster slots by class level; index 0 is spell level 1.
pub fn full_caster_slots(level: u8) -> [u8; SPELL_LEVELS] {
    let slots: &[(u8, &[u8])] = &[
        (1, &[2]),
        (2, &[3]),
        (3, &[4, 2]),
        (4, &[4, 3]),
        (5, &[4, 3, 2]),
        (6, &[4, 3, 3]),
        (7, &[4, 3, 3, 1]),
        (8, &[4, 3, 3, 2]),
        (9, &[4, 3, 3, 3, 1]),
        (10, &[4, 3, 3, 3, 2]),
        (11, &[4, 3, 3, 3, 2, 1]),
        (12, &[4, 3, 3, 3, 2, 1]),
        (13, &[4, 3, 3, 3, 2, 1, 1]),
        (14, &[4, 3, 3, 3, 2, 1, 1]),
        (15, &[4, 3, 3, 3, 2, 1, 1, 1]),
        (16, &[4, 3, 3, 3, 2, 1, 1, 1]),
        (17, &[4, 3, 3, 3, 2, 1, 1, 1, 1]),
        (18, &[4, 3, 3, 3, 3, 1, 1, 1, 1]),
        (19, &[4, 3, 3, 3, 3, 2, 1, 1, 1]),
        (20, &[4, 3, 3, 3, 3, 2, 2, 1, 1]),
    ];

    table_row(slots, level)
}

/// Single-class half caster slots; nothing at level 1, capped at spell level 5.
pub fn half_caster_slots(level: u8) -> [u8; SPELL_LEVELS] {
    let slots: &[(u8, &[u8])] = &[
        (2, &[2]),
        (3, &[3]),
        (4, &[3]),
        (5, &[4, 2]),
        (6, &[4, 2]),
        (7, &[4, 3]),
        (8, &[4, 3]),
        (9, &[4, 3, 2]),
        (10, &[4, 3, 2]),
        (11, &[4, 3, 3]),
        (12, &[4, 3, 3]),
        (13, &[4, 3, 3, 1]),
        (14, &[4, 3, 3, 1]),
        (15, &[4, 3, 3, 2]),
        (16, &[4, 3, 3, 2]),
        (17, &[4, 3, 3, 3, 1]),
        (18, &[4, 3, 3, 3, 1]),
        (19, &[4, 3, 3, 3, 2]),
        (20, &[4, 3, 3, 3, 2]),
    ];

    table_row(slots, level)
}

/// Pact magic for a warlock level. Level 0 yields no pact slots.
pub fn pact_magic(level: u8) -> PactMagic {
    let slot_level = match level {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        7..=8 => 4,
        _ => 5,
    };
    let slot_count = match level {
        0 => 0,
        1 => 1,
        2..=10 => 2,
        11..=16 => 3,
        _ => 4,
    };
    PactMagic {
        slot_count,
        slot_level,
    }
}

fn table_row(slots: &[(u8, &[u8])], level: u8) -> [u8; SPELL_LEVELS] {
    let mut row = [0; SPELL_LEVELS];
    if let Some((_, counts)) = slots.iter().find(|(l, _)| *l == level) {
        for (slot, &count) in row.iter_mut().zip(counts.iter()) {
            *slot = count;
        }
    }
    row
}
