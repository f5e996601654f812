//! Spell slot state - the expendable resources a caster spends and recovers.
//!
//! Maxima come from a [`SlotProgression`]; current counts only move through
//! casting, resting, manual adjustment, or the rescale rule applied when the
//! maxima change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::DomainError;
use crate::game_systems::{RestType, SlotProgression, SPELL_LEVELS};

/// A pool of spell slots at a given level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellSlotPool {
    /// Currently available slots
    current: u8,
    /// Maximum slots
    max: u8,
}

impl SpellSlotPool {
    /// Create a new, full spell slot pool.
    pub fn new(max: u8) -> Self {
        Self { current: max, max }
    }

    /// Create a pool with a stored current count, clamped to `max`.
    pub fn with_current(max: u8, current: u8) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Get the current available slots.
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Get the maximum slots.
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Slots spent since the pool was last full.
    pub fn spent(&self) -> u8 {
        self.max - self.current
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Use one slot. Returns false (and changes nothing) when empty.
    pub fn use_slot(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Restore all slots.
    pub fn restore_all(&mut self) {
        self.current = self.max;
    }

    /// Apply a signed change to the current count, clamped to `0..=max`.
    pub fn adjust(&mut self, delta: i32) {
        let next = i32::from(self.current)
            .saturating_add(delta)
            .clamp(0, i32::from(self.max));
        self.current = u8::try_from(next).unwrap_or(self.max);
    }

    /// Move to a new maximum.
    ///
    /// A full pool stays full. Otherwise the number of spent slots carries
    /// over, so current becomes `new_max - spent` (never below zero).
    pub fn rescale(&mut self, new_max: u8) {
        self.current = if self.is_full() {
            new_max
        } else {
            new_max.saturating_sub(self.spent())
        };
        self.max = new_max;
    }
}

/// Pact magic slots: one pool, one shared slot level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PactSlots {
    pool: SpellSlotPool,
    slot_level: u8,
}

impl PactSlots {
    pub fn new(pool: SpellSlotPool, slot_level: u8) -> Self {
        Self {
            pool,
            slot_level: slot_level.min(SPELL_LEVELS as u8),
        }
    }

    pub fn pool(&self) -> &SpellSlotPool {
        &self.pool
    }

    pub fn slot_level(&self) -> u8 {
        self.slot_level
    }

    /// Whether these slots can cast a spell of `spell_level`.
    fn covers(&self, spell_level: u8) -> bool {
        self.pool.max() > 0 && self.slot_level >= spell_level
    }
}

/// Which pool an explicit cast request wants to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "level")]
pub enum SlotChoice {
    /// A standard slot of exactly this level.
    Standard(u8),
    /// A pact slot (at the pact slot level).
    Pact,
}

impl FromStr for SlotChoice {
    type Err = DomainError;

    /// Parses `"standard:<level>"`, `"pact"` or `"pact:<level>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let (kind, level) = match normalized.split_once(':') {
            Some((kind, level)) => (kind.trim(), Some(level.trim())),
            None => (normalized.as_str(), None),
        };
        match (kind, level) {
            ("pact", _) => Ok(Self::Pact),
            ("standard", Some(level)) => level
                .parse::<u8>()
                .map(Self::Standard)
                .map_err(|_| DomainError::parse(format!("Invalid slot level in choice: {}", s))),
            _ => Err(DomainError::parse(format!("Unknown slot choice: {}", s))),
        }
    }
}

impl fmt::Display for SlotChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotChoice::Standard(level) => write!(f, "standard:{}", level),
            SlotChoice::Pact => write!(f, "pact"),
        }
    }
}

/// What a successful cast spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SlotSpend {
    /// Level 0 spells cost nothing.
    Cantrip,
    Standard { level: u8 },
    Pact { level: u8 },
}

impl fmt::Display for SlotSpend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSpend::Cantrip => write!(f, "Cantrip: no slot used"),
            SlotSpend::Standard { level } => write!(f, "Used a level {} spell slot", level),
            SlotSpend::Pact { level } => write!(f, "Used a pact slot (level {})", level),
        }
    }
}

/// Why a cast could not be paid for. Returned as a value, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CastRejection {
    #[error("Invalid spell level: {0}")]
    InvalidLevel(u8),

    #[error("Invalid level: a level {chosen} slot cannot cast a level {required} spell")]
    BelowSpellLevel { chosen: u8, required: u8 },

    #[error("Not available: no level {0} slots")]
    StandardNotAvailable(u8),

    #[error("Exhausted: no level {0} slots remaining")]
    StandardExhausted(u8),

    #[error("Not available: no pact slots")]
    PactNotAvailable,

    #[error("Exhausted: no pact slots remaining")]
    PactExhausted,

    #[error("No slot available for a level {0} spell")]
    NoSlotAvailable(u8),
}

/// One pool a spell of a given level could be cast from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastOption {
    pub choice: SlotChoice,
    /// Slot level the spell would be cast at.
    pub level: u8,
    pub remaining: u8,
    /// The rest that refills this pool.
    pub recovers_on: RestType,
}

/// A character's complete slot state: nine standard pools plus pact magic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellSlots {
    /// Index 0 is spell level 1.
    standard: [SpellSlotPool; SPELL_LEVELS],
    pact: PactSlots,
}

impl SpellSlots {
    /// Fresh state with every pool full.
    #[cfg(test)]
    pub fn from_progression(progression: &SlotProgression) -> Self {
        let mut standard = [SpellSlotPool::default(); SPELL_LEVELS];
        for (pool, &max) in standard.iter_mut().zip(progression.standard.iter()) {
            *pool = SpellSlotPool::new(max);
        }
        Self {
            standard,
            pact: PactSlots::new(
                SpellSlotPool::new(progression.pact.slot_count),
                progression.pact.slot_level,
            ),
        }
    }

    /// Rebuild stored state from pools read back out of a document.
    pub fn from_parts(standard: [SpellSlotPool; SPELL_LEVELS], pact: PactSlots) -> Self {
        Self { standard, pact }
    }

    // Read-only accessors

    /// Pool for a spell level (1-9).
    pub fn standard(&self, spell_level: u8) -> Option<&SpellSlotPool> {
        Self::index(spell_level).map(|i| &self.standard[i])
    }

    pub fn standard_pools(&self) -> &[SpellSlotPool; SPELL_LEVELS] {
        &self.standard
    }

    pub fn pact(&self) -> &PactSlots {
        &self.pact
    }

    /// Maxima as a progression, for comparing against freshly derived ones.
    pub fn maxima(&self) -> SlotProgression {
        let mut progression = SlotProgression::default();
        for (max, pool) in progression.standard.iter_mut().zip(self.standard.iter()) {
            *max = pool.max();
        }
        progression.pact.slot_count = self.pact.pool.max();
        progression.pact.slot_level = self.pact.slot_level;
        progression
    }

    // Mutation methods

    /// Move every pool to newly derived maxima, keeping spent counts.
    ///
    /// Running it again with the same progression changes nothing.
    pub fn recalculate(&mut self, progression: &SlotProgression) {
        for (pool, &max) in self.standard.iter_mut().zip(progression.standard.iter()) {
            pool.rescale(max);
        }
        self.pact.pool.rescale(progression.pact.slot_count);
        self.pact.slot_level = progression.pact.slot_level;
    }

    /// Spend a slot for a spell of `spell_level`.
    ///
    /// Without an explicit choice the lowest standard level that can cast the
    /// spell is used, then the pact pool.
    pub fn consume(
        &mut self,
        spell_level: u8,
        choice: Option<SlotChoice>,
    ) -> Result<SlotSpend, CastRejection> {
        if spell_level == 0 {
            return Ok(SlotSpend::Cantrip);
        }
        if Self::index(spell_level).is_none() {
            return Err(CastRejection::InvalidLevel(spell_level));
        }

        match choice {
            Some(SlotChoice::Standard(level)) => self.consume_standard(spell_level, level),
            Some(SlotChoice::Pact) => self.consume_pact(spell_level),
            None => self.consume_auto(spell_level),
        }
    }

    fn consume_standard(&mut self, spell_level: u8, level: u8) -> Result<SlotSpend, CastRejection> {
        let index = Self::index(level).ok_or(CastRejection::InvalidLevel(level))?;
        if level < spell_level {
            return Err(CastRejection::BelowSpellLevel {
                chosen: level,
                required: spell_level,
            });
        }
        let pool = &mut self.standard[index];
        if pool.max() == 0 {
            return Err(CastRejection::StandardNotAvailable(level));
        }
        if !pool.use_slot() {
            return Err(CastRejection::StandardExhausted(level));
        }
        Ok(SlotSpend::Standard { level })
    }

    fn consume_pact(&mut self, spell_level: u8) -> Result<SlotSpend, CastRejection> {
        if self.pact.pool.max() == 0 {
            return Err(CastRejection::PactNotAvailable);
        }
        if self.pact.slot_level < spell_level {
            return Err(CastRejection::BelowSpellLevel {
                chosen: self.pact.slot_level,
                required: spell_level,
            });
        }
        if !self.pact.pool.use_slot() {
            return Err(CastRejection::PactExhausted);
        }
        Ok(SlotSpend::Pact {
            level: self.pact.slot_level,
        })
    }

    fn consume_auto(&mut self, spell_level: u8) -> Result<SlotSpend, CastRejection> {
        for level in spell_level..=SPELL_LEVELS as u8 {
            if let Some(index) = Self::index(level) {
                if self.standard[index].use_slot() {
                    return Ok(SlotSpend::Standard { level });
                }
            }
        }
        if self.pact.covers(spell_level) && self.pact.pool.use_slot() {
            return Ok(SlotSpend::Pact {
                level: self.pact.slot_level,
            });
        }
        Err(CastRejection::NoSlotAvailable(spell_level))
    }

    /// Long rest: every pool back to max.
    pub fn long_rest(&mut self) {
        for pool in self.standard.iter_mut() {
            pool.restore_all();
        }
        self.pact.pool.restore_all();
    }

    /// Short rest: pact slots back to max, standard slots untouched.
    pub fn short_rest(&mut self) {
        self.pact.pool.restore_all();
    }

    pub fn rest(&mut self, rest: RestType) {
        match rest {
            RestType::Long => self.long_rest(),
            RestType::Short => self.short_rest(),
        }
    }

    /// Manually change one standard level's current count, clamped to its max.
    ///
    /// Returns the new current count.
    pub fn adjust_standard(&mut self, spell_level: u8, delta: i32) -> Result<u8, DomainError> {
        let index = Self::index(spell_level).ok_or_else(|| {
            DomainError::validation(format!("Spell level must be 1-9, got {}", spell_level))
        })?;
        let pool = &mut self.standard[index];
        pool.adjust(delta);
        Ok(pool.current())
    }

    /// Manually change the pact current count, clamped to its max.
    pub fn adjust_pact(&mut self, delta: i32) -> u8 {
        self.pact.pool.adjust(delta);
        self.pact.pool.current()
    }

    // Queries

    /// Every pool that could pay for a spell of `spell_level`, depleted ones
    /// included. Cantrips list nothing.
    pub fn cast_options(&self, spell_level: u8) -> Vec<CastOption> {
        if spell_level == 0 {
            return Vec::new();
        }
        let mut options: Vec<CastOption> = (spell_level..=SPELL_LEVELS as u8)
            .filter_map(|level| {
                let pool = self.standard(level)?;
                (pool.max() > 0).then_some(CastOption {
                    choice: SlotChoice::Standard(level),
                    level,
                    remaining: pool.current(),
                    recovers_on: RestType::Long,
                })
            })
            .collect();
        if self.pact.covers(spell_level) {
            options.push(CastOption {
                choice: SlotChoice::Pact,
                level: self.pact.slot_level,
                remaining: self.pact.pool.current(),
                recovers_on: RestType::Short,
            });
        }
        options
    }

    /// Whether any pool can currently pay for a spell of `spell_level`.
    pub fn can_cast(&self, spell_level: u8) -> bool {
        spell_level == 0
            || self
                .cast_options(spell_level)
                .iter()
                .any(|option| option.remaining > 0)
    }

    fn index(spell_level: u8) -> Option<usize> {
        (1..=SPELL_LEVELS as u8)
            .contains(&spell_level)
            .then(|| usize::from(spell_level - 1))
    }
}
