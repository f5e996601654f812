//! Canonical class membership for a character.
//!
//! Every loose representation of "which classes at what levels" is folded
//! into a [`ClassLevels`] before any rule looks at it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DomainError;

/// Highest level a single class (or a character) can reach.
pub const MAX_CLASS_LEVEL: u8 = 20;

// ============================================================================
// ClassId
// ============================================================================

/// A canonical class identifier (trimmed, lowercase, e.g. "wizard").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassId(String);

impl ClassId {
    /// Create a canonical class id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidId` if the id is empty after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let normalized = id.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::invalid_id("Class id cannot be empty"));
        }
        Ok(Self(normalized))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClassId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ClassId> for String {
    fn from(id: ClassId) -> String {
        id.0
    }
}

// ============================================================================
// ClassMembership / ClassLevels
// ============================================================================

/// One class a character has levels in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMembership {
    pub class_id: ClassId,
    pub level: u8,
}

/// Canonical mapping of class id to total level in that class.
///
/// Adding the same class twice sums the levels; every total is capped at
/// [`MAX_CLASS_LEVEL`]. Zero-level entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevels(BTreeMap<ClassId, u8>);

impl ClassLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add levels in a class, summing with any levels already recorded.
    pub fn add(&mut self, class_id: ClassId, level: u8) {
        if level == 0 {
            return;
        }
        let total = self.0.entry(class_id).or_insert(0);
        *total = total.saturating_add(level).min(MAX_CLASS_LEVEL);
    }

    /// Builder-style variant of [`ClassLevels::add`].
    pub fn with(mut self, class_id: ClassId, level: u8) -> Self {
        self.add(class_id, level);
        self
    }

    /// Level in a class, 0 when the character has none.
    pub fn level_of(&self, class_id: &str) -> u8 {
        self.0
            .iter()
            .find(|(id, _)| id.as_str() == class_id)
            .map(|(_, level)| *level)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all class levels (character level), capped at 20.
    pub fn total_level(&self) -> u8 {
        self.0
            .values()
            .fold(0u8, |acc, level| acc.saturating_add(*level))
            .min(MAX_CLASS_LEVEL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassId, u8)> {
        self.0.iter().map(|(id, level)| (id, *level))
    }
}

impl FromIterator<ClassMembership> for ClassLevels {
    fn from_iter<T: IntoIterator<Item = ClassMembership>>(iter: T) -> Self {
        let mut levels = Self::new();
        for membership in iter {
            levels.add(membership.class_id, membership.level);
        }
        levels
    }
}
