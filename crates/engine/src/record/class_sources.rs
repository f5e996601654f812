//! Class membership as it appears in character documents.
//!
//! Documents carry class data in several layouts:
//!
//! - a primary class name plus `level` (`"classe": "Mago", "level": 3`)
//! - a list of entries or bare codes (`"classes": [{"code": "wizard", "level": 3}]`)
//! - a keyed mapping (`"multiclass": {"wizard": 3, "cleric": "2"}`)
//! - a nested document (`"multiclass": {"classes": [...]}`)
//!
//! [`ClassLevelAggregator`] tries the structured fields in a fixed order and
//! only falls back to the primary class when none of them yields an entry.

use std::collections::BTreeMap;

use grimoire_domain::{ClassId, ClassLevels, ClassMembership, SpellcastingSystem, MAX_CLASS_LEVEL};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

use super::{json_kind, loose_int, loose_text, CharacterRecord};
use crate::infrastructure::ports::ClassCatalog;

/// Structured class fields, highest priority first.
const STRUCTURED_FIELDS: [&str; 3] = ["classes", "spell_classes", "multiclass"];
const PRIMARY_CLASS_FIELD: &str = "classe";
const PRIMARY_LEVEL_FIELD: &str = "level";

/// Level assumed when an entry names a class but its level is missing or unreadable.
const DEFAULT_ENTRY_LEVEL: i64 = 1;

// =============================================================================
// Boundary shapes
// =============================================================================

/// One structured class field, in whichever layout it was saved.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassSource {
    List(Vec<ClassItem>),
    Nested { classes: Vec<ClassItem> },
    Keyed(BTreeMap<String, Value>),
}

/// One element of a class list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassItem {
    /// A bare class code; takes the document's primary level.
    Code(String),
    Entry(ClassEntry),
    /// Anything else is ignored.
    Other(IgnoredAny),
}

/// Entry fields, each read leniently. Earlier fields win.
#[derive(Debug, Default, Deserialize)]
struct ClassEntry {
    class_code: Option<Value>,
    code: Option<Value>,
    name_it: Option<Value>,
    name: Option<Value>,
    label: Option<Value>,
    classe: Option<Value>,
    class: Option<Value>,
    class_level: Option<Value>,
    level: Option<Value>,
    lvl: Option<Value>,
}

impl ClassEntry {
    fn code(&self) -> Option<&str> {
        first_text([&self.class_code, &self.code])
    }

    fn name(&self) -> Option<&str> {
        first_text([
            &self.name_it,
            &self.name,
            &self.label,
            &self.classe,
            &self.class,
        ])
    }

    /// First set level field. Zero, blank and null count as unset.
    fn level(&self) -> Option<&Value> {
        [&self.class_level, &self.level, &self.lvl]
            .into_iter()
            .flatten()
            .find(|v| !is_unset(v))
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn first_text<const N: usize>(fields: [&Option<Value>; N]) -> Option<&str> {
    fields.into_iter().flatten().find_map(loose_text)
}

// =============================================================================
// Aggregation
// =============================================================================

/// Normalizes a character document's class data into [`ClassLevels`].
///
/// Names resolve through the game system's alias table first, then the class
/// catalog. Entries that resolve to nothing are dropped; a catalog failure is
/// logged and treated as "no match".
pub struct ClassLevelAggregator<'a> {
    system: &'a dyn SpellcastingSystem,
    catalog: &'a dyn ClassCatalog,
}

impl<'a> ClassLevelAggregator<'a> {
    pub fn new(system: &'a dyn SpellcastingSystem, catalog: &'a dyn ClassCatalog) -> Self {
        Self { system, catalog }
    }

    /// Canonical class levels for a document. Never fails.
    pub fn aggregate(&self, record: &CharacterRecord) -> ClassLevels {
        let primary_level = record.get(PRIMARY_LEVEL_FIELD);

        for field in STRUCTURED_FIELDS {
            let Some(raw) = record.get(field) else {
                continue;
            };
            let source = match ClassSource::deserialize(raw) {
                Ok(source) => source,
                Err(_) => {
                    tracing::debug!(field, kind = %json_kind(raw), "Ignoring unreadable class field");
                    continue;
                }
            };
            let levels = self.collect(source, primary_level);
            if !levels.is_empty() {
                tracing::debug!(field, classes = levels.len(), "Class levels from structured field");
                return levels;
            }
        }

        self.primary_class(record, primary_level)
    }

    fn collect(&self, source: ClassSource, primary_level: Option<&Value>) -> ClassLevels {
        match source {
            ClassSource::List(items) | ClassSource::Nested { classes: items } => items
                .into_iter()
                .filter_map(|item| self.membership(item, primary_level))
                .collect(),
            ClassSource::Keyed(map) => map
                .into_iter()
                .filter(|(_, level)| matches!(level, Value::Number(_) | Value::String(_)))
                .filter_map(|(code, level)| {
                    Some(ClassMembership {
                        class_id: self.resolve_code(&code)?,
                        level: entry_level(Some(&level)),
                    })
                })
                .collect(),
        }
    }

    fn membership(&self, item: ClassItem, primary_level: Option<&Value>) -> Option<ClassMembership> {
        match item {
            ClassItem::Code(code) => Some(ClassMembership {
                class_id: self.resolve_code(&code)?,
                level: entry_level(primary_level),
            }),
            ClassItem::Entry(entry) => {
                let class_id = match (entry.code(), entry.name()) {
                    (Some(code), _) => self.resolve_code(code),
                    (None, Some(name)) => self.resolve_name(name),
                    (None, None) => None,
                };
                if class_id.is_none() {
                    tracing::debug!(?entry, "Dropping unresolvable class entry");
                }
                Some(ClassMembership {
                    class_id: class_id?,
                    level: entry_level(entry.level()),
                })
            }
            ClassItem::Other(_) => None,
        }
    }

    fn primary_class(&self, record: &CharacterRecord, primary_level: Option<&Value>) -> ClassLevels {
        record
            .get(PRIMARY_CLASS_FIELD)
            .and_then(loose_text)
            .and_then(|name| self.resolve_name(name))
            .map(|class_id| ClassMembership {
                class_id,
                level: entry_level(primary_level),
            })
            .into_iter()
            .collect()
    }

    /// A declared code is canonical already; the alias table only normalizes spelling.
    fn resolve_code(&self, code: &str) -> Option<ClassId> {
        self.system
            .resolve_class_alias(code)
            .or_else(|| ClassId::new(code).ok())
    }

    /// A display name must be recognized by the alias table or the catalog.
    fn resolve_name(&self, name: &str) -> Option<ClassId> {
        if let Some(class_id) = self.system.resolve_class_alias(name) {
            return Some(class_id);
        }
        match self.catalog.class_id_for_name(name) {
            Ok(found) => {
                if found.is_none() {
                    tracing::debug!(name, "Class name not found in catalog");
                }
                found
            }
            Err(e) => {
                tracing::warn!(name, error = %e, "Class catalog lookup failed");
                None
            }
        }
    }
}

/// Level of one entry: unreadable or missing means 1, then clamped to 0..=20.
fn entry_level(raw: Option<&Value>) -> u8 {
    let level = raw.and_then(loose_int).unwrap_or(DEFAULT_ENTRY_LEVEL);
    u8::try_from(level.clamp(0, i64::from(MAX_CLASS_LEVEL))).unwrap_or(MAX_CLASS_LEVEL)
}
