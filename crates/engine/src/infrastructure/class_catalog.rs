//! In-memory class catalog, seeded from the SRD or loaded from a JSON file.

use std::collections::HashMap;
use std::path::Path;

use grimoire_domain::ClassId;
use serde::Deserialize;

use crate::infrastructure::ports::{CatalogError, ClassCatalog};

/// SRD classes with their Italian display names.
const SRD_CLASSES: &[(&str, &str)] = &[
    ("barbarian", "Barbaro"),
    ("bard", "Bardo"),
    ("cleric", "Chierico"),
    ("druid", "Druido"),
    ("fighter", "Guerriero"),
    ("monk", "Monaco"),
    ("paladin", "Paladino"),
    ("ranger", "Ranger"),
    ("rogue", "Ladro"),
    ("sorcerer", "Stregone"),
    ("warlock", "Warlock"),
    ("wizard", "Mago"),
];

/// Accepted catalog file layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    /// `[{"code": "wizard", "name_it": "Mago"}, ...]`
    Entries(Vec<CatalogEntry>),
    /// `{"Mago": "wizard", ...}`
    NameToCode(HashMap<String, String>),
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    code: String,
    #[serde(alias = "name_it")]
    name: String,
}

/// Class catalog held entirely in memory, keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassCatalog {
    by_name: HashMap<String, ClassId>,
}

impl InMemoryClassCatalog {
    /// Catalog seeded with the twelve SRD classes.
    pub fn srd() -> Self {
        Self::from_pairs(SRD_CLASSES.iter().map(|(code, name)| (*name, *code)))
    }

    /// Build from `(name, code)` pairs; pairs with a blank code are skipped.
    pub fn from_pairs<N, C>(pairs: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: AsRef<str>,
        C: Into<String>,
    {
        let mut by_name = HashMap::new();
        for (name, code) in pairs {
            match ClassId::new(code) {
                Ok(id) => {
                    by_name.insert(name.as_ref().trim().to_lowercase(), id);
                }
                Err(e) => {
                    tracing::debug!(name = %name.as_ref(), error = %e, "Skipping catalog entry");
                }
            }
        }
        Self { by_name }
    }

    /// Load a catalog file (entry list or name-to-code object).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            classes = catalog.len(),
            "Loaded class catalog"
        );
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Ok(match file {
            CatalogFile::Entries(entries) => {
                Self::from_pairs(entries.into_iter().map(|e| (e.name, e.code)))
            }
            CatalogFile::NameToCode(map) => Self::from_pairs(map),
        })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl ClassCatalog for InMemoryClassCatalog {
    fn class_id_for_name(&self, name: &str) -> Result<Option<ClassId>, CatalogError> {
        Ok(self.by_name.get(&name.trim().to_lowercase()).cloned())
    }
}
