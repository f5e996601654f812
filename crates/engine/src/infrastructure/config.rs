//! Engine configuration loaded from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use grimoire_domain::{GameSystemRegistry, SpellcastingSystem};

use crate::infrastructure::class_catalog::InMemoryClassCatalog;
use crate::infrastructure::ports::{CatalogError, ClassCatalog};

const DEFAULT_LOG_FILTER: &str = "grimoire_engine=info";
const DEFAULT_GAME_SYSTEM: &str = "dnd5e";

/// Runtime settings for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// JSON class catalog; the built-in SRD catalog is used when unset.
    pub class_catalog_path: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Game system whose slot rules apply.
    pub game_system: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            class_catalog_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            game_system: DEFAULT_GAME_SYSTEM.to_string(),
        }
    }
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            class_catalog_path: non_empty("GRIMOIRE_CLASS_CATALOG").map(PathBuf::from),
            log_filter: non_empty("GRIMOIRE_LOG").unwrap_or(defaults.log_filter),
            game_system: non_empty("GRIMOIRE_GAME_SYSTEM").unwrap_or(defaults.game_system),
        }
    }

    /// Build the configured class catalog.
    pub fn class_catalog(&self) -> Result<Arc<dyn ClassCatalog>, CatalogError> {
        match &self.class_catalog_path {
            Some(path) => Ok(Arc::new(InMemoryClassCatalog::from_json_file(path)?)),
            None => Ok(Arc::new(InMemoryClassCatalog::srd())),
        }
    }

    /// Look up the configured game system, falling back to D&D 5e.
    pub fn spellcasting_system(&self) -> Arc<dyn SpellcastingSystem> {
        let registry = GameSystemRegistry::new();
        match registry.get(&self.game_system) {
            Some(system) => system,
            None => {
                tracing::warn!(
                    game_system = %self.game_system,
                    "Unknown game system, using {}",
                    DEFAULT_GAME_SYSTEM
                );
                Arc::new(grimoire_domain::Dnd5eSystem::new())
            }
        }
    }
}

/// Load `.env.local` / `.env` from the repository root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
