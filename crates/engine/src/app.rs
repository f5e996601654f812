//! Application state and composition.

use std::sync::Arc;

use grimoire_domain::SpellcastingSystem;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{CatalogError, ClassCatalog};
use crate::use_cases::SpellcastingUseCases;

/// Main application state.
///
/// Holds the configured ports and the use cases built on them.
pub struct App {
    pub system: Arc<dyn SpellcastingSystem>,
    pub catalog: Arc<dyn ClassCatalog>,
    pub spellcasting: SpellcastingUseCases,
}

impl App {
    pub fn new(system: Arc<dyn SpellcastingSystem>, catalog: Arc<dyn ClassCatalog>) -> Self {
        let spellcasting = SpellcastingUseCases::new(system.clone(), catalog.clone());
        Self {
            system,
            catalog,
            spellcasting,
        }
    }

    /// Compose the application from configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, CatalogError> {
        let system = config.spellcasting_system();
        let catalog = config.class_catalog()?;
        tracing::info!(
            game_system = system.system_id(),
            catalog = ?config.class_catalog_path,
            "Spellcasting engine configured"
        );
        Ok(Self::new(system, catalog))
    }
}
