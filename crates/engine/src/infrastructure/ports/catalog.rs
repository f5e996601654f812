//! Class metadata port.

use grimoire_domain::ClassId;

use super::error::CatalogError;

// =============================================================================
// Class Metadata
// =============================================================================

/// Resolves localized class names the static alias table does not know.
///
/// Callers treat any error as "no match"; an unreachable catalog must never
/// stop a character from loading.
#[cfg_attr(test, mockall::automock)]
pub trait ClassCatalog: Send + Sync {
    /// Canonical id for a (possibly localized) class name, if known.
    fn class_id_for_name(&self, name: &str) -> Result<Option<ClassId>, CatalogError>;
}
