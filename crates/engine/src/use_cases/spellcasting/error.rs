//! Spellcasting operation errors.

use grimoire_domain::DomainError;

/// Errors from spellcasting operations that take caller-supplied arguments.
///
/// Failed casts are not errors; they come back as a [`super::CastOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum SpellcastingError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
