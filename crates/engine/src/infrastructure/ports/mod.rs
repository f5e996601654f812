//! Port traits for infrastructure boundaries.
//!
//! The class catalog is the only external collaborator the spellcasting
//! engine consults; everything else is concrete types.

mod catalog;
mod error;

pub use catalog::ClassCatalog;
pub use error::CatalogError;

#[cfg(test)]
pub use catalog::MockClassCatalog;
