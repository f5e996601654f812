//! Use cases - User story orchestration.
//!
//! Use cases read a character document, run domain operations on it, and
//! write the results back in place.

pub mod spellcasting;

pub use spellcasting::SpellcastingUseCases;
