//! Grimoire engine library.
//!
//! Applies spell slot rules to character documents.
//!
//! ## Structure
//!
//! - `record/` - Character document boundary (loose shapes in, domain types out)
//! - `use_cases/` - Recalculate, cast, rest and query operations
//! - `infrastructure/` - Class catalog port, adapters and configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod record;
pub mod use_cases;

pub use app::App;
