//! Infrastructure layer - external dependency implementations.
//!
//! - `ports` - the class catalog port
//! - `class_catalog` - in-memory / JSON-file catalog adapter
//! - `config` - environment-driven engine configuration

pub mod class_catalog;
pub mod config;
pub mod ports;
