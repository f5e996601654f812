//! Value objects - Immutable objects defined by their attributes

mod class_levels;

pub use class_levels::{ClassId, ClassLevels, ClassMembership, MAX_CLASS_LEVEL};
