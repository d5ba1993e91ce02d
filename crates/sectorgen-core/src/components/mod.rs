//! World model for a sector: geometry, entities and their payloads.
//!
//! Entities are plain data with a small amount of self-contained behaviour
//! (`Entity::update`). Everything that looks at more than one entity lives
//! in the registry or the generation stages.

mod common;
mod entity;

pub use common::*;
pub use entity::*;
