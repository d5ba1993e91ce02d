//! Systems - periodic logic that runs against a live sector

mod respawn;

pub use respawn::*;
