//! Encounter engine for BARRAGE.
//!
//! Owns the hecs ECS world, runs the per-frame systems against the external
//! frame clock, and produces `EncounterSnapshot`s for rendering.

pub mod components;
pub mod engine;
pub mod factory;
pub mod spawner;
pub mod systems;

pub use barrage_core as core;
pub use engine::EncounterEngine;

#[cfg(test)]
mod tests;
