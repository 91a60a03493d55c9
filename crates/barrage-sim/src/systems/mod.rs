//! ECS systems that operate on the encounter world each frame.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They own no state; all state lives in components.

pub mod actors;
pub mod boss;
pub mod cleanup;
pub mod damage;
pub mod difficulty;
pub mod projectiles;
pub mod snapshot;
