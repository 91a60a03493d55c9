//! Behavior patterns for BARRAGE.
//!
//! Movement and weapon pattern controllers, predictive aim, behavior-class
//! profiles, the boss phase state machine and the bespoke attack routines.
//! No ECS dependency: everything here operates on plain data and a seeded RNG.

pub mod aim;
pub mod attacks;
pub mod boss;
pub mod modifier;
pub mod movement;
pub mod profiles;
pub mod special;
pub mod turret;
pub mod weapon;

pub use barrage_core as core;
