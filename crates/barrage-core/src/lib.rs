//! Core types and definitions for the BARRAGE encounter core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, difficulty scaling and
//! constants. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
