//! Core types and definitions for the SCORCH artillery simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! projectile and actor components, the weapon table, behavior effects,
//! events, configuration, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod effects;
pub mod enums;
pub mod events;
pub mod types;
pub mod weapons;
