//! Flarezone - procedural sector generator for the Elysium Flare RPG

pub mod core;
pub mod data;
pub mod sector;
