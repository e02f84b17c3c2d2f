//! Core types and definitions for the GEOSCOPE entity display engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, detail tiers, LOD configuration, telemetry records,
//! render commands, the error taxonomy, and diagnostic reports.
//! It has no dependency on any renderer or runtime framework.

pub mod constants;
pub mod enums;
pub mod error;
pub mod lod;
pub mod records;
pub mod render;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;
