//! Core data types for Strata.
//!
//! This crate defines the identity and metadata model that the resolution
//! result extraction works on: component identifiers (build-local projects
//! versus published modules), per-configuration metadata, build action
//! references, and the resolution configuration.
//!
//! This crate is intentionally free of graph code and I/O beyond reading
//! the configuration file.

pub mod component;
pub mod config;
pub mod metadata;
