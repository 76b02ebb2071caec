//! Shared utilities for Strata.
//!
//! This crate provides the cross-cutting concerns used by the other Strata
//! crates: the unified error type and logging initialization.

pub mod errors;
pub mod logging;
