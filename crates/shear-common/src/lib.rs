//! Common utilities for the shear minifier.
//!
//! This crate provides shared infrastructure used by all minifier components:
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;
