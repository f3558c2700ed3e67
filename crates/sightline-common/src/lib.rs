//! Common utilities for sightline.
//!
//! This crate provides shared infrastructure used by all analysis components:
//! - **Warning System** - deduplicated diagnostics for malformed or unsupported input

pub mod warning;
