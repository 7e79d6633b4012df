//! Report renderers for catalog lookups.
//!
//! - [`terminal`]: colored details table, count lines and score breakdown; respects `--quiet`.
//! - [`json`]: the canonical record, counts and formatted scores as one JSON document.

pub mod json;
pub mod terminal;
