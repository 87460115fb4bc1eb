//! CLI command implementations.

pub mod common;
pub mod place;
pub mod version;
