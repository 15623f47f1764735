//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive organize runs
//! and helpers to load configuration from disk and the environment.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
