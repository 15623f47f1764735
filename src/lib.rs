//! Copy a music collection into year-named folders.
//!
//! The year of each file comes from its embedded tags, falling back to the
//! file name and then to the names of its parent folders.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod organizer;
pub mod report;
pub mod runtime;
pub mod tags;
pub mod year;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use organizer::{OrganizeOptions, Organizer, ProcessingStats};
