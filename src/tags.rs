//! Tag reading and writing.
//!
//! Public API:
//! - [`TagSet`]: tag name -> values, with lower-case canonical names.
//! - [`TagReader`]: the contract the year resolver reads through.
//! - [`LoftyTagReader`]: the production reader backed by `lofty`.
//! - [`write_year`]: writes a year into a file's primary tag layer.

mod read;
mod set;
mod write;

pub use read::{LoftyTagReader, TagReader, probe_duration};
pub use set::TagSet;
pub use write::write_year;
