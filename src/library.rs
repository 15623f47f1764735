//! Audio file discovery.
//!
//! `library::model` holds the `AudioFile`/`ContainerKind` types and
//! `library::scan` walks a source tree for files with recognized extensions.

mod model;
mod scan;

pub use model::{AudioFile, ContainerKind};
pub use scan::{is_audio_file, scan, walk};

#[cfg(test)]
mod tests;
