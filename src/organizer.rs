//! Copy-by-year engine.
//!
//! [`Organizer`] walks a source tree, resolves a year for every audio file,
//! copies it to `dest/<year>/<file name>` and accumulates [`ProcessingStats`].
//! Files run either one at a time or through a worker pool fed by a bounded
//! queue; both modes produce the same final statistics.

mod copy;
mod engine;
mod options;
mod pool;
mod stats;

pub use engine::{Organizer, Progress, StopHandle};
pub use options::{ExecutionMode, OrganizeOptions, UNKNOWN_YEAR_FOLDER, YearCountPolicy};
pub use stats::{ErrorRecord, FileOutcome, FolderStats, ProcessingStats};
