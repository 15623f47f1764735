use std::num::NonZeroUsize;
use std::thread;

use serde::Serialize;

use crate::config::{LibrarySettings, ResolverSettings, Settings, YearCountSetting};
use crate::year::YearRange;

/// Folder that receives files without a resolvable year.
pub const UNKNOWN_YEAR_FOLDER: &str = "Unknown Year";

/// When a file counts towards the per-year histogram.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum YearCountPolicy {
    /// Only files actually copied into a year folder.
    OnCopy,
    /// Every file whose year resolved, copied or skipped.
    OnResolve,
}

impl From<YearCountSetting> for YearCountPolicy {
    fn from(setting: YearCountSetting) -> Self {
        match setting {
            YearCountSetting::OnCopy => Self::OnCopy,
            YearCountSetting::OnResolve => Self::OnResolve,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    Sequential,
    /// One scanner thread feeding `workers` worker threads.
    Concurrent { workers: usize },
}

/// Per-run options. Built once from settings and CLI flags, read-only during
/// the run.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub overwrite: bool,
    pub unknown_year_folder: bool,
    pub update_newer: bool,
    pub preserve_mtime: bool,
    /// 1 = sequential, 0 = available parallelism.
    pub workers: usize,
    pub queue_capacity: usize,
    pub year_count: YearCountPolicy,
    /// Recognized extensions and traversal rules.
    pub library: LibrarySettings,
    /// Tag names to probe and the valid year range.
    pub resolver: ResolverSettings,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl OrganizeOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        let organize = &settings.organize;
        Self {
            overwrite: organize.overwrite,
            unknown_year_folder: organize.unknown_year_folder,
            update_newer: organize.update_newer,
            preserve_mtime: organize.preserve_mtime,
            workers: organize.workers,
            queue_capacity: organize.queue_capacity,
            year_count: organize.year_count.into(),
            library: settings.library.clone(),
            resolver: settings.resolver.clone(),
        }
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        let workers = match self.workers {
            0 => thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            n => n,
        };
        if workers <= 1 {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Concurrent { workers }
        }
    }

    pub fn year_range(&self) -> YearRange {
        YearRange::from_settings(&self.resolver)
    }
}
