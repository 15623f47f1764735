use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::FileError;
use crate::library::AudioFile;

use super::options::YearCountPolicy;

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    Copied {
        dest: PathBuf,
        year: Option<i32>,
        bytes: u64,
    },
    /// Destination already existed and was left alone.
    Skipped { dest: PathBuf, year: Option<i32> },
    /// No year and no unknown-year folder: not copied.
    Unfiled,
    Failed(FileError),
}

impl FileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copied { .. } => "copied",
            Self::Skipped { .. } => "skipped",
            Self::Unfiled => "unfiled",
            Self::Failed(_) => "error",
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Copied { year, .. } | Self::Skipped { year, .. } => *year,
            Self::Unfiled | Self::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderStats {
    pub files: usize,
    pub bytes_copied: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub file: String,
    pub kind: String,
    pub message: String,
}

/// Counters for one organize run.
///
/// Every processed file lands in exactly one of `copied`, `skipped`,
/// `unfiled` or `errors`. `no_year` overlaps: it counts every file that
/// finished without a year, including those copied to the unknown-year
/// folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    pub total: usize,
    pub copied: usize,
    pub skipped: usize,
    pub no_year: usize,
    pub unfiled: usize,
    pub errors: usize,
    pub bytes_copied: u64,
    /// Year (as text) -> file count.
    pub years: BTreeMap<String, usize>,
    /// Container label -> file count.
    pub formats: BTreeMap<String, usize>,
    /// Source folder relative to the source root -> files seen there.
    pub folders: BTreeMap<String, FolderStats>,
    pub error_list: Vec<ErrorRecord>,
}

impl ProcessingStats {
    pub fn record(
        &mut self,
        file: &AudioFile,
        root: &Path,
        outcome: &FileOutcome,
        policy: YearCountPolicy,
    ) {
        self.total += 1;
        *self.formats.entry(file.kind.label().to_string()).or_default() += 1;
        let folder = self.folders.entry(folder_key(file, root)).or_default();
        folder.files += 1;

        match outcome {
            FileOutcome::Copied { year, bytes, .. } => {
                self.copied += 1;
                self.bytes_copied += bytes;
                folder.bytes_copied += bytes;
                self.count_year(*year);
            }
            FileOutcome::Skipped { year, .. } => {
                self.skipped += 1;
                match policy {
                    YearCountPolicy::OnResolve => self.count_year(*year),
                    YearCountPolicy::OnCopy if year.is_none() => self.no_year += 1,
                    YearCountPolicy::OnCopy => {}
                }
            }
            FileOutcome::Unfiled => {
                self.unfiled += 1;
                self.no_year += 1;
            }
            FileOutcome::Failed(err) => {
                self.errors += 1;
                self.error_list.push(ErrorRecord {
                    file: file.path.display().to_string(),
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    fn count_year(&mut self, year: Option<i32>) {
        match year {
            Some(year) => *self.years.entry(year.to_string()).or_default() += 1,
            None => self.no_year += 1,
        }
    }

    /// `total == copied + skipped + unfiled + errors`.
    pub fn is_balanced(&self) -> bool {
        self.total == self.copied + self.skipped + self.unfiled + self.errors
    }

    /// Histogram entries, most recent year first.
    pub fn years_descending(&self) -> Vec<(&str, usize)> {
        let mut years: Vec<(&str, usize)> =
            self.years.iter().map(|(y, n)| (y.as_str(), *n)).collect();
        years.sort_by(|a, b| b.0.cmp(a.0));
        years
    }
}

fn folder_key(file: &AudioFile, root: &Path) -> String {
    match file.parent().and_then(|p| p.strip_prefix(root).ok()) {
        Some(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => ".".to_string(),
    }
}
