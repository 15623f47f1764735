//! JSON run report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::organizer::ProcessingStats;

/// Folder under the destination that receives reports by default.
pub const REPORTS_DIR: &str = "reports";

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// RFC 3339 timestamp.
    pub generated_at: String,
    pub source: String,
    pub destination: String,
    pub elapsed_ms: u64,
    /// False when the run was stopped before every file was processed.
    pub completed: bool,
    pub stats: ProcessingStats,
}

impl RunReport {
    pub fn new(
        source: &Path,
        destination: &Path,
        elapsed: Duration,
        completed: bool,
        stats: ProcessingStats,
    ) -> Self {
        Self::at(Local::now(), source, destination, elapsed, completed, stats)
    }

    fn at(
        now: DateTime<Local>,
        source: &Path,
        destination: &Path,
        elapsed: Duration,
        completed: bool,
        stats: ProcessingStats,
    ) -> Self {
        Self {
            generated_at: now.to_rfc3339(),
            source: source.display().to_string(),
            destination: destination.display().to_string(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            completed,
            stats,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path`, creating parent folders as needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Report {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| Error::Report {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "wrote report");
        Ok(())
    }
}

/// `<dest>/reports/organize_report_<YYYYmmdd_HHMMSS>.json`
pub fn default_report_path(dest: &Path) -> PathBuf {
    default_report_path_at(dest, Local::now())
}

fn default_report_path_at(dest: &Path, now: DateTime<Local>) -> PathBuf {
    dest.join(REPORTS_DIR).join(format!(
        "organize_report_{}.json",
        now.format("%Y%m%d_%H%M%S")
    ))
}
