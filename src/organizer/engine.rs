use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::error::{Error, FileError, Result};
use crate::library::{self, AudioFile};
use crate::tags::{LoftyTagReader, TagReader};
use crate::year::YearResolver;

use super::copy;
use super::options::{ExecutionMode, OrganizeOptions, UNKNOWN_YEAR_FOLDER};
use super::pool;
use super::stats::{FileOutcome, ProcessingStats};

/// Cloneable handle that asks a running organize to stop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Snapshot handed to the progress callback after each file.
#[derive(Debug)]
pub struct Progress<'a> {
    pub processed: usize,
    /// Files found by the counting pass. Never below `processed`.
    pub total: usize,
    pub file: &'a AudioFile,
    pub outcome: &'a FileOutcome,
    pub stats: &'a ProcessingStats,
}

/// Canonical source root and the subtree the walk must skip.
#[derive(Debug)]
pub(super) struct Roots {
    pub source: PathBuf,
    pub excluded: Option<PathBuf>,
}

/// Destinations written (or about to be written) during the current run.
///
/// The existence check and the claim happen under one lock. Each claimed
/// destination carries its own write lock, so two files with the same name
/// are copied one after the other and never interleave.
#[derive(Debug, Default)]
pub(super) struct Claims(Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>);

impl Claims {
    /// The write lock for `dest` when the file should be copied, `None` when
    /// it should be skipped. A destination already claimed in this run is
    /// only written again under `overwrite`.
    fn claim(
        &self,
        src: &Path,
        dest: &Path,
        options: &OrganizeOptions,
    ) -> std::io::Result<Option<Arc<Mutex<()>>>> {
        let mut claimed = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let copy = if claimed.contains_key(dest) {
            options.overwrite
        } else {
            !dest.exists()
                || options.overwrite
                || (options.update_newer && copy::is_newer(src, dest)?)
        };
        if !copy {
            return Ok(None);
        }
        let slot = claimed.entry(dest.to_path_buf()).or_default();
        Ok(Some(Arc::clone(slot)))
    }
}

pub struct Organizer {
    source: PathBuf,
    dest: PathBuf,
    options: OrganizeOptions,
    resolver: YearResolver,
    stop: StopHandle,
}

impl Organizer {
    /// Validate the source and build an organizer reading tags with lofty.
    /// The destination is created on the first `organize` call.
    pub fn configure(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        options: OrganizeOptions,
    ) -> Result<Self> {
        let source = source.into();
        if !source.is_dir() {
            return Err(Error::SourceNotFound(source));
        }
        let resolver = YearResolver::from_settings(&options.resolver, Arc::new(LoftyTagReader));
        Ok(Self {
            source,
            dest: dest.into(),
            options,
            resolver,
            stop: StopHandle::default(),
        })
    }

    pub fn with_tag_reader(mut self, reader: Arc<dyn TagReader>) -> Self {
        self.resolver = YearResolver::from_settings(&self.options.resolver, reader);
        self
    }

    pub fn options(&self) -> &OrganizeOptions {
        &self.options
    }

    /// Every audio file the next run would process, sorted by path.
    pub fn scan(&self) -> Vec<AudioFile> {
        let roots = self.roots();
        library::scan(&roots.source, &self.options.library, roots.excluded.as_deref())
    }

    pub fn count(&self) -> usize {
        let roots = self.roots();
        library::walk(&roots.source, &self.options.library, roots.excluded.as_deref()).count()
    }

    /// Ask a running organize to stop. Files already started finish.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn organize(&self) -> Result<ProcessingStats> {
        self.organize_with_progress(|_| {})
    }

    /// Run the organizer, calling `progress` once per processed file.
    ///
    /// Per-file failures are recorded in the returned stats. Only a missing
    /// source or an uncreatable destination fail the run.
    pub fn organize_with_progress<F>(&self, progress: F) -> Result<ProcessingStats>
    where
        F: Fn(&Progress<'_>) + Sync,
    {
        self.stop.reset();
        if !self.source.is_dir() {
            return Err(Error::SourceNotFound(self.source.clone()));
        }
        fs::create_dir_all(&self.dest).map_err(|source| Error::DestinationCreateFailed {
            path: self.dest.clone(),
            source,
        })?;

        let roots = self.roots();
        let total = self.count();
        let mode = self.options.execution_mode();
        info!(
            source = %self.source.display(),
            dest = %self.dest.display(),
            files = total,
            ?mode,
            "organizing"
        );

        let stats = match mode {
            ExecutionMode::Sequential => self.run_sequential(&roots, total, &progress),
            ExecutionMode::Concurrent { workers } => {
                pool::run(self, &roots, total, workers, &progress)
            }
        };

        info!(
            total = stats.total,
            copied = stats.copied,
            skipped = stats.skipped,
            no_year = stats.no_year,
            errors = stats.errors,
            stopped = self.stop.is_stopped(),
            "organize finished"
        );
        Ok(stats)
    }

    fn run_sequential<F>(&self, roots: &Roots, total: usize, progress: &F) -> ProcessingStats
    where
        F: Fn(&Progress<'_>) + Sync,
    {
        let claims = Claims::default();
        let mut stats = ProcessingStats::default();
        let files = library::walk(&roots.source, &self.options.library, roots.excluded.as_deref());

        for file in files {
            if self.stop.is_stopped() {
                info!(processed = stats.total, "stop requested");
                break;
            }
            let outcome = self.process_file(&file, &roots.source, &claims);
            stats.record(&file, &roots.source, &outcome, self.options.year_count);
            progress(&Progress {
                processed: stats.total,
                total: total.max(stats.total),
                file: &file,
                outcome: &outcome,
                stats: &stats,
            });
        }
        stats
    }

    pub(super) fn process_file(&self, file: &AudioFile, root: &Path, claims: &Claims) -> FileOutcome {
        match self.place_file(file, root, claims) {
            Ok(outcome) => {
                debug!(path = %file.path.display(), outcome = outcome.label(), year = ?outcome.year(), "processed");
                outcome
            }
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "file failed");
                FileOutcome::Failed(err)
            }
        }
    }

    fn place_file(
        &self,
        file: &AudioFile,
        root: &Path,
        claims: &Claims,
    ) -> std::result::Result<FileOutcome, FileError> {
        let resolution = self
            .resolver
            .try_resolve_year(file, Some(root))
            .map_err(|err| err.into_file_error(&file.path))?;

        let year = resolution.year();
        let folder = match year {
            Some(year) => year.to_string(),
            None if self.options.unknown_year_folder => UNKNOWN_YEAR_FOLDER.to_string(),
            None => return Ok(FileOutcome::Unfiled),
        };

        let Some(name) = file.path.file_name() else {
            return Err(FileError::Read {
                path: file.path.clone(),
                message: "path has no file name".to_string(),
            });
        };
        let dir = self.dest.join(folder);
        fs::create_dir_all(&dir).map_err(|err| FileError::create_dir(&dir, err))?;
        let dest = dir.join(name);

        let slot = claims
            .claim(&file.path, &dest, &self.options)
            .map_err(|err| FileError::copy(&dest, err))?;
        let Some(slot) = slot else {
            return Ok(FileOutcome::Skipped { dest, year });
        };

        let _writing = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes = copy::copy_file(&file.path, &dest, self.options.preserve_mtime)
            .map_err(|err| FileError::copy(&dest, err))?;
        Ok(FileOutcome::Copied { dest, year, bytes })
    }

    fn roots(&self) -> Roots {
        let source = fs::canonicalize(&self.source).unwrap_or_else(|_| self.source.clone());
        let excluded = fs::canonicalize(&self.dest)
            .ok()
            .filter(|dest| dest.starts_with(&source) && dest != &source);
        Roots { source, excluded }
    }
}
