use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::AudioFile;

pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    has_extension(path, &normalized_extensions(settings))
}

/// Configured extensions, lower-cased and without leading dots.
pub(super) fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// `exts` must already be normalized.
pub(super) fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn keep_entry(entry: &DirEntry, settings: &LibrarySettings, exclude: Option<&Path>) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if !settings.include_hidden && is_hidden(entry.path()) {
        return false;
    }
    match exclude {
        Some(excluded) => !entry.path().starts_with(excluded),
        None => true,
    }
}

/// Lazily walk `dir` in directory order, yielding qualifying audio files.
///
/// Entries under `exclude` are pruned (used to keep a destination that lives
/// inside the source tree out of the walk). Unreadable entries and symlink
/// loops are skipped.
pub fn walk<'a>(
    dir: &'a Path,
    settings: &'a LibrarySettings,
    exclude: Option<&'a Path>,
) -> impl Iterator<Item = AudioFile> + 'a {
    let exts = normalized_extensions(settings);
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    walker
        .into_iter()
        .filter_entry(move |e| keep_entry(e, settings, exclude))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .filter(move |entry| has_extension(entry.path(), &exts))
        .map(|entry| AudioFile::new(entry.into_path()))
}

/// Collect every qualifying audio file under `dir`, sorted by path.
pub fn scan(dir: &Path, settings: &LibrarySettings, exclude: Option<&Path>) -> Vec<AudioFile> {
    let mut files: Vec<AudioFile> = walk(dir, settings, exclude).collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}
