use std::fmt;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

use lofty::file::TaggedFile;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemValue, Tag};

use crate::error::TagReadError;
use crate::library::ContainerKind;

use super::set::TagSet;

/// Reads the tags of one file.
///
/// Implementations must not panic on corrupt input. `TagReadError::Unreadable`
/// tells the resolver to fall through to the file name; `Io` and `Empty` are
/// failures of the file itself.
pub trait TagReader: Send + Sync {
    fn read_tags(&self, path: &Path, kind: ContainerKind) -> Result<TagSet, TagReadError>;
}

/// `TagReader` backed by `lofty`, merging every tag layer found in the file
/// (primary layer first).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path, _kind: ContainerKind) -> Result<TagSet, TagReadError> {
        // Open ourselves first so permission and I/O problems are not
        // mistaken for an unparseable container.
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(TagReadError::Empty);
        }
        drop(file);

        let tagged = Probe::open(path)
            .map_err(unreadable)?
            .guess_file_type()
            .map_err(unreadable)?
            .read()
            .map_err(unreadable)?;

        Ok(collect_tags(&tagged))
    }
}

fn unreadable(err: impl fmt::Display) -> TagReadError {
    TagReadError::Unreadable(err.to_string())
}

fn collect_tags(tagged: &TaggedFile) -> TagSet {
    let mut set = TagSet::new();

    let primary_type = tagged.primary_tag_type();
    if let Some(tag) = tagged.primary_tag() {
        collect_from(tag, &mut set);
    }
    for tag in tagged.tags().iter().filter(|t| t.tag_type() != primary_type) {
        collect_from(tag, &mut set);
    }

    set
}

fn collect_from(tag: &Tag, set: &mut TagSet) {
    for item in tag.items() {
        let Some(name) = canonical_name(item.key().clone()) else {
            continue;
        };
        if let ItemValue::Text(text) = item.value() {
            set.insert(name, text);
        }
    }
}

fn canonical_name(key: ItemKey) -> Option<&'static str> {
    match key {
        ItemKey::RecordingDate => Some("date"),
        ItemKey::Year => Some("year"),
        ItemKey::ReleaseDate => Some("releasedate"),
        ItemKey::OriginalReleaseDate => Some("originaldate"),
        ItemKey::CopyrightMessage => Some("copyright"),
        _ => None,
    }
}

/// Best-effort playback duration, `None` when the file cannot be parsed.
pub fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    Some(tagged.properties().duration())
}
