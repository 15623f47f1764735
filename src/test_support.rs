//! Test doubles shared by unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::TagReadError;
use crate::library::ContainerKind;
use crate::tags::{TagReader, TagSet};

#[derive(Debug, Clone)]
pub enum Canned {
    Tags(TagSet),
    Empty,
    Unreadable,
    Denied,
}

/// `TagReader` answering from a table keyed by file name.
///
/// Files missing from the table read as having no tags.
#[derive(Debug, Default)]
pub struct FakeReader {
    by_name: Mutex<HashMap<String, Canned>>,
    reads: Mutex<Vec<PathBuf>>,
}

impl FakeReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(self, name: &str, pairs: &[(&str, &str)]) -> Self {
        let set: TagSet = pairs.iter().copied().collect();
        self.canned(name, Canned::Tags(set))
    }

    pub fn canned(self, name: &str, canned: Canned) -> Self {
        self.by_name
            .lock()
            .unwrap()
            .insert(name.to_string(), canned);
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }
}

impl TagReader for FakeReader {
    fn read_tags(&self, path: &Path, _kind: ContainerKind) -> Result<TagSet, TagReadError> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        match self.by_name.lock().unwrap().get(&name).cloned() {
            Some(Canned::Tags(set)) => Ok(set),
            Some(Canned::Empty) => Err(TagReadError::Empty),
            Some(Canned::Unreadable) => Err(TagReadError::Unreadable("fake".to_string())),
            Some(Canned::Denied) => Err(TagReadError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "fake denial",
            ))),
            None => Ok(TagSet::new()),
        }
    }
}

/// Smallest FLAC stream lofty accepts: a STREAMINFO block followed by a
/// VORBIS_COMMENT block holding `comments` (`KEY=value`), no audio frames.
pub fn minimal_flac(comments: &[&str]) -> Vec<u8> {
    let mut out = b"fLaC".to_vec();

    let mut info = Vec::with_capacity(34);
    info.extend_from_slice(&4096u16.to_be_bytes());
    info.extend_from_slice(&4096u16.to_be_bytes());
    info.extend_from_slice(&[0; 6]);
    // 44.1 kHz, 2 channels, 16 bits, 0 samples.
    let packed: u64 = (44_100u64 << 44) | (1 << 41) | (15 << 36);
    info.extend_from_slice(&packed.to_be_bytes());
    info.extend_from_slice(&[0; 16]);
    push_block(&mut out, 0, false, &info);

    let vendor = b"yearshelf";
    let mut vorbis = Vec::new();
    vorbis.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    vorbis.extend_from_slice(vendor);
    vorbis.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for comment in comments {
        vorbis.extend_from_slice(&(comment.len() as u32).to_le_bytes());
        vorbis.extend_from_slice(comment.as_bytes());
    }
    push_block(&mut out, 4, true, &vorbis);

    out
}

fn push_block(out: &mut Vec<u8>, kind: u8, last: bool, body: &[u8]) {
    out.push(if last { 0x80 | kind } else { kind });
    out.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    out.extend_from_slice(body);
}
