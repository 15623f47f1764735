use std::fmt;
use std::path::{Path, PathBuf};

/// Container family of an audio file, derived from its extension.
///
/// The kind decides which tag schema the year resolver applies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKind {
    Mp3,
    Flac,
    Mp4,
    Ogg,
    Wav,
    Wma,
    Aac,
    /// Recognized by configuration but without a dedicated tag schema.
    Generic,
}

impl ContainerKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "mp3" => Self::Mp3,
            "flac" => Self::Flac,
            "m4a" | "mp4" | "m4b" => Self::Mp4,
            "ogg" | "oga" => Self::Ogg,
            "wav" => Self::Wav,
            "wma" => Self::Wma,
            "aac" => Self::Aac,
            _ => Self::Generic,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Generic)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Mp4 => "mp4",
            Self::Ogg => "ogg",
            Self::Wav => "wav",
            Self::Wma => "wma",
            Self::Aac => "aac",
            Self::Generic => "other",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A discovered audio file. Identified by its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFile {
    pub path: PathBuf,
    pub kind: ContainerKind,
}

impl AudioFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = ContainerKind::from_path(&path);
        Self { path, kind }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|s| s.to_str())
    }

    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }
}
