//! Error types.
//!
//! `Error` covers run-level failures that abort an organize run before any
//! file is touched. `FileError` covers everything that can go wrong with a
//! single file; those are recorded in the run statistics and never abort.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Run-level (fatal) errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("source directory does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("could not create destination directory {}: {source}", path.display())]
    DestinationCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not write tags: {0}")]
    TagWrite(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure while processing one file. Recorded, counted, never propagated.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("permission denied: {}", path.display())]
    Permission { path: PathBuf },

    #[error("could not create folder {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not copy to {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Classify an I/O failure that happened while copying to `dest`.
    pub fn copy(dest: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::Permission {
                path: dest.to_path_buf(),
            }
        } else {
            Self::Copy {
                path: dest.to_path_buf(),
                source: err,
            }
        }
    }

    /// Classify an I/O failure that happened while creating `dir`.
    pub fn create_dir(dir: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::Permission {
                path: dir.to_path_buf(),
            }
        } else {
            Self::CreateDir {
                path: dir.to_path_buf(),
                source: err,
            }
        }
    }

    /// Short machine-friendly label used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Permission { .. } => "permission",
            Self::CreateDir { .. } => "create-dir",
            Self::Copy { .. } => "copy",
        }
    }
}

/// Failure of the tag reader for one file.
#[derive(Debug, Error)]
pub enum TagReadError {
    /// The file could not be opened or read at all.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Zero-byte file: nothing to read and nothing worth copying.
    #[error("file is empty")]
    Empty,

    /// Not a valid container for its extension, or no tag layer could be parsed.
    #[error("unreadable tags: {0}")]
    Unreadable(String),
}

impl TagReadError {
    /// Hard failures are counted as per-file errors. `Unreadable` only means the
    /// tag strategies have nothing to offer and resolution falls through.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Empty)
    }

    pub fn into_file_error(self, path: &Path) -> FileError {
        match self {
            Self::Io(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                FileError::Permission {
                    path: path.to_path_buf(),
                }
            }
            other => FileError::Read {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_is_classified_for_copies_and_reads() {
        let denied = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let dest = Path::new("/out/1999/a.mp3");

        assert_eq!(FileError::copy(dest, denied()).kind(), "permission");
        assert_eq!(FileError::create_dir(dest, denied()).kind(), "permission");
        assert_eq!(
            FileError::copy(dest, io::Error::other("disk full")).kind(),
            "copy"
        );
        assert_eq!(
            TagReadError::Io(denied()).into_file_error(dest).kind(),
            "permission"
        );
        assert_eq!(TagReadError::Empty.into_file_error(dest).kind(), "read");
    }

    #[test]
    fn run_errors_name_the_path() {
        let err = Error::SourceNotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "source directory does not exist: /missing");
    }
}
