use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ResolverSettings;
use crate::error::TagReadError;
use crate::library::{AudioFile, ContainerKind};
use crate::tags::{TagReader, TagSet};

use super::parse::{find_year, parse_copyright_year, parse_date_year};
use super::range::YearRange;
use super::schema::{ParseRule, TagSchema};

/// Which strategy produced a year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSource {
    /// A tag field, by canonical name.
    Tag(String),
    Filename,
    /// A parent folder name.
    Folder(String),
}

impl fmt::Display for YearSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(name) => write!(f, "tag '{name}'"),
            Self::Filename => f.write_str("file name"),
            Self::Folder(name) => write!(f, "folder '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearResolution {
    Resolved { year: i32, source: YearSource },
    Unresolved,
}

impl YearResolution {
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Resolved { year, .. } => Some(*year),
            Self::Unresolved => None,
        }
    }
}

/// Maps an audio file to a release year using an ordered fallback chain.
#[derive(Clone)]
pub struct YearResolver {
    reader: Arc<dyn TagReader>,
    range: YearRange,
    tag_names: Vec<String>,
    use_filename: bool,
    use_path: bool,
}

impl fmt::Debug for YearResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YearResolver")
            .field("range", &self.range)
            .field("tag_names", &self.tag_names)
            .field("use_filename", &self.use_filename)
            .field("use_path", &self.use_path)
            .finish_non_exhaustive()
    }
}

impl YearResolver {
    pub fn new(reader: Arc<dyn TagReader>) -> Self {
        Self::from_settings(&ResolverSettings::default(), reader)
    }

    pub fn from_settings(settings: &ResolverSettings, reader: Arc<dyn TagReader>) -> Self {
        Self {
            reader,
            range: YearRange::from_settings(settings),
            tag_names: settings.tag_names.clone(),
            use_filename: settings.use_filename,
            use_path: settings.use_path,
        }
    }

    pub fn with_range(mut self, range: YearRange) -> Self {
        self.range = range;
        self
    }

    /// Resolve a year, never failing: a file whose tags cannot be read at all
    /// still gets the file-name and folder strategies.
    pub fn resolve_year(&self, file: &AudioFile) -> YearResolution {
        match self.try_resolve_year(file, None) {
            Ok(resolution) => resolution,
            Err(err) => {
                debug!(path = %file.path.display(), error = %err, "tags unavailable");
                self.resolve_from_location(&file.path, None)
            }
        }
    }

    /// Resolve a year, surfacing hard read failures (I/O errors, empty files)
    /// so the caller can count them. `root` bounds the folder strategy: folder
    /// names above it are not considered.
    pub fn try_resolve_year(
        &self,
        file: &AudioFile,
        root: Option<&Path>,
    ) -> Result<YearResolution, TagReadError> {
        match self.reader.read_tags(&file.path, file.kind) {
            Ok(tags) => {
                if let Some((year, field)) = self.year_from_tags(file.kind, &tags) {
                    return Ok(YearResolution::Resolved {
                        year,
                        source: YearSource::Tag(field),
                    });
                }
            }
            Err(err) if err.is_hard() => return Err(err),
            Err(err) => {
                trace!(path = %file.path.display(), error = %err, "falling back to file name");
            }
        }

        Ok(self.resolve_from_location(&file.path, root))
    }

    /// First in-range year among the schema's candidate fields.
    pub fn year_from_tags(&self, kind: ContainerKind, tags: &TagSet) -> Option<(i32, String)> {
        let schema = TagSchema::for_kind(kind, &self.tag_names);
        for candidate in schema.candidates() {
            for value in tags.get(candidate.field) {
                let year = match candidate.rule {
                    ParseRule::Date => parse_date_year(value, self.range),
                    ParseRule::Copyright => parse_copyright_year(value, self.range),
                };
                if let Some(year) = year {
                    return Some((year, candidate.field.to_ascii_lowercase()));
                }
            }
        }
        None
    }

    pub fn year_from_filename(&self, path: &Path) -> Option<i32> {
        let stem = path.file_stem()?.to_str()?;
        find_year(stem, self.range)
    }

    /// Nearest parent folder whose name carries a year, stopping at `root`
    /// (inclusive) when given.
    pub fn year_from_folders(&self, path: &Path, root: Option<&Path>) -> Option<(i32, String)> {
        for dir in path.ancestors().skip(1) {
            let Some(name) = dir.file_name().and_then(|s| s.to_str()) else {
                break;
            };
            if let Some(year) = find_year(name, self.range) {
                return Some((year, name.to_string()));
            }
            if root.is_some_and(|r| dir == r) {
                break;
            }
        }
        None
    }

    fn resolve_from_location(&self, path: &Path, root: Option<&Path>) -> YearResolution {
        if self.use_filename {
            if let Some(year) = self.year_from_filename(path) {
                return YearResolution::Resolved {
                    year,
                    source: YearSource::Filename,
                };
            }
        }
        if self.use_path {
            if let Some((year, folder)) = self.year_from_folders(path, root) {
                return YearResolution::Resolved {
                    year,
                    source: YearSource::Folder(folder),
                };
            }
        }
        YearResolution::Unresolved
    }
}
