use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/yearshelf/config.toml` or `~/.config/yearshelf/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `YEARSHELF__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// Command-line flags are applied on top of the loaded settings by the CLI.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub organize: OrganizeSettings,
    pub library: LibrarySettings,
    pub resolver: ResolverSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrganizeSettings {
    /// Replace files that already exist at the destination.
    pub overwrite: bool,
    /// Copy files without a resolvable year into an "Unknown Year" folder.
    pub unknown_year_folder: bool,
    /// Replace an existing destination when the source was modified later.
    pub update_newer: bool,
    /// Carry the source modification time over to the copy.
    pub preserve_mtime: bool,
    /// Number of worker threads.
    ///
    /// 1 processes files sequentially; 0 uses the available parallelism.
    pub workers: usize,
    /// Capacity of the scanner -> worker queue in concurrent mode.
    pub queue_capacity: usize,
    /// When a file counts towards the per-year histogram.
    pub year_count: YearCountSetting,
}

impl Default for OrganizeSettings {
    fn default() -> Self {
        Self {
            overwrite: false,
            unknown_year_folder: false,
            update_newer: false,
            preserve_mtime: true,
            workers: 1,
            queue_capacity: 64,
            year_count: YearCountSetting::OnCopy,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum YearCountSetting {
    #[serde(alias = "on_copy", alias = "copy", alias = "copied")]
    OnCopy,
    #[serde(alias = "on_resolve", alias = "resolve", alias = "resolved")]
    OnResolve,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "m4a", "mp4", "ogg", "wav", "wma", "aac"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: false,
            include_hidden: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Tag names probed, in order, for containers without a dedicated schema.
    pub tag_names: Vec<String>,
    /// Earliest year accepted from any source.
    pub min_year: i32,
    /// Latest year accepted. Unset means "next calendar year".
    pub max_year: Option<i32>,
    /// Look for a year in the file name when the tags have none.
    pub use_filename: bool,
    /// Look for a year in the parent folders when the file name has none.
    pub use_path: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            tag_names: ["date", "year", "releasedate", "originaldate"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_year: 1900,
            max_year: None,
            use_filename: true,
            use_path: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set (e.g. "info", "yearshelf=debug").
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
