use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::config::Settings;
use crate::error::Error;
use crate::library::{self, AudioFile};
use crate::tags::{self, LoftyTagReader, TagReader};
use crate::year::{YearRange, YearResolution, YearResolver};

type RunResult = Result<ExitCode, Box<dyn std::error::Error>>;

pub fn scan(source: &Path, settings: &Settings) -> RunResult {
    if !source.is_dir() {
        return Err(Error::SourceNotFound(source.to_path_buf()).into());
    }
    let files = library::scan(source, &settings.library, None);

    let mut per_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for file in &files {
        *per_kind.entry(file.kind.label()).or_default() += 1;
    }
    println!("{} audio files in {}", files.len(), source.display());
    for (kind, count) in per_kind {
        println!("  {kind}: {count}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn inspect(files: &[PathBuf], settings: &Settings) -> RunResult {
    let reader = LoftyTagReader;
    let resolver = YearResolver::from_settings(&settings.resolver, Arc::new(reader));
    let mut failed = false;

    for (i, path) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failed = true;
                continue;
            }
        };
        let file = AudioFile::new(path.clone());

        println!("{}", path.display());
        println!("  format:   {}", file.kind);
        println!("  size:     {} bytes", meta.len());
        if let Ok(modified) = meta.modified() {
            let modified: DateTime<Local> = modified.into();
            println!("  modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
        }
        if let Some(duration) = tags::probe_duration(path) {
            let secs = duration.as_secs();
            println!("  length:   {}:{:02}", secs / 60, secs % 60);
        }

        match reader.read_tags(path, file.kind) {
            Ok(set) if set.is_empty() => println!("  tags:     none"),
            Ok(set) => {
                println!("  tags:");
                for (name, values) in set.iter() {
                    println!("    {name} = {}", values.join("; "));
                }
            }
            Err(err) => println!("  tags:     {err}"),
        }

        match resolver.resolve_year(&file) {
            YearResolution::Resolved { year, source } => {
                println!("  year:     {year} (from {source})")
            }
            YearResolution::Unresolved => println!("  year:     unresolved"),
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

pub fn set_year(file: &Path, year: i32, settings: &Settings) -> RunResult {
    let range = YearRange::from_settings(&settings.resolver);
    if !range.contains(year) {
        return Err(Error::TagWrite(format!(
            "year {year} is outside {}..={}",
            range.min, range.max
        ))
        .into());
    }
    tags::write_year(file, year)?;
    println!("{}: year set to {year}", file.display());
    Ok(ExitCode::SUCCESS)
}

pub fn print_config(settings: &Settings) -> RunResult {
    if let Some(path) = crate::config::resolve_config_path() {
        println!("# config file: {}", path.display());
    }
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(ExitCode::SUCCESS)
}
