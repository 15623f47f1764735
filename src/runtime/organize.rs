use std::process::ExitCode;
use std::time::Instant;

use crate::cli::OrganizeArgs;
use crate::config::Settings;
use crate::organizer::{FileOutcome, Organizer, ProcessingStats, Progress};
use crate::report::{self, RunReport};

use super::settings::organize_options;

pub fn run(args: &OrganizeArgs, settings: &Settings) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let options = organize_options(settings, args);
    let organizer = Organizer::configure(&args.source, &args.destination, options)?;

    let started = Instant::now();
    let stats = if args.verbose {
        organizer.organize_with_progress(print_progress)?
    } else {
        organizer.organize()?
    };
    let elapsed = started.elapsed();
    let completed = !organizer.stop_handle().is_stopped();

    print_summary(&stats, elapsed.as_secs_f64());
    if args.stats {
        print_histogram(&stats);
    }
    if args.verbose && !stats.error_list.is_empty() {
        println!();
        println!("Errors:");
        for record in &stats.error_list {
            println!("  [{}] {}", record.kind, record.message);
        }
    }

    if let Some(path) = &args.report {
        let path = path
            .clone()
            .unwrap_or_else(|| report::default_report_path(&args.destination));
        RunReport::new(&args.source, &args.destination, elapsed, completed, stats).write_to(&path)?;
        println!("Report written to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn print_progress(p: &Progress<'_>) {
    let path = p.file.path.display();
    match p.outcome {
        FileOutcome::Copied { dest, .. } => {
            println!("[{}/{}] copied   {path} -> {}", p.processed, p.total, dest.display())
        }
        FileOutcome::Skipped { dest, .. } => {
            println!("[{}/{}] skipped  {path} ({} exists)", p.processed, p.total, dest.display())
        }
        FileOutcome::Unfiled => println!("[{}/{}] no year  {path}", p.processed, p.total),
        FileOutcome::Failed(err) => println!("[{}/{}] error    {err}", p.processed, p.total),
    }
}

fn print_summary(stats: &ProcessingStats, seconds: f64) {
    println!("Processed {} files in {seconds:.1}s", stats.total);
    println!("  copied:   {}", stats.copied);
    println!("  skipped:  {}", stats.skipped);
    println!("  no year:  {}", stats.no_year);
    println!("  errors:   {}", stats.errors);
}

fn print_histogram(stats: &ProcessingStats) {
    println!();
    println!("Files per year:");
    for (year, count) in stats.years_descending() {
        println!("  {year}: {count}");
    }
    if !stats.formats.is_empty() {
        println!();
        println!("Files per format:");
        for (format, count) in &stats.formats {
            println!("  {format}: {count}");
        }
    }
    println!();
    println!("Copied {:.1} MiB", stats.bytes_copied as f64 / (1024.0 * 1024.0));
}
