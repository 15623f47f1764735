use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::logging;

mod inspect;
mod organize;
mod settings;

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = settings::load_settings();

    let verbose = matches!(&cli.command, Command::Organize(args) if args.verbose);
    logging::init(&settings.logging.level, verbose);

    match cli.command {
        Command::Organize(args) => organize::run(&args, &settings),
        Command::Scan { source } => inspect::scan(&source, &settings),
        Command::Inspect { files } => inspect::inspect(&files, &settings),
        Command::SetYear { file, year } => inspect::set_year(&file, year, &settings),
        Command::Config => inspect::print_config(&settings),
    }
}
