use crate::cli::OrganizeArgs;
use crate::config;
use crate::organizer::OrganizeOptions;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("yearshelf: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; a broken file must not block a run.
            eprintln!("yearshelf: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Settings first, then command-line flags. Flags only ever switch
/// behaviour on.
pub fn organize_options(settings: &config::Settings, args: &OrganizeArgs) -> OrganizeOptions {
    let mut options = OrganizeOptions::from_settings(settings);
    options.overwrite |= args.overwrite;
    options.unknown_year_folder |= args.unknown_year;
    options.update_newer |= args.update_newer;
    if let Some(workers) = args.workers {
        options.workers = workers;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn args(extra: &[&str]) -> OrganizeArgs {
        let mut argv = vec!["yearshelf", "organize", "in", "out"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Organize(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn flags_layer_over_settings() {
        let mut settings = config::Settings::default();
        settings.organize.workers = 3;
        settings.organize.unknown_year_folder = true;

        let options = organize_options(&settings, &args(&["-o"]));
        assert!(options.overwrite);
        assert!(options.unknown_year_folder);
        assert_eq!(options.workers, 3);

        let options = organize_options(&settings, &args(&["--workers", "1", "--update-newer"]));
        assert_eq!(options.workers, 1);
        assert!(options.update_newer);
        assert!(!options.overwrite);
    }
}
