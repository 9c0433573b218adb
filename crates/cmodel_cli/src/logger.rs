//! Log setup for the `cmodel` binary, backed by `env_logger`.

use log::LevelFilter;

/// Maps the global verbosity flags to a level filter. `--quiet` wins.
pub fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, true) => LevelFilter::Debug,
        (false, false) => LevelFilter::Warn,
    }
}

fn builder(quiet: bool, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(quiet, verbose))
        .format_timestamp(None)
        .format_target(false);
    builder
}

/// Installs the stderr logger for the process.
pub fn init(quiet: bool, verbose: bool) -> Result<(), log::SetLoggerError> {
    builder(quiet, verbose).try_init()
}
