// regexgrid/src/logger.rs
//! Process-wide logger setup.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises `env_logger` once.
///
/// `RUST_LOG` is honoured when `level` is `None`; otherwise `level` wins for every
/// module. Calling this twice is harmless (the second call is ignored).
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

/// Picks the override level from the `--quiet` / `--debug` flags.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
