use std::sync::atomic::{AtomicBool, Ordering};

use silksave::LoadedSave;

use crate::error::{Error, Result};

static IS_DEBUG: AtomicBool = AtomicBool::new(false);

pub fn initialize_debug_from_args(matches: &clap::ArgMatches) {
    let is_debug = matches.is_present("debug");
    IS_DEBUG.store(is_debug, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    IS_DEBUG.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! debug_eprintln {
    ($($arg:tt)*) => {
        if $crate::utils::is_debug_enabled() {
            eprintln!($($arg)*);
        }
    };
}

pub fn require_path<'a>(matches: &'a clap::ArgMatches) -> Result<&'a str> {
    matches
        .value_of("path")
        .ok_or_else(|| Error::CliInputError("--path is required".to_string()))
}

pub fn load_save(matches: &clap::ArgMatches) -> Result<LoadedSave> {
    let path = require_path(matches)?;
    debug_eprintln!("loading save file: {}", path);
    let loaded = LoadedSave::from_file(path)?;
    debug_eprintln!(
        "loaded: {} scenes indexed, mode {}",
        loaded.flags().scene_names().count(),
        loaded.mode()
    );
    Ok(loaded)
}
