//! Settings resolution shared by the CLI commands.
//!
//! `--config` may name a `cmodel.toml` file or a directory holding one.
//! Without it the nearest `cmodel.toml` in the current directory or a parent
//! is used, and the built-in defaults apply when there is none.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use cmodel_config::{SimSettings, CONFIG_FILE_NAME};

use crate::{GlobalArgs, RunArgs};

/// Walks up from `start` looking for the nearest `cmodel.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Resolves the settings file selected by the global flags, if any.
pub fn resolve_config_path(
    global: &GlobalArgs,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config) => {
            let path = PathBuf::from(config);
            let file = if path.is_dir() {
                path.join(CONFIG_FILE_NAME)
            } else {
                path
            };
            if !file.is_file() {
                return Err(format!("configuration not found: {}", file.display()).into());
            }
            Ok(Some(file))
        }
        None => Ok(find_config_file(&std::env::current_dir()?)),
    }
}

/// Loads the settings selected by the global flags.
pub fn load_settings(global: &GlobalArgs) -> Result<SimSettings, Box<dyn std::error::Error>> {
    match resolve_config_path(global)? {
        Some(path) => {
            if global.verbose {
                eprintln!("   Using {}", path.display());
            }
            match path.parent() {
                Some(dir) if path.file_name() == Some(OsStr::new(CONFIG_FILE_NAME)) => {
                    Ok(cmodel_config::load_config(dir)?)
                }
                _ => {
                    let content = std::fs::read_to_string(&path)?;
                    Ok(cmodel_config::load_config_from_str(&content)?)
                }
            }
        }
        None => Ok(SimSettings::default()),
    }
}

/// Applies `cmodel run` flags on top of loaded settings.
pub fn apply_overrides(
    settings: &mut SimSettings,
    args: &RunArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(cycles) = args.cycles {
        settings.stimulus.cycles = cycles;
    }
    if let Some(reset_cycles) = args.reset_cycles {
        settings.stimulus.reset_cycles = reset_cycles;
    }
    if args.no_enable {
        settings.stimulus.enable = false;
    }
    if let Some(instances) = args.instances {
        if instances == 0 {
            return Err("--instances must be at least 1".into());
        }
        settings.batch.instances = instances;
    }
    if let Some(ref clock) = args.clock {
        settings.clock.frequency = clock.clone();
        if settings.clock.period_fs().is_none() {
            return Err(format!("unusable clock frequency '{clock}'").into());
        }
    }
    Ok(())
}
