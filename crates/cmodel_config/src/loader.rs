//! Settings file loading and validation.

use crate::error::ConfigError;
use crate::types::SimSettings;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "cmodel.toml";

/// Loads and validates `<dir>/cmodel.toml`.
pub fn load_config(dir: &Path) -> Result<SimSettings, ConfigError> {
    let content = std::fs::read_to_string(dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates settings from a TOML string.
pub fn load_config_from_str(content: &str) -> Result<SimSettings, ConfigError> {
    let settings: SimSettings =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate(&settings)?;
    Ok(settings)
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Rejects values the engine or harness cannot run with.
fn validate(settings: &SimSettings) -> Result<(), ConfigError> {
    if settings.model.name.trim().is_empty() {
        return Err(invalid("model.name", "must not be empty"));
    }
    if settings.model.instance.trim().is_empty() {
        return Err(invalid("model.instance", "must not be empty"));
    }
    if settings.model.instance.contains('.') {
        return Err(invalid("model.instance", "must not contain '.'"));
    }
    if settings.eval.converge_limit == 0 {
        return Err(invalid("eval.converge_limit", "must be at least 1"));
    }
    if settings.clock.period_fs().is_none() {
        return Err(invalid(
            "clock.frequency",
            format!("'{}' is not a usable clock frequency", settings.clock.frequency),
        ));
    }
    if settings.batch.instances == 0 {
        return Err(invalid("batch.instances", "must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = load_config_from_str("").unwrap();
        assert_eq!(settings, SimSettings::default());
    }

    #[test]
    fn full_file() {
        let toml = r#"
[model]
name = "counter16"
instance = "dut"

[eval]
converge_limit = 8

[clock]
frequency = "50MHz"

[stimulus]
reset_cycles = 3
cycles = 40
enable = false

[batch]
instances = 4
"#;
        let s = load_config_from_str(toml).unwrap();
        assert_eq!(s.model.name, "counter16");
        assert_eq!(s.model.instance, "dut");
        assert_eq!(s.eval.converge_limit, 8);
        assert_eq!(s.clock.period_fs(), Some(20_000_000));
        assert_eq!(s.stimulus.reset_cycles, 3);
        assert_eq!(s.stimulus.cycles, 40);
        assert!(!s.stimulus.enable);
        assert_eq!(s.batch.instances, 4);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let s = load_config_from_str("[stimulus]\ncycles = 5\n").unwrap();
        assert_eq!(s.stimulus.cycles, 5);
        assert_eq!(s.stimulus.reset_cycles, 1);
        assert!(s.stimulus.enable);
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = load_config_from_str("[eval]\nlimit = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn zero_converge_limit_rejected() {
        let err = load_config_from_str("[eval]\nconverge_limit = 0\n").unwrap_err();
        assert!(err.to_string().contains("eval.converge_limit"));
    }

    #[test]
    fn smallest_converge_limit_accepted() {
        let s = load_config_from_str("[eval]\nconverge_limit = 1\n").unwrap();
        assert_eq!(s.eval.converge_limit, 1);
    }

    #[test]
    fn bad_frequency_rejected() {
        let err = load_config_from_str("[clock]\nfrequency = \"0Hz\"\n").unwrap_err();
        assert!(err.to_string().contains("clock.frequency"));
    }

    #[test]
    fn empty_names_rejected() {
        let err = load_config_from_str("[model]\nname = \" \"\n").unwrap_err();
        assert!(err.to_string().contains("model.name"));
        let err = load_config_from_str("[model]\ninstance = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("model.instance"));
    }

    #[test]
    fn dotted_instance_rejected() {
        let err = load_config_from_str("[model]\ninstance = \"a.b\"\n").unwrap_err();
        assert!(err.to_string().contains("'.'"));
    }

    #[test]
    fn zero_instances_rejected() {
        let err = load_config_from_str("[batch]\ninstances = 0\n").unwrap_err();
        assert!(err.to_string().contains("batch.instances"));
    }

    #[test]
    fn load_from_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[stimulus]\ncycles = 2\n",
        )
        .unwrap();
        let s = load_config(tmp.path()).unwrap();
        assert_eq!(s.stimulus.cycles, 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
