//! Settings types deserialized from `cmodel.toml`.

use cmodel_common::Frequency;
use serde::Deserialize;

/// Default model name reported by the symbol table.
pub const DEFAULT_MODEL_NAME: &str = "counter";
/// Default instance name of the top scope.
pub const DEFAULT_INSTANCE_NAME: &str = "TOP";
/// Default ceiling on passes per evaluation region.
pub const DEFAULT_CONVERGE_LIMIT: u32 = 100;
/// Default harness clock frequency.
pub const DEFAULT_CLOCK_FREQUENCY: &str = "100MHz";

/// The complete settings for a simulation run.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SimSettings {
    /// Naming of the model and its top instance.
    #[serde(default)]
    pub model: ModelSection,
    /// Evaluation engine limits.
    #[serde(default)]
    pub eval: EvalSection,
    /// Harness clock.
    #[serde(default)]
    pub clock: ClockSection,
    /// Stimulus applied by the harness.
    #[serde(default)]
    pub stimulus: StimulusSection,
    /// Parallel batch runs.
    #[serde(default)]
    pub batch: BatchSection,
}

/// `[model]`: names used for diagnostics and symbol lookup.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Model name (default `"counter"`).
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Instance name of the top scope (default `"TOP"`).
    #[serde(default = "default_instance_name")]
    pub instance: String,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            instance: default_instance_name(),
        }
    }
}

/// `[eval]`: evaluation engine limits.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EvalSection {
    /// Passes one region may take beyond its first before the engine
    /// gives up (default 100). Must be at least 1.
    #[serde(default = "default_converge_limit")]
    pub converge_limit: u32,
}

impl Default for EvalSection {
    fn default() -> Self {
        Self {
            converge_limit: DEFAULT_CONVERGE_LIMIT,
        }
    }
}

/// `[clock]`: the clock the harness drives into `CLK`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClockSection {
    /// Frequency string such as `"100MHz"`, parsed to [`Frequency`].
    #[serde(default = "default_clock_frequency")]
    pub frequency: String,
}

impl ClockSection {
    /// Parses the frequency string.
    pub fn parsed_frequency(&self) -> Option<Frequency> {
        self.frequency.parse().ok()
    }

    /// Returns the clock period in femtoseconds, if the frequency is usable.
    pub fn period_fs(&self) -> Option<u64> {
        self.parsed_frequency().and_then(|f| f.period_fs())
    }
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            frequency: default_clock_frequency(),
        }
    }
}

/// `[stimulus]`: what the harness applies to the inputs.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StimulusSection {
    /// Clock cycles with `RST` held high before counting (default 1).
    #[serde(default = "default_reset_cycles")]
    pub reset_cycles: u32,
    /// Clock cycles to run after reset (default 16).
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    /// Level driven on `EN` after reset (default `true`).
    #[serde(default = "default_enable")]
    pub enable: bool,
}

impl Default for StimulusSection {
    fn default() -> Self {
        Self {
            reset_cycles: default_reset_cycles(),
            cycles: default_cycles(),
            enable: default_enable(),
        }
    }
}

/// `[batch]`: independent instances evaluated on the worker pool.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BatchSection {
    /// Number of instances (default 1).
    #[serde(default = "default_instances")]
    pub instances: usize,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            instances: default_instances(),
        }
    }
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_instance_name() -> String {
    DEFAULT_INSTANCE_NAME.to_string()
}

fn default_converge_limit() -> u32 {
    DEFAULT_CONVERGE_LIMIT
}

fn default_clock_frequency() -> String {
    DEFAULT_CLOCK_FREQUENCY.to_string()
}

fn default_reset_cycles() -> u32 {
    1
}

fn default_cycles() -> u32 {
    16
}

fn default_enable() -> bool {
    true
}

fn default_instances() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = SimSettings::default();
        assert_eq!(s.model.name, "counter");
        assert_eq!(s.model.instance, "TOP");
        assert_eq!(s.eval.converge_limit, 100);
        assert_eq!(s.clock.frequency, "100MHz");
        assert_eq!(s.stimulus.reset_cycles, 1);
        assert_eq!(s.stimulus.cycles, 16);
        assert!(s.stimulus.enable);
        assert_eq!(s.batch.instances, 1);
    }

    #[test]
    fn clock_period_from_default_frequency() {
        assert_eq!(ClockSection::default().period_fs(), Some(10_000_000));
    }

    #[test]
    fn clock_period_unusable_frequency() {
        let clock = ClockSection {
            frequency: "soon".to_string(),
        };
        assert!(clock.parsed_frequency().is_none());
        assert!(clock.period_fs().is_none());
    }
}
