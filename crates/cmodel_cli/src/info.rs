//! `cmodel info`: list the scopes and signals of the configured instance.

use std::fmt::Write as _;

use cmodel_config::SimSettings;
use cmodel_sim::{Counter, SimContext};

use crate::settings::load_settings;
use crate::GlobalArgs;

/// Prints the instance description to stdout.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = load_settings(global)?;
    print!("{}", describe(&settings)?);
    Ok(0)
}

/// Builds an instance from `settings` and renders its symbol table.
pub fn describe(settings: &SimSettings) -> Result<String, Box<dyn std::error::Error>> {
    let model = Counter::from_settings(
        SimContext::shared(settings.model.name.as_str()),
        settings,
        &settings.model.instance,
    )?;

    let mut out = String::new();
    writeln!(out, "model:          {}", model.model_name())?;
    writeln!(out, "instance:       {}", model.name())?;
    writeln!(out, "clock:          {}", settings.clock.frequency)?;
    writeln!(out, "converge limit: {}", model.engine().converge_limit())?;
    writeln!(out, "scopes:")?;
    for scope in model.symbol_table().scopes() {
        writeln!(out, "  {scope}")?;
    }
    writeln!(out, "signals:")?;
    for (name, signal) in model.symbol_table().signals() {
        writeln!(
            out,
            "  {name:<20} {:>2} bit  {}",
            signal.width(),
            signal.direction()
        )?;
    }

    model.destroy();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_defaults() {
        let text = describe(&SimSettings::default()).unwrap();
        assert!(text.contains("model:          counter"));
        assert!(text.contains("instance:       TOP"));
        assert!(text.contains("converge limit: 100"));
        assert!(text.contains("  TOP.counter\n"));
        assert!(text.contains("TOP.CLK"));
        assert!(text.contains("TOP.counter.iDATA"));
        assert!(text.contains("16 bit  output"));
        assert!(text.contains("16 bit  internal"));
    }

    #[test]
    fn describe_uses_configured_instance() {
        let mut settings = SimSettings::default();
        settings.model.instance = "dut".to_string();
        settings.eval.converge_limit = 7;
        let text = describe(&settings).unwrap();
        assert!(text.contains("instance:       dut"));
        assert!(text.contains("dut.RST"));
        assert!(text.contains("converge limit: 7"));
    }
}
