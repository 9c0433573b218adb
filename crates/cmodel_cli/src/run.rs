//! `cmodel run`: drive counter instances through reset and counting cycles.

use std::fmt::Write as _;

use cmodel_sim::RunReport;

use crate::settings::{apply_overrides, load_settings};
use crate::{GlobalArgs, OutputFormat, RunArgs};

const FS_PER_PS: u64 = 1_000;
const FS_PER_NS: u64 = 1_000_000;
const FS_PER_US: u64 = 1_000_000_000;
const FS_PER_MS: u64 = 1_000_000_000_000;

/// Runs the simulation and prints the recorded snapshots to stdout.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut settings = load_settings(global)?;
    apply_overrides(&mut settings, args)?;

    if !global.quiet {
        eprintln!(
            "   Simulating {} x{} at {}",
            settings.model.name, settings.batch.instances, settings.clock.frequency
        );
    }

    let reports = cmodel_sim::simulate(&settings)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&reports)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    if !global.quiet {
        for report in &reports {
            eprintln!(
                "   {} finished at {} with DATA = {} ({} active, {} NBA passes)",
                report.instance,
                format_time(report.final_time_fs),
                report.final_data,
                report.active_passes,
                report.nba_passes
            );
        }
    }

    Ok(0)
}

/// Renders one line per recorded rising edge, grouped by instance.
pub fn render_text(reports: &[RunReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for snap in &report.snapshots {
            let _ = writeln!(
                out,
                "{} cycle={} time={} rst={} en={} data={}",
                report.instance,
                snap.cycle,
                format_time(snap.time_fs),
                snap.rst,
                snap.en,
                snap.data
            );
        }
    }
    out
}

/// Formats femtoseconds using the largest unit that divides evenly.
fn format_time(fs: u64) -> String {
    let units = [
        (FS_PER_MS, "ms"),
        (FS_PER_US, "us"),
        (FS_PER_NS, "ns"),
        (FS_PER_PS, "ps"),
    ];
    if fs == 0 {
        return "0 fs".to_string();
    }
    for (scale, suffix) in units {
        if fs >= scale && fs.is_multiple_of(scale) {
            return format!("{} {suffix}", fs / scale);
        }
    }
    format!("{fs} fs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmodel_config::SimSettings;
    use cmodel_sim::Snapshot;

    fn report() -> RunReport {
        RunReport {
            instance: "TOP".to_string(),
            snapshots: vec![
                Snapshot {
                    cycle: 1,
                    time_fs: 5_000_000,
                    clk: 1,
                    rst: 1,
                    en: 0,
                    data: 0,
                    count: 0,
                },
                Snapshot {
                    cycle: 2,
                    time_fs: 15_000_000,
                    clk: 1,
                    rst: 0,
                    en: 1,
                    data: 1,
                    count: 1,
                },
            ],
            final_data: 1,
            final_time_fs: 20_000_000,
            active_passes: 12,
            nba_passes: 4,
        }
    }

    #[test]
    fn format_time_units() {
        assert_eq!(format_time(0), "0 fs");
        assert_eq!(format_time(999), "999 fs");
        assert_eq!(format_time(5_000), "5 ps");
        assert_eq!(format_time(10_000_000), "10 ns");
        assert_eq!(format_time(2_000_000_000), "2 us");
        assert_eq!(format_time(3_000_000_000_000), "3 ms");
        assert_eq!(format_time(1_500_000), "1500 ps");
    }

    #[test]
    fn render_text_lines() {
        let text = render_text(&[report()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "TOP cycle=1 time=5 ns rst=1 en=0 data=0");
        assert_eq!(lines[1], "TOP cycle=2 time=15 ns rst=0 en=1 data=1");
    }

    #[test]
    fn render_text_empty() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn json_output_is_array_of_reports() {
        let reports = cmodel_sim::simulate(&SimSettings::default()).unwrap();
        let json = serde_json::to_string_pretty(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["instance"], "TOP");
        assert_eq!(arr[0]["final_data"], 16);
    }
}
