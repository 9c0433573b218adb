//! Clocked testbench harness and parallel batch runs.
//!
//! [`Testbench`] drives `CLK` as a square wave, applies reset and enable
//! stimulus, and records a [`Snapshot`] after every rising edge.
//! [`run_batch`] evaluates independent instances on the rayon worker pool;
//! each instance owns its own context, symbol table and state block, so the
//! workers share nothing.

use std::sync::Arc;

use cmodel_config::{SimSettings, StimulusSection};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::context::SimContext;
use crate::error::SimError;
use crate::eval::EvalStats;
use crate::model::Counter;

/// Signal values of an instance after a rising clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Rising edges applied so far.
    pub cycle: u64,
    /// Simulation time of the edge in femtoseconds.
    pub time_fs: u64,
    /// `CLK`.
    pub clk: u8,
    /// `RST`.
    pub rst: u8,
    /// `EN`.
    pub en: u8,
    /// `DATA`.
    pub data: u16,
    /// `counter.iDATA`.
    pub count: u16,
}

/// Outcome of running one instance through its stimulus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Instance name.
    pub instance: String,
    /// One snapshot per rising edge, reset cycles included.
    pub snapshots: Vec<Snapshot>,
    /// `DATA` when the run ended.
    pub final_data: u16,
    /// Simulation time when the run ended, in femtoseconds.
    pub final_time_fs: u64,
    /// Total evaluation passes taken by the active region.
    pub active_passes: u64,
    /// Total evaluation passes taken by the NBA region.
    pub nba_passes: u64,
}

/// Drives a [`Counter`] with a square-wave clock.
pub struct Testbench {
    model: Counter,
    period_fs: u64,
    half_period_fs: u64,
    cycle: u64,
    active_passes: u64,
    nba_passes: u64,
}

impl Testbench {
    /// Wraps `model` with a clock of `period_fs` femtoseconds.
    pub fn new(model: Counter, period_fs: u64) -> Result<Self, SimError> {
        if period_fs < 2 {
            return Err(SimError::InvalidClock {
                reason: format!("period of {period_fs} fs has no half period"),
            });
        }
        Ok(Self {
            model,
            period_fs,
            half_period_fs: period_fs / 2,
            cycle: 0,
            active_passes: 0,
            nba_passes: 0,
        })
    }

    /// The driven model.
    pub fn model(&self) -> &Counter {
        &self.model
    }

    /// Mutable access to the driven model.
    pub fn model_mut(&mut self) -> &mut Counter {
        &mut self.model
    }

    /// Releases the model, e.g. to destroy it.
    pub fn into_model(self) -> Counter {
        self.model
    }

    /// Rising edges applied so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Values at the current time.
    pub fn snapshot(&self) -> Snapshot {
        let root = self.model.root();
        Snapshot {
            cycle: self.cycle,
            time_fs: self.model.context().time(),
            clk: root.clk,
            rst: root.rst,
            en: root.en,
            data: root.data,
            count: root.count,
        }
    }

    fn eval(&mut self) -> Result<(), SimError> {
        let stats: EvalStats = self.model.eval()?;
        self.active_passes += u64::from(stats.active_passes);
        self.nba_passes += u64::from(stats.nba_passes);
        Ok(())
    }

    /// Applies one clock period: low half, then the rising edge.
    ///
    /// Returns the snapshot taken right after the rising edge was evaluated.
    /// The high half takes the remainder of an odd period.
    pub fn tick(&mut self) -> Result<Snapshot, SimError> {
        let ctx = Arc::clone(self.model.context());

        self.model.set_clk(false);
        self.eval()?;
        ctx.time_inc(self.half_period_fs);

        self.model.set_clk(true);
        self.eval()?;
        self.cycle += 1;
        let snapshot = self.snapshot();
        ctx.time_inc(self.period_fs - self.half_period_fs);

        Ok(snapshot)
    }

    /// Holds `RST` high for `cycles` rising edges, then releases it.
    pub fn apply_reset(&mut self, cycles: u32) -> Result<Vec<Snapshot>, SimError> {
        self.model.set_rst(true);
        let snapshots = (0..cycles)
            .map(|_| self.tick())
            .collect::<Result<Vec<_>, _>>()?;
        self.model.set_rst(false);
        Ok(snapshots)
    }

    /// Runs the reset phase and then `stimulus.cycles` edges with `EN` at
    /// `stimulus.enable`.
    pub fn run(&mut self, stimulus: &StimulusSection) -> Result<Vec<Snapshot>, SimError> {
        let mut snapshots = self.apply_reset(stimulus.reset_cycles)?;
        self.model.set_en(stimulus.enable);
        snapshots.reserve(stimulus.cycles as usize);
        for _ in 0..stimulus.cycles {
            if self.model.context().got_finish() {
                log::debug!("'{}' stopped by finish request", self.model.name());
                break;
            }
            snapshots.push(self.tick()?);
        }
        Ok(snapshots)
    }

    /// Finalizes the model and summarizes the run.
    pub fn finish(mut self, snapshots: Vec<Snapshot>) -> RunReport {
        self.model.finalize();
        let report = RunReport {
            instance: self.model.name().to_string(),
            final_data: self.model.data(),
            final_time_fs: self.model.context().time(),
            active_passes: self.active_passes,
            nba_passes: self.nba_passes,
            snapshots,
        };
        self.model.destroy();
        report
    }
}

/// Name of instance `index` out of `count`.
///
/// A single instance keeps the configured name; batches append the index.
pub fn instance_name(base: &str, index: usize, count: usize) -> String {
    if count == 1 {
        base.to_string()
    } else {
        format!("{base}_{index}")
    }
}

/// Runs one instance from construction to teardown.
pub fn run_instance(settings: &SimSettings, instance: &str) -> Result<RunReport, SimError> {
    let period_fs = settings
        .clock
        .period_fs()
        .ok_or_else(|| SimError::InvalidClock {
            reason: format!("unusable frequency '{}'", settings.clock.frequency),
        })?;
    let context = SimContext::shared(instance);
    let model = Counter::from_settings(context, settings, instance)?;
    let mut bench = Testbench::new(model, period_fs)?;
    let snapshots = bench.run(&settings.stimulus)?;
    Ok(bench.finish(snapshots))
}

/// Runs `settings.batch.instances` independent instances in parallel.
///
/// Reports come back in instance order.
pub fn run_batch(settings: &SimSettings) -> Result<Vec<RunReport>, SimError> {
    let count = settings.batch.instances;
    log::debug!("running {count} instance(s) of '{}'", settings.model.name);
    (0..count)
        .into_par_iter()
        .map(|i| run_instance(settings, &instance_name(&settings.model.instance, i, count)))
        .collect()
}
