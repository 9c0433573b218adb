//! Evaluation engine: static, initial, settle, active and NBA regions.
//!
//! The engine owns no state; it operates directly on a [`CounterRoot`].
//! One call to [`EvalEngine::eval`] runs the active and NBA regions until
//! neither has work left:
//!
//! ```text
//! loop {                       // NBA loop
//!     loop {                   // active loop
//!         compute active triggers (rising CLK)
//!         OR them into the NBA triggers
//!     } while active triggers fired
//!     run NBA processes (counter register update)
//! } while the NBA region ran
//! ```
//!
//! Each loop may run one pass more than the converge limit; a loop that
//! still has work after that reports
//! [`SimError::ConvergenceFailure`].

use std::fmt;

use crate::error::SimError;
use crate::root::CounterRoot;

/// An evaluation region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Initial settling of combinational logic after construction.
    Settle,
    /// Edge detection and active processes.
    Active,
    /// Non-blocking assignment updates (post-active).
    Nba,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Region::Settle => "settle",
            Region::Active => "active",
            Region::Nba => "NBA",
        })
    }
}

/// Passes taken by each region during one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Settle passes (non-zero only on the first evaluation).
    pub settle_passes: u32,
    /// Active passes summed over every NBA pass.
    pub active_passes: u32,
    /// NBA passes.
    pub nba_passes: u32,
}

impl EvalStats {
    /// Adds the passes of `other` to `self`.
    pub fn merge(&mut self, other: &EvalStats) {
        self.settle_passes += other.settle_passes;
        self.active_passes += other.active_passes;
        self.nba_passes += other.nba_passes;
    }
}

/// Runs the evaluation regions of the counter design.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalEngine {
    converge_limit: u32,
}

impl EvalEngine {
    /// Creates an engine allowing `converge_limit + 1` passes per region
    /// loop. The first pass is always allowed, so even a limit of zero
    /// evaluates a quiet model.
    pub fn new(converge_limit: u32) -> Self {
        Self { converge_limit }
    }

    /// The pass ceiling.
    pub fn converge_limit(&self) -> u32 {
        self.converge_limit
    }

    /// Static initialization. The counter has no static initializers.
    pub fn eval_static(&self, _root: &mut CounterRoot) {}

    /// Initial blocks: latch the clock so the first evaluation only sees a
    /// rising edge if `CLK` actually rises afterwards.
    pub fn eval_initial(&self, root: &mut CounterRoot) {
        root.trig_prev_clk = root.clk;
    }

    /// Settles combinational logic until no settle trigger fires.
    pub fn eval_settle(&self, root: &mut CounterRoot) -> Result<u32, SimError> {
        let mut passes = 0;
        loop {
            if self.converge_limit < passes {
                return Err(self.not_converged(Region::Settle));
            }
            passes += 1;
            let executed = self.phase_settle(root);
            root.stl_first_iteration = false;
            if !executed {
                break;
            }
        }
        log::trace!("'{}' settled in {passes} passes", root.name());
        Ok(passes)
    }

    /// Runs the active and NBA regions until both are quiet.
    pub fn eval(&self, root: &mut CounterRoot) -> Result<EvalStats, SimError> {
        let mut stats = EvalStats::default();
        loop {
            if self.converge_limit < stats.nba_passes {
                return Err(self.not_converged(Region::Nba));
            }
            stats.nba_passes += 1;

            root.act_iter_count = 0;
            root.act_continue = true;
            while root.act_continue {
                if self.converge_limit < root.act_iter_count {
                    return Err(self.not_converged(Region::Active));
                }
                root.act_iter_count += 1;
                root.act_continue = self.phase_active(root);
            }
            stats.active_passes += root.act_iter_count;

            if !self.phase_nba(root) {
                break;
            }
        }
        log::trace!(
            "'{}' evaluated: {} active, {} NBA passes, DATA={:#06x}",
            root.name(),
            stats.active_passes,
            stats.nba_passes,
            root.data
        );
        Ok(stats)
    }

    /// Final blocks. The counter has none.
    pub fn eval_final(&self, root: &mut CounterRoot) {
        log::trace!("'{}' final", root.name());
    }

    fn not_converged(&self, region: Region) -> SimError {
        SimError::ConvergenceFailure {
            region,
            limit: self.converge_limit,
        }
    }

    fn phase_settle(&self, root: &mut CounterRoot) -> bool {
        root.stl_triggered.set(0, root.stl_first_iteration);
        let execute = root.stl_triggered.any();
        if execute && root.stl_triggered.at(0) {
            settle_sequent(root);
        }
        execute
    }

    fn phase_active(&self, root: &mut CounterRoot) -> bool {
        let rising = root.clk & !root.trig_prev_clk & 1 != 0;
        root.act_triggered.set(0, rising);
        root.trig_prev_clk = root.clk;

        let execute = root.act_triggered.any();
        if execute {
            let act = root.act_triggered;
            root.nba_triggered.this_or(&act);
        }
        execute
    }

    fn phase_nba(&self, root: &mut CounterRoot) -> bool {
        let execute = root.nba_triggered.any();
        if execute {
            if root.nba_triggered.at(0) {
                nba_sequent(root);
            }
            root.nba_triggered.clear();
        }
        execute
    }
}

impl Default for EvalEngine {
    fn default() -> Self {
        Self::new(cmodel_config::DEFAULT_CONVERGE_LIMIT)
    }
}

/// `assign DATA = iDATA;`
fn settle_sequent(root: &mut CounterRoot) {
    root.data = root.count;
}

/// `always @(posedge CLK)`: synchronous reset, count while enabled.
fn nba_sequent(root: &mut CounterRoot) {
    if root.rst & 1 != 0 {
        root.count = 0;
    } else if root.en & 1 != 0 {
        root.count = root.count.wrapping_add(1);
    }
    root.data = root.count;
}
