//! Cycle-based simulation model of a synchronous 16-bit counter.
//!
//! The design has three 1-bit inputs (`CLK`, `RST`, `EN`), a 16-bit output
//! (`DATA`) and one 16-bit register (`counter.iDATA`). On every rising clock
//! edge the register is cleared while `RST` is high, otherwise incremented
//! while `EN` is high; `DATA` follows the register.
//!
//! # Architecture
//!
//! Each instance is a [`Counter`] handle that owns a [`SymbolTable`] and a
//! cache-line aligned [`CounterRoot`] state block. The state block refers
//! back to the symbol table through a `Weak` reference only. The
//! [`EvalEngine`] mutates the state block directly, region by region
//! (settle, active, NBA), bounded by a converge limit. A [`SimContext`]
//! carries simulation time and the finish flag and may be shared by models.
//!
//! # Usage
//!
//! ```
//! use cmodel_sim::{Counter, SimContext};
//!
//! let mut model = Counter::new(SimContext::shared("doc"), "TOP")?;
//! model.set_en(true);
//! model.set_clk(false);
//! model.eval()?;
//! model.set_clk(true);
//! model.eval()?;
//! assert_eq!(model.data(), 1);
//! model.destroy();
//! # Ok::<(), cmodel_sim::SimError>(())
//! ```
//!
//! # Modules
//!
//! - `error`: simulation error types
//! - `context`: shared time and finish state
//! - `signal`: descriptors of the design signals
//! - `syms`: per-instance symbol table
//! - `root`: the state block
//! - `eval`: the region-based evaluation engine
//! - `model`: the owning instance handle
//! - `harness`: clocked testbench and parallel batch runs

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod eval;
pub mod harness;
pub mod model;
pub mod root;
pub mod signal;
pub mod syms;

use cmodel_config::SimSettings;

pub use context::SimContext;
pub use error::SimError;
pub use eval::{EvalEngine, EvalStats, Region};
pub use harness::{run_batch, run_instance, RunReport, Snapshot, Testbench};
pub use model::Counter;
pub use root::{CounterRoot, CACHE_LINE_BYTES};
pub use signal::{CounterSignal, Direction};
pub use syms::SymbolTable;

/// High-level entry point: runs every configured instance through the
/// configured stimulus and returns one report per instance.
pub fn simulate(settings: &SimSettings) -> Result<Vec<RunReport>, SimError> {
    run_batch(settings)
}
