//! The state block of one counter instance.
//!
//! [`CounterRoot`] is a plain struct with public fields: the evaluation
//! engine reads and writes every signal and bookkeeping flag directly. It is
//! boxed on construction so its address stays fixed for its whole life, and
//! aligned to a cache line so blocks evaluated by different workers never
//! share one.
//!
//! The block is move-only. It holds a `Weak` reference to its
//! [`SymbolTable`]; the model handle owns both.

use std::sync::{Arc, Weak};

use cmodel_common::{fit, TriggerVec};

use crate::error::SimError;
use crate::signal::CounterSignal;
use crate::syms::SymbolTable;

/// Cache line size the state block is aligned to.
pub const CACHE_LINE_BYTES: usize = 64;

/// Signal values and evaluation bookkeeping of one counter instance.
#[repr(C, align(64))]
pub struct CounterRoot {
    /// `CLK` input, 1 bit.
    pub clk: u8,
    /// `RST` input, 1 bit.
    pub rst: u8,
    /// `EN` input, 1 bit.
    pub en: u8,
    /// Set until the first settle pass has run.
    pub stl_first_iteration: bool,
    /// `CLK` as seen by the last active-region trigger evaluation.
    pub trig_prev_clk: u8,
    /// Whether the active region asked for another pass.
    pub act_continue: bool,
    /// `DATA` output, 16 bits.
    pub data: u16,
    /// `counter.iDATA` register, 16 bits.
    pub count: u16,
    /// Passes taken by the active region in the current evaluation.
    pub act_iter_count: u32,
    /// Settle-region triggers.
    pub stl_triggered: TriggerVec<1>,
    /// Active-region triggers.
    pub act_triggered: TriggerVec<1>,
    /// NBA-region triggers.
    pub nba_triggered: TriggerVec<1>,
    symsp: Weak<SymbolTable>,
    name: String,
}

const _: () = assert!(std::mem::align_of::<CounterRoot>() == CACHE_LINE_BYTES);

impl CounterRoot {
    /// Allocates a zeroed state block bound to `symsp`.
    ///
    /// Fails with [`SimError::DetachedSymbolTable`] if `symsp` does not point
    /// at a live symbol table.
    pub fn new(symsp: Weak<SymbolTable>, name: &str) -> Result<Box<Self>, SimError> {
        if symsp.strong_count() == 0 {
            return Err(SimError::DetachedSymbolTable {
                instance: name.to_string(),
            });
        }
        log::debug!("constructing state block '{name}'");
        Ok(Box::new(Self {
            clk: 0,
            rst: 0,
            en: 0,
            stl_first_iteration: true,
            trig_prev_clk: 0,
            act_continue: false,
            data: 0,
            count: 0,
            act_iter_count: 0,
            stl_triggered: TriggerVec::new(),
            act_triggered: TriggerVec::new(),
            nba_triggered: TriggerVec::new(),
            symsp,
            name: name.to_string(),
        }))
    }

    /// Prepares the block for a fresh evaluation epoch.
    ///
    /// `first` marks the epoch that has to run the initial settle pass.
    pub fn configure(&mut self, first: bool) {
        self.stl_first_iteration = first;
        self.act_continue = false;
        self.act_iter_count = 0;
    }

    /// Releases the block.
    pub fn destroy(self: Box<Self>) {
        drop(self);
    }

    /// Instance name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The symbol table this block belongs to, while it is alive.
    pub fn symbol_table(&self) -> Option<Arc<SymbolTable>> {
        self.symsp.upgrade()
    }

    /// Current value of `signal`.
    pub fn read(&self, signal: CounterSignal) -> u64 {
        match signal {
            CounterSignal::Clk => u64::from(self.clk),
            CounterSignal::Rst => u64::from(self.rst),
            CounterSignal::En => u64::from(self.en),
            CounterSignal::Data => u64::from(self.data),
            CounterSignal::Count => u64::from(self.count),
        }
    }

    /// Stores `value` into `signal`, truncated to the signal width.
    pub fn write(&mut self, signal: CounterSignal, value: u64) {
        let value = fit(signal.width(), value);
        match signal {
            CounterSignal::Clk => self.clk = value as u8,
            CounterSignal::Rst => self.rst = value as u8,
            CounterSignal::En => self.en = value as u8,
            CounterSignal::Data => self.data = value as u16,
            CounterSignal::Count => self.count = value as u16,
        }
    }
}

impl Drop for CounterRoot {
    fn drop(&mut self) {
        log::debug!("releasing state block '{}'", self.name);
    }
}

impl std::fmt::Debug for CounterRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterRoot")
            .field("name", &self.name)
            .field("clk", &self.clk)
            .field("rst", &self.rst)
            .field("en", &self.en)
            .field("data", &self.data)
            .field("count", &self.count)
            .field("stl_first_iteration", &self.stl_first_iteration)
            .field("act_iter_count", &self.act_iter_count)
            .finish_non_exhaustive()
    }
}
