//! Simulation context shared by the models of one run.
//!
//! The context carries the current simulation time and the finish request.
//! Both are atomics so a context can be handed to models that are driven from
//! worker threads.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Time and finish state shared by every model created against it.
#[derive(Debug)]
pub struct SimContext {
    name: String,
    time_fs: AtomicU64,
    got_finish: AtomicBool,
}

impl SimContext {
    /// Creates a context at time zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_fs: AtomicU64::new(0),
            got_finish: AtomicBool::new(false),
        }
    }

    /// Creates a context already wrapped for sharing.
    pub fn shared(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(name))
    }

    /// Display name of the context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current simulation time in femtoseconds.
    pub fn time(&self) -> u64 {
        self.time_fs.load(Ordering::Acquire)
    }

    /// Moves the simulation time forward to `fs`. Earlier times are ignored,
    /// so time never moves backwards.
    pub fn set_time(&self, fs: u64) {
        self.time_fs.fetch_max(fs, Ordering::AcqRel);
    }

    /// Advances the simulation time by `delta_fs`, saturating at `u64::MAX`.
    pub fn time_inc(&self, delta_fs: u64) {
        let _ = self
            .time_fs
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| {
                Some(t.saturating_add(delta_fs))
            });
    }

    /// Returns `true` once a finish has been requested.
    pub fn got_finish(&self) -> bool {
        self.got_finish.load(Ordering::Acquire)
    }

    /// Requests (or withdraws a request) to finish the run.
    pub fn set_finish(&self, finish: bool) {
        self.got_finish.store(finish, Ordering::Release);
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new("sim")
    }
}
