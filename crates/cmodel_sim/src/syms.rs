//! Symbol table for one counter instance.
//!
//! The [`SymbolTable`] registers the scopes and signals of an instance under
//! their hierarchical names so harnesses can resolve `TOP.DATA` or
//! `counter.iDATA` to a [`CounterSignal`]. It also carries the shared
//! [`SimContext`] and the one-time initialization flag consumed by the first
//! evaluation. State blocks hold only a `Weak` reference to it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cmodel_common::{Ident, Interner};

use crate::context::SimContext;
use crate::signal::{CounterSignal, COUNTER_SCOPE};

/// Name registry and per-instance bookkeeping.
pub struct SymbolTable {
    context: Arc<SimContext>,
    model_name: String,
    instance: String,
    interner: Interner,
    scopes: Vec<Ident>,
    signals: HashMap<Ident, CounterSignal>,
    did_init: AtomicBool,
}

impl SymbolTable {
    /// Builds the table for `instance` and registers every scope and signal.
    pub fn new(
        context: Arc<SimContext>,
        model_name: impl Into<String>,
        instance: impl Into<String>,
    ) -> Arc<Self> {
        let instance = instance.into();
        let interner = Interner::new();

        let scopes = vec![
            interner.get_or_intern(&instance),
            interner.get_or_intern(&format!("{instance}.{COUNTER_SCOPE}")),
        ];

        let signals = CounterSignal::ALL
            .iter()
            .map(|&sig| (interner.get_or_intern(&sig.hier_name(&instance)), sig))
            .collect();

        Arc::new(Self {
            context,
            model_name: model_name.into(),
            instance,
            interner,
            scopes,
            signals,
            did_init: AtomicBool::new(false),
        })
    }

    /// Instance name (the top scope).
    pub fn name(&self) -> &str {
        &self.instance
    }

    /// Model name.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// The context this instance runs in.
    pub fn context(&self) -> &Arc<SimContext> {
        &self.context
    }

    /// Resolves a hierarchical (`TOP.DATA`) or instance-relative (`DATA`,
    /// `counter.iDATA`) name.
    pub fn lookup(&self, name: &str) -> Option<CounterSignal> {
        let find = |n: &str| self.interner.get(n).and_then(|id| self.signals.get(&id));
        find(name)
            .or_else(|| find(&format!("{}.{name}", self.instance)))
            .copied()
    }

    /// Hierarchical name of `signal` in this instance.
    pub fn hier_name(&self, signal: CounterSignal) -> String {
        signal.hier_name(&self.instance)
    }

    /// Registered scope names, top first.
    pub fn scopes(&self) -> impl Iterator<Item = &str> + '_ {
        self.scopes.iter().map(|&id| self.interner.resolve(id))
    }

    /// Registered signals with their hierarchical names, in declaration order.
    pub fn signals(&self) -> Vec<(String, CounterSignal)> {
        CounterSignal::ALL
            .iter()
            .map(|&sig| (self.hier_name(sig), sig))
            .collect()
    }

    /// Whether the one-time static/initial/settle evaluation has run.
    pub fn did_init(&self) -> bool {
        self.did_init.load(Ordering::Acquire)
    }

    /// Marks initialization done, returning `true` only for the first caller.
    pub(crate) fn take_init(&self) -> bool {
        !self.did_init.swap(true, Ordering::AcqRel)
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("model_name", &self.model_name)
            .field("instance", &self.instance)
            .field("did_init", &self.did_init())
            .finish_non_exhaustive()
    }
}
