//! The owning handle of one counter instance.
//!
//! A [`Counter`] owns the instance's [`SymbolTable`] and its boxed
//! [`CounterRoot`], and exposes the ports and the evaluation entry points to
//! a harness. It is the only owner of the state block.

use std::sync::Arc;

use cmodel_common::fit;
use cmodel_config::SimSettings;

use crate::context::SimContext;
use crate::error::SimError;
use crate::eval::{EvalEngine, EvalStats};
use crate::root::CounterRoot;
use crate::signal::{CounterSignal, Direction};
use crate::syms::SymbolTable;

/// A simulated counter instance.
#[derive(Debug)]
pub struct Counter {
    syms: Arc<SymbolTable>,
    root: Box<CounterRoot>,
    engine: EvalEngine,
    finalized: bool,
}

impl Counter {
    /// Creates an instance named `instance` with the default model name and
    /// converge limit.
    pub fn new(context: Arc<SimContext>, instance: &str) -> Result<Self, SimError> {
        Self::with_engine(
            context,
            cmodel_config::DEFAULT_MODEL_NAME,
            instance,
            EvalEngine::default(),
        )
    }

    /// Creates an instance named `instance` using the model name and engine
    /// limits from `settings`.
    pub fn from_settings(
        context: Arc<SimContext>,
        settings: &SimSettings,
        instance: &str,
    ) -> Result<Self, SimError> {
        Self::with_engine(
            context,
            &settings.model.name,
            instance,
            EvalEngine::new(settings.eval.converge_limit),
        )
    }

    /// Creates an instance with an explicit engine.
    pub fn with_engine(
        context: Arc<SimContext>,
        model_name: &str,
        instance: &str,
        engine: EvalEngine,
    ) -> Result<Self, SimError> {
        let syms = SymbolTable::new(context, model_name, instance);
        let mut root = CounterRoot::new(Arc::downgrade(&syms), instance)?;
        root.configure(true);
        Ok(Self {
            syms,
            root,
            engine,
            finalized: false,
        })
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// Model name.
    pub fn model_name(&self) -> &str {
        self.syms.model_name()
    }

    /// The shared context.
    pub fn context(&self) -> &Arc<SimContext> {
        self.syms.context()
    }

    /// The instance's symbol table.
    pub fn symbol_table(&self) -> &Arc<SymbolTable> {
        &self.syms
    }

    /// The engine evaluating this instance.
    pub fn engine(&self) -> &EvalEngine {
        &self.engine
    }

    /// Read access to the state block.
    pub fn root(&self) -> &CounterRoot {
        &self.root
    }

    /// Direct access to the state block, bypassing port checks.
    pub fn root_mut(&mut self) -> &mut CounterRoot {
        &mut self.root
    }

    /// Drives `CLK`.
    pub fn set_clk(&mut self, level: bool) {
        self.root.clk = u8::from(level);
    }

    /// Drives `RST`.
    pub fn set_rst(&mut self, level: bool) {
        self.root.rst = u8::from(level);
    }

    /// Drives `EN`.
    pub fn set_en(&mut self, level: bool) {
        self.root.en = u8::from(level);
    }

    /// Current `CLK` level.
    pub fn clk(&self) -> bool {
        self.root.clk != 0
    }

    /// Current `RST` level.
    pub fn rst(&self) -> bool {
        self.root.rst != 0
    }

    /// Current `EN` level.
    pub fn en(&self) -> bool {
        self.root.en != 0
    }

    /// Current `DATA` output.
    pub fn data(&self) -> u16 {
        self.root.data
    }

    /// Current `counter.iDATA` register.
    pub fn count(&self) -> u16 {
        self.root.count
    }

    /// Drives an input by name, truncating `value` to the input width.
    pub fn poke(&mut self, name: &str, value: u64) -> Result<(), SimError> {
        let signal = self.resolve(name)?;
        if signal.direction() != Direction::Input {
            return Err(SimError::NotAnInput {
                name: self.syms.hier_name(signal),
            });
        }
        if fit(signal.width(), value) != value {
            log::warn!(
                "'{}': {value:#x} truncated to {} bit(s)",
                self.syms.hier_name(signal),
                signal.width()
            );
        }
        self.root.write(signal, value);
        Ok(())
    }

    /// Reads any signal by name.
    pub fn peek(&self, name: &str) -> Result<u64, SimError> {
        self.resolve(name).map(|signal| self.root.read(signal))
    }

    fn resolve(&self, name: &str) -> Result<CounterSignal, SimError> {
        self.syms
            .lookup(name)
            .ok_or_else(|| SimError::UnknownSignal {
                name: name.to_string(),
            })
    }

    /// Evaluates the model after input changes.
    ///
    /// The first call also runs the static, initial and settle regions.
    pub fn eval(&mut self) -> Result<EvalStats, SimError> {
        let stats = self.eval_step()?;
        self.eval_end_step();
        Ok(stats)
    }

    /// Evaluation without the end-of-step bookkeeping.
    pub fn eval_step(&mut self) -> Result<EvalStats, SimError> {
        if self.finalized {
            log::warn!("'{}' evaluated after finalize", self.name());
        }
        let mut stats = EvalStats::default();
        if self.syms.take_init() {
            log::debug!("'{}' initial evaluation", self.name());
            self.engine.eval_static(&mut self.root);
            self.engine.eval_initial(&mut self.root);
            stats.settle_passes = self.engine.eval_settle(&mut self.root)?;
        }
        let regions = self.engine.eval(&mut self.root)?;
        stats.merge(&regions);
        Ok(stats)
    }

    /// End-of-step bookkeeping: prepares the state block for the next epoch.
    pub fn eval_end_step(&mut self) {
        self.root.configure(false);
    }

    /// Runs final blocks. Further calls do nothing.
    pub fn finalize(&mut self) {
        if !self.finalized {
            self.engine.eval_final(&mut self.root);
            self.finalized = true;
        }
    }

    /// Whether [`finalize`](Self::finalize) has run.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Finalizes and releases the instance.
    pub fn destroy(mut self) {
        self.finalize();
        self.root.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> Counter {
        Counter::new(SimContext::shared("t"), "TOP").unwrap()
    }

    fn cycle(model: &mut Counter) {
        model.set_clk(false);
        model.eval().unwrap();
        model.set_clk(true);
        model.eval().unwrap();
    }

    #[test]
    fn construction() {
        let model = counter();
        assert_eq!(model.name(), "TOP");
        assert_eq!(model.model_name(), "counter");
        assert_eq!(model.data(), 0);
        assert_eq!(model.count(), 0);
        assert!(model.root().stl_first_iteration);
        assert!(!model.symbol_table().did_init());
        assert_eq!(model.engine().converge_limit(), 100);
    }

    #[test]
    fn first_eval_settles() {
        let mut model = counter();
        let stats = model.eval().unwrap();
        assert_eq!(stats.settle_passes, 2);
        assert!(model.symbol_table().did_init());
        assert!(!model.root().stl_first_iteration);
        let stats = model.eval().unwrap();
        assert_eq!(stats.settle_passes, 0);
    }

    #[test]
    fn reset_then_count() {
        let mut model = counter();
        model.set_rst(true);
        cycle(&mut model);
        assert_eq!(model.count(), 0);

        model.set_rst(false);
        model.set_en(true);
        cycle(&mut model);
        assert_eq!(model.count(), 1);
        assert_eq!(model.data(), 1);
    }

    #[test]
    fn poke_and_peek_by_name() {
        let mut model = counter();
        model.poke("EN", 1).unwrap();
        model.poke("TOP.RST", 0).unwrap();
        assert!(model.en());
        assert!(!model.rst());
        cycle(&mut model);
        assert!(model.clk());
        assert_eq!(model.peek("DATA").unwrap(), 1);
        assert_eq!(model.peek("TOP.counter.iDATA").unwrap(), 1);
    }

    #[test]
    fn poke_truncates_to_width() {
        let mut model = counter();
        model.poke("CLK", 2).unwrap();
        assert!(!model.clk());
    }

    #[test]
    fn poke_rejects_outputs_and_state() {
        let mut model = counter();
        let err = model.poke("DATA", 3).unwrap_err();
        assert!(matches!(err, SimError::NotAnInput { ref name } if name == "TOP.DATA"));
        let err = model.poke("counter.iDATA", 3).unwrap_err();
        assert!(matches!(err, SimError::NotAnInput { .. }));
    }

    #[test]
    fn unknown_names() {
        let mut model = counter();
        assert!(matches!(
            model.peek("Q").unwrap_err(),
            SimError::UnknownSignal { .. }
        ));
        assert!(model.poke("TOP.Q", 1).is_err());
    }

    #[test]
    fn settings_applied() {
        let settings = cmodel_config::load_config_from_str(
            "[model]\nname = \"c16\"\n[eval]\nconverge_limit = 7\n",
        )
        .unwrap();
        let model = Counter::from_settings(SimContext::shared("t"), &settings, "dut").unwrap();
        assert_eq!(model.model_name(), "c16");
        assert_eq!(model.name(), "dut");
        assert_eq!(model.engine().converge_limit(), 7);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut model = counter();
        model.finalize();
        model.finalize();
        assert!(model.is_finalized());
        model.destroy();
    }

    #[test]
    fn models_share_context_not_state() {
        let ctx = SimContext::shared("t");
        let mut a = Counter::new(Arc::clone(&ctx), "a").unwrap();
        let b = Counter::new(Arc::clone(&ctx), "b").unwrap();
        a.set_en(true);
        cycle(&mut a);
        assert_eq!(a.data(), 1);
        assert_eq!(b.data(), 0);
        assert!(Arc::ptr_eq(a.context(), b.context()));
    }

    #[test]
    fn model_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Counter>();
    }
}
