//! End-to-end behaviour of the counter model driven through its public API.

use std::sync::Arc;

use cmodel_sim::{
    Counter, CounterRoot, CounterSignal, EvalEngine, SimContext, SimError, SymbolTable, Testbench,
    CACHE_LINE_BYTES,
};

fn rising_edge(model: &mut Counter) {
    model.set_clk(false);
    model.eval().unwrap();
    model.set_clk(true);
    model.eval().unwrap();
}

#[test]
fn reset_then_single_count() {
    let mut model = Counter::new(SimContext::shared("scenario"), "TOP").unwrap();
    model.root_mut().configure(true);

    model.set_rst(true);
    rising_edge(&mut model);
    assert_eq!(model.count(), 0);

    model.set_rst(false);
    model.set_en(true);
    rising_edge(&mut model);
    assert_eq!(model.count(), 1);
    assert_eq!(model.data(), 1);

    model.destroy();
}

#[test]
fn state_block_lifecycle_by_hand() {
    let ctx = SimContext::shared("manual");
    let syms = SymbolTable::new(Arc::clone(&ctx), "counter", "TOP");
    let mut root = CounterRoot::new(Arc::downgrade(&syms), "TOP").unwrap();

    assert_eq!(root.read(CounterSignal::Count), 0);
    assert_eq!(root.read(CounterSignal::Data), 0);
    assert!(root.stl_first_iteration);

    root.configure(true);
    let engine = EvalEngine::default();
    engine.eval_initial(&mut root);
    engine.eval_settle(&mut root).unwrap();

    root.write(CounterSignal::En, 1);
    root.write(CounterSignal::Clk, 1);
    engine.eval(&mut root).unwrap();
    assert_eq!(root.read(CounterSignal::Count), 1);

    root.configure(false);
    assert!(!root.stl_first_iteration);
    root.destroy();
}

#[test]
fn construct_without_symbol_table_fails() {
    let syms = SymbolTable::new(SimContext::shared("gone"), "counter", "TOP");
    let weak = Arc::downgrade(&syms);
    drop(syms);
    assert!(matches!(
        CounterRoot::new(weak, "TOP"),
        Err(SimError::DetachedSymbolTable { .. })
    ));
}

#[test]
fn wraps_after_full_range() {
    let model = Counter::new(SimContext::shared("wrap"), "TOP").unwrap();
    let mut tb = Testbench::new(model, 2).unwrap();
    tb.model_mut().set_en(true);
    tb.model_mut().root_mut().count = 0xFFFE;
    let a = tb.tick().unwrap();
    let b = tb.tick().unwrap();
    assert_eq!(a.data, 0xFFFF);
    assert_eq!(b.data, 0);
}

#[test]
fn instances_on_worker_threads() {
    let handles: Vec<_> = (0..4u16)
        .map(|n| {
            std::thread::spawn(move || {
                let mut model =
                    Counter::new(SimContext::shared(format!("w{n}")), "TOP").unwrap();
                let addr = model.root() as *const CounterRoot as usize;
                assert_eq!(addr % CACHE_LINE_BYTES, 0);
                model.set_en(true);
                for _ in 0..=n {
                    rising_edge(&mut model);
                }
                model.data()
            })
        })
        .collect();
    let results: Vec<u16> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![1, 2, 3, 4]);
}
