//! Shared helpers for the comprehensive suite.

use fieldstate::{FieldEntry, FieldStateStore};

/// Route store logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Keys enumerated under `prefix`, in enumeration order.
pub fn keys_under<'a>(store: &'a FieldStateStore, prefix: &str) -> Vec<&'a str> {
    store.enumerate(prefix).map(FieldEntry::key).collect()
}

/// A store populated the way a binder fills a small order form.
pub fn order_form() -> FieldStateStore {
    let mut store = FieldStateStore::new();
    store.set_value("Order.Id", 17, "17").unwrap();
    store.set_value("Order.Customer.Name", "Ada", "Ada").unwrap();
    store.set_value("Order.Lines[0].Sku", "A-1", "A-1").unwrap();
    store.set_value("Order.Lines[0].Qty", 2, "2").unwrap();
    store.set_value("Order.Lines[1].Sku", "", "").unwrap();
    store.set_value("Order.Lines[1].Qty", "x", "x").unwrap();
    store
}

/// Dotted key of `depth` segments: `n0.n1...`.
pub fn deep_key(depth: usize) -> String {
    (0..depth)
        .map(|i| format!("n{i}"))
        .collect::<Vec<_>>()
        .join(".")
}
