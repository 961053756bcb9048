use lazy_static::lazy_static;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::Opts;
use prometheus::Registry;


lazy_static! {
    pub static ref NODES_CREATED: IntCounter = IntCounter::new(
        "logtree_nodes_created",
        "Logger nodes inserted into a tree"
    )
    .expect("metric can not be created");

    pub static ref LEVEL_CHANGES: IntCounter = IntCounter::new(
        "logtree_level_changes",
        "Explicit level changes that altered an effective level"
    )
    .expect("metric can not be created");

    pub static ref HANDLER_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("logtree_handler_failures", "Handler publish failures reported"),
        &["category"]
    )
    .expect("metric can not be created");
}

/// Register the tree's collectors into `registry`.
pub fn register_custom_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(NODES_CREATED.clone()))?;
    registry.register(Box::new(LEVEL_CHANGES.clone()))?;
    registry.register(Box::new(HANDLER_FAILURES.clone()))?;
    Ok(())
}
