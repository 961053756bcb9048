use std::collections::HashSet;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use super::*;
use crate::test_utils::null_handler;
use crate::LogContext;
use crate::MockConfigurator;

#[test]
fn full_names_follow_the_dotted_path() {
    let context = LogContext::new();
    let root = context.root_node();

    assert_eq!(root.full_name(), "");
    assert!(root.is_root());
    assert_eq!(root.get_or_create("a").full_name(), "a");
    assert_eq!(root.get_or_create("a.b.c").full_name(), "a.b.c");
    assert!(!root.get_or_create("a").is_root());
}

#[test]
fn empty_name_resolves_to_self() {
    let context = LogContext::new();
    let root = context.root_node();
    let a = root.get_or_create("a");

    assert!(Arc::ptr_eq(&root.get_or_create(""), root));
    assert!(Arc::ptr_eq(&a.get_or_create(""), &a));
    assert!(Arc::ptr_eq(&a.get_if_exists("").unwrap(), &a));
}

#[test]
fn empty_segments_are_kept_literally() {
    let context = LogContext::new();
    let root = context.root_node();

    let dot = root.get_or_create(".x");
    assert_eq!(dot.full_name(), "..x");
    assert_eq!(dot.parent().unwrap().full_name(), ".");

    let gap = root.get_or_create("a..b");
    assert_eq!(gap.full_name(), "a..b");
    assert_eq!(gap.parent().unwrap().full_name(), "a.");

    // A trailing dot leaves nothing left to resolve.
    let trailing = root.get_or_create("a.");
    assert_eq!(trailing.full_name(), "a");
}

#[test]
fn relative_resolution_from_an_inner_node() {
    let context = LogContext::new();
    let root = context.root_node();
    let a = root.get_or_create("a");

    let abc = a.get_or_create("b.c");

    assert_eq!(abc.full_name(), "a.b.c");
    assert!(Arc::ptr_eq(&abc, &root.get_or_create("a.b.c")));
}

#[test]
fn get_if_exists_never_creates() {
    let context = LogContext::new();
    let root = context.root_node();
    root.get_or_create("a.b");

    assert!(root.get_if_exists("a.b").is_some());
    assert!(root.get_if_exists("a.b.c").is_none());
    assert!(root.get_if_exists("x.y").is_none());
    assert!(root.get_if_exists("x").is_none(), "first missing segment must not be created");
    assert_eq!(root.children().len(), 1);
}

#[test]
fn every_node_reads_its_own_configuration_slice() {
    let mut configurator = MockConfigurator::new();
    configurator
        .expect_level_of()
        .returning(|name| (name == "a.b").then_some(Level::SEVERE));
    configurator.expect_minimum_level_of().returning(|_| None);
    configurator
        .expect_handlers_of()
        .returning(|name| if name == "a" { vec![null_handler()] } else { Vec::new() });
    let context = LogContext::with_configurator(Arc::new(configurator));
    let root = context.root_node();

    let ab = root.get_or_create("a.b");
    let a = root.get_or_create("a");

    assert_eq!(a.level(), None);
    assert_eq!(ab.level(), Some(Level::SEVERE));
    assert_eq!(a.handlers().len(), 1);
    assert!(ab.handlers().is_empty());
}

#[test]
fn handler_configuration_is_fetched_lazily_once() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);
    let mut configurator = MockConfigurator::new();
    configurator.expect_level_of().returning(|_| None);
    configurator.expect_minimum_level_of().returning(|_| None);
    configurator.expect_handlers_of().returning(move |name| {
        if name == "lazy" {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![null_handler()]
        } else {
            Vec::new()
        }
    });
    let context = LogContext::with_configurator(Arc::new(configurator));

    let node = context.root_node().get_or_create("lazy");
    assert_eq!(fetches.load(Ordering::SeqCst), 0, "construction does not fetch handlers");

    assert_eq!(node.handlers().len(), 1);
    assert_eq!(node.handlers().len(), 1);
    node.add_handler(null_handler());
    assert_eq!(node.handlers().len(), 2);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn handler_scenario_leaves_a_single_entry() {
    let context = LogContext::new();
    let node = context.root_node();
    let h = null_handler();

    node.set_handlers(vec![Arc::clone(&h)]);
    node.remove_handler(&h);
    node.add_handler(Arc::clone(&h));
    node.add_handler(Arc::clone(&h));
    node.remove_handler(&h);

    let handlers = node.handlers();
    assert_eq!(handlers.len(), 1);
    assert!(crate::same_handler(&handlers[0], &h));

    node.remove_handler(&null_handler());
    assert_eq!(node.handlers().len(), 1);
}

#[test]
fn concurrent_get_or_create_converges_on_one_node() {
    let context = Arc::new(LogContext::new());
    let barrier = Arc::new(Barrier::new(16));

    let threads: Vec<_> = (0..16)
        .map(|_| {
            let context = Arc::clone(&context);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let node = context.root_node().get_or_create("race.to.the.leaf");
                Arc::as_ptr(&node) as usize
            })
        })
        .collect();

    let addresses: HashSet<usize> = threads.into_iter().map(|t| t.join().unwrap()).collect();
    assert_eq!(addresses.len(), 1);

    let leaf = context.root_node().get_if_exists("race.to.the.leaf").unwrap();
    assert_eq!(Arc::as_ptr(&leaf) as usize, *addresses.iter().next().unwrap());
    assert_eq!(context.root_node().children().len(), 1);
}

#[test]
fn prune_removes_only_state_free_unreferenced_subtrees() {
    let context = LogContext::new();
    let root = context.root_node();
    root.get_or_create("idle.a.b");
    root.get_or_create("leveled.x").set_level(Some(Level::FINE));
    let held = root.get_or_create("held.y");
    let _logger = context.logger("facade.z");

    let removed = context.prune();

    assert_eq!(removed, 3, "idle, idle.a and idle.a.b");
    assert!(root.get_if_exists("idle").is_none());
    assert!(root.get_if_exists("leveled.x").is_some());
    assert!(root.get_if_exists("held.y").is_some());
    assert!(root.get_if_exists("facade.z").is_some());

    drop(held);
    assert_eq!(context.prune(), 2);
    assert!(root.get_if_exists("held").is_none());
}

#[test]
fn pruned_names_are_recreated_from_configuration() {
    let context = LogContext::new();
    let root = context.root_node();
    root.get_or_create("gone");
    context.prune();

    let again = root.get_or_create("gone");

    assert_eq!(again.level(), None);
    assert_eq!(again.effective_level(), root.effective_level());
}

#[test]
fn compare_and_set_handlers_only_swaps_the_expected_snapshot() {
    let context = LogContext::new();
    let node = context.root_node().get_or_create("cas");
    let seen = node.handlers();

    assert!(node.compare_and_set_handlers(&seen, vec![null_handler()]));
    assert!(!node.compare_and_set_handlers(&seen, Vec::new()), "snapshot is stale");
    assert_eq!(node.handlers().len(), 1);
}
