use crate::cache::LayoutCacheState;
use crate::config::LayoutConfig;
use crate::engine::LayoutEngine;
use crate::spec::{AbsoluteLayoutSpec, StackLayoutSpec};
use crate::test_utils::{auto, fixed, NodeExt, TestTree};
use crate::tree::ComponentNode;
use trellis_style::Dimension;
use trellis_types::{Size, SizeRange};

fn profiled_engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig::serial().with_profiling(true))
}

fn range() -> SizeRange {
    SizeRange::new(Size::ZERO, Size::new(200.0, 100.0))
}

#[test]
fn test_repeated_request_is_served_from_cache() {
    let mut t = TestTree::with_engine(AbsoluteLayoutSpec::default(), profiled_engine());
    t.child(fixed("a", 10.0, 10.0));
    t.child(fixed("b", 20.0, 20.0).at(10.0, 0.0));

    let first = t.layout(range());
    assert_eq!(t.engine.profiler().misses(), 3);
    assert_eq!(t.engine.profiler().hits(), 0);

    let second = t.layout(range());
    assert_eq!(first, second);
    assert_eq!(t.engine.profiler().misses(), 3);
    assert_eq!(t.engine.profiler().hits(), 1);
}

#[test]
fn test_invalidate_recomputes_only_the_dirty_path() {
    let mut t = TestTree::with_engine(AbsoluteLayoutSpec::default(), profiled_engine());
    let a = t.child(fixed("a", 10.0, 10.0));
    t.child(fixed("b", 20.0, 20.0));

    t.layout(range());
    t.tree[a].properties().set_width(Dimension::points(15.0));
    t.tree.invalidate_layout(a);

    let layout = t.layout(range());
    assert_eq!(layout.sublayouts[0].size, Size::new(15.0, 10.0));
    // Root and `a` recompute, `b` still hits.
    assert_eq!(t.engine.profiler().misses(), 5);
    assert_eq!(t.engine.profiler().hits(), 1);
}

#[test]
fn test_different_constraint_misses() {
    let mut t = TestTree::with_engine(AbsoluteLayoutSpec::default(), profiled_engine());
    t.child(fixed("a", 10.0, 10.0));

    t.layout(range());
    let layout = t.layout(SizeRange::exactly(Size::new(50.0, 50.0)));
    assert_eq!(layout.size, Size::new(50.0, 50.0));
    // The child sees a new parent size, so it misses too.
    assert_eq!(t.engine.profiler().misses(), 4);
}

#[test]
fn test_cache_state_transitions() {
    let mut t = TestTree::new(AbsoluteLayoutSpec::default());
    let a = t.child(fixed("a", 10.0, 10.0));
    assert_eq!(t.tree.cache_state(t.root), LayoutCacheState::Clean);

    t.layout(range());
    assert_eq!(t.tree.cache_state(t.root), LayoutCacheState::Pending);
    assert_eq!(t.tree.cache_state(a), LayoutCacheState::Pending);

    assert_eq!(t.tree.commit_subtree(t.root), 2);
    assert_eq!(t.tree.cache_state(t.root), LayoutCacheState::Committed);
    assert!(t.tree[t.root].calculated_layout().is_some());

    t.tree.invalidate_layout(t.root);
    assert_eq!(t.tree.cache_state(t.root), LayoutCacheState::Clean);
    assert_eq!(t.tree.cache_state(a), LayoutCacheState::Committed);
}

#[test]
fn test_version_is_monotonic() {
    let t = TestTree::new(AbsoluteLayoutSpec::default());
    let mut last = t.tree.layout_version(t.root);
    for _ in 0..5 {
        t.tree.invalidate_layout(t.root);
        let now = t.tree.layout_version(t.root);
        assert!(now > last);
        last = now;
    }
}

#[test]
fn test_transition_invalid_leaves_cache_untouched() {
    let mut t = TestTree::new(AbsoluteLayoutSpec::default());
    t.child(fixed("a", 10.0, 10.0));
    t.tree.set_layout_transition_invalid(t.root, true);

    let layout = t.layout(range());
    assert_eq!(layout.size, Size::new(200.0, 100.0));
    assert_eq!(t.tree.cache_state(t.root), LayoutCacheState::Clean);

    t.tree.set_layout_transition_invalid(t.root, false);
    t.layout(range());
    assert_eq!(t.tree.cache_state(t.root), LayoutCacheState::Pending);
}

#[test]
fn test_missing_spec_yields_zero_layout() {
    let mut t = TestTree::new(AbsoluteLayoutSpec::default());
    t.child(ComponentNode::new("bare").at(5.0, 5.0));

    let layout = t.layout(range());
    assert_eq!(layout.sublayouts[0].size, Size::ZERO);
    assert_eq!(layout.sublayouts[0].frame().origin.x, 5.0);
}

#[test]
fn test_root_layout_has_no_position_but_children_do() {
    let mut t = TestTree::new(AbsoluteLayoutSpec::default());
    t.child(fixed("a", 10.0, 10.0));

    let layout = t.layout(range());
    assert_eq!(layout.position, None);
    assert!(layout.sublayouts[0].position.is_some());
}

#[test]
fn test_fraction_resolves_against_parent_size() {
    let mut t = TestTree::new(AbsoluteLayoutSpec::default());
    t.child(auto("half").width(Dimension::fraction(0.5)));

    let layout = t.layout(SizeRange::exactly(Size::new(200.0, 100.0)));
    assert_eq!(layout.sublayouts[0].size, Size::new(100.0, 100.0));
}

#[test]
fn test_layout_root_commits_subtree() {
    let mut t = TestTree::new(AbsoluteLayoutSpec::default());
    let a = t.child(fixed("a", 10.0, 10.0));

    let layout = t.engine.layout_root(&t.tree, t.root, Size::new(120.0, 80.0));
    assert_eq!(layout.size, Size::new(120.0, 80.0));
    assert_eq!(t.tree.cache_state(a), LayoutCacheState::Committed);
}

#[test]
fn test_concurrent_engine_matches_serial() {
    let build = |engine: LayoutEngine| {
        let mut t = TestTree::with_engine(StackLayoutSpec::horizontal().with_spacing(2.0), engine);
        for i in 0..32 {
            let row = t.child(
                ComponentNode::new(format!("row-{}", i)).with_spec(StackLayoutSpec::vertical()),
            );
            t.child_of(row, fixed(&format!("cell-{}-a", i), 4.0, 10.0 + i as f64));
            t.child_of(row, auto(&format!("cell-{}-b", i)).grow(1.0));
        }
        t
    };

    let serial = build(LayoutEngine::new(LayoutConfig::serial()));
    let concurrent = build(LayoutEngine::new(LayoutConfig::default().with_worker_threads(4)));

    let constraint = SizeRange::exactly(Size::new(500.0, 60.0));
    assert_eq!(serial.layout(constraint), concurrent.layout(constraint));
}
