mod common;

use common::fixtures::*;
use common::{child_frames, layout_first_root, load, node, serial_engine, widths, xs, TestResult};
use serde_json::json;
use trellis::{ComponentId, LayoutConfig, LayoutEngine, Point, Rect, Size, SizeRange};

fn up_to(width: f64, height: f64) -> SizeRange {
    SizeRange::new(Size::ZERO, Size::new(width, height))
}

#[test]
fn test_size_to_fit_container_is_union_of_children() -> TestResult {
    let source = load(document(vec![container(
        "box",
        size_to_fit(),
        vec![fixed_at("a", 0.0, 0.0, 10.0, 10.0), fixed_at("b", 30.0, 5.0, 30.0, 40.0)],
    )]))?;

    let layout = layout_first_root(&source, SizeRange::unconstrained());
    assert_eq!(layout.size, Size::new(60.0, 45.0));
    assert_eq!(layout.position, None);
    assert_eq!(layout.sublayouts[1].position, Some(Point::new(30.0, 5.0)));
    Ok(())
}

#[test]
fn test_fixed_stack_children_keep_their_widths() -> TestResult {
    let source = load(document(vec![container(
        "row",
        horizontal_stack(5.0),
        vec![fixed("a", 10.0, 10.0), fixed("b", 20.0, 10.0), fixed("c", 30.0, 10.0)],
    )]))?;

    let layout = layout_first_root(&source, up_to(100.0, 100.0));
    let frames = child_frames(&layout);
    assert_eq!(xs(&frames), vec![0.0, 15.0, 40.0]);
    assert_eq!(widths(&frames), vec![10.0, 20.0, 30.0]);
    assert_eq!(layout.size, Size::new(70.0, 10.0));
    Ok(())
}

#[test]
fn test_growing_child_takes_the_violation() -> TestResult {
    let source = load(document(vec![container(
        "row",
        horizontal_stack(0.0),
        vec![fixed("a", 20.0, 10.0), growing("flex", 1.0), fixed("b", 20.0, 10.0)],
    )]))?;

    let layout = layout_first_root(&source, SizeRange::exactly(Size::new(100.0, 50.0)));
    let frames = child_frames(&layout);
    assert_eq!(widths(&frames), vec![20.0, 60.0, 20.0]);
    assert_eq!(xs(&frames), vec![0.0, 20.0, 80.0]);
    Ok(())
}

#[test]
fn test_grow_conserves_the_container_extent() -> TestResult {
    let source = load(document(vec![container(
        "row",
        horizontal_stack(0.0),
        vec![growing("one", 1.0), growing("two", 2.0)],
    )]))?;

    let layout = layout_first_root(&source, SizeRange::exactly(Size::new(100.0, 10.0)));
    let w = widths(&child_frames(&layout));
    assert_eq!(w, vec![34.0, 66.0]);
    assert_eq!(w.iter().sum::<f64>(), 100.0);
    Ok(())
}

#[test]
fn test_min_max_exact_precedence() -> TestResult {
    // (exact width, expected width) with min 20 and max 50.
    let cases = [(80.0, 50.0), (10.0, 20.0), (30.0, 30.0)];
    for (exact, expected) in cases {
        let source = load(document(vec![json!({
            "identifier": "clamped",
            "properties": {
                "size": { "width": exact, "minWidth": 20, "maxWidth": 50, "height": 10 }
            }
        })]))?;
        let layout = layout_first_root(&source, up_to(200.0, 200.0));
        assert_eq!(layout.size, Size::new(expected, 10.0), "exact width {}", exact);
    }
    Ok(())
}

#[test]
fn test_fraction_resolves_against_parent() -> TestResult {
    let source = load(document(vec![container(
        "root",
        json!({ "type": "absolute" }),
        vec![json!({ "identifier": "half", "properties": { "size": { "width": "50%" } } })],
    )]))?;

    let layout = layout_first_root(&source, SizeRange::exactly(Size::new(200.0, 100.0)));
    assert_eq!(layout.sublayouts[0].size, Size::new(100.0, 100.0));
    Ok(())
}

#[test]
fn test_relayout_at_computed_size_is_idempotent() -> TestResult {
    let source = load(document(vec![container(
        "row",
        horizontal_stack(5.0),
        vec![fixed("a", 10.0, 10.0), fixed("b", 20.0, 10.0)],
    )]))?;
    let root = node(&source, "row");
    let engine = serial_engine();

    let first = engine.layout_that_fits(source.tree(), root, up_to(100.0, 100.0));
    source.tree().invalidate_layout(root);
    let second = engine.layout_that_fits(source.tree(), root, SizeRange::exactly(first.size));
    assert_eq!(first.size, second.size);
    assert_eq!(first.sublayouts, second.sublayouts);
    Ok(())
}

#[test]
fn test_invalidation_bumps_versions_up_the_tree() -> TestResult {
    let source = load(document(vec![container(
        "row",
        horizontal_stack(0.0),
        vec![container("inner", horizontal_stack(0.0), vec![fixed("leaf", 10.0, 10.0)])],
    )]))?;
    let tree = source.tree();
    let (row, inner, leaf) = (node(&source, "row"), node(&source, "inner"), node(&source, "leaf"));
    let before = [tree.layout_version(row), tree.layout_version(inner), tree.layout_version(leaf)];

    tree.invalidate_layout(leaf);
    let after = [tree.layout_version(row), tree.layout_version(inner), tree.layout_version(leaf)];
    for (b, a) in before.iter().zip(after.iter()) {
        assert!(a > b, "version did not increase: {} -> {}", b, a);
    }
    Ok(())
}

#[test]
fn test_layout_roots_commits_every_root() -> TestResult {
    let source = load(document(vec![
        container("first", horizontal_stack(0.0), vec![fixed("a", 10.0, 10.0)]),
        container("second", size_to_fit(), vec![fixed_at("b", 5.0, 5.0, 10.0, 10.0)]),
    ]))?;

    let engine = serial_engine();
    let layouts = trellis::layout_roots(&engine, source.tree(), Size::new(80.0, 40.0));
    assert_eq!(layouts.len(), 2);
    assert!(layouts.iter().all(|l| l.size == Size::new(80.0, 40.0)));
    for root in source.tree().roots() {
        assert_eq!(source.tree().current_layout(*root).map(|l| l.size), Some(Size::new(80.0, 40.0)));
    }

    let frames = layouts[1].flattened_frames();
    assert_eq!(frames[1], (ComponentId::new("b"), Rect::new(5.0, 5.0, 10.0, 10.0)));
    Ok(())
}

#[test]
fn test_concurrent_engine_matches_serial() -> TestResult {
    let children: Vec<_> = (0..64)
        .map(|i| fixed(&format!("item-{}", i), 5.0 + (i % 7) as f64, 10.0))
        .collect();
    let serial_source = load(document(vec![container("row", horizontal_stack(1.0), children.clone())]))?;
    let concurrent_source = load(document(vec![container("row", horizontal_stack(1.0), children)]))?;

    let range = up_to(10_000.0, 100.0);
    let serial = layout_first_root(&serial_source, range);

    let engine = LayoutEngine::new(LayoutConfig::default().with_worker_threads(4));
    let root = concurrent_source.tree().roots()[0];
    let concurrent = engine.layout_that_fits(concurrent_source.tree(), root, range);
    assert_eq!(serial, concurrent);
    Ok(())
}

#[test]
fn test_zero_children_stack_is_empty() -> TestResult {
    let source = load(document(vec![container("row", horizontal_stack(5.0), vec![])]))?;
    let layout = layout_first_root(&source, SizeRange::exactly(Size::new(100.0, 100.0)));
    assert_eq!(layout.size, Size::ZERO);
    assert!(layout.sublayouts.is_empty());
    Ok(())
}
