mod common;

use common::fixtures::*;
use common::{load, node, serial_engine, TestResult};
use serde_json::json;
use trellis::binder::synthesize_tree_default_layout_objects;
use trellis::layout::MetaType;
use trellis::traits::{
    InMemoryViewHost, RecordingConstraintSink, TextDescriptor, TextHostKind, TextMeasurer, TextMetrics,
};
use trellis::types::{Insets, LayoutAttribute};
use trellis::{ComponentId, LayoutBinder, LayoutGraph, LayoutSource, Size, TextSizeLinker};

/// Eight points per character on lines ten points tall.
struct Monospace;

impl TextMeasurer for Monospace {
    fn measure(&self, descriptor: &TextDescriptor, _host: TextHostKind, bounds: Size) -> TextMetrics {
        let width = descriptor.text.len() as f64 * 8.0;
        let lines = (width / bounds.width).ceil().max(1.0);
        TextMetrics {
            text_size: Size::new(width.min(bounds.width), lines * 10.0),
            text_margins: Insets::new(2.0, 1.0, 2.0, 1.0),
            view_insets: Insets::default(),
        }
    }
}

fn screen() -> serde_json::Value {
    json!({
        "version": 1,
        "textDescriptors": [{ "identifier": "greeting", "text": "hello world" }],
        "components": [{
            "identifier": "screen",
            "childComponents": [
                {
                    "identifier": "title",
                    "textDescriptorID": "greeting",
                    "properties": { "size": { "width": 40 } },
                    "layoutObjects": [
                        {
                            "identifier": "title.top",
                            "attribute": "top",
                            "relatedComponentIdentifier": "screen",
                            "relatedAttribute": "top",
                            "idealMeta": { "constant": 8, "state": "required" }
                        },
                        {
                            "identifier": "title.height",
                            "attribute": "height",
                            "idealMeta": { "state": "required" },
                            "linkedToTextSize": true
                        }
                    ]
                },
                fixed_at("badge", 10.0, 50.0, 20.0, 10.0)
            ]
        }]
    })
}

/// Registers every component as a view mounted in its parent.
fn mount_all(source: &LayoutSource) -> InMemoryViewHost {
    let tree = source.tree();
    let mut host = InMemoryViewHost::new();
    for (id, component) in tree.iter() {
        match tree.parent(id) {
            Some(parent) => host
                .add_view(component.id().clone(), tree[parent].id().clone())
                .unwrap(),
            None => host.add_root(component.id().clone()),
        }
    }
    host
}

#[test]
fn test_source_to_native_constraints() -> TestResult {
    let source = load(screen())?;
    let engine = serial_engine();
    trellis::layout_roots(&engine, source.tree(), Size::new(200.0, 100.0));

    // title: left and width. badge: all four.
    assert_eq!(synthesize_tree_default_layout_objects(source.tree()), 6);

    let mut host = mount_all(&source);
    let mut sink = RecordingConstraintSink::new();
    let mut binder = LayoutBinder::new();
    assert_eq!(binder.bind_tree(source.tree(), &mut host, &mut sink), 8);

    let active = sink.active();
    let required = active.iter().filter(|c| c.priority.value() == 1000.0).count();
    let defaults = active.iter().filter(|c| c.priority.value() == 749.0).count();
    assert_eq!((required, defaults), (2, 6));

    let badge = node(&source, "badge");
    let constraints = source.tree()[badge].constraints();
    let constants: Vec<(LayoutAttribute, f64)> = constraints
        .default_layout_objects
        .iter()
        .map(|e| (e.attribute, e.ideal_meta.constant))
        .collect();
    assert_eq!(
        constants,
        vec![
            (LayoutAttribute::Top, 50.0),
            (LayoutAttribute::Left, 10.0),
            (LayoutAttribute::Width, 20.0),
            (LayoutAttribute::Height, 10.0),
        ]
    );
    Ok(())
}

#[test]
fn test_text_linked_height_tracks_measured_text() -> TestResult {
    let source = load(screen())?;
    trellis::layout_roots(&serial_engine(), source.tree(), Size::new(200.0, 100.0));

    let mut host = mount_all(&source);
    let mut sink = RecordingConstraintSink::new();
    let mut binder = LayoutBinder::new();
    binder.bind_tree(source.tree(), &mut host, &mut sink);

    let measurer = Monospace;
    let linker = TextSizeLinker::new(&measurer);
    assert_eq!(linker.update_tree(source.tree(), &binder, &mut sink), 1);

    // 88pt of text in the 40pt wide title wraps to three lines.
    let handle = binder
        .constant_handle(&"title.height".into(), MetaType::Ideal)
        .unwrap();
    assert_eq!(sink.get(handle).map(|c| c.constant), Some(34.0));

    assert_eq!(linker.cache().len(), 1);
    assert_eq!(linker.forget_component(source.tree(), node(&source, "title")), 1);
    assert!(linker.cache().is_empty());
    assert_eq!(linker.forget_component(source.tree(), node(&source, "badge")), 0);
    Ok(())
}

#[test]
fn test_graph_invalidates_dependents_of_a_source() -> TestResult {
    let source = load(screen())?;
    let graph = LayoutGraph::from_tree(source.tree());
    assert_eq!(graph.dependents_of(&ComponentId::new("screen")), vec![ComponentId::new("title")]);

    let title = node(&source, "title");
    let before = source.tree().layout_version(title);
    assert_eq!(graph.invalidate_dependents(source.tree(), &ComponentId::new("screen")), 1);
    assert!(source.tree().layout_version(title) > before);
    Ok(())
}

#[test]
fn test_clean_up_releases_everything() -> TestResult {
    let source = load(screen())?;
    trellis::layout_roots(&serial_engine(), source.tree(), Size::new(200.0, 100.0));
    synthesize_tree_default_layout_objects(source.tree());

    let mut host = mount_all(&source);
    let mut sink = RecordingConstraintSink::new();
    let mut binder = LayoutBinder::new();
    binder.bind_tree(source.tree(), &mut host, &mut sink);
    assert!(binder.bound_count() > 0);

    binder.clean_up(&mut host, &mut sink);
    assert_eq!(binder.bound_count(), 0);
    assert!(sink.active().is_empty());
    Ok(())
}
