//! Integration tests: wheel zoom and pan through the editor.
//!
//! The window is 500×450 with the inspector hidden, which leaves a
//! 400×300 canvas once the toolbar and padding are taken off.

use arrows_core::{BoundingBox, Graph, Node, NodeId, Point, Size, Vector, ViewTransformation};
use arrows_editor::{ApplicationLayout, Editor, EditorConfig, Modifiers, PointerEvent};
use arrows_render::StraightLayout;
use pretty_assertions::assert_eq;

const EPS: f64 = 1e-9;
const PADDING: f64 = 50.0;

fn layout() -> ApplicationLayout {
    ApplicationLayout {
        window_size: Size::new(500.0, 450.0),
        inspector_visible: false,
        ..ApplicationLayout::default()
    }
}

/// Two nodes of radius 20 whose boxes span exactly (0,0)-(800,600).
fn editor() -> Editor {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut e = Editor::new(EditorConfig::default(), layout(), Box::new(StraightLayout::new(20.0)));
    e.load_graph(Graph {
        nodes: vec![
            Node::new(NodeId(0), Point::new(20.0, 20.0)),
            Node::new(NodeId(1), Point::new(780.0, 580.0)),
        ],
        ..Graph::default()
    })
    .unwrap();
    e
}

fn zoom(e: &mut Editor, at: Point, dy: f64) {
    e.handle_event(PointerEvent::Wheel {
        position: at,
        delta: Vector::new(0.0, dy),
        modifiers: Modifiers::CTRL,
    });
}

/// Content larger than the canvas covers it; smaller content stays inside.
fn assert_contained(view: &ViewTransformation, content: BoundingBox, canvas: Size) {
    let axes = [
        (content.left, content.right, view.offset.dx, canvas.width),
        (content.top, content.bottom, view.offset.dy, canvas.height),
    ];
    for (lo, hi, offset, extent) in axes {
        let min = lo * view.scale + offset;
        let max = hi * view.scale + offset;
        if (hi - lo) * view.scale > extent {
            assert!(min <= PADDING + EPS, "near edge {min} inside padding");
            assert!(max >= PADDING + extent - EPS, "far edge {max} short of canvas");
        } else {
            assert!(min >= PADDING - EPS, "near edge {min} outside canvas");
            assert!(max <= PADDING + extent + EPS, "far edge {max} outside canvas");
        }
    }
}

// ─── Zoom ───────────────────────────────────────────────────────────────

#[test]
fn canvas_size_from_window() {
    assert_eq!(layout().canvas_size(), Size::new(400.0, 300.0));
}

#[test]
fn ctrl_wheel_zooms_out_ten_percent() {
    let mut e = editor();
    zoom(&mut e, Point::new(200.0, 150.0), 10.0);
    assert!((e.view().scale - 0.9).abs() < EPS);
    assert_contained(e.view(), BoundingBox::new(0.0, 0.0, 800.0, 600.0), Size::new(400.0, 300.0));
}

#[test]
fn zoom_out_stops_at_fit_scale() {
    let mut e = editor();
    for _ in 0..50 {
        zoom(&mut e, Point::new(200.0, 150.0), 10.0);
        assert!(e.view().scale >= 0.5 - EPS);
    }
    assert!((e.view().scale - 0.5).abs() < EPS);
    assert_contained(e.view(), BoundingBox::new(0.0, 0.0, 800.0, 600.0), Size::new(400.0, 300.0));
}

#[test]
fn zoom_in_keeps_pointer_anchored_until_constrained() {
    let mut e = editor();
    e.set_view(ViewTransformation::new(1.0, Vector::new(-100.0, -100.0)));
    let pointer = Point::new(250.0, 200.0);
    let before = e.view().inverse(pointer);
    zoom(&mut e, pointer, -10.0);
    assert!((e.view().scale - 1.1).abs() < EPS);
    let after = e.view().inverse(pointer);
    assert!(before.distance_to(after) < 1e-6, "{before:?} drifted to {after:?}");
}

// ─── Pan ────────────────────────────────────────────────────────────────

#[test]
fn plain_wheel_pans_within_limits() {
    let mut e = editor();
    e.handle_event(PointerEvent::Wheel {
        position: Point::new(200.0, 150.0),
        delta: Vector::new(10_000.0, -10_000.0),
        modifiers: Modifiers::NONE,
    });
    assert_eq!(e.view().scale, 1.0);
    assert_contained(e.view(), BoundingBox::new(0.0, 0.0, 800.0, 600.0), Size::new(400.0, 300.0));
}

#[test]
fn wheel_over_empty_graph_does_nothing() {
    let mut e = editor();
    e.load_graph(Graph::new()).unwrap();
    zoom(&mut e, Point::new(200.0, 150.0), 10.0);
    assert_eq!(*e.view(), ViewTransformation::default());
}
