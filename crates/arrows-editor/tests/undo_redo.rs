//! Integration tests: undo history as driven by real gestures.
//!
//! Drags emit many samples; these tests check that history sees one step
//! per gesture and that undo/redo restore whole snapshots.

use arrows_core::{AnnotationId, Graph, Node, NodeId, Point, Style};
use arrows_editor::{
    ApplicationLayout, Editor, EditorConfig, GraphMutation, NodePosition, PointerEvent, ToolMutation,
};
use arrows_render::StraightLayout;
use pretty_assertions::assert_eq;

fn editor_with_depth(depth: usize) -> Editor {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = EditorConfig {
        undo_depth: depth,
        ..EditorConfig::default()
    };
    let mut e = Editor::new(config, ApplicationLayout::default(), Box::new(StraightLayout::new(20.0)));
    e.load_graph(Graph {
        nodes: vec![
            Node::new(NodeId(0), Point::new(100.0, 100.0)),
            Node::new(NodeId(1), Point::new(400.0, 100.0)),
        ],
        ..Graph::default()
    })
    .unwrap();
    e
}

fn editor() -> Editor {
    editor_with_depth(200)
}

fn drag(e: &mut Editor, path: &[(f64, f64)]) {
    let Some((&(x, y), rest)) = path.split_first() else {
        return;
    };
    e.handle_event(PointerEvent::down(x, y));
    for &(x, y) in rest {
        e.handle_event(PointerEvent::moved(x, y));
    }
    e.handle_event(PointerEvent::Up);
}

fn position(e: &Editor, id: u32) -> Point {
    e.graph().node(NodeId(id)).map(|n| n.position).unwrap()
}

// ─── Grouping ───────────────────────────────────────────────────────────

#[test]
fn three_move_samples_are_one_step() {
    let mut e = editor();
    drag(&mut e, &[(100.0, 100.0), (110.0, 100.0), (120.0, 100.0), (130.0, 100.0)]);
    assert_eq!(position(&e, 0), Point::new(130.0, 100.0));
    assert_eq!(e.history().undo_depth(), 1);

    assert_eq!(e.undo(), Some("move nodes"));
    assert_eq!(position(&e, 0), Point::new(100.0, 100.0));
    assert!(!e.history().can_undo());
}

#[test]
fn move_then_unrelated_mutation_is_two_steps() {
    let mut e = editor();
    e.handle_event(PointerEvent::down(100.0, 100.0));
    e.handle_event(PointerEvent::moved(120.0, 100.0));
    e.dispatch(GraphMutation::SetGraphStyle(Style::new().with("nodeColor", "#cccccc")).into());
    assert_eq!(e.history().undo_depth(), 2);
    e.handle_event(PointerEvent::Up);

    e.undo();
    assert_eq!(e.graph().style, Style::new());
    assert_eq!(position(&e, 0), Point::new(120.0, 100.0));
}

#[test]
fn separate_drags_are_separate_steps() {
    let mut e = editor();
    drag(&mut e, &[(100.0, 100.0), (150.0, 100.0)]);
    drag(&mut e, &[(150.0, 100.0), (200.0, 100.0)]);
    assert_eq!(e.history().undo_depth(), 2);
    e.undo();
    assert_eq!(position(&e, 0), Point::new(150.0, 100.0));
}

#[test]
fn whole_stroke_undoes_at_once() {
    let mut e = editor();
    e.dispatch(ToolMutation::ToggleDrawingMode.into());
    drag(
        &mut e,
        &[(600.0, 600.0), (610.0, 600.0), (620.0, 610.0), (630.0, 630.0)],
    );
    assert_eq!(e.graph().annotation(AnnotationId(0)).map(|a| a.points().len()), Some(4));
    assert_eq!(e.history().undo_depth(), 1);

    assert_eq!(e.undo(), Some("draw"));
    assert!(e.graph().annotations.is_empty());
}

#[test]
fn accidental_click_leaves_no_history() {
    let mut e = editor();
    e.dispatch(ToolMutation::ToggleDrawingMode.into());
    drag(&mut e, &[(600.0, 600.0)]);
    assert!(e.graph().annotations.is_empty());
    assert_eq!(e.history().undo_depth(), 0);
}

#[test]
fn click_without_drag_leaves_no_history() {
    let mut e = editor();
    drag(&mut e, &[(100.0, 100.0)]);
    assert_eq!(e.history().undo_depth(), 0);
}

// ─── Redo ───────────────────────────────────────────────────────────────

#[test]
fn redo_replays_the_drag() {
    let mut e = editor();
    drag(&mut e, &[(100.0, 100.0), (140.0, 100.0)]);
    e.undo();
    assert_eq!(e.redo(), Some("move nodes"));
    assert_eq!(position(&e, 0), Point::new(140.0, 100.0));
    assert_eq!(e.redo(), None);
}

#[test]
fn new_mutation_clears_redo() {
    let mut e = editor();
    drag(&mut e, &[(100.0, 100.0), (140.0, 100.0)]);
    e.undo();
    e.dispatch(
        GraphMutation::MoveNodes(vec![NodePosition {
            node_id: NodeId(1),
            position: Point::new(0.0, 0.0),
        }])
        .into(),
    );
    assert!(!e.history().can_redo());
}

#[test]
fn delete_undo_restores_relationships() {
    let mut e = editor();
    drag(&mut e, &[(75.0, 100.0), (400.0, 125.0)]);
    assert_eq!(e.graph().relationships.len(), 1);

    e.dispatch(GraphMutation::DeleteNodes(vec![NodeId(1)]).into());
    assert!(e.graph().relationships.is_empty());
    e.undo();
    assert_eq!(e.graph().relationships.len(), 1);
    assert_eq!(e.graph().nodes.len(), 2);
}

// ─── Limits ─────────────────────────────────────────────────────────────

#[test]
fn history_is_bounded() {
    let mut e = editor_with_depth(2);
    for x in [150.0, 200.0, 250.0] {
        let from = position(&e, 0);
        drag(&mut e, &[(from.x, from.y), (x, 100.0)]);
    }
    assert_eq!(e.history().undo_depth(), 2);
    while e.undo().is_some() {}
    assert_eq!(position(&e, 0), Point::new(150.0, 100.0));
}
