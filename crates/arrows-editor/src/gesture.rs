//! Mouse gesture state machine.
//!
//! Turns raw canvas-space pointer events into mutations. The machine owns
//! only ephemeral state (what is being dragged, where the pointer was, the
//! drag-to-create and marquee payloads); everything persistent is read from
//! the `GestureContext` and changed by returning `Mutation`s.
//!
//! ## Press resolution
//!
//! | Under the pointer | Effect                                     |
//! |-------------------|--------------------------------------------|
//! | line tool active  | first click records, second click draws    |
//! | handle            | resize/rotate drag                         |
//! | annotation        | select, drag annotation                    |
//! | node              | select, drag node (and selected nodes)     |
//! | relationship      | select                                     |
//! | node ring         | drag-to-create                             |
//! | empty space       | freehand stroke, text, or marquee          |

use crate::drag_to_create::DragToCreate;
use crate::handles::{Corner, HandleLock, TransformationHandles, choose_lock, rotate_positions, scale_positions};
use crate::input::{InterceptedEvent, Modifiers};
use crate::interceptors::{EventHandlers, HandlerContext};
use crate::marquee::Marquee;
use crate::mutation::{GraphMutation, Mutation, NodePosition, SelectionMutation};
use crate::tools::{ApplicationLayout, ToolMutation, snap_line_point};
use arrows_core::constants::{DRAG_THRESHOLD_CANVAS, DRAWING_MIN_POINT_DISTANCE, NEW_TEXT_CONTENT};
use arrows_core::{
    Annotation, AnnotationId, AnnotationKind, EntityRef, Graph, NodeId, Point, Selection,
    SelectionMode, Style, Vector, ViewTransformation,
};
use arrows_render::{Hit, VisualGraph};
use smallvec::SmallVec;
use std::mem;

/// Flat view of the current drag, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragType {
    None,
    Handle,
    HandleRotate,
    HandleScale,
    Node,
    Annotation,
    Drawing,
    NodeRing,
    Canvas,
    Marquee,
}

/// The current drag with its payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    None,
    Handle {
        corner: Corner,
        /// Set by the first move past the drag threshold.
        lock: Option<HandleLock>,
        /// Canvas-space centre of the handle frame at mouse down.
        centre: Point,
        initial_positions: Vec<NodePosition>,
        initial_mouse: Point,
    },
    Node(NodeId),
    Annotation(AnnotationId),
    Drawing(AnnotationId),
    NodeRing(NodeId),
    /// Pressed on empty canvas, not moved yet.
    Canvas,
    Marquee,
}

impl Gesture {
    pub fn drag_type(&self) -> DragType {
        match self {
            Gesture::None => DragType::None,
            Gesture::Handle { lock: None, .. } => DragType::Handle,
            Gesture::Handle {
                lock: Some(HandleLock::Rotate),
                ..
            } => DragType::HandleRotate,
            Gesture::Handle {
                lock: Some(HandleLock::Scale),
                ..
            } => DragType::HandleScale,
            Gesture::Node(_) => DragType::Node,
            Gesture::Annotation(_) => DragType::Annotation,
            Gesture::Drawing(_) => DragType::Drawing,
            Gesture::NodeRing(_) => DragType::NodeRing,
            Gesture::Canvas => DragType::Canvas,
            Gesture::Marquee => DragType::Marquee,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MouseState {
    pub gesture: Gesture,
    /// Canvas position of the press, then of the last applied drag sample.
    pub mouse_position: Point,
    /// Graph position of the press.
    pub mouse_down_position: Point,
    /// Moved past the drag threshold since the press.
    pub dragged: bool,
    /// History epoch the gesture started under.
    pub epoch: u64,
}

impl MouseState {
    pub fn drag_type(&self) -> DragType {
        self.gesture.drag_type()
    }
}

/// Read-only view of editor state for one event.
pub struct GestureContext<'a> {
    pub visual: &'a VisualGraph<'a>,
    pub selection: &'a Selection,
    pub view: &'a ViewTransformation,
    pub layout: &'a ApplicationLayout,
    pub handles: &'a TransformationHandles,
    /// Current history epoch.
    pub epoch: u64,
    pub marquee_includes_annotations: bool,
}

impl GestureContext<'_> {
    fn graph(&self) -> &Graph {
        self.visual.graph()
    }
}

#[derive(Default)]
pub struct GestureMachine {
    mouse: MouseState,
    drag_to_create: DragToCreate,
    marquee: Option<Marquee>,
    handlers: EventHandlers,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn drag_to_create(&self) -> &DragToCreate {
        &self.drag_to_create
    }

    pub fn marquee(&self) -> Option<&Marquee> {
        self.marquee.as_ref()
    }

    pub fn handlers_mut(&mut self) -> &mut EventHandlers {
        &mut self.handlers
    }

    // ─── Mouse down ──────────────────────────────────────────────────────

    pub fn mouse_down(&mut self, ctx: &GestureContext<'_>, canvas: Point, modifiers: Modifiers) -> Vec<Mutation> {
        let graph_position = ctx.view.inverse(canvas);
        let graph = ctx.graph();
        let multi_select = modifiers.multi_select();
        let mode = if multi_select {
            SelectionMode::Xor
        } else {
            SelectionMode::AtLeast
        };
        let mut out: Vec<Mutation> = Vec::new();

        if ctx.layout.line_tool_active() {
            if !multi_select {
                out.push(SelectionMutation::Clear.into());
            }
            self.line_click(ctx, graph_position, &mut out);
            return out;
        }

        if let Some(corner) = ctx.handles.handle_at_point(canvas) {
            let initial_positions = selected_positions(graph, ctx.selection.node_ids());
            let centre = ctx.handles.frame().map_or(canvas, |f| f.center());
            log::debug!("mouse down on {corner:?} handle");
            self.begin(
                Gesture::Handle {
                    corner,
                    lock: None,
                    centre,
                    initial_positions,
                    initial_mouse: canvas,
                },
                canvas,
                graph_position,
                ctx.epoch,
            );
            return out;
        }

        match ctx.visual.entity_at_point(graph_position) {
            Some(Hit::Annotation(id)) => {
                out.push(toggle(EntityRef::Annotation(id), mode));
                self.begin(Gesture::Annotation(id), canvas, graph_position, ctx.epoch);
            }
            Some(Hit::Node(id)) => {
                out.push(toggle(EntityRef::Node(id), mode));
                self.begin(Gesture::Node(id), canvas, graph_position, ctx.epoch);
            }
            Some(Hit::Relationship(id)) => {
                out.push(toggle(EntityRef::Relationship(id), mode));
            }
            Some(Hit::NodeRing(id)) => {
                // Selection may have changed since hover armed the ring
                self.drag_to_create.activate(id, ctx.selection);
                self.begin(Gesture::NodeRing(id), canvas, graph_position, ctx.epoch);
            }
            None => {
                if !multi_select {
                    out.push(SelectionMutation::Clear.into());
                }
                let annotation_id = || {
                    let id = graph.next_annotation_id();
                    if id.is_none() {
                        log::warn!("annotation ids exhausted");
                    }
                    id
                };
                if ctx.layout.drawing_mode {
                    let Some(id) = annotation_id() else {
                        return out;
                    };
                    let stroke = Annotation::drawing(id, Vec::new(), &ctx.layout.drawing_style());
                    out.push(GraphMutation::CreateAnnotation(stroke).into());
                    out.push(GraphMutation::AppendDrawingPoint { id, point: graph_position }.into());
                    self.begin(Gesture::Drawing(id), canvas, graph_position, ctx.epoch);
                } else if ctx.layout.text_mode {
                    let Some(id) = annotation_id() else {
                        return out;
                    };
                    let text = Annotation::text(id, graph_position, NEW_TEXT_CONTENT, &Style::new());
                    out.push(GraphMutation::CreateAnnotation(text).into());
                    out.push(replace_selection(EntityRef::Annotation(id)));
                    out.push(ToolMutation::ToggleTextMode.into());
                } else {
                    self.begin(Gesture::Canvas, canvas, graph_position, ctx.epoch);
                }
            }
        }
        out
    }

    /// Two-click line: the first click records the start point, the second
    /// draws the segment.
    fn line_click(&self, ctx: &GestureContext<'_>, graph_position: Point, out: &mut Vec<Mutation>) {
        let Some(start) = ctx.layout.draw_line_start_point else {
            out.push(ToolMutation::SetDrawLineStartPoint(graph_position).into());
            return;
        };
        let end = snap_line_point(start, graph_position, ctx.layout.draw_snap_mode);
        let Some(id) = ctx.graph().next_annotation_id() else {
            log::warn!("annotation ids exhausted");
            return;
        };
        let line = Annotation::drawing(id, Vec::new(), &ctx.layout.drawing_style());
        out.push(GraphMutation::CreateAnnotation(line).into());
        out.push(GraphMutation::AppendDrawingPoint { id, point: start }.into());
        out.push(GraphMutation::AppendDrawingPoint { id, point: end }.into());
        out.push(replace_selection(EntityRef::Annotation(id)));
        out.push(ToolMutation::ClearDrawLineStartPoint.into());
    }

    fn begin(&mut self, gesture: Gesture, canvas: Point, graph_position: Point, epoch: u64) {
        log::debug!("begin {:?} drag", gesture.drag_type());
        self.mouse = MouseState {
            gesture,
            mouse_position: canvas,
            mouse_down_position: graph_position,
            dragged: false,
            epoch,
        };
    }

    fn is_stale(&self, ctx: &GestureContext<'_>) -> bool {
        self.mouse.gesture != Gesture::None && self.mouse.epoch != ctx.epoch
    }

    // ─── Mouse move ──────────────────────────────────────────────────────

    pub fn mouse_move(&mut self, ctx: &GestureContext<'_>, canvas: Point) -> Vec<Mutation> {
        let graph_position = ctx.view.inverse(canvas);
        let mut out = Vec::new();

        let handler_ctx = HandlerContext {
            mouse: &self.mouse,
            canvas_position: Some(canvas),
            graph_position: Some(graph_position),
            graph: ctx.graph(),
        };
        if self.handlers.run(InterceptedEvent::MouseMove, &handler_ctx, &mut out) {
            return out;
        }
        if self.is_stale(ctx) {
            log::warn!("ignoring move of a {:?} drag begun before undo/redo", self.mouse.drag_type());
            return out;
        }

        let previous = self.mouse.mouse_position;
        let past_threshold =
            self.mouse.dragged || (canvas - previous).length() >= DRAG_THRESHOLD_CANVAS;
        let graph = ctx.graph();

        let gesture = mem::take(&mut self.mouse.gesture);
        self.mouse.gesture = match gesture {
            Gesture::None => {
                self.hover(ctx, graph_position);
                Gesture::None
            }

            Gesture::Handle {
                corner,
                mut lock,
                centre,
                initial_positions,
                initial_mouse,
            } => {
                if past_threshold {
                    let effective = *lock.get_or_insert_with(|| {
                        let chosen = choose_lock(corner, centre, initial_mouse, canvas);
                        log::debug!("handle drag locked to {chosen:?}");
                        out.push(Mutation::BeginDragLock(chosen));
                        chosen
                    });
                    let positions = match effective {
                        HandleLock::Scale => scale_positions(
                            corner,
                            &initial_positions,
                            ctx.view.inverse_vector(canvas - initial_mouse),
                        ),
                        HandleLock::Rotate => rotate_positions(
                            &initial_positions,
                            ctx.view.inverse(initial_mouse),
                            graph_position,
                        ),
                    };
                    out.push(GraphMutation::MoveNodes(positions).into());
                    self.mark_dragged(canvas);
                }
                Gesture::Handle {
                    corner,
                    lock,
                    centre,
                    initial_positions,
                    initial_mouse,
                }
            }

            Gesture::Node(id) => {
                if past_threshold {
                    let delta = ctx.view.inverse_vector(canvas - previous);
                    let positions: Vec<NodePosition> = moving_nodes(id, ctx.selection)
                        .into_iter()
                        .filter_map(|nid| graph.node(nid))
                        .map(|n| NodePosition {
                            node_id: n.id,
                            position: n.position + delta,
                        })
                        .collect();
                    log::trace!("node drag {id}: {} node(s) by {delta:?}", positions.len());
                    if !positions.is_empty() {
                        out.push(GraphMutation::MoveNodes(positions).into());
                    }
                    self.mark_dragged(canvas);
                }
                Gesture::Node(id)
            }

            Gesture::Annotation(id) => {
                if past_threshold {
                    let delta = ctx.view.inverse_vector(canvas - previous);
                    if let Some(m) = graph.annotation(id).map(|a| annotation_move(a, delta)) {
                        out.push(m.into());
                    }
                    self.mark_dragged(canvas);
                }
                Gesture::Annotation(id)
            }

            Gesture::Drawing(id) => {
                if let Some(a) = graph.annotation(id)
                    && a.is_drawing()
                    && should_add_point(a.points(), graph_position)
                {
                    out.push(GraphMutation::AppendDrawingPoint { id, point: graph_position }.into());
                }
                self.mouse.mouse_position = canvas;
                Gesture::Drawing(id)
            }

            Gesture::NodeRing(id) => {
                self.drag_to_create.drag(ctx.visual, graph_position);
                self.mouse.mouse_position = canvas;
                Gesture::NodeRing(id)
            }

            Gesture::Canvas | Gesture::Marquee => {
                self.marquee = Some(Marquee::new(self.mouse.mouse_down_position, graph_position));
                self.mouse.mouse_position = canvas;
                Gesture::Marquee
            }
        };
        out
    }

    /// Idle pointer over a ring arms drag-to-create; leaving disarms it.
    fn hover(&mut self, ctx: &GestureContext<'_>, graph_position: Point) {
        match ctx.visual.entity_at_point(graph_position) {
            Some(Hit::NodeRing(id)) => {
                if self.drag_to_create.source_node_id != Some(id) {
                    self.drag_to_create.activate(id, ctx.selection);
                }
            }
            _ => {
                if self.drag_to_create.is_active() {
                    self.drag_to_create.deactivate();
                }
            }
        }
    }

    fn mark_dragged(&mut self, canvas: Point) {
        self.mouse.dragged = true;
        self.mouse.mouse_position = canvas;
    }

    // ─── Mouse up ────────────────────────────────────────────────────────

    pub fn mouse_up(&mut self, ctx: &GestureContext<'_>) -> Vec<Mutation> {
        let mut out = Vec::new();
        let handler_ctx = HandlerContext {
            mouse: &self.mouse,
            canvas_position: None,
            graph_position: None,
            graph: ctx.graph(),
        };
        let prevented = self.handlers.run(InterceptedEvent::MouseUp, &handler_ctx, &mut out);
        let stale = self.is_stale(ctx);
        if stale {
            log::warn!("dropping {:?} drag begun before undo/redo", self.mouse.drag_type());
        }

        let gesture = mem::take(&mut self.mouse.gesture);
        if !prevented && !stale {
            self.finish(ctx, &gesture, &mut out);
        }
        if let Gesture::Handle { lock: Some(_), .. } = gesture {
            out.push(Mutation::EndDragLock);
        }
        self.end_drag();
        out
    }

    fn finish(&self, ctx: &GestureContext<'_>, gesture: &Gesture, out: &mut Vec<Mutation>) {
        let graph = ctx.graph();
        match gesture {
            Gesture::Marquee => {
                if let Some(marquee) = &self.marquee {
                    out.push(marquee.select(ctx.visual, ctx.marquee_includes_annotations).into());
                }
            }
            Gesture::Handle { .. } if self.mouse.dragged => {
                let positions = selected_positions(graph, ctx.selection.node_ids());
                out.push(GraphMutation::MoveNodesEndDrag(positions).into());
            }
            Gesture::Node(id) if self.mouse.dragged => {
                let positions = selected_positions(graph, moving_nodes(*id, ctx.selection));
                out.push(GraphMutation::MoveNodesEndDrag(positions).into());
            }
            Gesture::Drawing(id) => {
                if graph.annotation(*id).is_some_and(Annotation::is_degenerate_drawing) {
                    log::debug!("discarding accidental stroke {id}");
                    out.push(GraphMutation::DeleteAnnotation(*id).into());
                }
            }
            Gesture::NodeRing(_) => {
                if let Some(m) = self.drag_to_create.finish(graph) {
                    out.push(m.into());
                }
            }
            _ => {}
        }
    }

    /// Back to idle. Runs after every mouse up whatever happened before.
    fn end_drag(&mut self) {
        self.mouse = MouseState {
            mouse_position: self.mouse.mouse_position,
            ..MouseState::default()
        };
        self.marquee = None;
        self.drag_to_create.deactivate();
    }

    // ─── One-shot actions ────────────────────────────────────────────────

    /// Ctrl/cmd + wheel zooms about the pointer, a bare wheel pans.
    pub fn wheel(&self, ctx: &GestureContext<'_>, canvas: Point, delta: Vector, modifiers: Modifiers) -> Vec<Mutation> {
        let Some(content) = ctx.visual.bounding_box() else {
            log::trace!("wheel over empty graph ignored");
            return Vec::new();
        };
        let canvas_size = ctx.layout.canvas_size();
        let next = if modifiers.zoom() {
            ctx.view.wheel_zoom(content, canvas_size, canvas, delta.dy)
        } else {
            ctx.view.wheel_pan(content, canvas_size, delta)
        };
        vec![Mutation::AdjustViewport {
            scale: next.scale,
            offset: next.offset,
        }]
    }

    /// Start inline editing of whatever selectable entity is under the
    /// pointer.
    pub fn double_click(&self, ctx: &GestureContext<'_>, canvas: Point) -> Vec<Mutation> {
        let graph_position = ctx.view.inverse(canvas);
        ctx.visual
            .entity_at_point(graph_position)
            .and_then(|hit| hit.entity())
            .map(|entity| Mutation::Selection(SelectionMutation::ActivateEditing(entity)))
            .into_iter()
            .collect()
    }
}

fn toggle(entity: EntityRef, mode: SelectionMode) -> Mutation {
    SelectionMutation::Toggle {
        entities: vec![entity],
        mode,
    }
    .into()
}

fn replace_selection(entity: EntityRef) -> Mutation {
    toggle(entity, SelectionMode::Replace)
}

/// A dragged node carries the selection with it only if it is selected.
fn moving_nodes(dragged: NodeId, selection: &Selection) -> SmallVec<[NodeId; 4]> {
    if selection.node_selected(dragged) {
        selection.node_ids().collect()
    } else {
        SmallVec::from_elem(dragged, 1)
    }
}

fn selected_positions(graph: &Graph, ids: impl IntoIterator<Item = NodeId>) -> Vec<NodePosition> {
    ids.into_iter()
        .filter_map(|id| graph.node(id))
        .map(|n| NodePosition {
            node_id: n.id,
            position: n.position,
        })
        .collect()
}

fn annotation_move(annotation: &Annotation, delta: Vector) -> GraphMutation {
    match &annotation.kind {
        AnnotationKind::Drawing { .. } => GraphMutation::TranslateDrawingAnnotation {
            id: annotation.id,
            delta,
        },
        AnnotationKind::Text { position, .. } => GraphMutation::MoveAnnotation {
            id: annotation.id,
            position: *position + delta,
        },
    }
}

/// Skip samples too close to the last recorded stroke point.
fn should_add_point(points: &[Point], next: Point) -> bool {
    points
        .last()
        .is_none_or(|last| last.distance_to(next) >= DRAWING_MIN_POINT_DISTANCE)
}
