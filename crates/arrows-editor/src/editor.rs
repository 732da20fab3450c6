//! Application state and the event loop around it.
//!
//! `Editor` owns the single source of truth for every piece of state the
//! canvas touches: graph history, selection, viewport, tool modes and the
//! gesture machine. Each pointer event is turned into a list of
//! `Mutation`s by the gesture machine, then applied in order through
//! [`Editor::dispatch`]. Hosts that keep their own store can skip the
//! editor and drive [`GestureMachine`] directly.

use crate::commands::CommandStack;
use crate::config::EditorConfig;
use crate::gesture::{GestureContext, GestureMachine};
use crate::handles::{HandleLock, TransformationHandles};
use crate::input::{InterceptedEvent, Modifiers, PointerEvent};
use crate::interceptors::{HandlerContext, HandlerId};
use crate::mutation::{GraphMutation, Mutation};
use crate::tools::ApplicationLayout;
use arrows_core::{EntityRef, Graph, GraphError, Point, Selection, Vector, ViewTransformation};
use arrows_render::{GraphLayout, StraightLayout};

/// Node radius used when no renderer geometry is supplied.
const FALLBACK_NODE_RADIUS: f64 = 50.0;

pub struct Editor {
    history: CommandStack,
    selection: Selection,
    view: ViewTransformation,
    layout: ApplicationLayout,
    config: EditorConfig,
    machine: GestureMachine,
    /// Resolves the current graph into hit-testable geometry.
    geometry: Box<dyn GraphLayout>,
    /// Handle drag mode while one is locked in.
    drag_lock: Option<HandleLock>,
}

impl Editor {
    pub fn new(config: EditorConfig, layout: ApplicationLayout, geometry: Box<dyn GraphLayout>) -> Self {
        Self {
            history: CommandStack::new(Graph::new(), config.undo_depth),
            selection: Selection::new(),
            view: ViewTransformation::default(),
            layout,
            config,
            machine: GestureMachine::new(),
            geometry,
            drag_lock: None,
        }
    }

    /// Default configuration and straight-line geometry around `graph`.
    pub fn with_graph(graph: Graph) -> Self {
        let mut editor = Self::new(
            EditorConfig::default(),
            ApplicationLayout::default(),
            Box::new(StraightLayout::new(FALLBACK_NODE_RADIUS)),
        );
        editor.history = CommandStack::new(graph, editor.config.undo_depth);
        editor
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn graph(&self) -> &Graph {
        self.history.present()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewTransformation {
        &self.view
    }

    pub fn layout(&self) -> &ApplicationLayout {
        &self.layout
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    pub fn machine(&self) -> &GestureMachine {
        &self.machine
    }

    pub fn drag_lock(&self) -> Option<HandleLock> {
        self.drag_lock
    }

    pub fn set_view(&mut self, view: ViewTransformation) {
        self.view = view;
    }

    /// Handles for the current selection, in canvas space.
    pub fn transformation_handles(&self) -> TransformationHandles {
        let visual = self.geometry.visual_graph(self.history.present());
        TransformationHandles::for_selection(&visual, &self.selection, &self.view)
    }

    /// Replace the graph after checking its integrity. History is cleared
    /// and any gesture in flight becomes stale.
    pub fn load_graph(&mut self, graph: Graph) -> Result<(), GraphError> {
        graph.validate()?;
        log::debug!(
            "loading graph: {} nodes, {} relationships, {} annotations",
            graph.nodes.len(),
            graph.relationships.len(),
            graph.annotations.len()
        );
        self.history.reset(graph);
        self.prune_selection();
        Ok(())
    }

    pub fn register_handler(
        &mut self,
        event: InterceptedEvent,
        handler: impl FnMut(&HandlerContext<'_>, &mut Vec<Mutation>) -> bool + 'static,
    ) -> HandlerId {
        self.machine.handlers_mut().register(event, handler)
    }

    pub fn unregister_handler(&mut self, id: HandlerId) -> bool {
        self.machine.handlers_mut().unregister(id)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one mutation to the state it targets.
    pub fn dispatch(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::Graph(m) => self.apply_graph(&m),
            Mutation::Selection(m) => self.selection = m.apply(&self.selection),
            Mutation::AdjustViewport { scale, offset } => {
                self.view = ViewTransformation::new(scale, offset);
            }
            Mutation::Tool(m) => self.layout.apply(&m),
            Mutation::BeginDragLock(lock) => self.drag_lock = Some(lock),
            Mutation::EndDragLock => self.drag_lock = None,
        }
    }

    pub fn dispatch_all(&mut self, mutations: impl IntoIterator<Item = Mutation>) {
        for m in mutations {
            self.dispatch(m);
        }
    }

    fn apply_graph(&mut self, mutation: &GraphMutation) {
        if self.history.execute(mutation) {
            self.prune_selection();
        }
    }

    /// Drop selected entities that no longer exist.
    fn prune_selection(&mut self) {
        let graph = self.history.present();
        let pruned = self.selection.retain(|e| match e {
            EntityRef::Node(id) => graph.node(id).is_some(),
            EntityRef::Relationship(id) => graph.relationship(id).is_some(),
            EntityRef::Annotation(id) => graph.annotation(id).is_some(),
        });
        self.selection = pruned;
    }

    pub fn undo(&mut self) -> Option<&'static str> {
        let description = self.history.undo()?;
        self.prune_selection();
        Some(description)
    }

    pub fn redo(&mut self) -> Option<&'static str> {
        let description = self.history.redo()?;
        self.prune_selection();
        Some(description)
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, modifiers } => self.mouse_down(position, modifiers),
            PointerEvent::Move { position } => self.mouse_move(position),
            PointerEvent::Up => self.mouse_up(),
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.wheel(position, delta, modifiers),
            PointerEvent::DoubleClick { position } => self.double_click(position),
        }
    }

    pub fn mouse_down(&mut self, canvas: Point, modifiers: Modifiers) {
        let out = self.run_gesture(|machine, ctx| machine.mouse_down(ctx, canvas, modifiers));
        self.dispatch_all(out);
    }

    pub fn mouse_move(&mut self, canvas: Point) {
        let out = self.run_gesture(|machine, ctx| machine.mouse_move(ctx, canvas));
        self.dispatch_all(out);
    }

    /// Ends the gesture. The open undo group is sealed so the next drag is
    /// its own step.
    pub fn mouse_up(&mut self) {
        let out = self.run_gesture(|machine, ctx| machine.mouse_up(ctx));
        self.dispatch_all(out);
        self.history.seal();
    }

    pub fn wheel(&mut self, canvas: Point, delta: Vector, modifiers: Modifiers) {
        let out = self.run_gesture(|machine, ctx| machine.wheel(ctx, canvas, delta, modifiers));
        self.dispatch_all(out);
    }

    pub fn double_click(&mut self, canvas: Point) {
        let out = self.run_gesture(|machine, ctx| machine.double_click(ctx, canvas));
        self.dispatch_all(out);
    }

    /// Resolve geometry for the present graph and hand the machine a
    /// read-only view of everything else.
    fn run_gesture<F>(&mut self, f: F) -> Vec<Mutation>
    where
        F: FnOnce(&mut GestureMachine, &GestureContext<'_>) -> Vec<Mutation>,
    {
        let Editor {
            history,
            selection,
            view,
            layout,
            config,
            machine,
            geometry,
            ..
        } = self;
        let visual = geometry.visual_graph(history.present());
        let handles = TransformationHandles::for_selection(&visual, selection, view);
        let ctx = GestureContext {
            visual: &visual,
            selection: &*selection,
            view: &*view,
            layout: &*layout,
            handles: &handles,
            epoch: history.epoch(),
            marquee_includes_annotations: config.marquee_includes_annotations,
        };
        f(machine, &ctx)
    }
}
