//! Extension point: external handlers that run before the built-in
//! mouse-move and mouse-up logic and may claim the event.

use crate::gesture::MouseState;
use crate::input::InterceptedEvent;
use crate::mutation::Mutation;
use arrows_core::{Graph, Point};

/// What a handler gets to look at.
pub struct HandlerContext<'a> {
    pub mouse: &'a MouseState,
    /// Absent for mouse up.
    pub canvas_position: Option<Point>,
    pub graph_position: Option<Point>,
    pub graph: &'a Graph,
}

/// Returns `true` to skip the built-in handling of this event. Mutations
/// pushed onto the sink are applied either way.
pub type EventHandler = Box<dyn FnMut(&HandlerContext<'_>, &mut Vec<Mutation>) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

#[derive(Default)]
pub struct EventHandlers {
    next_id: u64,
    handlers: Vec<(HandlerId, InterceptedEvent, EventHandler)>,
}

impl EventHandlers {
    pub fn register(
        &mut self,
        event: InterceptedEvent,
        handler: impl FnMut(&HandlerContext<'_>, &mut Vec<Mutation>) -> bool + 'static,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, event, Box::new(handler)));
        id
    }

    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _, _)| *h != id);
        self.handlers.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler for `event` in registration order. All of them
    /// run even after one has claimed the event.
    pub fn run(
        &mut self,
        event: InterceptedEvent,
        ctx: &HandlerContext<'_>,
        sink: &mut Vec<Mutation>,
    ) -> bool {
        let mut prevented = false;
        for (_, kind, handler) in self.handlers.iter_mut() {
            if *kind == event {
                prevented |= handler(ctx, sink);
            }
        }
        if prevented {
            log::trace!("{event:?} claimed by an interceptor");
        }
        prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::SelectionMutation;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ctx<'a>(mouse: &'a MouseState, graph: &'a Graph) -> HandlerContext<'a> {
        HandlerContext {
            mouse,
            canvas_position: None,
            graph_position: None,
            graph,
        }
    }

    #[test]
    fn every_handler_runs_and_any_can_prevent() {
        let calls = Rc::new(Cell::new(0));
        let mut handlers = EventHandlers::default();
        for claim in [true, false] {
            let calls = calls.clone();
            handlers.register(InterceptedEvent::MouseUp, move |_, sink| {
                calls.set(calls.get() + 1);
                sink.push(SelectionMutation::Clear.into());
                claim
            });
        }

        let (mouse, graph) = (MouseState::default(), Graph::new());
        let mut sink = Vec::new();
        assert!(handlers.run(InterceptedEvent::MouseUp, &ctx(&mouse, &graph), &mut sink));
        assert_eq!(calls.get(), 2);
        assert_eq!(sink.len(), 2);

        // Only handlers for the matching event run
        assert!(!handlers.run(InterceptedEvent::MouseMove, &ctx(&mouse, &graph), &mut sink));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn unregister_removes_handler() {
        let mut handlers = EventHandlers::default();
        let id = handlers.register(InterceptedEvent::MouseMove, |_, _| true);
        assert!(handlers.unregister(id));
        assert!(!handlers.unregister(id));
        assert!(handlers.is_empty());
    }
}
